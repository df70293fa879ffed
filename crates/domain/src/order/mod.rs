//! Equipment orders and their reconciliation against the pool.

mod state;

pub use state::OrderStatus;

use common::OrderId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{EquipmentCounts, EquipmentItem, InventoryPool, RejectPolicy, SupervisorCode};
use crate::{ValidationError, inventory::Shortfall};

/// Errors that can occur during order transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Order is not in a state that allows the action.
    #[error("Invalid state transition: cannot {action} from {current_state} state")]
    InvalidStateTransition {
        current_state: OrderStatus,
        action: &'static str,
    },

    /// The pool cannot cover a requested quantity.
    #[error("Insufficient inventory: {item} requested {requested}, available {available}")]
    InsufficientInventory {
        item: EquipmentItem,
        requested: u32,
        available: u32,
    },
}

impl From<Shortfall> for OrderError {
    fn from(s: Shortfall) -> Self {
        OrderError::InsufficientInventory {
            item: s.item,
            requested: s.requested,
            available: s.available,
        }
    }
}

/// A supervisor's request to draw equipment from the pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    /// Not checked against the supervisors collection.
    #[serde(default)]
    pub supervisor_code: SupervisorCode,
    #[serde(flatten)]
    pub quantities: EquipmentCounts,
    #[serde(default)]
    pub status: OrderStatus,
}

impl Order {
    /// Creates a pending order.
    ///
    /// Fails if every requested quantity is zero.
    pub fn request(
        id: OrderId,
        supervisor_code: SupervisorCode,
        quantities: EquipmentCounts,
    ) -> Result<Self, ValidationError> {
        if quantities.is_empty() {
            return Err(ValidationError::EmptyOrder);
        }

        Ok(Self {
            id,
            supervisor_code,
            quantities,
            status: OrderStatus::Pending,
        })
    }

    /// Approves the order, drawing its quantities from `pool`.
    ///
    /// The check runs against the pool as it is now. On any shortfall neither
    /// the pool nor the order changes.
    pub fn approve(&mut self, pool: &mut InventoryPool) -> Result<(), OrderError> {
        if !self.status.can_approve() {
            return Err(OrderError::InvalidStateTransition {
                current_state: self.status,
                action: "approve",
            });
        }

        pool.ensure_covers(&self.quantities)?;

        for item in EquipmentItem::ALL {
            pool.adjust(item, -i64::from(self.quantities.get(item)));
        }
        self.status = OrderStatus::Approved;
        Ok(())
    }

    /// Rejects the order according to `policy`.
    pub fn reject(
        &mut self,
        pool: &mut InventoryPool,
        policy: RejectPolicy,
    ) -> Result<(), OrderError> {
        match (policy, self.status) {
            (_, OrderStatus::Pending) | (RejectPolicy::Unconditional, _) => {}
            (RejectPolicy::RestoreInventory, OrderStatus::Approved) => {
                for item in EquipmentItem::ALL {
                    pool.adjust(item, i64::from(self.quantities.get(item)));
                }
            }
            (_, current_state) => {
                return Err(OrderError::InvalidStateTransition {
                    current_state,
                    action: "reject",
                });
            }
        }

        self.status = OrderStatus::Rejected;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(m: u32, b: u32, t: u32) -> InventoryPool {
        InventoryPool::new(EquipmentCounts::new(m, b, t))
    }

    fn order(m: u32, b: u32, t: u32) -> Order {
        Order::request(
            OrderId::from_raw(1),
            SupervisorCode::new("S1"),
            EquipmentCounts::new(m, b, t),
        )
        .unwrap()
    }

    #[test]
    fn test_request_creates_pending_order() {
        let o = order(2, 1, 3);
        assert_eq!(o.status, OrderStatus::Pending);
        assert_eq!(o.quantities.total(), 6);
    }

    #[test]
    fn test_request_nothing_fails() {
        let result = Order::request(
            OrderId::from_raw(1),
            SupervisorCode::new("S1"),
            EquipmentCounts::zero(),
        );
        assert_eq!(result, Err(ValidationError::EmptyOrder));
    }

    #[test]
    fn test_approve_draws_exact_quantities() {
        let mut p = pool(5, 5, 5);
        let mut o = order(2, 1, 3);

        o.approve(&mut p).unwrap();

        assert_eq!(p.counts(), EquipmentCounts::new(3, 4, 2));
        assert_eq!(o.status, OrderStatus::Approved);
    }

    #[test]
    fn test_approve_exact_stock_empties_pool() {
        let mut p = pool(2, 1, 3);
        let mut o = order(2, 1, 3);
        o.approve(&mut p).unwrap();
        assert!(p.counts().is_empty());
    }

    #[test]
    fn test_approve_insufficient_changes_nothing() {
        let mut p = pool(5, 5, 5);
        let mut o = order(6, 0, 0);

        let err = o.approve(&mut p).unwrap_err();

        assert_eq!(
            err,
            OrderError::InsufficientInventory {
                item: EquipmentItem::MotorcyclePouches,
                requested: 6,
                available: 5,
            }
        );
        assert_eq!(p.counts(), EquipmentCounts::new(5, 5, 5));
        assert_eq!(o.status, OrderStatus::Pending);
    }

    #[test]
    fn test_approve_twice_fails() {
        let mut p = pool(10, 10, 10);
        let mut o = order(1, 1, 1);
        o.approve(&mut p).unwrap();

        let err = o.approve(&mut p).unwrap_err();
        assert!(matches!(err, OrderError::InvalidStateTransition { .. }));
        assert_eq!(p.counts(), EquipmentCounts::new(9, 9, 9));
    }

    #[test]
    fn test_unconditional_reject_of_approved_keeps_deduction() {
        let mut p = pool(5, 5, 5);
        let mut o = order(2, 1, 3);
        o.approve(&mut p).unwrap();

        o.reject(&mut p, RejectPolicy::Unconditional).unwrap();

        assert_eq!(o.status, OrderStatus::Rejected);
        assert_eq!(p.counts(), EquipmentCounts::new(3, 4, 2));
    }

    #[test]
    fn test_pending_only_refuses_decided_orders() {
        let mut p = pool(5, 5, 5);
        let mut o = order(1, 0, 0);
        o.approve(&mut p).unwrap();

        let err = o.reject(&mut p, RejectPolicy::PendingOnly).unwrap_err();
        assert_eq!(
            err,
            OrderError::InvalidStateTransition {
                current_state: OrderStatus::Approved,
                action: "reject",
            }
        );
        assert_eq!(o.status, OrderStatus::Approved);
    }

    #[test]
    fn test_restore_inventory_returns_quantities() {
        let mut p = pool(5, 5, 5);
        let mut o = order(2, 1, 3);
        o.approve(&mut p).unwrap();

        o.reject(&mut p, RejectPolicy::RestoreInventory).unwrap();

        assert_eq!(o.status, OrderStatus::Rejected);
        assert_eq!(p.counts(), EquipmentCounts::new(5, 5, 5));

        let err = o.reject(&mut p, RejectPolicy::RestoreInventory).unwrap_err();
        assert!(matches!(err, OrderError::InvalidStateTransition { .. }));
    }

    #[test]
    fn test_reject_pending_under_every_policy() {
        for policy in [
            RejectPolicy::Unconditional,
            RejectPolicy::PendingOnly,
            RejectPolicy::RestoreInventory,
        ] {
            let mut p = pool(5, 5, 5);
            let mut o = order(1, 1, 1);
            o.reject(&mut p, policy).unwrap();
            assert_eq!(o.status, OrderStatus::Rejected);
            assert_eq!(p.counts(), EquipmentCounts::new(5, 5, 5));
        }
    }

    #[test]
    fn test_document_shape_is_flat() {
        let o = order(2, 0, 1);
        let json = serde_json::to_value(&o).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "supervisorCode": "S1",
                "motorcyclePouches": 2,
                "bicyclePouches": 0,
                "tshirts": 1,
                "status": "pending"
            })
        );
        let back: Order = serde_json::from_value(json).unwrap();
        assert_eq!(back, o);
    }
}
