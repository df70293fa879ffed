//! Order status state machine.

use serde::{Deserialize, Serialize};

/// The status of an equipment order.
///
/// State transitions:
/// ```text
/// Pending ──┬──► Approved
///           └──► Rejected
/// ```
/// Rejection of an approved order is governed by
/// [`RejectPolicy`](crate::RejectPolicy).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Awaiting a decision.
    #[default]
    Pending,

    /// Quantities were drawn from the pool.
    Approved,

    /// Request declined.
    Rejected,
}

impl OrderStatus {
    /// Returns true if the order can be approved in this state.
    pub fn can_approve(&self) -> bool {
        matches!(self, OrderStatus::Pending)
    }

    /// Returns true if no decision has been made yet.
    pub fn is_pending(&self) -> bool {
        matches!(self, OrderStatus::Pending)
    }

    /// Returns the status name as stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Approved => "approved",
            OrderStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status_is_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }

    #[test]
    fn test_only_pending_can_approve() {
        assert!(OrderStatus::Pending.can_approve());
        assert!(!OrderStatus::Approved.can_approve());
        assert!(!OrderStatus::Rejected.can_approve());
    }

    #[test]
    fn test_serialization() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Approved).unwrap(),
            "\"approved\""
        );
        let status: OrderStatus = serde_json::from_str("\"rejected\"").unwrap();
        assert_eq!(status, OrderStatus::Rejected);
    }
}
