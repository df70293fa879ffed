//! The four collections as one document.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{InventoryPool, Order, Rider, Supervisor, ValidationError};

/// Complete store state.
///
/// Also the export format: `{supervisors, riders, inventory, orders}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Collections {
    #[serde(default)]
    pub supervisors: Vec<Supervisor>,
    #[serde(default)]
    pub riders: Vec<Rider>,
    #[serde(default)]
    pub inventory: InventoryPool,
    #[serde(default)]
    pub orders: Vec<Order>,
}

impl Collections {
    /// Encodes the collections as indented JSON.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Decodes a document produced by [`Collections::to_pretty_json`].
    pub fn from_json(document: &str) -> serde_json::Result<Self> {
        serde_json::from_str(document)
    }

    /// Checks the invariants the store keeps for its own mutations.
    ///
    /// Supervisor codes, rider codes and order ids must be unique, and every
    /// rider must hold at least one t-shirt.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut seen = HashSet::new();
        for supervisor in &self.supervisors {
            if !seen.insert(supervisor.code.as_str()) {
                return Err(ValidationError::DuplicateCode {
                    kind: "Supervisor",
                    code: supervisor.code.to_string(),
                });
            }
        }

        let mut seen = HashSet::new();
        for rider in &self.riders {
            if !seen.insert(rider.code.as_str()) {
                return Err(ValidationError::DuplicateCode {
                    kind: "Rider",
                    code: rider.code.to_string(),
                });
            }
            if rider.tshirt_quantity < 1 {
                return Err(ValidationError::InvalidTshirtQuantity {
                    quantity: rider.tshirt_quantity,
                });
            }
        }

        let mut seen = HashSet::new();
        for order in &self.orders {
            if !seen.insert(order.id) {
                return Err(ValidationError::DuplicateCode {
                    kind: "Order",
                    code: order.id.to_string(),
                });
            }
        }
        Ok(())
    }
}
