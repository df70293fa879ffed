//! Domain error types.

use storage::StorageError;
use thiserror::Error;

use common::OrderId;

use crate::{DeductionType, Money};
use crate::order::OrderError;

/// Input rejected while building an entity from a form or import row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is empty.
    #[error("{field} is required")]
    MissingField { field: &'static str },

    /// An entity with the same code already exists.
    #[error("{kind} code already exists: {code}")]
    DuplicateCode { kind: &'static str, code: String },

    /// T-shirt quantity below one.
    #[error("Invalid t-shirt quantity: {quantity} (must be at least 1)")]
    InvalidTshirtQuantity { quantity: u32 },

    /// Vehicle type is neither motorcycle nor bicycle.
    #[error("Unknown vehicle type: {0}")]
    UnknownVehicleType(String),

    /// An order requests nothing.
    #[error("Order requests no equipment")]
    EmptyOrder,

    /// A negative deduction was submitted while credits are disabled.
    #[error("Negative deduction amount not allowed: {amount}")]
    NegativeAmount { amount: Money },

    /// Adding the amount would overflow the running total.
    #[error("Deduction of {amount} would overflow the {kind} total")]
    AmountOutOfRange { kind: DeductionType, amount: Money },

    /// The largest order id is taken.
    #[error("No order id left after {last}")]
    OrderIdsExhausted { last: OrderId },
}

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The input failed validation; nothing was changed.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// An order transition or approval failed.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// No entity with the given key.
    #[error("{kind} not found: {key}")]
    NotFound { kind: &'static str, key: String },

    /// Writing or reading a document failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DomainError {
    pub(crate) fn supervisor_not_found(code: impl std::fmt::Display) -> Self {
        DomainError::NotFound {
            kind: "Supervisor",
            key: code.to_string(),
        }
    }

    pub(crate) fn rider_not_found(code: impl std::fmt::Display) -> Self {
        DomainError::NotFound {
            kind: "Rider",
            key: code.to_string(),
        }
    }

    pub(crate) fn order_not_found(id: impl std::fmt::Display) -> Self {
        DomainError::NotFound {
            kind: "Order",
            key: id.to_string(),
        }
    }
}
