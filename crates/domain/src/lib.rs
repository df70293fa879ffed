//! Domain layer for the equipment management system.
//!
//! This crate provides:
//! - Supervisors, riders and the central inventory pool
//! - Equipment orders with approval/rejection against the pool
//! - The per-rider deduction ledger
//! - Bulk rider import and the export document
//! - `EquipmentStore`, which owns all four collections and persists them

pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod inventory;
pub mod order;
pub mod rider;
pub mod store;
pub mod supervisor;
pub mod value_objects;

pub use common::OrderId;
pub use config::{RejectPolicy, StoreConfig};
pub use error::{DomainError, ValidationError};
pub use export::Collections;
pub use import::{ImportReport, RiderRow, SkippedRow, parse_rider_rows};
pub use inventory::{EquipmentCounts, EquipmentItem, InventoryPool};
pub use order::{Order, OrderError, OrderStatus};
pub use rider::{DeductionEntry, DeductionType, Deductions, Rider, RiderForm, VehicleType};
pub use store::{EquipmentStore, Overview};
pub use supervisor::{Supervisor, SupervisorForm};
pub use value_objects::{Money, RiderCode, SupervisorCode};
