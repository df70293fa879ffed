use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Unique identifier for an equipment order.
///
/// Derived from the wall clock (milliseconds since the Unix epoch) so ids
/// sort in creation order and stay readable in exported documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    /// Creates an order ID from the current time.
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis().max(0) as u64)
    }

    /// Returns the smallest ID that is strictly greater than `previous` and
    /// not earlier than the current time.
    ///
    /// Returns None when `previous` is already `u64::MAX`.
    pub fn next_after(previous: Option<OrderId>) -> Option<Self> {
        let now = Self::now();
        match previous {
            Some(prev) if prev >= now => prev.0.checked_add(1).map(Self),
            _ => Some(now),
        }
    }

    /// Creates an order ID from a raw value.
    pub fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for OrderId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<u64> for OrderId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Keys of the four persisted documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Supervisors,
    Riders,
    Inventory,
    Orders,
}

impl StorageKey {
    /// All keys, in the order they are written.
    pub const ALL: [StorageKey; 4] = [
        StorageKey::Supervisors,
        StorageKey::Riders,
        StorageKey::Inventory,
        StorageKey::Orders,
    ];

    /// Returns the key under which the document is stored.
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Supervisors => "ems_supervisors_v1",
            StorageKey::Riders => "ems_riders_v1",
            StorageKey::Inventory => "ems_inventory_v1",
            StorageKey::Orders => "ems_orders_v1",
        }
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
