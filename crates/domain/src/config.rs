//! Store configuration.

use serde::{Deserialize, Serialize};

use crate::EquipmentCounts;

/// What `reject_order` does with an order that is no longer pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RejectPolicy {
    /// Any order can be marked rejected; approved quantities stay deducted.
    #[default]
    Unconditional,

    /// Only pending orders can be rejected.
    PendingOnly,

    /// Rejecting an approved order returns its quantities to the pool.
    RestoreInventory,
}

impl RejectPolicy {
    /// Returns the policy name as used in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectPolicy::Unconditional => "unconditional",
            RejectPolicy::PendingOnly => "pending-only",
            RejectPolicy::RestoreInventory => "restore-inventory",
        }
    }
}

impl std::fmt::Display for RejectPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RejectPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unconditional" => Ok(RejectPolicy::Unconditional),
            "pending-only" | "pending_only" => Ok(RejectPolicy::PendingOnly),
            "restore-inventory" | "restore_inventory" => Ok(RejectPolicy::RestoreInventory),
            other => Err(format!("unknown reject policy: {other}")),
        }
    }
}

/// Behaviour knobs for [`EquipmentStore`](crate::EquipmentStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Pool used when storage holds no inventory document.
    pub initial_inventory: EquipmentCounts,

    /// Handling of rejections for orders that are no longer pending.
    pub reject_policy: RejectPolicy,

    /// Accept negative deduction amounts (credits).
    pub allow_credits: bool,
}

impl StoreConfig {
    /// Sets the initial inventory.
    pub fn with_initial_inventory(mut self, counts: EquipmentCounts) -> Self {
        self.initial_inventory = counts;
        self
    }

    /// Sets the reject policy.
    pub fn with_reject_policy(mut self, policy: RejectPolicy) -> Self {
        self.reject_policy = policy;
        self
    }

    /// Enables or disables credits.
    pub fn with_allow_credits(mut self, allow: bool) -> Self {
        self.allow_credits = allow;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            initial_inventory: EquipmentCounts::new(100, 80, 300),
            reject_policy: RejectPolicy::default(),
            allow_credits: false,
        }
    }
}
