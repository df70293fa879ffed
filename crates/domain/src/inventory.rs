//! Equipment counts and the central inventory pool.

use serde::{Deserialize, Serialize};

use crate::Money;

/// A kind of equipment tracked by the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EquipmentItem {
    MotorcyclePouches,
    BicyclePouches,
    Tshirts,
}

impl EquipmentItem {
    /// All items, in document order.
    pub const ALL: [EquipmentItem; 3] = [
        EquipmentItem::MotorcyclePouches,
        EquipmentItem::BicyclePouches,
        EquipmentItem::Tshirts,
    ];

    /// Returns the field name used in stored documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentItem::MotorcyclePouches => "motorcyclePouches",
            EquipmentItem::BicyclePouches => "bicyclePouches",
            EquipmentItem::Tshirts => "tshirts",
        }
    }

    /// Approximate value of one unit, used for the dashboard estimate.
    pub fn unit_value(&self) -> Money {
        match self {
            EquipmentItem::MotorcyclePouches | EquipmentItem::BicyclePouches => {
                Money::from_pounds(200)
            }
            EquipmentItem::Tshirts => Money::from_pounds(50),
        }
    }
}

impl std::fmt::Display for EquipmentItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EquipmentItem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EquipmentItem::ALL
            .into_iter()
            .find(|item| item.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown equipment item: {s}"))
    }
}

/// Quantities of each equipment item.
///
/// Used for the pool, for a supervisor's own allocation and for the
/// quantities requested by an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentCounts {
    #[serde(default)]
    pub motorcycle_pouches: u32,
    #[serde(default)]
    pub bicycle_pouches: u32,
    #[serde(default)]
    pub tshirts: u32,
}

impl EquipmentCounts {
    /// Creates counts from the three item quantities.
    pub fn new(motorcycle_pouches: u32, bicycle_pouches: u32, tshirts: u32) -> Self {
        Self {
            motorcycle_pouches,
            bicycle_pouches,
            tshirts,
        }
    }

    /// Returns all-zero counts.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Returns the quantity of `item`.
    pub fn get(&self, item: EquipmentItem) -> u32 {
        match item {
            EquipmentItem::MotorcyclePouches => self.motorcycle_pouches,
            EquipmentItem::BicyclePouches => self.bicycle_pouches,
            EquipmentItem::Tshirts => self.tshirts,
        }
    }

    fn slot(&mut self, item: EquipmentItem) -> &mut u32 {
        match item {
            EquipmentItem::MotorcyclePouches => &mut self.motorcycle_pouches,
            EquipmentItem::BicyclePouches => &mut self.bicycle_pouches,
            EquipmentItem::Tshirts => &mut self.tshirts,
        }
    }

    /// Returns true if every quantity is zero.
    pub fn is_empty(&self) -> bool {
        EquipmentItem::ALL.iter().all(|item| self.get(*item) == 0)
    }

    /// Returns the sum of all quantities.
    pub fn total(&self) -> u64 {
        EquipmentItem::ALL
            .iter()
            .map(|item| u64::from(self.get(*item)))
            .sum()
    }
}

/// Shortfall found when checking a request against the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortfall {
    pub item: EquipmentItem,
    pub requested: u32,
    pub available: u32,
}

/// The central inventory pool.
///
/// Sole source of truth for available equipment. No count ever goes below
/// zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct InventoryPool(EquipmentCounts);

impl InventoryPool {
    /// Creates a pool holding `counts`.
    pub fn new(counts: EquipmentCounts) -> Self {
        Self(counts)
    }

    /// Returns the current counts.
    pub fn counts(&self) -> EquipmentCounts {
        self.0
    }

    /// Returns the available quantity of `item`.
    pub fn available(&self, item: EquipmentItem) -> u32 {
        self.0.get(item)
    }

    /// Sets `item` to `max(0, current + delta)` and returns the new value.
    ///
    /// Counts saturate at `u32::MAX`.
    pub fn adjust(&mut self, item: EquipmentItem, delta: i64) -> u32 {
        let slot = self.0.slot(item);
        let next = i64::from(*slot)
            .saturating_add(delta)
            .clamp(0, i64::from(u32::MAX));
        *slot = next as u32;
        *slot
    }

    /// Checks that every requested quantity is available.
    ///
    /// Reports the first item, in document order, that falls short.
    pub fn ensure_covers(&self, requested: &EquipmentCounts) -> Result<(), Shortfall> {
        for item in EquipmentItem::ALL {
            let available = self.available(item);
            let wanted = requested.get(item);
            if wanted > available {
                return Err(Shortfall {
                    item,
                    requested: wanted,
                    available,
                });
            }
        }
        Ok(())
    }

    /// Approximate value of the pool.
    pub fn estimated_value(&self) -> Money {
        EquipmentItem::ALL
            .iter()
            .map(|item| {
                let units = i64::from(self.available(*item));
                Money::from_piastres(item.unit_value().piastres() * units)
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(m: u32, b: u32, t: u32) -> InventoryPool {
        InventoryPool::new(EquipmentCounts::new(m, b, t))
    }

    #[test]
    fn test_adjust_adds_and_subtracts() {
        let mut p = pool(5, 5, 5);
        assert_eq!(p.adjust(EquipmentItem::Tshirts, 3), 8);
        assert_eq!(p.adjust(EquipmentItem::Tshirts, -2), 6);
        assert_eq!(p.counts(), EquipmentCounts::new(5, 5, 6));
    }

    #[test]
    fn test_adjust_clamps_at_zero() {
        let mut p = pool(2, 0, 0);
        assert_eq!(p.adjust(EquipmentItem::MotorcyclePouches, -10), 0);
        assert_eq!(p.adjust(EquipmentItem::BicyclePouches, -1), 0);
    }

    #[test]
    fn test_adjust_matches_max_zero_formula() {
        for start in [0u32, 1, 7, 100] {
            for delta in [-200i64, -8, -1, 0, 1, 50] {
                let mut p = pool(start, 0, 0);
                let got = p.adjust(EquipmentItem::MotorcyclePouches, delta);
                let expected = (i64::from(start) + delta).max(0) as u32;
                assert_eq!(got, expected, "start={start} delta={delta}");
            }
        }
    }

    #[test]
    fn test_adjust_with_extreme_deltas_saturates() {
        let mut p = pool(0, 0, 300);
        assert_eq!(p.adjust(EquipmentItem::Tshirts, i64::MAX), u32::MAX);
        assert_eq!(p.adjust(EquipmentItem::Tshirts, i64::MAX), u32::MAX);
        assert_eq!(p.adjust(EquipmentItem::Tshirts, i64::MIN), 0);
        assert_eq!(p.adjust(EquipmentItem::MotorcyclePouches, i64::MIN), 0);
    }

    #[test]
    fn test_ensure_covers_reports_first_shortfall() {
        let p = pool(5, 1, 5);
        assert!(p.ensure_covers(&EquipmentCounts::new(5, 1, 5)).is_ok());

        let err = p.ensure_covers(&EquipmentCounts::new(2, 3, 9)).unwrap_err();
        assert_eq!(
            err,
            Shortfall {
                item: EquipmentItem::BicyclePouches,
                requested: 3,
                available: 1,
            }
        );
    }

    #[test]
    fn test_estimated_value() {
        let p = pool(1, 2, 3);
        assert_eq!(p.estimated_value(), Money::from_pounds(200 + 400 + 150));
    }

    #[test]
    fn test_counts_is_empty_and_total() {
        assert!(EquipmentCounts::zero().is_empty());
        let c = EquipmentCounts::new(0, 0, 4);
        assert!(!c.is_empty());
        assert_eq!(c.total(), 4);
    }

    #[test]
    fn test_pool_document_shape() {
        let json = serde_json::to_value(pool(100, 80, 300)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "motorcyclePouches": 100,
                "bicyclePouches": 80,
                "tshirts": 300
            })
        );
    }

    #[test]
    fn test_item_parses_field_names() {
        assert_eq!(
            "tshirts".parse::<EquipmentItem>().unwrap(),
            EquipmentItem::Tshirts
        );
        assert_eq!(
            "motorcyclePouches".parse::<EquipmentItem>().unwrap(),
            EquipmentItem::MotorcyclePouches
        );
        assert!("helmets".parse::<EquipmentItem>().is_err());
    }
}
