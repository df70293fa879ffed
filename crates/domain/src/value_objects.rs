//! Value objects shared by the equipment domain.

use serde::{Deserialize, Serialize};

/// Supervisor code (unique key of the supervisors collection).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct SupervisorCode(String);

impl SupervisorCode {
    /// Creates a supervisor code from a string.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SupervisorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SupervisorCode {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SupervisorCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Rider code (unique key of the riders collection).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct RiderCode(String);

impl RiderCode {
    /// Creates a rider code from a string.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RiderCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RiderCode {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for RiderCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Money amount in piastres (1/100 of an Egyptian pound).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates an amount from piastres.
    pub fn from_piastres(piastres: i64) -> Self {
        Self(piastres)
    }

    /// Creates an amount from whole pounds.
    pub fn from_pounds(pounds: i64) -> Self {
        Self(pounds.saturating_mul(100))
    }

    /// Returns zero.
    pub fn zero() -> Self {
        Self(0)
    }

    /// Returns the amount in piastres.
    pub fn piastres(&self) -> i64 {
        self.0
    }

    /// Returns the whole-pound portion.
    pub fn pounds(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the piastre remainder.
    pub fn piastres_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Adds `other`, or returns None if the sum does not fit.
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{sign}{}.{:02} EGP",
            self.pounds().abs(),
            self.piastres_part()
        )
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl std::ops::Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Self) -> Self::Output {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}
