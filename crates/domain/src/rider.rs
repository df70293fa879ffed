//! Riders and the deduction ledger.

use serde::{Deserialize, Serialize};

use crate::{Money, RiderCode, ValidationError};

/// Vehicle a rider delivers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    #[default]
    Motorcycle,
    Bicycle,
}

impl VehicleType {
    /// Returns the stored name.
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Motorcycle => "motorcycle",
            VehicleType::Bicycle => "bicycle",
        }
    }
}

impl std::fmt::Display for VehicleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VehicleType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "motorcycle" => Ok(VehicleType::Motorcycle),
            "bicycle" => Ok(VehicleType::Bicycle),
            _ => Err(ValidationError::UnknownVehicleType(s.trim().to_string())),
        }
    }
}

/// Category of a deduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeductionType {
    Advance,
    SecurityCheck,
    PreviousDebt,
    Deduction,
}

impl DeductionType {
    /// All categories, in ledger order.
    pub const ALL: [DeductionType; 4] = [
        DeductionType::Advance,
        DeductionType::SecurityCheck,
        DeductionType::PreviousDebt,
        DeductionType::Deduction,
    ];

    /// Returns the camelCase name used in documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeductionType::Advance => "advance",
            DeductionType::SecurityCheck => "securityCheck",
            DeductionType::PreviousDebt => "previousDebt",
            DeductionType::Deduction => "deduction",
        }
    }
}

impl std::fmt::Display for DeductionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Running totals of a rider's deductions, one per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Deductions {
    pub advance: Money,
    pub security_check: Money,
    pub previous_debt: Money,
    pub deduction: Money,
}

impl Deductions {
    /// Returns the running total for `kind`.
    pub fn get(&self, kind: DeductionType) -> Money {
        match kind {
            DeductionType::Advance => self.advance,
            DeductionType::SecurityCheck => self.security_check,
            DeductionType::PreviousDebt => self.previous_debt,
            DeductionType::Deduction => self.deduction,
        }
    }

    /// Adds `amount` to the running total for `kind`.
    ///
    /// Fails without changing anything if the total would overflow.
    pub fn add(&mut self, kind: DeductionType, amount: Money) -> Result<Money, ValidationError> {
        let slot = match kind {
            DeductionType::Advance => &mut self.advance,
            DeductionType::SecurityCheck => &mut self.security_check,
            DeductionType::PreviousDebt => &mut self.previous_debt,
            DeductionType::Deduction => &mut self.deduction,
        };
        *slot = slot
            .checked_add(amount)
            .ok_or(ValidationError::AmountOutOfRange { kind, amount })?;
        Ok(*slot)
    }

    /// Sum of all four categories, saturating at the `i64` bounds.
    pub fn total(&self) -> Money {
        DeductionType::ALL.iter().map(|kind| self.get(*kind)).sum()
    }
}

/// A single deduction charged against a rider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeductionEntry {
    #[serde(rename = "type")]
    pub kind: DeductionType,
    pub amount: Money,
    /// Free-text note; logged, not stored.
    #[serde(default)]
    pub reason: Option<String>,
}

impl DeductionEntry {
    /// Creates an entry without a reason.
    pub fn new(kind: DeductionType, amount: Money) -> Self {
        Self {
            kind,
            amount,
            reason: None,
        }
    }

    /// Attaches a free-text reason.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// A delivery rider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rider {
    pub code: RiderCode,
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub vehicle_type: VehicleType,
    pub tshirt_quantity: u32,
    /// Embedded image data reference, e.g. a `data:` URL.
    #[serde(default)]
    pub equipment_photo: Option<String>,
    #[serde(default)]
    pub deductions: Deductions,
}

impl Rider {
    /// Returns true if `query` occurs in the name, code or region.
    pub fn matches(&self, query: &str) -> bool {
        query.is_empty()
            || self.name.contains(query)
            || self.code.as_str().contains(query)
            || self.region.contains(query)
    }
}

/// Raw rider form input.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RiderForm {
    pub code: String,
    pub name: String,
    pub region: String,
    pub vehicle_type: VehicleType,
    pub tshirt_quantity: u32,
}

impl Default for RiderForm {
    fn default() -> Self {
        Self {
            code: String::new(),
            name: String::new(),
            region: String::new(),
            vehicle_type: VehicleType::Motorcycle,
            tshirt_quantity: 1,
        }
    }
}

impl RiderForm {
    /// Creates a form with the required fields filled in.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn vehicle_type(mut self, vehicle_type: VehicleType) -> Self {
        self.vehicle_type = vehicle_type;
        self
    }

    pub fn tshirt_quantity(mut self, quantity: u32) -> Self {
        self.tshirt_quantity = quantity;
        self
    }
}

impl TryFrom<RiderForm> for Rider {
    type Error = ValidationError;

    fn try_from(form: RiderForm) -> Result<Self, Self::Error> {
        let code = form.code.trim();
        if code.is_empty() {
            return Err(ValidationError::MissingField { field: "code" });
        }
        let name = form.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingField { field: "name" });
        }
        if form.tshirt_quantity < 1 {
            return Err(ValidationError::InvalidTshirtQuantity {
                quantity: form.tshirt_quantity,
            });
        }

        Ok(Rider {
            code: RiderCode::new(code),
            name: name.to_string(),
            region: form.region.trim().to_string(),
            vehicle_type: form.vehicle_type,
            tshirt_quantity: form.tshirt_quantity,
            equipment_photo: None,
            deductions: Deductions::default(),
        })
    }
}
