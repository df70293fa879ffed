//! Bulk rider import from comma-separated text.
//!
//! One rider per line, fields in the order
//! `code,name,region,vehicleType,tshirtQuantity`. Fields are trimmed, blank
//! lines are ignored and missing trailing fields count as absent.

use serde::{Deserialize, Serialize};

use crate::{Deductions, Rider, RiderCode, ValidationError, VehicleType};

/// One parsed import row, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RiderRow {
    /// 1-based line number in the source text (0 when not from text).
    pub line: usize,
    pub code: String,
    pub name: String,
    pub region: Option<String>,
    pub vehicle_type: Option<String>,
    pub tshirt_quantity: Option<String>,
}

impl RiderRow {
    /// Builds a rider, applying the import defaults.
    ///
    /// Region defaults to empty, vehicle type to motorcycle and the t-shirt
    /// quantity to 1 when absent, unparseable or below 1.
    pub fn to_rider(&self) -> Result<Rider, ValidationError> {
        let code = self.code.trim();
        if code.is_empty() {
            return Err(ValidationError::MissingField { field: "code" });
        }
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingField { field: "name" });
        }

        let vehicle_type = match non_empty(&self.vehicle_type) {
            Some(raw) => raw.parse::<VehicleType>()?,
            None => VehicleType::Motorcycle,
        };

        let tshirt_quantity = non_empty(&self.tshirt_quantity)
            .and_then(coerce_quantity)
            .unwrap_or(1);

        Ok(Rider {
            code: RiderCode::new(code),
            name: name.to_string(),
            region: non_empty(&self.region).unwrap_or_default().to_string(),
            vehicle_type,
            tshirt_quantity,
            equipment_photo: None,
            deductions: Deductions::default(),
        })
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Whole numbers are taken as-is, decimals are truncated; anything below 1
/// is rejected.
fn coerce_quantity(raw: &str) -> Option<u32> {
    let value = match raw.parse::<u32>() {
        Ok(v) => v,
        Err(_) => {
            let f = raw.parse::<f64>().ok().filter(|f| f.is_finite())?;
            if f < 1.0 || f > f64::from(u32::MAX) {
                return None;
            }
            f.trunc() as u32
        }
    };
    (value >= 1).then_some(value)
}

/// Splits import text into rows.
pub fn parse_rider_rows(text: &str) -> Vec<RiderRow> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            let mut fields = line.split(',').map(|f| f.trim().to_string());
            RiderRow {
                line: index + 1,
                code: fields.next().unwrap_or_default(),
                name: fields.next().unwrap_or_default(),
                region: fields.next(),
                vehicle_type: fields.next(),
                tshirt_quantity: fields.next(),
            }
        })
        .collect()
}

/// A row that was not imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    pub line: usize,
    pub code: String,
    pub reason: String,
}

/// Outcome of a bulk import.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ImportReport {
    pub imported: Vec<RiderCode>,
    pub skipped: Vec<SkippedRow>,
}

impl ImportReport {
    pub(crate) fn skip(&mut self, row: &RiderRow, reason: impl std::fmt::Display) {
        self.skipped.push(SkippedRow {
            line: row.line,
            code: row.code.clone(),
            reason: reason.to_string(),
        });
    }

    /// Number of riders added.
    pub fn imported_count(&self) -> usize {
        self.imported.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_skips_blank_lines() {
        let rows = parse_rider_rows("R1, Ali ,Cairo,motorcycle,2\r\n\n   \nR2,Sara,Giza,,\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].line, 1);
        assert_eq!(rows[0].name, "Ali");
        assert_eq!(rows[0].tshirt_quantity.as_deref(), Some("2"));
        assert_eq!(rows[1].line, 4);
        assert_eq!(rows[1].vehicle_type.as_deref(), Some(""));
    }

    #[test]
    fn test_row_defaults() {
        let rows = parse_rider_rows("R1,Ali,Cairo,motorcycle,2\nR2,Sara,Giza,,");
        let first = rows[0].to_rider().unwrap();
        assert_eq!(first.region, "Cairo");
        assert_eq!(first.tshirt_quantity, 2);

        let second = rows[1].to_rider().unwrap();
        assert_eq!(second.region, "Giza");
        assert_eq!(second.vehicle_type, VehicleType::Motorcycle);
        assert_eq!(second.tshirt_quantity, 1);
        assert_eq!(second.deductions, Deductions::default());
        assert!(second.equipment_photo.is_none());
    }

    #[test]
    fn test_short_row_gets_empty_region() {
        let rows = parse_rider_rows("R3,Omar");
        let rider = rows[0].to_rider().unwrap();
        assert_eq!(rider.region, "");
        assert_eq!(rider.vehicle_type, VehicleType::Motorcycle);
        assert_eq!(rider.tshirt_quantity, 1);
    }

    #[test]
    fn test_tshirt_quantity_coercion() {
        assert_eq!(coerce_quantity("3"), Some(3));
        assert_eq!(coerce_quantity("2.9"), Some(2));
        assert_eq!(coerce_quantity("0"), None);
        assert_eq!(coerce_quantity("-4"), None);
        assert_eq!(coerce_quantity("many"), None);
        assert_eq!(coerce_quantity("NaN"), None);

        let rows = parse_rider_rows("R1,Ali,,bicycle,lots");
        let rider = rows[0].to_rider().unwrap();
        assert_eq!(rider.vehicle_type, VehicleType::Bicycle);
        assert_eq!(rider.tshirt_quantity, 1);
    }

    #[test]
    fn test_invalid_rows() {
        let rows = parse_rider_rows(",NoCode\nR9,\nR5,Ali,Cairo,scooter,1");
        assert_eq!(
            rows[0].to_rider(),
            Err(ValidationError::MissingField { field: "code" })
        );
        assert_eq!(
            rows[1].to_rider(),
            Err(ValidationError::MissingField { field: "name" })
        );
        assert_eq!(
            rows[2].to_rider(),
            Err(ValidationError::UnknownVehicleType("scooter".to_string()))
        );
    }
}
