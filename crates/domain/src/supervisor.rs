//! Supervisors.

use serde::{Deserialize, Serialize};

use crate::{EquipmentCounts, SupervisorCode, ValidationError};

/// A supervisor who requests equipment for the riders of a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supervisor {
    pub code: SupervisorCode,
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub username: String,
    /// Stored as entered; never checked against anything.
    #[serde(default)]
    pub password: String,
    /// Per-supervisor allocation. Stored zeroed, not read by reconciliation.
    #[serde(default)]
    pub inventory: EquipmentCounts,
}

/// Raw supervisor form input.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SupervisorForm {
    pub code: String,
    pub name: String,
    pub region: String,
    pub username: String,
    pub password: String,
}

impl SupervisorForm {
    /// Creates a form with the required fields filled in.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the region.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Sets the login credentials.
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }
}

impl TryFrom<SupervisorForm> for Supervisor {
    type Error = ValidationError;

    fn try_from(form: SupervisorForm) -> Result<Self, Self::Error> {
        let code = form.code.trim();
        if code.is_empty() {
            return Err(ValidationError::MissingField { field: "code" });
        }
        let name = form.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingField { field: "name" });
        }

        Ok(Supervisor {
            code: SupervisorCode::new(code),
            name: name.to_string(),
            region: form.region.trim().to_string(),
            username: form.username.trim().to_string(),
            password: form.password,
            inventory: EquipmentCounts::zero(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_builds_supervisor_with_zeroed_inventory() {
        let form = SupervisorForm::new(" S1 ", "Mona")
            .region("Cairo")
            .credentials("mona", "secret");
        let supervisor = Supervisor::try_from(form).unwrap();

        assert_eq!(supervisor.code.as_str(), "S1");
        assert_eq!(supervisor.region, "Cairo");
        assert_eq!(supervisor.username, "mona");
        assert_eq!(supervisor.password, "secret");
        assert!(supervisor.inventory.is_empty());
    }

    #[test]
    fn test_missing_code_or_name_fails() {
        assert_eq!(
            Supervisor::try_from(SupervisorForm::new("", "Mona")),
            Err(ValidationError::MissingField { field: "code" })
        );
        assert_eq!(
            Supervisor::try_from(SupervisorForm::new("S1", "   ")),
            Err(ValidationError::MissingField { field: "name" })
        );
    }

    #[test]
    fn test_document_shape() {
        let supervisor = Supervisor::try_from(SupervisorForm::new("S1", "Mona")).unwrap();
        let json = serde_json::to_value(&supervisor).unwrap();
        assert_eq!(json["code"], "S1");
        assert_eq!(json["inventory"]["motorcyclePouches"], 0);
        assert_eq!(json["inventory"]["tshirts"], 0);
    }
}
