//! Emergency contacts attached to the birth plan.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::PlannerError;

use super::common::{Displayable, Identifiable};

/// A person to reach when labour starts or an emergency occurs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    pub role: String,
    pub name: String,
    pub phone: String,
    pub is_decision_maker: bool,
}

impl EmergencyContact {
    /// Creates an empty contact slot for `role`.
    pub fn new(role: impl Into<String>, is_decision_maker: bool) -> Self {
        Self {
            role: role.into(),
            name: String::new(),
            phone: String::new(),
            is_decision_maker,
        }
    }

    /// Returns `true` once both a name and a phone number are recorded.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.phone.trim().is_empty()
    }

    /// Writes `value` into the editable field selected by `field`.
    pub fn set_field(&mut self, field: ContactField, value: impl Into<String>) {
        match field {
            ContactField::Name => self.name = value.into(),
            ContactField::Phone => self.phone = value.into(),
        }
    }
}

impl Identifiable for EmergencyContact {
    fn id(&self) -> &str {
        &self.role
    }
}

impl Displayable for EmergencyContact {
    fn display_label(&self) -> String {
        let name = if self.name.trim().is_empty() {
            "Add contact"
        } else {
            self.name.as_str()
        };
        let mut label = format!("{}: {}", self.role, name);
        if !self.phone.trim().is_empty() {
            label.push_str(&format!(" ({})", self.phone));
        }
        if self.is_decision_maker {
            label.push_str(" [decision maker]");
        }
        label
    }
}

/// User-editable contact fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Phone,
}

impl FromStr for ContactField {
    type Err = PlannerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(ContactField::Name),
            "phone" => Ok(ContactField::Phone),
            other => Err(PlannerError::InvalidInput(format!(
                "unknown contact field `{}`",
                other
            ))),
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactField::Name => f.write_str("name"),
            ContactField::Phone => f.write_str("phone"),
        }
    }
}
