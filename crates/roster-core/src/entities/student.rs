use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A person attending classes.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Student {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub facebook_profile: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub notes: Option<String>,
    pub active: bool,
    /// City residency, used by the residency report.
    pub rochester: bool,
}

impl Student {
    /// `"First Last"`, trimmed when either part is empty.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// `"Last, First"`, as printed on sign-in sheets and reports.
    #[must_use]
    pub fn display_name(&self) -> String {
        match (self.last_name.is_empty(), self.first_name.is_empty()) {
            (true, _) => self.first_name.clone(),
            (false, true) => self.last_name.clone(),
            (false, false) => format!("{}, {}", self.last_name, self.first_name),
        }
    }
}
