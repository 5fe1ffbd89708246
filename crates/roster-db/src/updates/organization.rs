//! Organization update builder.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct OrganizationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<Option<String>>,
}

pub struct OrganizationUpdateBuilder(OrganizationUpdate);

impl OrganizationUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(OrganizationUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn contact_email(mut self, contact_email: Option<String>) -> Self {
        self.0.contact_email = Some(contact_email);
        self
    }

    #[must_use]
    pub fn build(self) -> OrganizationUpdate {
        self.0
    }
}
