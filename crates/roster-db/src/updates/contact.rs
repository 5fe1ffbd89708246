//! Contact update builder.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct ContactUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub office_phone: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_phone: Option<Option<String>>,
}

pub struct ContactUpdateBuilder(ContactUpdate);

impl ContactUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(ContactUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn role(mut self, role: Option<String>) -> Self {
        self.0.role = Some(role);
        self
    }

    #[must_use]
    pub fn email(mut self, email: Option<String>) -> Self {
        self.0.email = Some(email);
        self
    }

    #[must_use]
    pub fn office_phone(mut self, office_phone: Option<String>) -> Self {
        self.0.office_phone = Some(office_phone);
        self
    }

    #[must_use]
    pub fn cell_phone(mut self, cell_phone: Option<String>) -> Self {
        self.0.cell_phone = Some(cell_phone);
        self
    }

    #[must_use]
    pub fn build(self) -> ContactUpdate {
        self.0
    }
}
