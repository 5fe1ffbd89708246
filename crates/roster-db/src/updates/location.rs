//! Location update builder.

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct LocationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Option<String>>,
}

pub struct LocationUpdateBuilder(LocationUpdate);

impl LocationUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(LocationUpdate::default())
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.0.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn address(mut self, address: Option<String>) -> Self {
        self.0.address = Some(address);
        self
    }

    #[must_use]
    pub fn build(self) -> LocationUpdate {
        self.0
    }
}
