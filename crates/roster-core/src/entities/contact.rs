use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A person at an organization staff can reach out to.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Contact {
    pub id: i64,
    pub organization_id: i64,
    pub name: String,
    pub role: Option<String>,
    pub email: Option<String>,
    pub office_phone: Option<String>,
    pub cell_phone: Option<String>,
}
