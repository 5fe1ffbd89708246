use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A venue where an organization runs activities.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Location {
    pub id: i64,
    pub organization_id: i64,
    pub name: String,
    pub address: Option<String>,
}
