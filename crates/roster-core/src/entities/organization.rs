use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A city recreation department or other host of fitness classes.
///
/// Organizations are never hard-deleted; `is_deleted` hides them from listings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Organization {
    pub id: i64,
    pub name: String,
    pub contact_email: Option<String>,
    pub is_deleted: bool,
}
