use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Authenticated caller identity for state-mutating operations.
///
/// Supplied by whatever authentication layer fronts the service. Carries only
/// data; no token handling lives here.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuthIdentity {
    /// Stable identifier of the staff member.
    pub user_id: String,
    /// Name shown in logs.
    pub display_name: Option<String>,
}

impl AuthIdentity {
    #[must_use]
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: None,
        }
    }
}
