//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default result limit.
const fn default_limit() -> u32 {
    20
}

/// Default sign-in sheet length, in weeks.
const fn default_signin_weeks() -> u32 {
    7
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Identity recorded as the caller of state-mutating commands.
    /// Empty means mutations are refused.
    #[serde(default)]
    pub operator: String,

    /// `To:` address of bulk-communication drafts (students go in bcc).
    #[serde(default)]
    pub default_email_to: String,

    #[serde(default = "default_signin_weeks")]
    pub default_signin_weeks: u32,

    /// Default result limit for list/search commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            operator: String::new(),
            default_email_to: String::new(),
            default_signin_weeks: default_signin_weeks(),
            default_limit: default_limit(),
        }
    }
}

impl GeneralConfig {
    #[must_use]
    pub fn operator(&self) -> Option<&str> {
        let trimmed = self.operator.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}
