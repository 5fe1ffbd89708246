use anyhow::Context;
use roster_config::RosterConfig;
use roster_core::identity::AuthIdentity;
use roster_db::service::RosterService;

use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: RosterService,
    pub config: RosterConfig,
}

impl AppContext {
    /// Open the database and attach the configured operator as caller identity.
    pub async fn init(config: RosterConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let db_path = flags.db.as_deref().unwrap_or(&config.database.path);
        let identity = resolve_identity(&config);

        let service = RosterService::new_local(db_path, identity)
            .await
            .with_context(|| format!("failed to open roster database at {db_path}"))?;

        Ok(Self { service, config })
    }
}

/// Mutations run as `general.operator`; without one the service refuses them.
fn resolve_identity(config: &RosterConfig) -> Option<AuthIdentity> {
    let operator = config.general.operator()?;
    tracing::debug!(operator, "acting as configured operator");
    Some(AuthIdentity {
        user_id: operator.to_string(),
        display_name: Some(operator.to_string()),
    })
}
