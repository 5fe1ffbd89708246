use roster_config::RosterConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &RosterConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &RosterConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.sheets.is_configured() && has_env_prefix(&env_keys, "ROSTER_SHEETS") {
        warnings.push(
            "Sheets config appears default while ROSTER_SHEETS* env vars exist. Use double underscores (example: ROSTER_SHEETS__FOLDER_ID)."
                .to_string(),
        );
    }

    if config.general.operator().is_none() && has_env_prefix(&env_keys, "ROSTER_GENERAL") {
        warnings.push(
            "No operator configured while ROSTER_GENERAL* env vars exist. Use double underscores (example: ROSTER_GENERAL__OPERATOR)."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter()
        .any(|key| key.starts_with(prefix) && !key.starts_with(&format!("{prefix}__")))
}
