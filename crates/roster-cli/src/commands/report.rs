use crate::cli::GlobalFlags;
use crate::cli::subcommands::ReportCommands;
use crate::commands::shared::parse::{parse_optional_date, today};
use crate::context::AppContext;
use crate::output::output;

/// Handle `roster report`.
pub async fn handle(
    action: &ReportCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ReportCommands::Weekly {
            organization_id,
            week_of,
        } => {
            let week_of = parse_optional_date(week_of.as_deref(), "week_of")?.unwrap_or_else(today);
            let report = ctx.service.weekly_report(*organization_id, week_of).await?;
            output(&report, flags.format)
        }
        ReportCommands::Residency {
            organization_id,
            session_id,
        } => output(
            &ctx.service
                .residency_report(*organization_id, *session_id)
                .await?,
            flags.format,
        ),
    }
}
