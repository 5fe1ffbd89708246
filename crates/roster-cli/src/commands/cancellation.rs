use roster_db::repos::cancellation::CancellationFilter;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CancellationCommands;
use crate::commands::shared::parse::{parse_date, parse_optional_date};
use crate::context::AppContext;
use crate::output::output;

/// Handle `roster cancellation`.
pub async fn handle(
    action: &CancellationCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let service = &ctx.service;
    match action {
        CancellationCommands::Create {
            activity_id,
            date,
            reason,
        } => {
            let cancellation = service
                .create_cancellation(*activity_id, parse_date(date, "date")?, reason.as_deref())
                .await?;
            output(&cancellation, flags.format)
        }
        CancellationCommands::Get { id } => {
            output(&service.get_cancellation(*id).await?, flags.format)
        }
        CancellationCommands::Delete { id } => {
            service.delete_cancellation(*id).await?;
            output(&json!({ "deleted": id }), flags.format)
        }
        CancellationCommands::List {
            start,
            end,
            org,
            activity,
        } => {
            let filter = CancellationFilter {
                start_date: parse_optional_date(start.as_deref(), "start")?,
                end_date: parse_optional_date(end.as_deref(), "end")?,
                organization_id: *org,
                activity_id: *activity,
            };
            output(&service.list_cancellations(&filter).await?, flags.format)
        }
        CancellationCommands::ForDate { date, org } => output(
            &service
                .cancellations_for_date(parse_date(date, "date")?, *org)
                .await?,
            flags.format,
        ),
        CancellationCommands::Occurrences { activity_id } => output(
            &service.effective_occurrences(*activity_id).await?,
            flags.format,
        ),
    }
}
