use crate::cli::GlobalFlags;
use crate::cli::root_commands::StatsArgs;
use crate::commands::shared::parse::{parse_optional_date, today};
use crate::context::AppContext;
use crate::output::output;

/// Handle `roster stats`.
pub async fn handle(args: &StatsArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let date = parse_optional_date(args.date.as_deref(), "date")?.unwrap_or_else(today);
    let stats = ctx.service.attendance_stats(date, args.org).await?;
    output(&stats, flags.format)
}
