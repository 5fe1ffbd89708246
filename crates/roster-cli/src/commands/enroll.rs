use crate::cli::GlobalFlags;
use crate::cli::subcommands::EnrollCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `roster enroll`.
pub async fn handle(
    action: &EnrollCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        EnrollCommands::Reconcile {
            activity_id,
            enrolled,
            waitlisted,
        } => {
            let result = ctx
                .service
                .reconcile_enrollment(*activity_id, enrolled, waitlisted)
                .await?;
            output(&result, flags.format)
        }
        EnrollCommands::List { activity_id } => {
            output(&ctx.service.list_enrollments(*activity_id).await?, flags.format)
        }
    }
}
