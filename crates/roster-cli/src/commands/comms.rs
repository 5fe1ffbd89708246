use anyhow::bail;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CommsCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `roster comms`.
pub async fn handle(
    action: &CommsCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        CommsCommands::Combinations { session_id } => output(
            &ctx.service.session_combinations(*session_id).await?,
            flags.format,
        ),
        CommsCommands::Email {
            session_id,
            combination_id,
            to,
        } => {
            let to = to
                .as_deref()
                .unwrap_or(&ctx.config.general.default_email_to)
                .trim();
            if to.is_empty() {
                bail!("no recipient: pass --to or set general.default_email_to");
            }
            let draft = ctx
                .service
                .email_draft(*session_id, combination_id, to)
                .await?;
            output(&draft, flags.format)
        }
    }
}
