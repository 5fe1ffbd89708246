use anyhow::{Context, bail};
use roster_db::repos::signin::SignInRequest;
use roster_sheets::SheetsClient;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SigninArgs;
use crate::commands::shared::parse::parse_date;
use crate::context::AppContext;
use crate::output::output;

/// Handle `roster signin`.
pub async fn handle(args: &SigninArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let sheets = &ctx.config.sheets;
    let folder_id = args.folder.as_deref().unwrap_or(&sheets.folder_id);
    if folder_id.is_empty() {
        bail!("no Drive folder: pass --folder or set sheets.folder_id");
    }

    let request = SignInRequest {
        activity_id: args.activity_id,
        start_date: parse_date(&args.start, "start")?,
        num_weeks: args
            .weeks
            .unwrap_or(ctx.config.general.default_signin_weeks),
        folder_id,
        generated_at: chrono::Local::now().naive_local(),
    };

    let exporter =
        SheetsClient::from_config(sheets).context("failed to set up Google Sheets client")?;
    let sheet = ctx
        .service
        .generate_signin_sheet(&exporter, &request)
        .await?;
    output(&sheet, flags.format)
}
