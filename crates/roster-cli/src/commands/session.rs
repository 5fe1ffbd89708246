use roster_db::updates::session::SessionUpdateBuilder;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SessionCommands;
use crate::commands::shared::parse::parse_date;
use crate::context::AppContext;
use crate::output::output;

/// Handle `roster session`.
pub async fn handle(
    action: &SessionCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let service = &ctx.service;
    match action {
        SessionCommands::Create {
            organization_id,
            name,
            start,
            end,
        } => {
            let session = service
                .create_session(
                    *organization_id,
                    name,
                    parse_date(start, "start")?,
                    parse_date(end, "end")?,
                )
                .await?;
            output(&session, flags.format)
        }
        SessionCommands::Get { id } => output(&service.get_session(*id).await?, flags.format),
        SessionCommands::List { org, all } => {
            output(&service.list_sessions(*org, *all).await?, flags.format)
        }
        SessionCommands::Update {
            id,
            name,
            start,
            end,
            closed,
        } => {
            let mut builder = SessionUpdateBuilder::new();
            if let Some(name) = name {
                builder = builder.name(name);
            }
            if let Some(start) = start {
                builder = builder.start_date(parse_date(start, "start")?);
            }
            if let Some(end) = end {
                builder = builder.end_date(parse_date(end, "end")?);
            }
            if let Some(closed) = closed {
                builder = builder.closed(*closed);
            }
            output(
                &service.update_session(*id, builder.build()).await?,
                flags.format,
            )
        }
        SessionCommands::Close { id } => output(&service.close_session(*id).await?, flags.format),
        SessionCommands::Delete { id } => {
            service.delete_session(*id).await?;
            output(&json!({ "deleted": id }), flags.format)
        }
        SessionCommands::Detail { id } => {
            output(&service.session_detail(*id).await?, flags.format)
        }
        SessionCommands::CopyActivity {
            source_session_id,
            activity_id,
            target_session_id,
        } => output(
            &service
                .copy_activity(*source_session_id, *activity_id, *target_session_id)
                .await?,
            flags.format,
        ),
        SessionCommands::CopyAll {
            source_session_id,
            target_session_id,
        } => output(
            &service
                .copy_all_activities(*source_session_id, *target_session_id)
                .await?,
            flags.format,
        ),
    }
}
