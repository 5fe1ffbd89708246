mod attendance;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{AttendanceCommands, MeetingCommands};
use crate::commands::shared::parse::parse_date;
use crate::context::AppContext;
use crate::output::output;

/// Handle `roster meeting`.
pub async fn handle(
    action: &MeetingCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let service = &ctx.service;
    match action {
        MeetingCommands::Open { activity_id, date } => {
            let detail = service
                .get_or_create_meeting(*activity_id, parse_date(date, "date")?)
                .await?;
            if detail.created {
                tracing::info!(meeting_id = detail.meeting.id, "meeting created and seeded");
            }
            output(&detail, flags.format)
        }
        MeetingCommands::Get { id } => output(&service.get_meeting_detail(*id).await?, flags.format),
        MeetingCommands::List { activity_id } => {
            output(&service.list_meetings(*activity_id).await?, flags.format)
        }
        MeetingCommands::Attendance { action } => match action {
            AttendanceCommands::List { meeting_id } => {
                output(&service.list_attendance(*meeting_id).await?, flags.format)
            }
            AttendanceCommands::Update {
                meeting_id,
                file,
                marks,
            } => attendance::update(*meeting_id, file.as_deref(), marks, ctx, flags).await,
        },
    }
}
