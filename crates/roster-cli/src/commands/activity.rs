use roster_core::enums::{ActivityType, DayOfWeek};
use roster_db::repos::activity::{ActivityFilter, NewActivity};
use roster_db::updates::activity::ActivityUpdateBuilder;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ActivityCommands;
use crate::commands::shared::parse::{parse_enum, parse_time};
use crate::context::AppContext;
use crate::output::output;

/// Handle `roster activity`.
pub async fn handle(
    action: &ActivityCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let service = &ctx.service;
    match action {
        ActivityCommands::Create {
            session_id,
            activity_type,
            day,
            time,
            location,
            capacity,
        } => {
            let activity = service
                .create_activity(NewActivity {
                    session_id: *session_id,
                    activity_type: parse_enum::<ActivityType>(activity_type, "type")?,
                    day_of_week: parse_enum::<DayOfWeek>(day, "day")?,
                    time: parse_time(time)?,
                    location_id: *location,
                    max_capacity: *capacity,
                })
                .await?;
            output(&activity, flags.format)
        }
        ActivityCommands::Get { id } => output(&service.get_activity(*id).await?, flags.format),
        ActivityCommands::List { session, org, all } => {
            let activities = service
                .list_activities(&ActivityFilter {
                    session_id: *session,
                    organization_id: *org,
                    include_inactive: *all,
                })
                .await?;
            output(&activities, flags.format)
        }
        ActivityCommands::Update {
            id,
            activity_type,
            day,
            time,
            location,
            no_location,
            capacity,
            no_capacity,
            closed,
        } => {
            let mut builder = ActivityUpdateBuilder::new();
            if let Some(kind) = activity_type {
                builder = builder.activity_type(parse_enum(kind, "type")?);
            }
            if let Some(day) = day {
                builder = builder.day_of_week(parse_enum(day, "day")?);
            }
            if let Some(time) = time {
                builder = builder.time(parse_time(time)?);
            }
            if *no_location {
                builder = builder.location_id(None);
            } else if location.is_some() {
                builder = builder.location_id(*location);
            }
            if *no_capacity {
                builder = builder.max_capacity(None);
            } else if capacity.is_some() {
                builder = builder.max_capacity(*capacity);
            }
            if let Some(closed) = closed {
                builder = builder.closed(*closed);
            }
            output(
                &service.update_activity(*id, builder.build()).await?,
                flags.format,
            )
        }
        ActivityCommands::Delete { id } => {
            service.delete_activity(*id).await?;
            output(&json!({ "deleted": id }), flags.format)
        }
    }
}
