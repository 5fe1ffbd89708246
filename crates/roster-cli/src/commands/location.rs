use roster_db::updates::location::LocationUpdateBuilder;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::LocationCommands;
use crate::commands::shared::parse::clearable;
use crate::context::AppContext;
use crate::output::output;

/// Handle `roster location`.
pub async fn handle(
    action: &LocationCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let service = &ctx.service;
    match action {
        LocationCommands::Create {
            organization_id,
            name,
            address,
        } => {
            let location = service
                .create_location(*organization_id, name, address.as_deref())
                .await?;
            output(&location, flags.format)
        }
        LocationCommands::Get { id } => output(&service.get_location(*id).await?, flags.format),
        LocationCommands::List { org } => output(&service.list_locations(*org).await?, flags.format),
        LocationCommands::Update { id, name, address } => {
            let mut builder = LocationUpdateBuilder::new();
            if let Some(name) = name {
                builder = builder.name(name);
            }
            if let Some(address) = clearable(address.as_deref()) {
                builder = builder.address(address);
            }
            output(
                &service.update_location(*id, builder.build()).await?,
                flags.format,
            )
        }
        LocationCommands::Delete { id } => {
            service.delete_location(*id).await?;
            output(&json!({ "deleted": id }), flags.format)
        }
        LocationCommands::Merge {
            duplicate_id,
            canonical_id,
        } => output(
            &service.merge_locations(*duplicate_id, *canonical_id).await?,
            flags.format,
        ),
    }
}
