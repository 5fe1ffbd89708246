use roster_db::updates::organization::OrganizationUpdateBuilder;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::OrgCommands;
use crate::commands::shared::parse::{clearable, parse_optional_date, today};
use crate::context::AppContext;
use crate::output::output;

/// Handle `roster org`.
pub async fn handle(action: &OrgCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let service = &ctx.service;
    match action {
        OrgCommands::Create {
            name,
            contact_email,
        } => {
            let org = service
                .create_organization(name, contact_email.as_deref())
                .await?;
            output(&org, flags.format)
        }
        OrgCommands::Get { id } => output(&service.get_organization(*id).await?, flags.format),
        OrgCommands::List { all } => {
            output(&service.list_organizations(*all).await?, flags.format)
        }
        OrgCommands::Update {
            id,
            name,
            contact_email,
        } => {
            let mut builder = OrganizationUpdateBuilder::new();
            if let Some(name) = name {
                builder = builder.name(name);
            }
            if let Some(email) = clearable(contact_email.as_deref()) {
                builder = builder.contact_email(email);
            }
            let org = service.update_organization(*id, builder.build()).await?;
            output(&org, flags.format)
        }
        OrgCommands::Delete { id } => {
            service.delete_organization(*id).await?;
            output(&json!({ "deleted": id }), flags.format)
        }
        OrgCommands::Restore { id } => {
            output(&service.restore_organization(*id).await?, flags.format)
        }
        OrgCommands::Overview { id, today: on } => {
            let on = parse_optional_date(on.as_deref(), "today")?.unwrap_or_else(today);
            output(&service.organization_overview(*id, on).await?, flags.format)
        }
    }
}
