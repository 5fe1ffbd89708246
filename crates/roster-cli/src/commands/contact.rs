use roster_db::repos::contact::NewContact;
use roster_db::updates::contact::ContactUpdateBuilder;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ContactCommands;
use crate::commands::shared::parse::clearable;
use crate::context::AppContext;
use crate::output::output;

/// Handle `roster contact`.
pub async fn handle(
    action: &ContactCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let service = &ctx.service;
    match action {
        ContactCommands::Create {
            organization_id,
            name,
            role,
            email,
            office_phone,
            cell_phone,
        } => {
            let contact = service
                .create_contact(NewContact {
                    organization_id: *organization_id,
                    name: name.clone(),
                    role: role.clone(),
                    email: email.clone(),
                    office_phone: office_phone.clone(),
                    cell_phone: cell_phone.clone(),
                })
                .await?;
            output(&contact, flags.format)
        }
        ContactCommands::Get { id } => output(&service.get_contact(*id).await?, flags.format),
        ContactCommands::List { org } => output(&service.list_contacts(*org).await?, flags.format),
        ContactCommands::Update {
            id,
            name,
            role,
            email,
            office_phone,
            cell_phone,
        } => {
            let mut builder = ContactUpdateBuilder::new();
            if let Some(name) = name {
                builder = builder.name(name);
            }
            if let Some(role) = clearable(role.as_deref()) {
                builder = builder.role(role);
            }
            if let Some(email) = clearable(email.as_deref()) {
                builder = builder.email(email);
            }
            if let Some(phone) = clearable(office_phone.as_deref()) {
                builder = builder.office_phone(phone);
            }
            if let Some(phone) = clearable(cell_phone.as_deref()) {
                builder = builder.cell_phone(phone);
            }
            output(
                &service.update_contact(*id, builder.build()).await?,
                flags.format,
            )
        }
        ContactCommands::Delete { id } => {
            service.delete_contact(*id).await?;
            output(&json!({ "deleted": id }), flags.format)
        }
    }
}
