use roster_db::repos::student::NewStudent;
use roster_db::updates::student::StudentUpdateBuilder;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::StudentCommands;
use crate::commands::shared::limit::{apply_limit, effective_limit};
use crate::commands::shared::parse::clearable;
use crate::context::AppContext;
use crate::output::output;

/// Handle `roster student`.
pub async fn handle(
    action: &StudentCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let service = &ctx.service;
    let limit = effective_limit(flags.limit, ctx.config.general.default_limit);
    match action {
        StudentCommands::Create {
            first,
            last,
            email,
            phone,
            facebook,
            emergency_name,
            emergency_phone,
            notes,
            rochester,
            inactive,
        } => {
            let student = service
                .create_student(NewStudent {
                    first_name: first.clone(),
                    last_name: last.clone(),
                    email: email.clone(),
                    phone: phone.clone(),
                    facebook_profile: facebook.clone(),
                    emergency_contact_name: emergency_name.clone(),
                    emergency_contact_phone: emergency_phone.clone(),
                    notes: notes.clone(),
                    active: !inactive,
                    rochester: *rochester,
                })
                .await?;
            output(&student, flags.format)
        }
        StudentCommands::QuickCreate {
            first,
            last,
            email,
            phone,
        } => {
            let student = service
                .quick_create_student(first, last, email.as_deref(), phone.as_deref())
                .await?;
            output(&student, flags.format)
        }
        StudentCommands::Get { id } => output(&service.get_student(*id).await?, flags.format),
        StudentCommands::Detail { id, all } => {
            output(&service.student_detail(*id, *all).await?, flags.format)
        }
        StudentCommands::List { all } => {
            output(&service.list_students(!all, limit).await?, flags.format)
        }
        StudentCommands::Search { query } => {
            let mut students = service.search_students(query).await?;
            apply_limit(&mut students, limit);
            output(&students, flags.format)
        }
        StudentCommands::Update {
            id,
            first,
            last,
            email,
            phone,
            facebook,
            emergency_name,
            emergency_phone,
            notes,
            active,
            rochester,
        } => {
            let mut builder = StudentUpdateBuilder::new();
            if let Some(first) = first {
                builder = builder.first_name(first);
            }
            if let Some(last) = last {
                builder = builder.last_name(last);
            }
            if let Some(email) = clearable(email.as_deref()) {
                builder = builder.email(email);
            }
            if let Some(phone) = clearable(phone.as_deref()) {
                builder = builder.phone(phone);
            }
            if let Some(profile) = clearable(facebook.as_deref()) {
                builder = builder.facebook_profile(profile);
            }
            if let Some(name) = clearable(emergency_name.as_deref()) {
                builder = builder.emergency_contact_name(name);
            }
            if let Some(phone) = clearable(emergency_phone.as_deref()) {
                builder = builder.emergency_contact_phone(phone);
            }
            if let Some(notes) = clearable(notes.as_deref()) {
                builder = builder.notes(notes);
            }
            if let Some(active) = active {
                builder = builder.active(*active);
            }
            if let Some(rochester) = rochester {
                builder = builder.rochester(*rochester);
            }
            output(
                &service.update_student(*id, builder.build()).await?,
                flags.format,
            )
        }
        StudentCommands::Delete { id } => {
            service.delete_student(*id).await?;
            output(&json!({ "deleted": id }), flags.format)
        }
    }
}
