//! Contact repository.

use roster_core::entities::Contact;

use crate::error::DatabaseError;
use crate::helpers::get_opt_string;
use crate::service::RosterService;
use crate::updates::SetClauses;
use crate::updates::contact::ContactUpdate;

const SELECT_COLS: &str = "id, organization_id, name, role, email, office_phone, cell_phone";

fn row_to_contact(row: &libsql::Row) -> Result<Contact, DatabaseError> {
    Ok(Contact {
        id: row.get(0)?,
        organization_id: row.get(1)?,
        name: row.get(2)?,
        role: get_opt_string(row, 3)?,
        email: get_opt_string(row, 4)?,
        office_phone: get_opt_string(row, 5)?,
        cell_phone: get_opt_string(row, 6)?,
    })
}

/// Fields of a contact to create.
#[derive(Debug, Clone, Default)]
pub struct NewContact {
    pub organization_id: i64,
    pub name: String,
    pub role: Option<String>,
    pub email: Option<String>,
    pub office_phone: Option<String>,
    pub cell_phone: Option<String>,
}

impl RosterService {
    pub async fn create_contact(&self, new: NewContact) -> Result<Contact, DatabaseError> {
        self.require_identity()?;
        if new.name.trim().is_empty() {
            return Err(DatabaseError::Validation("name is required".into()));
        }
        self.get_organization(new.organization_id).await?;

        let conn = self.db().conn();
        conn.execute(
            "INSERT INTO contacts (organization_id, name, role, email, office_phone, cell_phone)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            libsql::params![
                new.organization_id,
                new.name.as_str(),
                new.role.as_deref(),
                new.email.as_deref(),
                new.office_phone.as_deref(),
                new.cell_phone.as_deref()
            ],
        )
        .await?;

        Ok(Contact {
            id: conn.last_insert_rowid(),
            organization_id: new.organization_id,
            name: new.name,
            role: new.role,
            email: new.email,
            office_phone: new.office_phone,
            cell_phone: new.cell_phone,
        })
    }

    pub async fn get_contact(&self, id: i64) -> Result<Contact, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM contacts WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("contact", id))?;
        row_to_contact(&row)
    }

    pub async fn list_contacts(
        &self,
        organization_id: Option<i64>,
    ) -> Result<Vec<Contact>, DatabaseError> {
        let mut rows = match organization_id {
            Some(org) => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {SELECT_COLS} FROM contacts WHERE organization_id = ?1 ORDER BY name"
                        ),
                        [org],
                    )
                    .await?
            }
            None => {
                self.db()
                    .conn()
                    .query(
                        &format!("SELECT {SELECT_COLS} FROM contacts ORDER BY name"),
                        (),
                    )
                    .await?
            }
        };

        let mut contacts = Vec::new();
        while let Some(row) = rows.next().await? {
            contacts.push(row_to_contact(&row)?);
        }
        Ok(contacts)
    }

    pub async fn update_contact(
        &self,
        id: i64,
        update: ContactUpdate,
    ) -> Result<Contact, DatabaseError> {
        self.require_identity()?;
        let mut sets = SetClauses::default();
        if let Some(name) = update.name {
            sets.push("name", name);
        }
        if let Some(role) = update.role {
            sets.push_opt("role", role);
        }
        if let Some(email) = update.email {
            sets.push_opt("email", email);
        }
        if let Some(office_phone) = update.office_phone {
            sets.push_opt("office_phone", office_phone);
        }
        if let Some(cell_phone) = update.cell_phone {
            sets.push_opt("cell_phone", cell_phone);
        }
        if sets.is_empty() {
            return self.get_contact(id).await;
        }

        let (sql, params) = sets.into_update("contacts", id);
        let changed = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("contact", id));
        }
        self.get_contact(id).await
    }

    pub async fn delete_contact(&self, id: i64) -> Result<(), DatabaseError> {
        self.require_identity()?;
        let changed = self
            .db()
            .conn()
            .execute("DELETE FROM contacts WHERE id = ?1", [id])
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("contact", id));
        }
        Ok(())
    }
}
