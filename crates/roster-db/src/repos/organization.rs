//! Organization repository: CRUD, soft delete, overview.

use chrono::NaiveDate;

use roster_core::entities::Organization;
use roster_core::responses::OrganizationOverview;

use crate::error::DatabaseError;
use crate::helpers::{get_bool, get_opt_string};
use crate::repos::activity::ActivityFilter;
use crate::service::RosterService;
use crate::updates::SetClauses;
use crate::updates::organization::OrganizationUpdate;

const SELECT_COLS: &str = "id, name, contact_email, is_deleted";

fn row_to_organization(row: &libsql::Row) -> Result<Organization, DatabaseError> {
    Ok(Organization {
        id: row.get(0)?,
        name: row.get(1)?,
        contact_email: get_opt_string(row, 2)?,
        is_deleted: get_bool(row, 3)?,
    })
}

impl RosterService {
    pub async fn create_organization(
        &self,
        name: &str,
        contact_email: Option<&str>,
    ) -> Result<Organization, DatabaseError> {
        self.require_identity()?;
        let name = name.trim();
        if name.is_empty() {
            return Err(DatabaseError::Validation("name is required".into()));
        }

        let conn = self.db().conn();
        conn.execute(
            "INSERT INTO organizations (name, contact_email) VALUES (?1, ?2)",
            libsql::params![name, contact_email],
        )
        .await?;

        Ok(Organization {
            id: conn.last_insert_rowid(),
            name: name.to_string(),
            contact_email: contact_email.map(String::from),
            is_deleted: false,
        })
    }

    /// Fetch an organization, soft-deleted or not.
    pub async fn get_organization(&self, id: i64) -> Result<Organization, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM organizations WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("organization", id))?;
        row_to_organization(&row)
    }

    pub async fn list_organizations(
        &self,
        include_deleted: bool,
    ) -> Result<Vec<Organization>, DatabaseError> {
        let filter = if include_deleted {
            ""
        } else {
            "WHERE is_deleted = 0"
        };
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM organizations {filter} ORDER BY name"),
                (),
            )
            .await?;

        let mut orgs = Vec::new();
        while let Some(row) = rows.next().await? {
            orgs.push(row_to_organization(&row)?);
        }
        Ok(orgs)
    }

    pub async fn update_organization(
        &self,
        id: i64,
        update: OrganizationUpdate,
    ) -> Result<Organization, DatabaseError> {
        self.require_identity()?;
        let mut sets = SetClauses::default();
        if let Some(name) = update.name {
            sets.push("name", name);
        }
        if let Some(contact_email) = update.contact_email {
            sets.push_opt("contact_email", contact_email);
        }
        if sets.is_empty() {
            return self.get_organization(id).await;
        }

        let (sql, params) = sets.into_update("organizations", id);
        let changed = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("organization", id));
        }
        self.get_organization(id).await
    }

    /// Soft delete: the row and everything under it stay, flagged.
    pub async fn delete_organization(&self, id: i64) -> Result<(), DatabaseError> {
        self.require_identity()?;
        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE organizations SET is_deleted = 1 WHERE id = ?1",
                [id],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("organization", id));
        }
        tracing::info!(organization_id = id, "organization soft-deleted");
        Ok(())
    }

    /// Undo a soft delete.
    pub async fn restore_organization(&self, id: i64) -> Result<Organization, DatabaseError> {
        self.require_identity()?;
        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE organizations SET is_deleted = 0 WHERE id = ?1",
                [id],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("organization", id));
        }
        self.get_organization(id).await
    }

    /// Organization with contacts and sessions split around `today`.
    ///
    /// The current session is the first one (by start date) spanning `today`;
    /// other sessions spanning `today` are reported as future sessions.
    pub async fn organization_overview(
        &self,
        id: i64,
        today: NaiveDate,
    ) -> Result<OrganizationOverview, DatabaseError> {
        let organization = self.get_organization(id).await?;
        let contacts = self.list_contacts(Some(id)).await?;
        let sessions = self.list_sessions(Some(id), true).await?;

        let mut current_session = None;
        let mut future_sessions = Vec::new();
        let mut past_sessions = Vec::new();
        for session in sessions {
            if session.end_date < today {
                past_sessions.push(session);
            } else if session.start_date <= today && current_session.is_none() {
                current_session = Some(session);
            } else {
                future_sessions.push(session);
            }
        }
        past_sessions.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        future_sessions.sort_by_key(|s| s.start_date);

        let current_activities = match &current_session {
            Some(session) => {
                self.list_activities(&ActivityFilter {
                    session_id: Some(session.id),
                    ..ActivityFilter::default()
                })
                .await?
                .into_iter()
                .filter(|a| !a.closed)
                .collect()
            }
            None => Vec::new(),
        };

        Ok(OrganizationOverview {
            organization,
            contacts,
            current_session,
            future_sessions,
            past_sessions,
            current_activities,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{anonymous_service, date, test_service};
    use crate::updates::organization::OrganizationUpdateBuilder;

    #[tokio::test]
    async fn create_and_get_organization() {
        let svc = test_service().await;
        let org = svc
            .create_organization("Rochester Parks", Some("parks@example.org"))
            .await
            .unwrap();
        assert!(org.id > 0);

        let fetched = svc.get_organization(org.id).await.unwrap();
        assert_eq!(fetched, org);
    }

    #[tokio::test]
    async fn create_requires_identity() {
        let svc = anonymous_service().await;
        let result = svc.create_organization("Org", None).await;
        assert!(matches!(result, Err(DatabaseError::Unauthenticated(_))));
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let svc = test_service().await;
        let result = svc.create_organization("   ", None).await;
        assert!(matches!(result, Err(DatabaseError::Validation(_))));
    }

    #[tokio::test]
    async fn soft_delete_hides_from_default_listing() {
        let svc = test_service().await;
        let keep = svc.create_organization("Keep", None).await.unwrap();
        let gone = svc.create_organization("Gone", None).await.unwrap();

        svc.delete_organization(gone.id).await.unwrap();

        let listed = svc.list_organizations(false).await.unwrap();
        assert_eq!(listed.iter().map(|o| o.id).collect::<Vec<_>>(), vec![keep.id]);

        let all = svc.list_organizations(true).await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(svc.get_organization(gone.id).await.unwrap().is_deleted);

        let restored = svc.restore_organization(gone.id).await.unwrap();
        assert!(!restored.is_deleted);
    }

    #[tokio::test]
    async fn update_clears_contact_email() {
        let svc = test_service().await;
        let org = svc
            .create_organization("Org", Some("a@example.org"))
            .await
            .unwrap();

        let update = OrganizationUpdateBuilder::new()
            .name("Renamed")
            .contact_email(None)
            .build();
        let updated = svc.update_organization(org.id, update).await.unwrap();
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.contact_email, None);
    }

    #[tokio::test]
    async fn missing_organization_is_not_found() {
        let svc = test_service().await;
        assert!(matches!(
            svc.get_organization(42).await,
            Err(DatabaseError::NotFound { .. })
        ));
        assert!(matches!(
            svc.delete_organization(42).await,
            Err(DatabaseError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn overview_splits_sessions_around_today() {
        let svc = test_service().await;
        let org = svc.create_organization("Org", None).await.unwrap();
        let past = svc
            .create_session(org.id, "Spring 2025", date("2025-03-01"), date("2025-05-31"))
            .await
            .unwrap();
        let current = svc
            .create_session(org.id, "Fall 2025", date("2025-09-01"), date("2025-12-15"))
            .await
            .unwrap();
        let future = svc
            .create_session(org.id, "Winter 2026", date("2026-01-05"), date("2026-03-30"))
            .await
            .unwrap();

        let overview = svc
            .organization_overview(org.id, date("2025-10-01"))
            .await
            .unwrap();
        assert_eq!(overview.current_session.map(|s| s.id), Some(current.id));
        assert_eq!(
            overview.past_sessions.iter().map(|s| s.id).collect::<Vec<_>>(),
            vec![past.id]
        );
        assert_eq!(
            overview.future_sessions.iter().map(|s| s.id).collect::<Vec<_>>(),
            vec![future.id]
        );
    }
}
