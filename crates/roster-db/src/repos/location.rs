//! Location repository: CRUD and duplicate merge.

use roster_core::entities::Location;
use roster_core::responses::LocationMergeResponse;

use crate::error::DatabaseError;
use crate::helpers::{finish_tx, get_opt_string};
use crate::service::RosterService;
use crate::updates::SetClauses;
use crate::updates::location::LocationUpdate;

const SELECT_COLS: &str = "id, organization_id, name, address";

fn row_to_location(row: &libsql::Row) -> Result<Location, DatabaseError> {
    Ok(Location {
        id: row.get(0)?,
        organization_id: row.get(1)?,
        name: row.get(2)?,
        address: get_opt_string(row, 3)?,
    })
}

impl RosterService {
    pub async fn create_location(
        &self,
        organization_id: i64,
        name: &str,
        address: Option<&str>,
    ) -> Result<Location, DatabaseError> {
        self.require_identity()?;
        self.get_organization(organization_id).await?;

        let conn = self.db().conn();
        conn.execute(
            "INSERT INTO locations (organization_id, name, address) VALUES (?1, ?2, ?3)",
            libsql::params![organization_id, name, address],
        )
        .await?;

        Ok(Location {
            id: conn.last_insert_rowid(),
            organization_id,
            name: name.to_string(),
            address: address.map(String::from),
        })
    }

    pub async fn get_location(&self, id: i64) -> Result<Location, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM locations WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("location", id))?;
        row_to_location(&row)
    }

    pub async fn list_locations(
        &self,
        organization_id: Option<i64>,
    ) -> Result<Vec<Location>, DatabaseError> {
        let mut rows = match organization_id {
            Some(org) => {
                self.db()
                    .conn()
                    .query(
                        &format!(
                            "SELECT {SELECT_COLS} FROM locations WHERE organization_id = ?1 ORDER BY name"
                        ),
                        [org],
                    )
                    .await?
            }
            None => {
                self.db()
                    .conn()
                    .query(
                        &format!("SELECT {SELECT_COLS} FROM locations ORDER BY name"),
                        (),
                    )
                    .await?
            }
        };

        let mut locations = Vec::new();
        while let Some(row) = rows.next().await? {
            locations.push(row_to_location(&row)?);
        }
        Ok(locations)
    }

    pub async fn update_location(
        &self,
        id: i64,
        update: LocationUpdate,
    ) -> Result<Location, DatabaseError> {
        self.require_identity()?;
        let mut sets = SetClauses::default();
        if let Some(name) = update.name {
            sets.push("name", name);
        }
        if let Some(address) = update.address {
            sets.push_opt("address", address);
        }
        if sets.is_empty() {
            return self.get_location(id).await;
        }

        let (sql, params) = sets.into_update("locations", id);
        let changed = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("location", id));
        }
        self.get_location(id).await
    }

    /// Hard delete. Activities that referenced the location keep running with
    /// no location.
    pub async fn delete_location(&self, id: i64) -> Result<(), DatabaseError> {
        self.require_identity()?;
        let changed = self
            .db()
            .conn()
            .execute("DELETE FROM locations WHERE id = ?1", [id])
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("location", id));
        }
        Ok(())
    }

    /// Reparent every activity at `duplicate_id` onto `canonical_id`, then
    /// delete the duplicate. Both steps commit together or not at all.
    pub async fn merge_locations(
        &self,
        duplicate_id: i64,
        canonical_id: i64,
    ) -> Result<LocationMergeResponse, DatabaseError> {
        self.require_identity()?;
        if duplicate_id == canonical_id {
            return Err(DatabaseError::Validation(
                "cannot merge a location into itself".into(),
            ));
        }
        self.get_location(duplicate_id).await?;
        self.get_location(canonical_id).await?;

        let tx = self.db().conn().transaction().await?;
        let result = async {
            let reassigned = tx
                .execute(
                    "UPDATE activities SET location_id = ?1 WHERE location_id = ?2",
                    libsql::params![canonical_id, duplicate_id],
                )
                .await?;
            tx.execute("DELETE FROM locations WHERE id = ?1", [duplicate_id])
                .await?;
            Ok::<_, DatabaseError>(reassigned)
        }
        .await;
        let activities_reassigned = finish_tx(tx, result).await?;

        tracing::info!(
            duplicate_id,
            canonical_id,
            activities_reassigned,
            "locations merged"
        );
        Ok(LocationMergeResponse {
            duplicate_id,
            canonical_id,
            activities_reassigned,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{
        create_fall_session, create_test_activity, create_test_org, test_service,
    };
    use crate::updates::activity::ActivityUpdateBuilder;
    use crate::updates::location::LocationUpdateBuilder;
    use roster_core::enums::{ActivityType, DayOfWeek};

    #[tokio::test]
    async fn create_list_update_location() {
        let svc = test_service().await;
        let org = create_test_org(&svc, "Org").await;
        let gym = svc
            .create_location(org.id, "Gym", Some("1 Main St"))
            .await
            .unwrap();
        svc.create_location(org.id, "Annex", None).await.unwrap();

        let names: Vec<_> = svc
            .list_locations(Some(org.id))
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.name)
            .collect();
        assert_eq!(names, vec!["Annex", "Gym"]);

        let updated = svc
            .update_location(gym.id, LocationUpdateBuilder::new().address(None).build())
            .await
            .unwrap();
        assert_eq!(updated.address, None);
    }

    #[tokio::test]
    async fn create_under_missing_org_is_not_found() {
        let svc = test_service().await;
        let result = svc.create_location(99, "Gym", None).await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
    }

    #[tokio::test]
    async fn merge_reassigns_activities_and_deletes_duplicate() {
        let svc = test_service().await;
        let org = create_test_org(&svc, "Org").await;
        let session = create_fall_session(&svc, org.id).await;
        let canonical = svc.create_location(org.id, "Gym", None).await.unwrap();
        let duplicate = svc.create_location(org.id, "gym", None).await.unwrap();

        for day in [DayOfWeek::Monday, DayOfWeek::Wednesday] {
            let activity =
                create_test_activity(&svc, session.id, ActivityType::Zumba, day, "18:00").await;
            svc.update_activity(
                activity.id,
                ActivityUpdateBuilder::new()
                    .location_id(Some(duplicate.id))
                    .build(),
            )
            .await
            .unwrap();
        }

        let merged = svc.merge_locations(duplicate.id, canonical.id).await.unwrap();
        assert_eq!(merged.activities_reassigned, 2);
        assert!(matches!(
            svc.get_location(duplicate.id).await,
            Err(DatabaseError::NotFound { .. })
        ));

        let activities = svc
            .list_activities(&crate::repos::activity::ActivityFilter {
                session_id: Some(session.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(activities.iter().all(|a| a.location_id == Some(canonical.id)));
    }

    #[tokio::test]
    async fn merge_into_self_is_rejected() {
        let svc = test_service().await;
        let org = create_test_org(&svc, "Org").await;
        let gym = svc.create_location(org.id, "Gym", None).await.unwrap();
        let result = svc.merge_locations(gym.id, gym.id).await;
        assert!(matches!(result, Err(DatabaseError::Validation(_))));
    }
}
