//! Enrollment repository and the reconciliation rule.
//!
//! Reconciliation replaces an activity's roster with a desired enrolled set
//! and waitlist set: rows for students in neither set are deleted, the rest
//! are upserted by `(student, activity)`. The whole replacement is one
//! transaction.

use std::collections::BTreeSet;

use chrono::Utc;

use roster_core::entities::{Enrollment, Student};
use roster_core::enums::EnrollmentStatus;
use roster_core::responses::ReconcileResponse;

use crate::error::DatabaseError;
use crate::helpers::{date_param, finish_tx, get_date, parse_enum, placeholders};
use crate::repos::student::{STUDENT_COLS, row_to_student};
use crate::service::RosterService;

const SELECT_COLS: &str = "id, student_id, activity_id, status, date_enrolled";

fn row_to_enrollment(row: &libsql::Row) -> Result<Enrollment, DatabaseError> {
    Ok(Enrollment {
        id: row.get(0)?,
        student_id: row.get(1)?,
        activity_id: row.get(2)?,
        status: parse_enum(&row.get::<String>(3)?)?,
        date_enrolled: get_date(row, 4)?,
    })
}

impl RosterService {
    /// Make the activity's enrollment rows match `enrolled` (status active)
    /// and `waitlisted` (status waiting) exactly.
    ///
    /// Duplicate ids within a list are collapsed. An id in both lists is a
    /// `Validation` error; an id with no student is `NotFound`. Either way
    /// nothing changes.
    pub async fn reconcile_enrollment(
        &self,
        activity_id: i64,
        enrolled: &[i64],
        waitlisted: &[i64],
    ) -> Result<ReconcileResponse, DatabaseError> {
        self.require_identity()?;
        let enrolled: BTreeSet<i64> = enrolled.iter().copied().collect();
        let waitlisted: BTreeSet<i64> = waitlisted.iter().copied().collect();
        let overlap: Vec<String> = enrolled
            .intersection(&waitlisted)
            .map(ToString::to_string)
            .collect();
        if !overlap.is_empty() {
            return Err(DatabaseError::Validation(format!(
                "students cannot be both enrolled and waitlisted: {}",
                overlap.join(", ")
            )));
        }
        self.get_activity(activity_id).await?;

        let keep: Vec<i64> = enrolled.union(&waitlisted).copied().collect();
        let today = date_param(Utc::now().date_naive());

        let tx = self.db().conn().transaction().await?;
        let result = async {
            for student_id in &keep {
                let mut rows = tx
                    .query("SELECT 1 FROM students WHERE id = ?1", [*student_id])
                    .await?;
                if rows.next().await?.is_none() {
                    return Err(DatabaseError::not_found("student", student_id));
                }
            }

            let removed = if keep.is_empty() {
                tx.execute("DELETE FROM enrollments WHERE activity_id = ?1", [activity_id])
                    .await?
            } else {
                let mut params: Vec<libsql::Value> = vec![activity_id.into()];
                params.extend(keep.iter().map(|id| libsql::Value::from(*id)));
                tx.execute(
                    &format!(
                        "DELETE FROM enrollments WHERE activity_id = ?1 AND student_id NOT IN ({})",
                        placeholders(2, keep.len())
                    ),
                    libsql::params_from_iter(params),
                )
                .await?
            };

            let targets = enrolled
                .iter()
                .map(|id| (*id, EnrollmentStatus::Active))
                .chain(waitlisted.iter().map(|id| (*id, EnrollmentStatus::Waiting)));
            for (student_id, status) in targets {
                tx.execute(
                    "INSERT INTO enrollments (student_id, activity_id, status, date_enrolled)
                     VALUES (?1, ?2, ?3, ?4)
                     ON CONFLICT (student_id, activity_id) DO UPDATE SET status = excluded.status",
                    libsql::params![student_id, activity_id, status.as_str(), today.as_str()],
                )
                .await?;
            }
            Ok(removed)
        }
        .await;
        let removed = finish_tx(tx, result).await?;

        tracing::info!(
            activity_id,
            enrolled = enrolled.len(),
            waitlisted = waitlisted.len(),
            removed,
            "enrollment reconciled"
        );
        Ok(ReconcileResponse {
            activity_id,
            enrolled: enrolled.len(),
            waitlisted: waitlisted.len(),
            removed,
        })
    }

    pub async fn list_enrollments(
        &self,
        activity_id: i64,
    ) -> Result<Vec<Enrollment>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM enrollments WHERE activity_id = ?1 ORDER BY student_id"
                ),
                [activity_id],
            )
            .await?;

        let mut enrollments = Vec::new();
        while let Some(row) = rows.next().await? {
            enrollments.push(row_to_enrollment(&row)?);
        }
        Ok(enrollments)
    }

    /// Students holding `status` on the activity, ordered by last, first name.
    pub async fn enrolled_students(
        &self,
        activity_id: i64,
        status: EnrollmentStatus,
    ) -> Result<Vec<Student>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {STUDENT_COLS} FROM enrollments e
                     JOIN students st ON st.id = e.student_id
                     WHERE e.activity_id = ?1 AND e.status = ?2
                     ORDER BY st.last_name, st.first_name, st.id"
                ),
                libsql::params![activity_id, status.as_str()],
            )
            .await?;

        let mut students = Vec::new();
        while let Some(row) = rows.next().await? {
            students.push(row_to_student(&row)?);
        }
        Ok(students)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{
        create_fall_session, create_test_activity, create_test_org, create_test_student,
        test_service,
    };
    use pretty_assertions::assert_eq;
    use roster_core::enums::{ActivityType, DayOfWeek};

    async fn setup() -> (RosterService, i64, Vec<i64>) {
        let svc = test_service().await;
        let org = create_test_org(&svc, "Org").await;
        let session = create_fall_session(&svc, org.id).await;
        let activity =
            create_test_activity(&svc, session.id, ActivityType::Zumba, DayOfWeek::Monday, "18:00")
                .await;
        let mut students = Vec::new();
        for (first, last) in [("Ada", "Lovelace"), ("Grace", "Hopper"), ("Alan", "Turing")] {
            students.push(create_test_student(&svc, first, last).await.id);
        }
        (svc, activity.id, students)
    }

    async fn statuses(svc: &RosterService, activity_id: i64) -> Vec<(i64, EnrollmentStatus)> {
        svc.list_enrollments(activity_id)
            .await
            .unwrap()
            .into_iter()
            .map(|e| (e.student_id, e.status))
            .collect()
    }

    #[tokio::test]
    async fn overlapping_sets_are_rejected() {
        let (svc, activity, s) = setup().await;
        let result = svc.reconcile_enrollment(activity, &[s[0], s[1]], &[s[1]]).await;
        assert!(matches!(result, Err(DatabaseError::Validation(_))));
        assert!(statuses(&svc, activity).await.is_empty());
    }

    #[tokio::test]
    async fn duplicate_ids_collapse() {
        let (svc, activity, s) = setup().await;
        let response = svc
            .reconcile_enrollment(activity, &[s[0], s[0]], &[s[2], s[2]])
            .await
            .unwrap();
        assert_eq!(response.enrolled, 1);
        assert_eq!(response.waitlisted, 1);
        assert_eq!(statuses(&svc, activity).await.len(), 2);
    }

    #[tokio::test]
    async fn unknown_student_rolls_back_everything() {
        let (svc, activity, s) = setup().await;
        svc.reconcile_enrollment(activity, &[s[0]], &[]).await.unwrap();

        let result = svc.reconcile_enrollment(activity, &[s[1], 9999], &[]).await;
        assert!(matches!(result, Err(DatabaseError::NotFound { .. })));
        assert_eq!(
            statuses(&svc, activity).await,
            vec![(s[0], EnrollmentStatus::Active)]
        );
    }

    #[tokio::test]
    async fn status_moves_between_sets_in_place() {
        let (svc, activity, s) = setup().await;
        svc.reconcile_enrollment(activity, &[s[0]], &[s[1]]).await.unwrap();
        let before = svc.list_enrollments(activity).await.unwrap();

        svc.reconcile_enrollment(activity, &[s[1]], &[s[0]]).await.unwrap();
        let after = svc.list_enrollments(activity).await.unwrap();

        assert_eq!(
            before.iter().map(|e| e.id).collect::<Vec<_>>(),
            after.iter().map(|e| e.id).collect::<Vec<_>>()
        );
        assert_eq!(
            statuses(&svc, activity).await,
            vec![(s[0], EnrollmentStatus::Waiting), (s[1], EnrollmentStatus::Active)]
        );
    }

    #[tokio::test]
    async fn empty_sets_clear_roster() {
        let (svc, activity, s) = setup().await;
        svc.reconcile_enrollment(activity, &[s[0], s[1]], &[s[2]])
            .await
            .unwrap();
        let response = svc.reconcile_enrollment(activity, &[], &[]).await.unwrap();
        assert_eq!(response.removed, 3);
        assert!(statuses(&svc, activity).await.is_empty());
    }

    #[tokio::test]
    async fn enrolled_students_are_name_ordered() {
        let (svc, activity, s) = setup().await;
        svc.reconcile_enrollment(activity, &[s[2], s[0], s[1]], &[])
            .await
            .unwrap();
        let names: Vec<_> = svc
            .enrolled_students(activity, EnrollmentStatus::Active)
            .await
            .unwrap()
            .iter()
            .map(Student::display_name)
            .collect();
        assert_eq!(names, vec!["Hopper, Grace", "Lovelace, Ada", "Turing, Alan"]);
    }
}
