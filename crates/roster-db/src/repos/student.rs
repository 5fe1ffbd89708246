//! Student repository: CRUD, search, walk-in quick create, detail.

use roster_core::entities::Student;
use roster_core::responses::{StudentDetail, StudentEnrollmentSummary};

use crate::error::DatabaseError;
use crate::helpers::{get_bool, get_opt_string, parse_enum};
use crate::repos::activity::{ACTIVITY_COLS, row_to_activity};
use crate::service::RosterService;
use crate::updates::SetClauses;
use crate::updates::student::StudentUpdate;

/// Columns of `students st`, in `row_to_student` order.
pub(crate) const STUDENT_COLS: &str = "st.id, st.first_name, st.last_name, st.email, st.phone, \
     st.facebook_profile, st.emergency_contact_name, st.emergency_contact_phone, st.notes, \
     st.active, st.rochester";

/// Number of columns in [`STUDENT_COLS`].
pub(crate) const STUDENT_COL_COUNT: i32 = 11;

/// Shortest accepted search query.
pub const MIN_SEARCH_LEN: usize = 2;

/// Most results a search returns.
pub const MAX_SEARCH_RESULTS: u32 = 20;

pub(crate) fn row_to_student(row: &libsql::Row) -> Result<Student, DatabaseError> {
    Ok(Student {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: get_opt_string(row, 3)?,
        phone: get_opt_string(row, 4)?,
        facebook_profile: get_opt_string(row, 5)?,
        emergency_contact_name: get_opt_string(row, 6)?,
        emergency_contact_phone: get_opt_string(row, 7)?,
        notes: get_opt_string(row, 8)?,
        active: get_bool(row, 9)?,
        rochester: get_bool(row, 10)?,
    })
}

/// Fields of a student to create.
#[derive(Debug, Clone)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub facebook_profile: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub notes: Option<String>,
    pub active: bool,
    pub rochester: bool,
}

impl Default for NewStudent {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: None,
            phone: None,
            facebook_profile: None,
            emergency_contact_name: None,
            emergency_contact_phone: None,
            notes: None,
            active: true,
            rochester: false,
        }
    }
}

impl RosterService {
    pub async fn create_student(&self, new: NewStudent) -> Result<Student, DatabaseError> {
        self.require_identity()?;
        if new.first_name.trim().is_empty() && new.last_name.trim().is_empty() {
            return Err(DatabaseError::Validation(
                "first_name or last_name is required".into(),
            ));
        }

        let conn = self.db().conn();
        conn.execute(
            "INSERT INTO students (first_name, last_name, email, phone, facebook_profile,
                emergency_contact_name, emergency_contact_phone, notes, active, rochester)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            libsql::params![
                new.first_name.trim(),
                new.last_name.trim(),
                new.email.as_deref(),
                new.phone.as_deref(),
                new.facebook_profile.as_deref(),
                new.emergency_contact_name.as_deref(),
                new.emergency_contact_phone.as_deref(),
                new.notes.as_deref(),
                i64::from(new.active),
                i64::from(new.rochester)
            ],
        )
        .await?;
        let id = conn.last_insert_rowid();
        tracing::debug!(student_id = id, "student created");
        self.get_student(id).await
    }

    /// Create a walk-in student from the minimum the front desk has at hand.
    /// The rest of the record can be filled in later.
    pub async fn quick_create_student(
        &self,
        first_name: &str,
        last_name: &str,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Student, DatabaseError> {
        self.create_student(NewStudent {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.map(String::from),
            phone: phone.map(String::from),
            ..NewStudent::default()
        })
        .await
    }

    pub async fn get_student(&self, id: i64) -> Result<Student, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {STUDENT_COLS} FROM students st WHERE st.id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("student", id))?;
        row_to_student(&row)
    }

    /// Students ordered by last, first name.
    pub async fn list_students(
        &self,
        active_only: bool,
        limit: u32,
    ) -> Result<Vec<Student>, DatabaseError> {
        let filter = if active_only { "WHERE st.active = 1" } else { "" };
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {STUDENT_COLS} FROM students st {filter}
                     ORDER BY st.last_name, st.first_name, st.id LIMIT ?1"
                ),
                [i64::from(limit)],
            )
            .await?;

        let mut students = Vec::new();
        while let Some(row) = rows.next().await? {
            students.push(row_to_student(&row)?);
        }
        Ok(students)
    }

    /// Case-insensitive substring search over first name, last name and email.
    pub async fn search_students(&self, query: &str) -> Result<Vec<Student>, DatabaseError> {
        let query = query.trim();
        if query.chars().count() < MIN_SEARCH_LEN {
            return Err(DatabaseError::Validation(format!(
                "search query must be at least {MIN_SEARCH_LEN} characters"
            )));
        }

        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {STUDENT_COLS} FROM students st
                     WHERE instr(lower(st.first_name), ?1) > 0
                        OR instr(lower(st.last_name), ?1) > 0
                        OR instr(lower(coalesce(st.email, '')), ?1) > 0
                     ORDER BY st.last_name, st.first_name, st.id
                     LIMIT ?2"
                ),
                libsql::params![query.to_lowercase(), i64::from(MAX_SEARCH_RESULTS)],
            )
            .await?;

        let mut students = Vec::new();
        while let Some(row) = rows.next().await? {
            students.push(row_to_student(&row)?);
        }
        Ok(students)
    }

    pub async fn update_student(
        &self,
        id: i64,
        update: StudentUpdate,
    ) -> Result<Student, DatabaseError> {
        self.require_identity()?;
        let mut sets = SetClauses::default();
        if let Some(first_name) = update.first_name {
            sets.push("first_name", first_name);
        }
        if let Some(last_name) = update.last_name {
            sets.push("last_name", last_name);
        }
        if let Some(email) = update.email {
            sets.push_opt("email", email);
        }
        if let Some(phone) = update.phone {
            sets.push_opt("phone", phone);
        }
        if let Some(facebook_profile) = update.facebook_profile {
            sets.push_opt("facebook_profile", facebook_profile);
        }
        if let Some(name) = update.emergency_contact_name {
            sets.push_opt("emergency_contact_name", name);
        }
        if let Some(phone) = update.emergency_contact_phone {
            sets.push_opt("emergency_contact_phone", phone);
        }
        if let Some(notes) = update.notes {
            sets.push_opt("notes", notes);
        }
        if let Some(active) = update.active {
            sets.push("active", i64::from(active));
        }
        if let Some(rochester) = update.rochester {
            sets.push("rochester", i64::from(rochester));
        }
        if sets.is_empty() {
            return self.get_student(id).await;
        }

        let (sql, params) = sets.into_update("students", id);
        let changed = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("student", id));
        }
        self.get_student(id).await
    }

    /// Hard delete; enrollments and attendance records go with it.
    pub async fn delete_student(&self, id: i64) -> Result<(), DatabaseError> {
        self.require_identity()?;
        let changed = self
            .db()
            .conn()
            .execute("DELETE FROM students WHERE id = ?1", [id])
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("student", id));
        }
        Ok(())
    }

    /// Student with enrollments. Enrollments in closed activities are left
    /// out unless `include_closed`.
    pub async fn student_detail(
        &self,
        id: i64,
        include_closed: bool,
    ) -> Result<StudentDetail, DatabaseError> {
        let student = self.get_student(id).await?;
        let closed_filter = if include_closed { "" } else { "AND a.closed = 0" };

        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {ACTIVITY_COLS}, e.id, e.status, s.name
                     FROM enrollments e
                     JOIN activities a ON a.id = e.activity_id
                     JOIN sessions s ON s.id = a.session_id
                     WHERE e.student_id = ?1 {closed_filter}
                     ORDER BY s.start_date DESC, a.id"
                ),
                [id],
            )
            .await?;

        let mut enrollments = Vec::new();
        while let Some(row) = rows.next().await? {
            enrollments.push(StudentEnrollmentSummary {
                activity: row_to_activity(&row)?,
                enrollment_id: row.get(8)?,
                status: parse_enum(&row.get::<String>(9)?)?,
                session_name: row.get(10)?,
            });
        }

        Ok(StudentDetail {
            full_name: student.full_name(),
            display_name: student.display_name(),
            student,
            enrollments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{create_test_student, test_service};
    use crate::updates::student::StudentUpdateBuilder;

    #[tokio::test]
    async fn create_student_defaults_active() {
        let svc = test_service().await;
        let student = create_test_student(&svc, "Ada", "Lovelace").await;
        assert!(student.active);
        assert!(!student.rochester);
        assert_eq!(student.email.as_deref(), Some("ada.lovelace@example.org"));
    }

    #[tokio::test]
    async fn nameless_student_is_rejected() {
        let svc = test_service().await;
        let result = svc.quick_create_student(" ", "", None, None).await;
        assert!(matches!(result, Err(DatabaseError::Validation(_))));
    }

    #[tokio::test]
    async fn search_matches_name_or_email_case_insensitively() {
        let svc = test_service().await;
        create_test_student(&svc, "Ada", "Lovelace").await;
        create_test_student(&svc, "Grace", "Hopper").await;
        svc.quick_create_student("Alan", "Turing", Some("ALAN@bletchley.uk"), None)
            .await
            .unwrap();

        let by_last = svc.search_students("hop").await.unwrap();
        assert_eq!(by_last.len(), 1);
        assert_eq!(by_last[0].last_name, "Hopper");

        let by_email = svc.search_students("bletchley").await.unwrap();
        assert_eq!(by_email[0].first_name, "Alan");

        let by_letters = svc.search_students("LA").await.unwrap();
        let names: Vec<_> = by_letters.iter().map(Student::display_name).collect();
        assert_eq!(names, vec!["Lovelace, Ada", "Turing, Alan"]);
    }

    #[tokio::test]
    async fn search_requires_two_characters() {
        let svc = test_service().await;
        let result = svc.search_students(" a ").await;
        assert!(matches!(result, Err(DatabaseError::Validation(_))));
    }

    #[tokio::test]
    async fn search_caps_results() {
        let svc = test_service().await;
        for i in 0..25 {
            svc.quick_create_student("Sam", &format!("Smith{i:02}"), None, None)
                .await
                .unwrap();
        }
        let results = svc.search_students("smith").await.unwrap();
        assert_eq!(results.len(), MAX_SEARCH_RESULTS as usize);
        assert_eq!(results[0].last_name, "Smith00");
    }

    #[tokio::test]
    async fn list_active_only_skips_inactive() {
        let svc = test_service().await;
        let ada = create_test_student(&svc, "Ada", "Lovelace").await;
        create_test_student(&svc, "Grace", "Hopper").await;
        svc.update_student(ada.id, StudentUpdateBuilder::new().active(false).build())
            .await
            .unwrap();

        assert_eq!(svc.list_students(true, 20).await.unwrap().len(), 1);
        assert_eq!(svc.list_students(false, 20).await.unwrap().len(), 2);
        assert_eq!(svc.list_students(false, 1).await.unwrap().len(), 1);
    }
}
