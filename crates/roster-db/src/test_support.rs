//! Shared test utilities for roster-db unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use chrono::{NaiveDate, NaiveTime};
    use roster_core::entities::{Activity, Organization, Session, Student};
    use roster_core::enums::{ActivityType, DayOfWeek};
    use roster_core::identity::AuthIdentity;

    use crate::RosterDb;
    use crate::repos::activity::NewActivity;
    use crate::repos::student::NewStudent;
    use crate::service::RosterService;

    /// In-memory service with an operator identity attached.
    pub async fn test_service() -> RosterService {
        let db = RosterDb::open_local(":memory:").await.unwrap();
        RosterService::from_db(db, Some(AuthIdentity::new("test-operator")))
    }

    /// In-memory service with no identity (mutations must fail).
    pub async fn anonymous_service() -> RosterService {
        let db = RosterDb::open_local(":memory:").await.unwrap();
        RosterService::from_db(db, None)
    }

    #[must_use]
    pub fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
    }

    #[must_use]
    pub fn time(raw: &str) -> NaiveTime {
        NaiveTime::parse_from_str(raw, "%H:%M").unwrap()
    }

    pub async fn create_test_org(svc: &RosterService, name: &str) -> Organization {
        svc.create_organization(name, None).await.unwrap()
    }

    /// "Fall 2025", Sep 1 through Dec 15.
    pub async fn create_fall_session(svc: &RosterService, organization_id: i64) -> Session {
        svc.create_session(
            organization_id,
            "Fall 2025",
            date("2025-09-01"),
            date("2025-12-15"),
        )
        .await
        .unwrap()
    }

    pub async fn create_test_activity(
        svc: &RosterService,
        session_id: i64,
        activity_type: ActivityType,
        day_of_week: DayOfWeek,
        at: &str,
    ) -> Activity {
        svc.create_activity(NewActivity {
            session_id,
            activity_type,
            day_of_week,
            time: time(at),
            location_id: None,
            max_capacity: None,
        })
        .await
        .unwrap()
    }

    pub async fn create_test_student(
        svc: &RosterService,
        first_name: &str,
        last_name: &str,
    ) -> Student {
        svc.create_student(NewStudent {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: Some(format!(
                "{}.{}@example.org",
                first_name.to_lowercase(),
                last_name.to_lowercase()
            )),
            ..NewStudent::default()
        })
        .await
        .unwrap()
    }
}
