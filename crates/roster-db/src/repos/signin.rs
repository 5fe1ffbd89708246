//! Sign-in sheet generation.
//!
//! Reads the roster and cancellations, lays out the sheet, then hands the
//! finished payload to a [`SheetExporter`]. Nothing is written locally, so an
//! export failure leaves no trace in the database.

use chrono::{NaiveDate, NaiveDateTime};

use roster_core::enums::EnrollmentStatus;
use roster_core::export::SheetExporter;
use roster_core::responses::SignInSheetResponse;
use roster_core::schedule::sheet_dates;
use roster_core::signin::{SignInSheetInput, build_sheet, sheet_title, worksheet_label};

use crate::error::DatabaseError;
use crate::service::RosterService;

/// Parameters of one sign-in sheet.
#[derive(Debug, Clone)]
pub struct SignInRequest<'a> {
    pub activity_id: i64,
    pub start_date: NaiveDate,
    /// Between 1 and 52.
    pub num_weeks: u32,
    /// Drive folder the spreadsheet lives in.
    pub folder_id: &'a str,
    /// Timestamp the worksheet is labelled with.
    pub generated_at: NaiveDateTime,
}

impl RosterService {
    /// Build the sign-in sheet for an activity and export it.
    ///
    /// Date columns step weekly from `start_date`; cancelled dates are left
    /// out. Enrolled and waitlisted students are listed by last, first name.
    pub async fn generate_signin_sheet<E: SheetExporter>(
        &self,
        exporter: &E,
        request: &SignInRequest<'_>,
    ) -> Result<SignInSheetResponse, DatabaseError> {
        self.require_identity()?;
        let activity = self.get_activity(request.activity_id).await?;
        let session = self.get_session(activity.session_id).await?;
        let cancelled = self.cancelled_dates(activity.id).await?;
        let dates = sheet_dates(request.start_date, request.num_weeks, &cancelled)?;

        let enrolled: Vec<String> = self
            .enrolled_students(activity.id, EnrollmentStatus::Active)
            .await?
            .iter()
            .map(|s| s.display_name())
            .collect();
        let waitlisted: Vec<String> = self
            .enrolled_students(activity.id, EnrollmentStatus::Waiting)
            .await?
            .iter()
            .map(|s| s.display_name())
            .collect();

        let sheet = build_sheet(&SignInSheetInput {
            title: sheet_title(&session, &activity),
            folder_id: request.folder_id,
            worksheet_label: worksheet_label(request.generated_at),
            dates: &dates,
            enrolled: &enrolled,
            waitlisted: &waitlisted,
        });

        let sheet_url = exporter.export(&sheet).await.inspect_err(|e| {
            tracing::warn!(activity_id = activity.id, error = %e, "sign-in sheet export failed");
        })?;

        tracing::info!(
            activity_id = activity.id,
            title = %sheet.title,
            worksheet = %sheet.worksheet_label,
            "sign-in sheet exported"
        );
        Ok(SignInSheetResponse {
            sheet_url,
            title: sheet.title,
            worksheet_label: sheet.worksheet_label,
            dates,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::test_support::helpers::{
        create_fall_session, create_test_activity, create_test_org, create_test_student, date,
        test_service,
    };
    use pretty_assertions::assert_eq;
    use roster_core::enums::{ActivityType, DayOfWeek};
    use roster_core::export::{ExportError, SheetExport};
    use roster_core::signin::WAITLIST_HEADER;

    #[derive(Default)]
    struct RecordingExporter {
        sheets: Mutex<Vec<SheetExport>>,
    }

    impl SheetExporter for RecordingExporter {
        async fn export(&self, sheet: &SheetExport) -> Result<String, ExportError> {
            self.sheets.lock().unwrap().push(sheet.clone());
            Ok("https://sheets.example/abc".into())
        }
    }

    struct FailingExporter;

    impl SheetExporter for FailingExporter {
        async fn export(&self, _sheet: &SheetExport) -> Result<String, ExportError> {
            Err(ExportError::Service {
                status: 403,
                message: "insufficient permissions".into(),
            })
        }
    }

    fn request(activity_id: i64, num_weeks: u32) -> SignInRequest<'static> {
        SignInRequest {
            activity_id,
            start_date: date("2025-09-08"),
            num_weeks,
            folder_id: "folder-1",
            generated_at: date("2025-11-09").and_hms_opt(16, 25, 0).unwrap(),
        }
    }

    async fn setup() -> (RosterService, i64) {
        let svc = test_service().await;
        let org = create_test_org(&svc, "Org").await;
        let session = create_fall_session(&svc, org.id).await;
        let activity =
            create_test_activity(&svc, session.id, ActivityType::Zumba, DayOfWeek::Monday, "18:00")
                .await;
        let a = create_test_student(&svc, "Ada", "Lovelace").await.id;
        let b = create_test_student(&svc, "Grace", "Hopper").await.id;
        let w = create_test_student(&svc, "Alan", "Turing").await.id;
        svc.reconcile_enrollment(activity.id, &[a, b], &[w])
            .await
            .unwrap();
        (svc, activity.id)
    }

    #[tokio::test]
    async fn sheet_skips_cancelled_dates_and_orders_names() {
        let (svc, activity) = setup().await;
        svc.create_cancellation(activity, date("2025-09-15"), None)
            .await
            .unwrap();
        let exporter = RecordingExporter::default();

        let response = svc
            .generate_signin_sheet(&exporter, &request(activity, 3))
            .await
            .unwrap();
        assert_eq!(response.sheet_url, "https://sheets.example/abc");
        assert_eq!(response.title, "Fall 2025 - Monday Zumba");
        assert_eq!(response.worksheet_label, "Nov 9, 2025 4:25pm");
        assert_eq!(response.dates, vec![date("2025-09-08"), date("2025-09-22")]);

        let sheets = exporter.sheets.lock().unwrap();
        let rows = &sheets[0].rows;
        assert_eq!(rows[1], vec!["", "9/8", "9/22"]);
        assert_eq!(rows[2][0], "Hopper, Grace");
        assert_eq!(rows[3][0], "Lovelace, Ada");
        assert_eq!(rows[5][0], WAITLIST_HEADER);
        assert_eq!(rows[6][0], "Turing, Alan");
        assert_eq!(sheets[0].folder_id, "folder-1");
    }

    #[tokio::test]
    async fn out_of_range_weeks_never_reach_exporter() {
        let (svc, activity) = setup().await;
        let exporter = RecordingExporter::default();
        let result = svc
            .generate_signin_sheet(&exporter, &request(activity, 53))
            .await;
        assert!(matches!(result, Err(DatabaseError::Validation(_))));
        assert!(exporter.sheets.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn export_failure_is_surfaced() {
        let (svc, activity) = setup().await;
        let result = svc
            .generate_signin_sheet(&FailingExporter, &request(activity, 7))
            .await;
        assert!(matches!(
            result,
            Err(DatabaseError::Export(ExportError::Service { status: 403, .. }))
        ));
    }
}
