//! Enrollment combinations and bulk email drafts.
//!
//! Students are grouped by their exact (enrolled, waitlisted) class sets
//! within one session, so a single message can address everyone in the same
//! situation. Groups are recomputed on every call; identifiers are
//! content-derived and therefore stable while the enrollments do not change.

use std::collections::BTreeSet;

use roster_core::combination::{CombinationGroup, Membership, group_combinations};
use roster_core::entities::{Organization, Session};
use roster_core::enums::ActivityType;
use roster_core::responses::{ClassSummary, EmailDraft, EnrollmentCombination, SessionCombinations};

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, get_time, parse_enum, placeholders};
use crate::repos::activity::DAY_ORDER;
use crate::repos::student::{STUDENT_COLS, row_to_student};
use crate::service::RosterService;

const CLASS_TIME_FORMAT: &str = "%I:%M %p";

/// Everything needed to describe a session's combinations.
struct SessionGroups {
    session: Session,
    organization: Organization,
    /// Session classes ordered by day of week, then time.
    classes: Vec<ClassSummary>,
    groups: Vec<CombinationGroup>,
}

impl SessionGroups {
    fn classes_in(&self, ids: &BTreeSet<i64>) -> Vec<ClassSummary> {
        self.classes
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect()
    }

    fn describe(&self, group: &CombinationGroup) -> EnrollmentCombination {
        EnrollmentCombination {
            combination_id: group.combination_id.clone(),
            student_count: group.student_ids.len(),
            enrolled_classes: self.classes_in(&group.enrolled),
            waitlisted_classes: self.classes_in(&group.waitlisted),
            student_ids: group.student_ids.clone(),
        }
    }
}

fn class_heading(class: &ClassSummary) -> String {
    format!("{} {}", class.day_of_week.label(), class.class_type)
}

/// Human-readable name such as `"Monday Zumba + Wednesday Pound (Waitlist)"`.
fn combination_name(enrolled: &[ClassSummary], waitlisted: &[ClassSummary]) -> String {
    let names: Vec<String> = enrolled
        .iter()
        .map(class_heading)
        .chain(
            waitlisted
                .iter()
                .map(|c| format!("{} (Waitlist)", class_heading(c))),
        )
        .collect();
    if names.is_empty() {
        "No Classes".to_string()
    } else {
        names.join(" + ")
    }
}

fn push_class_block(lines: &mut Vec<String>, intro: &str, classes: &[ClassSummary]) {
    if classes.is_empty() {
        return;
    }
    lines.push(intro.to_string());
    lines.push(String::new());
    for class in classes {
        lines.push(format!("  {}", class_heading(class)));
        lines.push(format!("  Time: {}", class.time));
        if let Some(location) = &class.location {
            lines.push(format!("  Location: {location}"));
        }
        lines.push(String::new());
    }
}

fn email_body(
    organization: &str,
    session: &str,
    enrolled: &[ClassSummary],
    waitlisted: &[ClassSummary],
) -> String {
    let mut lines = vec![
        "Hello!".to_string(),
        String::new(),
        format!("Thank you for enrolling in classes for the \"{session}\" session with {organization}."),
        String::new(),
    ];
    push_class_block(&mut lines, "You are enrolled in the following classes:", enrolled);
    push_class_block(
        &mut lines,
        "You are on the waitlist for the following classes:",
        waitlisted,
    );
    lines.extend([
        "We look forward to seeing you!".to_string(),
        String::new(),
        "Best regards,".to_string(),
        organization.to_string(),
    ]);
    lines.join("\n")
}

impl RosterService {
    async fn session_groups(&self, session_id: i64) -> Result<SessionGroups, DatabaseError> {
        let session = self.get_session(session_id).await?;
        let organization = self.get_organization(session.organization_id).await?;
        let conn = self.db().conn();

        let mut rows = conn
            .query(
                &format!(
                    "SELECT a.id, a.day_of_week, a.type, a.time, l.name
                     FROM activities a
                     LEFT JOIN locations l ON l.id = a.location_id
                     WHERE a.session_id = ?1
                     ORDER BY {DAY_ORDER}, a.time, a.id"
                ),
                [session_id],
            )
            .await?;
        let mut classes = Vec::new();
        while let Some(row) = rows.next().await? {
            let activity_type: ActivityType = parse_enum(&row.get::<String>(2)?)?;
            classes.push(ClassSummary {
                id: row.get(0)?,
                day_of_week: parse_enum(&row.get::<String>(1)?)?,
                class_type: activity_type.label().to_string(),
                time: get_time(&row, 3)?.format(CLASS_TIME_FORMAT).to_string(),
                location: get_opt_string(&row, 4)?,
            });
        }

        let mut rows = conn
            .query(
                "SELECT e.student_id, e.activity_id, e.status
                 FROM enrollments e
                 JOIN activities a ON a.id = e.activity_id
                 WHERE a.session_id = ?1",
                [session_id],
            )
            .await?;
        let mut memberships = Vec::new();
        while let Some(row) = rows.next().await? {
            memberships.push(Membership {
                student_id: row.get(0)?,
                activity_id: row.get(1)?,
                status: parse_enum(&row.get::<String>(2)?)?,
            });
        }

        Ok(SessionGroups {
            session,
            organization,
            classes,
            groups: group_combinations(&memberships),
        })
    }

    /// Every enrollment combination in the session, largest group first.
    pub async fn session_combinations(
        &self,
        session_id: i64,
    ) -> Result<SessionCombinations, DatabaseError> {
        let groups = self.session_groups(session_id).await?;
        let combinations = groups.groups.iter().map(|g| groups.describe(g)).collect();

        Ok(SessionCombinations {
            session_id,
            session_name: groups.session.name,
            organization_name: groups.organization.name,
            combinations,
        })
    }

    /// Compose the bulk email for one combination.
    ///
    /// Recipients go in the bcc list, ordered by last then first name;
    /// students without an email address are counted but not addressed.
    pub async fn email_draft(
        &self,
        session_id: i64,
        combination_id: &str,
        to_email: &str,
    ) -> Result<EmailDraft, DatabaseError> {
        let groups = self.session_groups(session_id).await?;
        let group = groups
            .groups
            .iter()
            .find(|g| g.combination_id == combination_id)
            .ok_or_else(|| DatabaseError::not_found("combination", combination_id))?;
        let combination = groups.describe(group);

        let params: Vec<libsql::Value> = combination
            .student_ids
            .iter()
            .map(|id| libsql::Value::from(*id))
            .collect();
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {STUDENT_COLS} FROM students st
                     WHERE st.id IN ({})
                     ORDER BY st.last_name, st.first_name, st.id",
                    placeholders(1, params.len())
                ),
                libsql::params_from_iter(params),
            )
            .await?;
        let mut bcc = Vec::new();
        while let Some(row) = rows.next().await? {
            if let Some(email) = row_to_student(&row)?.email {
                bcc.push(email);
            }
        }

        let organization_name = groups.organization.name;
        let session_name = groups.session.name;
        tracing::debug!(
            session_id,
            combination_id,
            recipients = bcc.len(),
            "email draft composed"
        );
        Ok(EmailDraft {
            to_email: to_email.to_string(),
            bcc_emails: bcc.join(", "),
            subject: format!("{organization_name}: \"{session_name}\" session Class Registration"),
            body: email_body(
                &organization_name,
                &session_name,
                &combination.enrolled_classes,
                &combination.waitlisted_classes,
            ),
            student_count: combination.student_count,
            combination_name: combination_name(
                &combination.enrolled_classes,
                &combination.waitlisted_classes,
            ),
            enrolled_classes: combination.enrolled_classes,
            waitlisted_classes: combination.waitlisted_classes,
            organization_name,
            session_name,
        })
    }
}
