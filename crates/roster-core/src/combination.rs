//! Enrollment-combination grouping for bulk communication.
//!
//! Every student touched by a session's activities has an enrolled-activity
//! set and a waitlisted-activity set. Students sharing the same pair of sets
//! form one group, identified by a hash of the sorted sets so the same pair
//! always maps to the same identifier.

use std::collections::{BTreeMap, BTreeSet};

use sha2::{Digest, Sha256};

use crate::enums::EnrollmentStatus;

/// One student's standing on one activity, as read from the enrollment table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Membership {
    pub student_id: i64,
    pub activity_id: i64,
    pub status: EnrollmentStatus,
}

/// Students sharing an identical (enrolled, waitlisted) activity-set pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinationGroup {
    pub combination_id: String,
    pub enrolled: BTreeSet<i64>,
    pub waitlisted: BTreeSet<i64>,
    /// Ascending student ids.
    pub student_ids: Vec<i64>,
}

/// Content-derived identifier for an (enrolled, waitlisted) pair.
///
/// SHA-256 over a canonical rendering of both sorted id lists, hex encoded.
#[must_use]
pub fn combination_id(enrolled: &BTreeSet<i64>, waitlisted: &BTreeSet<i64>) -> String {
    let canonical = format!(
        "enrolled:{};waitlisted:{}",
        join_ids(enrolled),
        join_ids(waitlisted)
    );
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Partition students into combination groups.
///
/// Only `active` and `waiting` memberships count; other statuses are ignored
/// and a student with nothing else does not appear. Groups are ordered by
/// student count (largest first), ties broken by identifier.
#[must_use]
pub fn group_combinations(memberships: &[Membership]) -> Vec<CombinationGroup> {
    let mut per_student: BTreeMap<i64, (BTreeSet<i64>, BTreeSet<i64>)> = BTreeMap::new();
    for m in memberships {
        match m.status {
            EnrollmentStatus::Active => {
                per_student.entry(m.student_id).or_default().0.insert(m.activity_id);
            }
            EnrollmentStatus::Waiting => {
                per_student.entry(m.student_id).or_default().1.insert(m.activity_id);
            }
            EnrollmentStatus::Dropped | EnrollmentStatus::NotEnrolled => {}
        }
    }

    let mut groups: BTreeMap<(BTreeSet<i64>, BTreeSet<i64>), Vec<i64>> = BTreeMap::new();
    for (student_id, sets) in per_student {
        groups.entry(sets).or_default().push(student_id);
    }

    let mut result: Vec<CombinationGroup> = groups
        .into_iter()
        .map(|((enrolled, waitlisted), student_ids)| CombinationGroup {
            combination_id: combination_id(&enrolled, &waitlisted),
            enrolled,
            waitlisted,
            student_ids,
        })
        .collect();
    result.sort_by(|a, b| {
        b.student_ids
            .len()
            .cmp(&a.student_ids.len())
            .then_with(|| a.combination_id.cmp(&b.combination_id))
    });
    result
}

fn join_ids(ids: &BTreeSet<i64>) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
