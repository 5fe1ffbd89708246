use clap::Subcommand;

/// Enrollment commands.
#[derive(Clone, Debug, Subcommand)]
pub enum EnrollCommands {
    /// Replace the enrolled and waitlisted sets of an activity.
    Reconcile {
        activity_id: i64,
        /// Student IDs to enroll (comma separated).
        #[arg(long, value_delimiter = ',')]
        enrolled: Vec<i64>,
        /// Student IDs to waitlist (comma separated).
        #[arg(long, value_delimiter = ',')]
        waitlisted: Vec<i64>,
    },
    /// List enrollments of an activity.
    List { activity_id: i64 },
}
