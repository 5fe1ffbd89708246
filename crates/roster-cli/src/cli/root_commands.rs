use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    ActivityCommands, CancellationCommands, CommsCommands, ContactCommands, EnrollCommands,
    LocationCommands, MeetingCommands, OrgCommands, ReportCommands, SessionCommands,
    StudentCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Organizations.
    Org {
        #[command(subcommand)]
        action: OrgCommands,
    },
    /// Locations of an organization.
    Location {
        #[command(subcommand)]
        action: LocationCommands,
    },
    /// Organization contacts.
    Contact {
        #[command(subcommand)]
        action: ContactCommands,
    },
    /// Sessions (terms) and their lifecycle.
    Session {
        #[command(subcommand)]
        action: SessionCommands,
    },
    /// Recurring weekly classes.
    Activity {
        #[command(subcommand)]
        action: ActivityCommands,
    },
    /// Students.
    Student {
        #[command(subcommand)]
        action: StudentCommands,
    },
    /// Enrollment and waitlist membership.
    Enroll {
        #[command(subcommand)]
        action: EnrollCommands,
    },
    /// Meetings and attendance.
    Meeting {
        #[command(subcommand)]
        action: MeetingCommands,
    },
    /// Cancelled class dates.
    Cancellation {
        #[command(subcommand)]
        action: CancellationCommands,
    },
    /// Per-activity attendance for one date.
    Stats(StatsArgs),
    /// Weekly and residency reports.
    Report {
        #[command(subcommand)]
        action: ReportCommands,
    },
    /// Enrollment combinations and bulk email drafts.
    Comms {
        #[command(subcommand)]
        action: CommsCommands,
    },
    /// Generate a sign-in sheet in Google Sheets.
    Signin(SigninArgs),
}

#[derive(Clone, Debug, Args)]
pub struct StatsArgs {
    /// Date to report on (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long)]
    pub org: Option<i64>,
}

#[derive(Clone, Debug, Args)]
pub struct SigninArgs {
    pub activity_id: i64,
    /// First date column (YYYY-MM-DD).
    #[arg(long)]
    pub start: String,
    /// Number of weekly columns, 1 to 52 (defaults to `general.default_signin_weeks`).
    #[arg(long)]
    pub weeks: Option<u32>,
    /// Drive folder (defaults to `sheets.folder_id`).
    #[arg(long)]
    pub folder: Option<String>,
}
