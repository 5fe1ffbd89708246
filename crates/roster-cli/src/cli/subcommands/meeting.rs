use clap::Subcommand;

/// Meeting commands.
#[derive(Clone, Debug, Subcommand)]
pub enum MeetingCommands {
    /// Get the meeting of an activity on a date, creating and seeding it if needed.
    Open {
        activity_id: i64,
        /// YYYY-MM-DD
        date: String,
    },
    /// Meeting detail by ID.
    Get { id: i64 },
    /// List meetings of an activity.
    List { activity_id: i64 },
    /// Attendance records of a meeting.
    Attendance {
        #[command(subcommand)]
        action: AttendanceCommands,
    },
}

/// Attendance commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AttendanceCommands {
    /// List attendance of a meeting.
    List { meeting_id: i64 },
    /// Record attendance for a meeting.
    Update {
        meeting_id: i64,
        /// JSON array of {student_id, status, note}; `-` reads stdin.
        #[arg(long)]
        file: Option<String>,
        /// STUDENT_ID=STATUS, repeatable.
        #[arg(long = "mark")]
        marks: Vec<String>,
    },
}
