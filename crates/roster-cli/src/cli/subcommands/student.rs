use clap::Subcommand;

/// Student commands.
#[derive(Clone, Debug, Subcommand)]
pub enum StudentCommands {
    /// Create a student.
    Create {
        #[arg(long)]
        first: String,
        #[arg(long)]
        last: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        facebook: Option<String>,
        #[arg(long)]
        emergency_name: Option<String>,
        #[arg(long)]
        emergency_phone: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        rochester: bool,
        #[arg(long)]
        inactive: bool,
    },
    /// Create a walk-in student from a name and optional contact.
    QuickCreate {
        first: String,
        last: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Get a student by ID.
    Get { id: i64 },
    /// Student with enrollments.
    Detail {
        id: i64,
        /// Include enrollments in closed activities.
        #[arg(long)]
        all: bool,
    },
    /// List students.
    List {
        /// Include inactive students.
        #[arg(long)]
        all: bool,
    },
    /// Search students by name or email.
    Search { query: String },
    /// Update a student. Empty values clear optional fields.
    Update {
        id: i64,
        #[arg(long)]
        first: Option<String>,
        #[arg(long)]
        last: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        facebook: Option<String>,
        #[arg(long)]
        emergency_name: Option<String>,
        #[arg(long)]
        emergency_phone: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        active: Option<bool>,
        #[arg(long)]
        rochester: Option<bool>,
    },
    /// Delete a student.
    Delete { id: i64 },
}
