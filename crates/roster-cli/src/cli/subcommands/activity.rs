use clap::Subcommand;

/// Activity commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ActivityCommands {
    /// Create an activity.
    Create {
        session_id: i64,
        /// zumba, zumba-gold or pound
        #[arg(long = "type")]
        activity_type: String,
        /// monday .. sunday
        #[arg(long)]
        day: String,
        /// Start time (HH:MM)
        #[arg(long)]
        time: String,
        #[arg(long)]
        location: Option<i64>,
        #[arg(long)]
        capacity: Option<i64>,
    },
    /// Get an activity by ID.
    Get { id: i64 },
    /// List activities.
    List {
        #[arg(long)]
        session: Option<i64>,
        #[arg(long)]
        org: Option<i64>,
        /// Include activities of closed sessions.
        #[arg(long)]
        all: bool,
    },
    /// Update an activity.
    Update {
        id: i64,
        #[arg(long = "type")]
        activity_type: Option<String>,
        #[arg(long)]
        day: Option<String>,
        #[arg(long)]
        time: Option<String>,
        #[arg(long)]
        location: Option<i64>,
        /// Detach the activity from its location.
        #[arg(long, conflicts_with = "location")]
        no_location: bool,
        #[arg(long)]
        capacity: Option<i64>,
        /// Remove the capacity limit.
        #[arg(long, conflicts_with = "capacity")]
        no_capacity: bool,
        #[arg(long)]
        closed: Option<bool>,
    },
    /// Delete an activity.
    Delete { id: i64 },
}
