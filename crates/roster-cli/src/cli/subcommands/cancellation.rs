use clap::Subcommand;

/// Cancellation commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CancellationCommands {
    /// Cancel an activity on a date.
    Create {
        activity_id: i64,
        /// YYYY-MM-DD
        date: String,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Get a cancellation by ID.
    Get { id: i64 },
    /// Remove a cancellation.
    Delete { id: i64 },
    /// List cancellations.
    List {
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        org: Option<i64>,
        #[arg(long)]
        activity: Option<i64>,
    },
    /// Cancellations on one date.
    ForDate {
        /// YYYY-MM-DD
        date: String,
        #[arg(long)]
        org: Option<i64>,
    },
    /// Scheduled dates of an activity with cancellations removed.
    Occurrences { activity_id: i64 },
}
