use clap::Subcommand;

/// Session commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SessionCommands {
    /// Create a session.
    Create {
        organization_id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
    },
    /// Get a session by ID.
    Get { id: i64 },
    /// List sessions.
    List {
        #[arg(long)]
        org: Option<i64>,
        /// Include closed sessions.
        #[arg(long)]
        all: bool,
    },
    /// Update a session. Closing it here also closes its activities.
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        closed: Option<bool>,
    },
    /// Close a session and every activity in it.
    Close { id: i64 },
    /// Delete a session.
    Delete { id: i64 },
    /// Session with its activities.
    Detail { id: i64 },
    /// Copy one activity into another session.
    CopyActivity {
        source_session_id: i64,
        activity_id: i64,
        #[arg(long = "to")]
        target_session_id: i64,
    },
    /// Copy every activity of a session into another session.
    CopyAll {
        source_session_id: i64,
        #[arg(long = "to")]
        target_session_id: i64,
    },
}
