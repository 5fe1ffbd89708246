use clap::Subcommand;

/// Organization commands.
#[derive(Clone, Debug, Subcommand)]
pub enum OrgCommands {
    /// Create an organization.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        contact_email: Option<String>,
    },
    /// Get an organization by ID.
    Get { id: i64 },
    /// List organizations.
    List {
        /// Include soft-deleted organizations.
        #[arg(long)]
        all: bool,
    },
    /// Update an organization.
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        /// New contact email; an empty value clears it.
        #[arg(long)]
        contact_email: Option<String>,
    },
    /// Soft-delete an organization.
    Delete { id: i64 },
    /// Restore a soft-deleted organization.
    Restore { id: i64 },
    /// Sessions, locations and contacts of an organization.
    Overview {
        id: i64,
        /// Reference date for current/upcoming sessions (defaults to today).
        #[arg(long)]
        today: Option<String>,
    },
}
