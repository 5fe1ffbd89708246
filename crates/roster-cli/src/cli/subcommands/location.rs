use clap::Subcommand;

/// Location commands.
#[derive(Clone, Debug, Subcommand)]
pub enum LocationCommands {
    /// Create a location.
    Create {
        organization_id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        address: Option<String>,
    },
    /// Get a location by ID.
    Get { id: i64 },
    /// List locations.
    List {
        #[arg(long)]
        org: Option<i64>,
    },
    /// Update a location.
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        /// New address; an empty value clears it.
        #[arg(long)]
        address: Option<String>,
    },
    /// Delete a location. Activities held there lose their location.
    Delete { id: i64 },
    /// Repoint activities from a duplicate location and delete it.
    Merge {
        duplicate_id: i64,
        #[arg(long = "into")]
        canonical_id: i64,
    },
}
