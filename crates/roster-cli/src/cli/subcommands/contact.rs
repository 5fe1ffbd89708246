use clap::Subcommand;

/// Contact commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ContactCommands {
    /// Create a contact.
    Create {
        organization_id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        office_phone: Option<String>,
        #[arg(long)]
        cell_phone: Option<String>,
    },
    /// Get a contact by ID.
    Get { id: i64 },
    /// List contacts.
    List {
        #[arg(long)]
        org: Option<i64>,
    },
    /// Update a contact. Empty values clear optional fields.
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        office_phone: Option<String>,
        #[arg(long)]
        cell_phone: Option<String>,
    },
    /// Delete a contact.
    Delete { id: i64 },
}
