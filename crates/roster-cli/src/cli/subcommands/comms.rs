use clap::Subcommand;

/// Communication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CommsCommands {
    /// Group students of a session by their exact set of classes.
    Combinations { session_id: i64 },
    /// Draft the registration email for one combination.
    Email {
        session_id: i64,
        combination_id: String,
        /// To: address (defaults to `general.default_email_to`).
        #[arg(long)]
        to: Option<String>,
    },
}
