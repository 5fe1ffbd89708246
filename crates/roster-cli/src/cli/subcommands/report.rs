use clap::Subcommand;

/// Report commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ReportCommands {
    /// Meetings and absentees of one week.
    Weekly {
        organization_id: i64,
        /// Any date in the week (defaults to today).
        #[arg(long)]
        week_of: Option<String>,
    },
    /// Rochester residency counts per class.
    Residency {
        organization_id: i64,
        session_id: i64,
    },
}
