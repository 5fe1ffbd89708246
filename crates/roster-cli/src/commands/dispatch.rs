use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Org { action } => commands::org::handle(&action, ctx, flags).await,
        Commands::Location { action } => commands::location::handle(&action, ctx, flags).await,
        Commands::Contact { action } => commands::contact::handle(&action, ctx, flags).await,
        Commands::Session { action } => commands::session::handle(&action, ctx, flags).await,
        Commands::Activity { action } => commands::activity::handle(&action, ctx, flags).await,
        Commands::Student { action } => commands::student::handle(&action, ctx, flags).await,
        Commands::Enroll { action } => commands::enroll::handle(&action, ctx, flags).await,
        Commands::Meeting { action } => commands::meeting::handle(&action, ctx, flags).await,
        Commands::Cancellation { action } => {
            commands::cancellation::handle(&action, ctx, flags).await
        }
        Commands::Stats(args) => commands::stats::handle(&args, ctx, flags).await,
        Commands::Report { action } => commands::report::handle(&action, ctx, flags).await,
        Commands::Comms { action } => commands::comms::handle(&action, ctx, flags).await,
        Commands::Signin(args) => commands::signin::handle(&args, ctx, flags).await,
    }
}
