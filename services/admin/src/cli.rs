use crate::server;
use crate::twitter;
use clap::{Args, Parser, Subcommand};
use hasjob::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "hasjob-admin",
    about = "Campaign administration service and operator tools for Hasjob",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Authorize the Twitter account and print its access key and secret
    TwitterAuth,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::TwitterAuth => twitter::run().await,
    }
}
