use crate::commands::{run_catalog, run_quote, CatalogArgs, QuoteArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use work_quote::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Work Quote",
    about = "Price student work orders and serve the quote API",
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
    /// Price a single order from the command line
    Quote(QuoteArgs),
    /// Print the work type, subject, and urgency tables
    Catalog(CatalogArgs),
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
        Command::Quote(args) => run_quote(args),
        Command::Catalog(args) => run_catalog(args),
    }
}
