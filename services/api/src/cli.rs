use crate::report::{run_analyze, run_batch, run_sample, AnalyzeArgs, BatchArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use fleet_roi::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Fleet ROI Analyzer",
    about = "Categorize and narrate commercial vehicle ROI metrics",
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
    /// Analyze one vehicle payload from a JSON file and print the report
    Analyze(AnalyzeArgs),
    /// Print the sample payload used for demos
    Sample,
    /// Analyze every row of a fleet CSV export
    Batch(BatchArgs),
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
        Command::Analyze(args) => run_analyze(args).await,
        Command::Sample => run_sample(),
        Command::Batch(args) => run_batch(args).await,
    }
}
