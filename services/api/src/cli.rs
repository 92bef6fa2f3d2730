use crate::commands::{run_questions, run_recommend, RecommendArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use craftfinder::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "CraftFinder",
    about = "Serve the CraftFinder quiz or score answers from the command line",
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
    /// Print the question catalog in quiz order
    Questions,
    /// Score a set of answers and print the recommendation
    Recommend(RecommendArgs),
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
        Command::Questions => {
            run_questions();
            Ok(())
        }
        Command::Recommend(args) => run_recommend(args),
    }
}
