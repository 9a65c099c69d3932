use crate::demo::{
    run_demo, run_preapproval, run_quote, run_recommend, DemoArgs, PreApprovalArgs, QuoteArgs,
    RecommendArgs,
};
use crate::server;
use autofin::error::AppError;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "autofin",
    about = "Quote, compare and recommend vehicle financing from the command line",
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
    /// Lease and finance quotes for one vehicle
    Quote(QuoteArgs),
    /// Affordable vehicles and the top three picks for a buyer
    Recommend(RecommendArgs),
    /// Estimate loan pre-approval odds
    Preapproval(PreApprovalArgs),
    /// Walk through every calculation for a sample buyer
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Vehicle catalog (CSV or JSON) replacing the bundled listings
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Quote(args) => run_quote(args),
        Command::Recommend(args) => run_recommend(args),
        Command::Preapproval(args) => run_preapproval(args),
        Command::Demo(args) => run_demo(args),
    }
}
