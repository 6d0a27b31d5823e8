use crate::demo::{run_catalog, run_demo, run_score, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use rapport::assessment::CatalogPreset;
use rapport::config::AppConfig;
use rapport::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Rapport",
    about = "Score relationship self-assessments from the command line or over HTTP",
    version
)]
struct Cli {
    /// Catalog preset to score against (weighted or gift_bonus); overrides RAPPORT_CATALOG
    #[arg(long, global = true)]
    catalog: Option<CatalogPreset>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// List the criteria, rating scale and bands of the selected catalog
    Catalog,
    /// Score a set of answers given as key=value pairs
    Score(ScoreArgs),
    /// Walk through a form session with canned answers
    Demo,
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
    let mut config = AppConfig::load()?;
    if let Some(preset) = cli.catalog {
        config.assessment.catalog = preset;
    }

    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(config, args).await,
        Command::Catalog => run_catalog(config.assessment.catalog),
        Command::Score(args) => run_score(config.assessment.catalog, args),
        Command::Demo => run_demo(config.assessment.catalog),
    }
}
