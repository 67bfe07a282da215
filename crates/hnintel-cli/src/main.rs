mod ideas;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::ideas::IdeasArgs;

#[derive(Debug, Parser)]
#[command(name = "hnintel-cli")]
#[command(about = "HN Intel command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Surface high-impact project ideas from blog pain signals
    Ideas(IdeasArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = hnintel_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(Commands::Ideas(args)) => ideas::run_ideas(&config, &args)?,
        None => println!("hnintel-cli: run `hnintel-cli ideas --help` for usage"),
    }

    Ok(())
}
