// main.rs
mod cli;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use cli::{Args, Commands};
use empathyscope::config::Config;
use empathyscope::AffectSensor;

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::new(args.data_dir)?;

    let filter = EnvFilter::try_new(config.log_filter())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    match args.command {
        Commands::Feel { text, json, top, words } => {
            cli::handle_feel(&sensor(&config)?, &text.join(" "), json, top, words)
        }
        Commands::Chat { json } => cli::handle_chat(&sensor(&config)?, json),
        Commands::Lookup { word } => cli::handle_lookup(&sensor(&config)?, &word),
        Commands::Config => cli::handle_config(&config),
    }
}

fn sensor(config: &Config) -> Result<AffectSensor> {
    Ok(AffectSensor::new(config.load_lexicon()?))
}
