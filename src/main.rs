use anyhow::Result;
use clap::Parser;

mod archive;
mod cli;
mod config;
mod media;
mod model;
mod pipeline;
mod splitter;
mod transcript;

fn main() -> Result<()> {
    let args = cli::Args::parse();

    let cfg = config::Config::load(args.config.as_deref())?;
    config::init_tracing(&cfg.logging, args.log_level.as_deref())?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "clipcut starting");

    match args.command {
        cli::Command::Split(cmd) => pipeline::run_split(cmd, &cfg),
        cli::Command::Concat(cmd) => pipeline::run_concat(cmd, &cfg),
        cli::Command::PrintDefaultConfig => {
            let s = cfg.to_toml_pretty()?;
            print!("{s}");
            Ok(())
        }
    }
}
