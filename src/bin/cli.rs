// src/bin/cli.rs
use clap::Parser;
use color_eyre::eyre::Result;

use sarkari_scrape::{cli, config::AppConfig, log};

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = cli::Cli::parse();
    let cfg = AppConfig::from_env()?;
    log::init(&cfg.log);
    cli::run(cli, &cfg)
}
