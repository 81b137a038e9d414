use anyhow::Context;
use clap::Parser;
use log::debug;
use std::process::ExitCode;

use workmatter::{
    build_index,
    cli::{init_logging, CommonArgs},
    MediaEnricher, MediaResolver,
};

/// Write computed/works-index.json from every document under docs/works
#[derive(Parser)]
#[command(name = "build-work-index", version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    /// Skip downloading and measuring media
    #[arg(long)]
    no_media: bool,
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let config = cli.common.config();
    debug!("Catalog root: {}", config.root.display());

    let mut resolver = if cli.no_media {
        None
    } else {
        Some(MediaResolver::from_config(&config).context("Failed to set up media downloads")?)
    };
    let enricher = resolver.as_mut().map(|r| r as &mut dyn MediaEnricher);

    match build_index(&config, enricher) {
        Ok(summary) => {
            println!("{}", summary.message());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("Failed to collect works: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.common);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
