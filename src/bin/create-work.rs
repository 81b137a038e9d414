use clap::Parser;
use std::process::ExitCode;

use workmatter::{
    cli::{aborted, exit_on_interrupt, init_logging, CommonArgs},
    LinePrompt, Scaffolder, TerminalChoice, WorksError,
};

/// Create a new work document by answering a series of prompts
#[derive(Parser)]
#[command(name = "create-work", version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.common);
    if let Err(e) = exit_on_interrupt() {
        log::warn!("Ctrl-C will not be reported cleanly: {}", e);
    }

    let config = cli.common.config();
    let mut prompt = LinePrompt::stdio();
    let mut chooser = TerminalChoice::detect();

    match Scaffolder::new(&config).run(&mut prompt, &mut chooser) {
        Ok(_) => ExitCode::SUCCESS,
        Err(WorksError::Aborted) => aborted(),
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
