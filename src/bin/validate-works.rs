use clap::Parser;
use std::process::ExitCode;

use workmatter::{
    cli::{aborted, exit_on_interrupt, init_logging, CommonArgs},
    LinePrompt, TerminalChoice, Validator, WorksError,
};

/// Check every work document against the field schema and fix problems
#[derive(Parser)]
#[command(name = "validate-works", version, about, long_about = None)]
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

    match Validator::new(&config).run(&mut prompt, &mut chooser) {
        Ok(_) => ExitCode::SUCCESS,
        Err(WorksError::Aborted) => aborted(),
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
