//! Arguments and setup shared by the binaries

use crate::config::CatalogConfig;
use clap::Args;
use std::path::PathBuf;
use std::process::{self, ExitCode};

/// Printed when the user cancels an interactive tool
pub const ABORT_MESSAGE: &str = "\nAborted by user.";

/// Options every tool accepts
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Repository root containing docs/works
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl CommonArgs {
    pub fn config(&self) -> CatalogConfig {
        CatalogConfig::for_root(&self.root)
    }

    /// Default log filter for these flags; `RUST_LOG` still wins
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }
}

/// Start `env_logger` for a binary
pub fn init_logging(args: &CommonArgs) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .format_timestamp(None)
        .init();
}

/// Report a cancelled session; the tool exits with status 1
pub fn aborted() -> ExitCode {
    println!("{}", ABORT_MESSAGE);
    ExitCode::FAILURE
}

/// Turn Ctrl-C at a line prompt into the same clean abort
///
/// Documents are written only after their prompts finish and the writes are
/// atomic, so exiting from the handler never leaves a partial file.
pub fn exit_on_interrupt() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(|| {
        println!("{}", ABORT_MESSAGE);
        process::exit(1);
    })
}
