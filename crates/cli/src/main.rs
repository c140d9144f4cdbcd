//! Command-line front end for vex.
//!
//! Resolves argv against the vex option grammar and reports the outcome.
//! Environment lifecycle handling (make/remove/list/shell activation) lives
//! in the embedding tool; this binary stops at option resolution.

use std::process::ExitCode;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, fmt};
use vex_options::OptionsError;

fn main() -> ExitCode {
    init_tracing();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    match run(&argv) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<OptionsError>() {
            // Grammar mismatch: print the message and usage, exit nonzero.
            Some(OptionsError::Usage(usage)) => {
                eprintln!("{usage}");
                ExitCode::from(2)
            }
            _ => {
                eprintln!("error: {err:#}");
                ExitCode::FAILURE
            }
        },
    }
}

fn run(argv: &[String]) -> Result<()> {
    let options = vex_options::parse(argv)?;
    tracing::debug!(%options, "resolved command-line options");

    if options.flag("version")? {
        println!("vex {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    println!("{options}");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
