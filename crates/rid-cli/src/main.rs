mod config;
mod inspect;
mod telemetry;

use clap::{CommandFactory, Parser, error::ErrorKind};
use config::{Action, CliArgs};
use std::io::{self, Write};
use std::process::ExitCode;
use telemetry::init_telemetry;

fn main() -> anyhow::Result<ExitCode> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();

    // A count above one combined with IDs conflicts; reported before any ID
    // is generated or decoded.
    let action = match Action::try_from(args) {
        Ok(action) => action,
        Err(e) => CliArgs::command()
            .error(ErrorKind::ArgumentConflict, e)
            .exit(),
    };

    init_telemetry()?;
    tracing::debug!(?action, "starting");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let errors = inspect::run(&action, &mut out)?;
    out.flush()?;

    if errors > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
