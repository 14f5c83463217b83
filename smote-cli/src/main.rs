//! CLI entry point for the SMOTE oversampler.
//!
//! Parses command-line arguments with clap, oversamples the input, writes the
//! synthetic points to stdout or `--output`, and maps errors to exit codes.
//! Logging is initialised first so every later step can emit structured
//! diagnostics via `tracing`.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use smote_cli::{
    cli::{Cli, CliError, run_cli, write_summary},
    logging::{self, LoggingError},
};
use tracing::{error, field};

/// Parse CLI arguments, execute the command, write the result and flush the
/// output stream.
fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let summary = run_cli(cli).context("failed to execute command")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    write_summary(&summary, &mut writer).context("failed to write result")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let core = err
            .downcast_ref::<CliError>()
            .and_then(CliError::smote_error);
        let code_field = core.map(|core| field::display(core.code().as_str()));
        let data_source_code_field = core
            .and_then(|core| core.data_source_code())
            .map(|code| field::display(code.as_str()));

        error!(
            error = %format!("{err:#}"),
            code = code_field,
            data_source_code = data_source_code_field,
            "command execution failed"
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialised"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialise logging: {err}");
}
