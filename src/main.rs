use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use id_log::cli::{Cli, VerbosityLevel};
use id_log::config::ConfigManager;
use id_log::driver::Driver;
use id_log::output::Output;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let config = ConfigManager::load_config(&cli).context("Failed to load configuration")?;
    let verbosity = VerbosityLevel::from_config(&config);

    init_tracing(verbosity);
    tracing::debug!(?config, "configuration loaded");

    let output = Output::new(verbosity);
    let mut driver = Driver::from_config(&config);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    let directory = &config.input.directory;
    let result = driver.run_with(directory, &mut out, |outcome| {
        if verbosity == VerbosityLevel::Verbose
            && let Some(line) = output.format_file_outcome(outcome)
        {
            eprintln!("{line}");
        }
    });

    // A closed reader (`id-log | head`) ends the run, not as a failure
    let summary = match result {
        Ok(summary) => summary,
        Err(err) if err.is_broken_pipe() => {
            tracing::debug!("stdout closed, stopping");
            return Ok(());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to process {}", directory.display()));
        }
    };

    if let Err(err) = out.flush() {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err).context("Failed to write to stdout");
    }

    if config.output.summary {
        eprint!("{}", output.format_summary(&summary));
    }

    Ok(())
}

fn init_tracing(verbosity: VerbosityLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
