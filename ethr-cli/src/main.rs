use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::FromArgMatches;
use ethr_cli::config::{CliConfig, Settings};
use ethr_cli::presentation::{self, Cli};
use ethr_cli::{logging, report};
use ethr_system::infrastructure::path_resolver::PathResolver;

fn main() -> ExitCode {
    let executable = std::env::args_os()
        .next()
        .as_deref()
        .and_then(|argv0| Path::new(argv0).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());

    let cli = match presentation::command(&executable)
        .try_get_matches()
        .and_then(|matches| Cli::from_arg_matches(&matches))
    {
        Ok(cli) => cli,
        // Usage errors fail like any other error; help and version exit 0.
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
        Err(e) => e.exit(),
    };

    match run(executable, cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(error = %format!("{error:#}"), "command failed");
            report::error(&error);
            ExitCode::FAILURE
        }
    }
}

fn run(executable: String, cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => CliConfig::from_file(path).context("unable to load configuration")?,
        None => CliConfig::default(),
    };

    let resolver = PathResolver::from_current_dir()?;
    let settings = Settings::new(executable, resolver.cwd(), cli.verbosity, config);
    logging::init(settings.verbosity)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    presentation::dispatch(cli, &settings, &mut out)
}
