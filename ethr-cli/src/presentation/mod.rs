//! The command tree.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{CommandFactory, Parser, Subcommand};

use crate::config::Settings;
use crate::logging::LogLevel;

pub mod ecdsa;
pub mod examples;
pub mod kubernetes;
pub mod random;

#[derive(Parser, Debug)]
#[command(name = "ethr-cli", version)]
#[command(about = "A development, deployment & CI utilities CLI")]
#[command(
    long_about = "Facilitates management of manifests, wraps CI capabilities relating to kubernetes, and provides local development assistance."
)]
pub struct Cli {
    /// Sets and configures logging verbosity
    /// (trace, debug, info, notice, warning, error, emergency).
    #[arg(short, long, global = true, env = "LOG_LEVEL", value_name = "LEVEL")]
    pub verbosity: Option<LogLevel>,

    /// Optional TOML file supplying defaults for unset flags.
    #[arg(long, global = true, env = "ETHR_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// ECDSA PEM key pair generator.
    Ecdsa(ecdsa::EcdsaArgs),

    /// Kubernetes manifest utilities.
    #[command(alias = "k8s")]
    Kubernetes(kubernetes::KubernetesArgs),

    /// Random value generators.
    Random(random::RandomArgs),
}

/// The full clap command with examples rendered for `executable`.
pub fn command(executable: &str) -> clap::Command {
    Cli::command()
        .bin_name(executable)
        .mut_subcommand("ecdsa", |c| c.after_help(examples::ecdsa(executable)))
        .mut_subcommand("kubernetes", |c| {
            c.mut_subcommand("kustomization", |c| {
                c.mut_subcommand("update", |c| {
                    c.mut_subcommand("build", |c| c.after_help(examples::update_build(executable)))
                        .mut_subcommand("image", |c| {
                            c.after_help(examples::update_image(executable))
                        })
                })
            })
        })
        .mut_subcommand("random", |c| {
            c.mut_subcommand("token", |c| c.after_help(examples::token(executable)))
        })
}

pub fn dispatch(cli: Cli, settings: &Settings, out: &mut dyn Write) -> Result<()> {
    let span = tracing::debug_span!("command", executable = %settings.executable);
    let _guard = span.enter();

    tracing::trace!(
        version = settings.version,
        verbosity = %settings.verbosity,
        cwd = %settings.cwd.display(),
        "root"
    );

    match cli.command {
        Some(Command::Ecdsa(args)) => ecdsa::run(args, settings, out),
        Some(Command::Kubernetes(args)) => kubernetes::run(args, settings, out),
        Some(Command::Random(args)) => random::run(args, settings, out),
        None => print_help(settings, &[], out),
    }
}

/// Prints the help of the command group at `path`, used when a group is
/// invoked without a subcommand.
pub(crate) fn print_help(settings: &Settings, path: &[&str], out: &mut dyn Write) -> Result<()> {
    let mut command = command(&settings.executable);
    for name in path {
        command = command
            .find_subcommand(name)
            .cloned()
            .ok_or_else(|| anyhow!("unknown command: {name}"))?;
    }

    write!(out, "{}", command.render_help())?;
    Ok(())
}
