use std::io::Write;

use anyhow::{Context, Result};
use clap::{ArgGroup, Args};
use ethr_system::application_service::ecdsa_service::{
    EcdsaService, GenerateKeyPairCommand, GenerateKeyPairResult, KeyDestination,
};
use ethr_system::infrastructure::p256_key_pair::P256KeyPairGenerator;
use ethr_system::infrastructure::path_resolver::PathResolver;

use crate::config::Settings;

/// Generates a P-256 ECDSA key pair and writes `<base>.private.pem` and
/// `<base>.public.pem`.
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("target").required(true).args(["file", "dry_run"])))]
pub struct EcdsaArgs {
    /// A relative or full-system path to the target pem file; ".pem" is
    /// appended when no extension is given.
    #[arg(long, value_name = "PATH")]
    pub file: Option<String>,

    /// Generate the target directory if it does not exist.
    #[arg(long)]
    pub mkdir: bool,

    /// Base64-encode the keys' contents; useful when working with kubernetes
    /// secrets.
    #[arg(long)]
    pub b64: bool,

    /// Write both keys to standard-output instead of files.
    #[arg(long)]
    pub dry_run: bool,
}

impl EcdsaArgs {
    fn into_command(self) -> GenerateKeyPairCommand {
        let destination = match self.file {
            Some(path) if !self.dry_run => KeyDestination::Files {
                path,
                create_dirs: self.mkdir,
            },
            _ => KeyDestination::Stdout,
        };

        GenerateKeyPairCommand {
            destination,
            base64: self.b64,
        }
    }
}

pub fn run(args: EcdsaArgs, settings: &Settings, out: &mut dyn Write) -> Result<()> {
    tracing::debug!(
        command = "ecdsa",
        file = ?args.file,
        mkdir = args.mkdir,
        b64 = args.b64,
        dry_run = args.dry_run,
        "flags"
    );

    let service = EcdsaService {
        key_generator: P256KeyPairGenerator,
        path_resolver: PathResolver::new(&settings.cwd),
    };

    match service.generate(args.into_command())? {
        GenerateKeyPairResult::Printed(key_pair) => {
            out.write_all(key_pair.private_key())?;
            terminate_line(key_pair.private_key(), out)?;
            out.write_all(key_pair.public_key())?;
            terminate_line(key_pair.public_key(), out)?;
            out.flush().context("unable to write keys to standard-output")?;
        }
        GenerateKeyPairResult::Written {
            private_path,
            public_path,
        } => {
            tracing::debug!(
                private = %private_path.display(),
                public = %public_path.display(),
                "ecdsa key pair written"
            );
        }
    }

    Ok(())
}

// Base64 output has no trailing newline of its own.
fn terminate_line(buffer: &[u8], out: &mut dyn Write) -> std::io::Result<()> {
    if buffer.last() != Some(&b'\n') {
        out.write_all(b"\n")?;
    }
    Ok(())
}
