use std::io::Write;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use ethr_system::application_service::kustomization_service::{
    KustomizationService, UpdateKustomizationCommand, UpdateKustomizationResult,
};
use ethr_system::domain::kustomization::ManifestPatch;
use ethr_system::infrastructure::marshalers::OutputFormat;
use ethr_system::infrastructure::path_resolver::PathResolver;

use crate::config::Settings;
use crate::presentation::print_help;

#[derive(Args, Debug)]
pub struct KubernetesArgs {
    #[command(subcommand)]
    pub command: Option<KubernetesCommand>,
}

#[derive(Subcommand, Debug)]
pub enum KubernetesCommand {
    /// Kustomize manifest utilities.
    #[command(alias = "kustomize")]
    Kustomization(KustomizationArgs),
}

#[derive(Args, Debug)]
pub struct KustomizationArgs {
    #[command(subcommand)]
    pub command: Option<KustomizationCommand>,
}

#[derive(Subcommand, Debug)]
pub enum KustomizationCommand {
    /// Update a kustomization.yaml file in place.
    Update(UpdateArgs),
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    #[command(subcommand)]
    pub command: Option<UpdateCommand>,
}

#[derive(Subcommand, Debug)]
pub enum UpdateCommand {
    /// Append a build label to the kustomization.
    Build(BuildArgs),

    /// Point the kustomization's first image at a new name and tag.
    #[command(alias = "img")]
    Image(ImageArgs),
}

/// Flags shared by every manifest update.
#[derive(Args, Debug)]
pub struct ManifestArgs {
    /// Relative or full-system path to the kustomization file; ".yaml" is
    /// appended when no extension is given.
    #[arg(long, value_name = "PATH")]
    pub file: String,

    /// Write the updated manifest to standard-output instead of the file.
    #[arg(long)]
    pub dry_run: bool,

    /// Rendering used with --dry-run (yaml, json).
    #[arg(long, value_name = "FORMAT")]
    pub output: Option<OutputFormat>,
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub manifest: ManifestArgs,

    /// Build version, added as a `build` label.
    #[arg(long, value_name = "VERSION")]
    pub build: String,
}

#[derive(Args, Debug)]
pub struct ImageArgs {
    #[command(flatten)]
    pub manifest: ManifestArgs,

    /// The image reference being replaced, e.g. "service:latest".
    #[arg(long)]
    pub image: String,

    /// The new image name.
    #[arg(long)]
    pub name: String,

    /// The new image tag.
    #[arg(long)]
    pub tag: String,

    /// Registry prefixed to --name.
    #[arg(long)]
    pub registry: Option<String>,
}

pub fn run(args: KubernetesArgs, settings: &Settings, out: &mut dyn Write) -> Result<()> {
    let Some(KubernetesCommand::Kustomization(args)) = args.command else {
        return print_help(settings, &["kubernetes"], out);
    };
    let Some(KustomizationCommand::Update(args)) = args.command else {
        return print_help(settings, &["kubernetes", "kustomization"], out);
    };

    match args.command {
        Some(UpdateCommand::Build(args)) => {
            tracing::debug!(
                command = "build",
                file = %args.manifest.file,
                build = %args.build,
                dry_run = args.manifest.dry_run,
                "flags"
            );
            let patch = ManifestPatch::build_label(args.build);
            update(args.manifest, patch, settings, out)
        }
        Some(UpdateCommand::Image(args)) => {
            let registry = settings.registry(args.registry);
            tracing::debug!(
                command = "image",
                file = %args.manifest.file,
                image = %args.image,
                name = %args.name,
                tag = %args.tag,
                registry = ?registry,
                dry_run = args.manifest.dry_run,
                "flags"
            );
            let patch = ManifestPatch::SetPrimaryImage {
                image: args.image,
                name: args.name,
                tag: args.tag,
                registry,
            };
            update(args.manifest, patch, settings, out)
        }
        None => print_help(settings, &["kubernetes", "kustomization", "update"], out),
    }
}

fn update(
    manifest: ManifestArgs,
    patch: ManifestPatch,
    settings: &Settings,
    out: &mut dyn Write,
) -> Result<()> {
    let service = KustomizationService {
        path_resolver: PathResolver::new(&settings.cwd),
    };

    let command = UpdateKustomizationCommand {
        file: manifest.file,
        patch,
        dry_run: manifest.dry_run,
        format: settings.output_format(manifest.output),
    };

    match service.update(command)? {
        UpdateKustomizationResult::Preview(output) => {
            out.write_all(&output)?;
            out.flush()
                .context("unable to write kustomization to standard-output")?;
        }
        UpdateKustomizationResult::Written(path) => {
            tracing::debug!(path = %path.display(), "successfully updated kustomization");
        }
    }

    Ok(())
}
