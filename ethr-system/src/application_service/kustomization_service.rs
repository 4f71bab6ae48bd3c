use std::path::PathBuf;

use crate::domain::kustomization::{self, Kustomization, ManifestPatch};
use crate::domain::target_path::PathPolicy;
use crate::error::SystemError;
use crate::infrastructure::file_system::{self, PUBLIC_FILE_MODE};
use crate::infrastructure::marshalers::{self, OutputFormat};
use crate::infrastructure::path_resolver::{require_existing, PathResolver};

#[derive(Debug, Clone)]
pub struct UpdateKustomizationCommand {
    pub file: String,
    pub patch: ManifestPatch,
    /// Return the rendered document instead of writing it back.
    pub dry_run: bool,
    /// Rendering used for `dry_run`. Files on disk are always YAML.
    pub format: OutputFormat,
}

#[derive(Debug)]
pub enum UpdateKustomizationResult {
    Written(PathBuf),
    Preview(Vec<u8>),
}

pub struct KustomizationService {
    pub path_resolver: PathResolver,
}

impl KustomizationService {
    /// Load, patch, then store or preview. Nothing is written unless every
    /// earlier step succeeded.
    pub fn update(
        &self,
        cmd: UpdateKustomizationCommand,
    ) -> Result<UpdateKustomizationResult, SystemError> {
        let target = self
            .path_resolver
            .resolve(&cmd.file, &PathPolicy::MANIFEST, false)?;
        require_existing(&target)?;

        let path = target.into_path_buf();
        let content = file_system::read(&path)?;
        tracing::debug!(path = %path.display(), size = content.len(), "read kustomization");

        if cmd.dry_run {
            let mut manifest =
                Kustomization::from_yaml(&content).map_err(|e| with_path(e, &path))?;
            manifest.apply(&cmd.patch);
            let output =
                marshalers::marshal(&manifest, cmd.format).map_err(|e| with_path(e, &path))?;
            return Ok(UpdateKustomizationResult::Preview(output));
        }

        let output = kustomization::patch(&content, &cmd.patch).map_err(|e| with_path(e, &path))?;
        let path = file_system::write(&path, &output, PUBLIC_FILE_MODE)?;
        tracing::info!(path = %path.display(), "updated kustomization");

        Ok(UpdateKustomizationResult::Written(path))
    }
}

fn with_path(error: SystemError, path: &std::path::Path) -> SystemError {
    match error {
        SystemError::Format { context, message } => SystemError::Format {
            context: format!("{context} ({})", path.display()),
            message,
        },
        other => other,
    }
}
