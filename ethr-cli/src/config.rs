//! Startup configuration.
//!
//! Values are layered as: command-line flag, then environment variable, then
//! the optional TOML file, then the built-in default. The result is a
//! [`Settings`] passed explicitly to every command.

use std::path::{Path, PathBuf};

use ethr_system::domain::token::DEFAULT_LENGTH;
use ethr_system::infrastructure::marshalers::OutputFormat;
use serde::Deserialize;
use thiserror::Error;

use crate::logging::LogLevel;

/// Contents of the file named by `--config` / `ETHR_CONFIG`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub token: TokenConfig,
    #[serde(default)]
    pub kustomization: KustomizationConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub verbosity: Option<LogLevel>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TokenConfig {
    /// Length used when `--length` is not given.
    #[serde(default)]
    pub length: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct KustomizationConfig {
    /// Registry used by `update image` when `--registry` is not given.
    #[serde(default)]
    pub registry: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unable to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

impl CliConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

/// Everything a command needs to know about its environment.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Name shown in help examples and diagnostics.
    pub executable: String,
    pub version: &'static str,
    pub verbosity: LogLevel,
    /// Base for relative `--file` arguments.
    pub cwd: PathBuf,
    pub config: CliConfig,
}

impl Settings {
    pub fn new(
        executable: impl Into<String>,
        cwd: impl Into<PathBuf>,
        verbosity: Option<LogLevel>,
        config: CliConfig,
    ) -> Self {
        let verbosity = verbosity
            .or(config.logging.verbosity)
            .unwrap_or_default();

        Self {
            executable: executable.into(),
            version: env!("CARGO_PKG_VERSION"),
            verbosity,
            cwd: cwd.into(),
            config,
        }
    }

    pub fn token_length(&self, flag: Option<usize>) -> usize {
        flag.or(self.config.token.length).unwrap_or(DEFAULT_LENGTH)
    }

    pub fn registry(&self, flag: Option<String>) -> Option<String> {
        flag.or_else(|| self.config.kustomization.registry.clone())
    }

    pub fn output_format(&self, flag: Option<OutputFormat>) -> OutputFormat {
        flag.or(self.config.output.format).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_config() {
        let settings = Settings::new("ethr-cli", "/work", None, CliConfig::default());

        assert_eq!(settings.verbosity, LogLevel::Error);
        assert_eq!(settings.token_length(None), 32);
        assert_eq!(settings.registry(None), None);
        assert_eq!(settings.output_format(None), OutputFormat::Yaml);
    }

    #[test]
    fn config_file_fills_unset_flags() {
        let config = CliConfig::from_toml_str(
            r#"
[logging]
verbosity = "debug"

[token]
length = 64

[kustomization]
registry = "private.registry.io"

[output]
format = "json"
"#,
        )
        .unwrap();
        let settings = Settings::new("ethr-cli", "/work", None, config);

        assert_eq!(settings.verbosity, LogLevel::Debug);
        assert_eq!(settings.token_length(None), 64);
        assert_eq!(
            settings.registry(None).as_deref(),
            Some("private.registry.io")
        );
        assert_eq!(settings.output_format(None), OutputFormat::Json);
    }

    #[test]
    fn flags_win_over_config_file() {
        let config = CliConfig::from_toml_str("[token]\nlength = 64\n[logging]\nverbosity = \"info\"\n")
            .unwrap();
        let settings = Settings::new("ethr-cli", "/work", Some(LogLevel::Trace), config);

        assert_eq!(settings.verbosity, LogLevel::Trace);
        assert_eq!(settings.token_length(Some(8)), 8);
        assert_eq!(
            settings.registry(Some("reg.io".into())).as_deref(),
            Some("reg.io")
        );
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config = CliConfig::from_toml_str("[token]\nlength = 12\n").unwrap();
        assert_eq!(config.logging, LoggingConfig::default());
        assert_eq!(config.token.length, Some(12));
    }

    #[test]
    fn unknown_sections_are_rejected() {
        let result = CliConfig::from_toml_str("[telemetry]\nenabled = true\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let result = CliConfig::from_toml_str("[logging]\nverbosity = \"loud\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let error = CliConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(error.to_string().contains("/definitely/not/here.toml"));
    }
}
