//! Document encoders shared by the manifest commands.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SystemError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutputFormatError(String);

impl fmt::Display for ParseOutputFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported output format \"{}\": must be one of \"json\" or \"yaml\"", self.0)
    }
}

impl std::error::Error for ParseOutputFormatError {}

impl FromStr for OutputFormat {
    type Err = ParseOutputFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ParseOutputFormatError(s.to_owned())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Yaml => f.write_str("yaml"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

/// YAML with serde_yaml's fixed two-space indentation. Always ends in a
/// single newline.
pub fn yaml<T: Serialize>(value: &T) -> Result<Vec<u8>, SystemError> {
    let mut output = serde_yaml::to_string(value)
        .map_err(|e| SystemError::format("unable to marshal yaml", e))?;

    let trimmed = output.trim_end_matches('\n').len();
    output.truncate(trimmed);
    output.push('\n');

    Ok(output.into_bytes())
}

/// Pretty JSON with four-space indentation and a trailing newline.
pub fn json<T: Serialize>(value: &T) -> Result<Vec<u8>, SystemError> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);

    value
        .serialize(&mut serializer)
        .map_err(|e| SystemError::format("unable to marshal json", e))?;

    buffer.push(b'\n');
    Ok(buffer)
}

pub fn marshal<T: Serialize>(value: &T, format: OutputFormat) -> Result<Vec<u8>, SystemError> {
    match format {
        OutputFormat::Yaml => yaml(value),
        OutputFormat::Json => json(value),
    }
}
