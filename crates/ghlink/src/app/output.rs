//! Rendering a resolved link for stdout.

use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::domain::model::ResolvedLink;

/// Supported stdout formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// The bare URL.
    #[default]
    Plain,
    /// URL, remote, branch, and path as a JSON object.
    Json,
}

impl FromStr for OutputFormat {
    type Err = OutputFormatParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "plain" | "text" | "url" => Ok(OutputFormat::Plain),
            "json" => Ok(OutputFormat::Json),
            other => Err(OutputFormatParseError::UnknownFormat(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum OutputFormatParseError {
    #[error("unknown output format '{0}'")]
    UnknownFormat(String),
}

pub fn render(link: &ResolvedLink, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Plain => Ok(link.url.clone()),
        OutputFormat::Json => serde_json::to_string(link).context("failed to serialize link"),
    }
}
