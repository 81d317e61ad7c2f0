//! Rendering of validation results for the terminal and for machines.

use std::fmt;

use anyhow::{Context, Result};

use crate::validation::ValidationResult;

/// Output format for validation reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text format.
    #[default]
    Text,
    /// JSON format.
    Json,
    /// YAML format.
    Yaml,
}

impl std::str::FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            _ => Err(()),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

/// Renders a result in the requested format.
pub fn render(result: &ValidationResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(format_text(result)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(result).context("Failed to serialize report to JSON")
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(result).context("Failed to serialize report to YAML")
        }
    }
}

fn format_text(result: &ValidationResult) -> String {
    if result.is_ok() {
        return "\u{2705} Repository satisfies all requirements".to_string();
    }

    let mut text = format!(
        "\u{274c} {} requirement violation(s) found:",
        result.violations().len()
    );
    for violation in result.violations() {
        text.push_str("\n  - ");
        text.push_str(&violation.message);
    }
    text
}
