//! Whole-string regex matching with a case-sensitivity switch.

use std::fmt;

use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::error::PatternError;

/// A compiled regex that matches whole inputs only.
///
/// Displays as the pattern text it was built from, without the anchors.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    case_sensitive: bool,
    regex: Regex,
}

impl Pattern {
    /// Compiles `pattern`, folding case when `case_sensitive` is false.
    pub fn new(pattern: &str, case_sensitive: bool) -> Result<Self, PatternError> {
        debug!("Creating a pattern for '{pattern}' regex. Is case sensitive: '{case_sensitive}'");
        let invalid = |source| PatternError::Invalid {
            pattern: pattern.to_string(),
            source,
        };

        // The text must be a regex on its own before it is wrapped in anchors
        build(pattern, case_sensitive).map_err(invalid)?;

        // A trailing `(?x)` comment swallows the closing anchor; a newline ends it
        let regex = build(&format!("^(?:{pattern})$"), case_sensitive)
            .or_else(|_| build(&format!("^(?:{pattern}\n)$"), case_sensitive))
            .map_err(invalid)?;

        Ok(Self {
            source: pattern.to_string(),
            case_sensitive,
            regex,
        })
    }

    /// Returns whether the entire input matches.
    pub fn matches(&self, input: &str) -> bool {
        self.regex.is_match(input)
    }

    /// Returns the pattern text as configured.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns whether matching is case sensitive.
    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }
}

fn build(pattern: &str, case_sensitive: bool) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .case_insensitive(!case_sensitive)
        .build()
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
