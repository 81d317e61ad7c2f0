//! Violation and result types shared by every validator.

use std::fmt;

use serde::Serialize;
use tracing::error;

/// A single failed policy check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Human-readable description of what did not match what.
    pub message: String,
}

impl Violation {
    /// Creates a violation with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RequirementsViolation(message={})", self.message)
    }
}

/// Ordered violations of one or more checks.
///
/// A result is OK exactly when it holds no violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    violations: Vec<Violation>,
    #[serde(rename = "is_ok")]
    ok: bool,
}

impl ValidationResult {
    /// Creates a result from violations, keeping their order.
    pub fn new(violations: Vec<Violation>) -> Self {
        let ok = violations.is_empty();
        Self { violations, ok }
    }

    /// Creates a passing result.
    pub fn passed() -> Self {
        Self::new(Vec::new())
    }

    /// Returns the violations in order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Returns whether no violations were found.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Appends the violations of `other` after this result's own.
    #[must_use]
    pub fn concat(mut self, other: Self) -> Self {
        self.extend(other.violations);
        self
    }

    /// Logs every violation individually at error level.
    pub fn log_violations(&self) {
        for violation in &self.violations {
            error!("{}", violation.message);
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::passed()
    }
}

impl Extend<Violation> for ValidationResult {
    fn extend<I: IntoIterator<Item = Violation>>(&mut self, iter: I) {
        self.violations.extend(iter);
        self.ok = self.violations.is_empty();
    }
}

impl FromIterator<Violation> for ValidationResult {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<Violation> for ValidationResult {
    fn from(violation: Violation) -> Self {
        Self::new(vec![violation])
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValidationResult(violations=[")?;
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{violation}")?;
        }
        write!(f, "], isOK={})", self.ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_result_renders_ok() {
        assert_eq!(
            ValidationResult::passed().to_string(),
            "ValidationResult(violations=[], isOK=true)"
        );
    }

    #[test]
    fn renders_violations_in_order() {
        let result = ValidationResult::new(vec![Violation::new("first"), Violation::new("second")]);
        assert_eq!(
            result.to_string(),
            "ValidationResult(violations=[RequirementsViolation(message=first), \
             RequirementsViolation(message=second)], isOK=false)"
        );
    }

    #[test]
    fn concat_preserves_order_and_duplicates() {
        let left = ValidationResult::from(Violation::new("same"));
        let right = ValidationResult::new(vec![Violation::new("same"), Violation::new("other")]);
        let merged = left.concat(right);
        let messages: Vec<&str> = merged
            .violations()
            .iter()
            .map(|v| v.message.as_str())
            .collect();
        assert_eq!(messages, vec!["same", "same", "other"]);
        assert!(!merged.is_ok());
    }

    #[test]
    fn default_result_passes() {
        assert!(ValidationResult::default().is_ok());
    }

    #[test]
    fn concat_of_ok_results_is_ok() {
        assert!(ValidationResult::passed().concat(ValidationResult::passed()).is_ok());
    }

    #[test]
    fn serializes_for_reports() {
        let result = ValidationResult::from(Violation::new("bad branch"));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["is_ok"], false);
        assert_eq!(json["violations"][0]["message"], "bad branch");
    }

    proptest! {
        #[test]
        fn ok_is_emptiness_of_violations(messages in proptest::collection::vec(".*", 0..6)) {
            let result: ValidationResult = messages.iter().map(Violation::new).collect();
            prop_assert_eq!(result.is_ok(), result.violations().is_empty());
            prop_assert_eq!(result.violations().len(), messages.len());
        }

        #[test]
        fn concat_keeps_ok_in_sync(left in 0usize..4, right in 0usize..4) {
            let make = |n: usize| (0..n).map(|i| Violation::new(i.to_string())).collect::<ValidationResult>();
            let merged = make(left).concat(make(right));
            prop_assert_eq!(merged.is_ok(), left + right == 0);
        }
    }
}
