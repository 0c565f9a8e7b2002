//! Validation result types and the aggregator that builds them.

use std::fmt;

use serde::Serialize;

use crate::error::ConfigError;

/// Rule name reported for presence failures.
pub const REQUIRED_RULE: &str = "required";

/// Message reported when a required field is absent or zero.
pub const REQUIRED_MESSAGE: &str = "non zero value required";

/// Whether a violation is bad data or a bad declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    /// A rule evaluated to false.
    Failure,
    /// The declaration itself is wrong; see [`ConfigError`].
    Configuration { error: ConfigError },
}

/// A single field-level violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Dotted path from the root, e.g. `Orders[2].Address.Zip`.
    pub field: String,
    pub rule_type: String,
    pub message: String,
    #[serde(flatten)]
    pub kind: ViolationKind,
}

impl FieldViolation {
    pub fn is_configuration(&self) -> bool {
        matches!(self.kind, ViolationKind::Configuration { .. })
    }

    pub fn config_error(&self) -> Option<&ConfigError> {
        match &self.kind {
            ViolationKind::Configuration { error } => Some(error),
            ViolationKind::Failure => None,
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

/// The combined error set, usable with `?`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(pub Vec<FieldViolation>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldViolation> {
        self.0.iter()
    }

    /// Violations recorded against `field` (exact path match).
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldViolation> {
        self.0.iter().filter(move |v| v.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldViolation;
    type IntoIter = std::slice::Iter<'a, FieldViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Aggregated outcome of validating one root value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: ValidationErrors,
    /// The walk stopped early on a configuration error.
    pub aborted: bool,
}

impl ValidationResult {
    /// Ordinary failures, in traversal order.
    pub fn failures(&self) -> impl Iterator<Item = &FieldViolation> {
        self.errors.iter().filter(|v| !v.is_configuration())
    }

    /// Configuration errors, in traversal order.
    pub fn config_errors(&self) -> impl Iterator<Item = &FieldViolation> {
        self.errors.iter().filter(|v| v.is_configuration())
    }

    pub fn has_config_errors(&self) -> bool {
        self.config_errors().next().is_some()
    }

    /// `(valid, errors)` pair.
    pub fn into_parts(self) -> (bool, ValidationErrors) {
        (self.is_valid, self.errors)
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_valid {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Collects per-field outcomes in traversal order.
#[derive(Debug, Default)]
pub struct Aggregator {
    violations: Vec<FieldViolation>,
    abort_on_config: bool,
    aborted: bool,
}

impl Aggregator {
    pub fn new(abort_on_config: bool) -> Self {
        Self {
            abort_on_config,
            ..Self::default()
        }
    }

    pub fn failure(&mut self, field: &str, rule_type: &str, message: String) {
        self.violations.push(FieldViolation {
            field: field.to_string(),
            rule_type: rule_type.to_string(),
            message,
            kind: ViolationKind::Failure,
        });
    }

    pub fn configuration(&mut self, field: &str, rule_type: &str, error: ConfigError) {
        tracing::warn!(field, rule = rule_type, error = %error, "Invalid rule declaration");
        self.violations.push(FieldViolation {
            field: field.to_string(),
            rule_type: rule_type.to_string(),
            message: error.to_string(),
            kind: ViolationKind::Configuration { error },
        });
        if self.abort_on_config {
            self.aborted = true;
        }
    }

    /// The walk must stop: a configuration error was recorded under the
    /// abort policy.
    pub fn should_stop(&self) -> bool {
        self.aborted
    }

    pub fn finish(self) -> ValidationResult {
        ValidationResult {
            is_valid: self.violations.is_empty(),
            errors: ValidationErrors(self.violations),
            aborted: self.aborted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_aggregator_is_valid() {
        let result = Aggregator::new(false).finish();
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
        assert!(result.into_result().is_ok());
    }

    #[test]
    fn failures_and_config_errors_are_separated() {
        let mut agg = Aggregator::new(false);
        agg.failure("Name", "alpha", "x1 does not validate as alpha".to_string());
        agg.configuration(
            "Age",
            "childless",
            ConfigError::UnknownRule {
                name: "childless".to_string(),
            },
        );
        assert!(!agg.should_stop());
        let result = agg.finish();
        assert!(!result.is_valid);
        assert_eq!(result.failures().count(), 1);
        assert_eq!(result.config_errors().count(), 1);
        assert!(result.has_config_errors());
        assert!(!result.aborted);
    }

    #[test]
    fn abort_policy_stops_on_config_error() {
        let mut agg = Aggregator::new(true);
        agg.failure("Name", "alpha", "bad".to_string());
        assert!(!agg.should_stop());
        agg.configuration("Age", "x", ConfigError::UnknownRule { name: "x".into() });
        assert!(agg.should_stop());
        assert!(agg.finish().aborted);
    }

    #[test]
    fn display_joins_violations() {
        let mut agg = Aggregator::new(false);
        agg.failure("Name", "alpha", "bad name".to_string());
        agg.failure("Child", "childless", "has a child".to_string());
        let errors = agg.finish().errors;
        assert_eq!(errors.to_string(), "Name: bad name; Child: has a child");
        assert_eq!(errors.for_field("Child").count(), 1);
    }

    #[test]
    fn serializes_kind_inline() {
        let mut agg = Aggregator::new(false);
        agg.failure("Name", "alpha", "bad".to_string());
        agg.configuration("Tags", "x", ConfigError::UnknownRule { name: "x".into() });
        let json = serde_json::to_value(agg.finish()).expect("serialization should succeed");
        assert_eq!(json["is_valid"], false);
        assert_eq!(json["errors"][0]["kind"], "failure");
        assert_eq!(json["errors"][0]["field"], "Name");
        assert_eq!(json["errors"][1]["kind"], "configuration");
        assert_eq!(json["errors"][1]["error"]["kind"], "unknown_rule");
    }
}
