//! Report types - severities, confidence levels, locations, violations

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity attached to a violation.
///
/// Severity is configured per rule, never computed by a rule. A rule decides
/// *whether* something is reported; configuration decides *how loudly*.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordinal strength of a detection's evidential support.
///
/// Ordering is derived from variant order: `Low < Medium < High`. Rules grade
/// confidence from the number of independent corroborating signals, so a
/// `High` detection always carries the evidence to justify it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a detection or violation points inside the analyzed unit.
///
/// All fields are optional: unit-scope findings (e.g. an architectural
/// detection spanning several classes) carry an empty location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub file: Option<String>,
    pub class_name: Option<String>,
    pub method_name: Option<String>,
    /// 1-based line, local to the block the validator analyzed.
    pub line: Option<u32>,
}

impl Location {
    /// Location naming a class (or component) only.
    pub fn for_class(name: &str) -> Self {
        Self {
            class_name: Some(name.to_string()),
            ..Self::default()
        }
    }

    /// Location naming a line only.
    pub fn at_line(line: u32) -> Self {
        Self {
            line: Some(line),
            ..Self::default()
        }
    }

    pub fn with_method(mut self, name: &str) -> Self {
        self.method_name = Some(name.to_string());
        self
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_file(mut self, file: &str) -> Self {
        self.file = Some(file.to_string());
        self
    }
}

/// A rule breach reported to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// Stable rule identifier, e.g. `naming-const-convention` or `pattern-singleton`.
    pub rule: String,
    /// Rule family, e.g. `naming`, `solid`, `creational`, `migration`.
    pub category: String,
    pub severity: Severity,
    pub message: String,
    pub location: Location,
    pub suggestion: Option<String>,
    pub evidence: Option<Vec<String>>,
}

impl Violation {
    pub fn new(
        rule: &str,
        category: &str,
        severity: Severity,
        message: impl Into<String>,
        location: Location,
    ) -> Self {
        Self {
            rule: rule.to_string(),
            category: category.to_string(),
            severity,
            message: message.into(),
            location,
            suggestion: None,
            evidence: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_evidence(mut self, evidence: Vec<String>) -> Self {
        self.evidence = Some(evidence);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_is_ordinal() {
        assert!(Confidence::Low < Confidence::Medium);
        assert!(Confidence::Medium < Confidence::High);
        assert_eq!(Confidence::High.max(Confidence::Low), Confidence::High);
    }

    #[test]
    fn severity_round_trips_through_config_dialect() {
        let sev: Severity = serde_json::from_str("\"warning\"").unwrap();
        assert_eq!(sev, Severity::Warning);
        assert_eq!(serde_json::to_string(&Severity::Error).unwrap(), "\"error\"");
    }

    #[test]
    fn violation_serializes_camel_case() {
        let v = Violation::new(
            "naming-class-pascalcase",
            "naming",
            Severity::Warning,
            "Class 'foo' should use PascalCase",
            Location::for_class("foo").with_line(3),
        )
        .with_suggestion("Rename to 'Foo'");

        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["rule"], "naming-class-pascalcase");
        assert_eq!(json["location"]["className"], "foo");
        assert_eq!(json["location"]["line"], 3);
        assert_eq!(json["severity"], "warning");
    }

    #[test]
    fn empty_location_for_unit_scope_findings() {
        let loc = Location::default();
        assert!(loc.class_name.is_none());
        assert!(loc.line.is_none());
    }
}
