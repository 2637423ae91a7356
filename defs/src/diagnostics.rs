use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single problem reported back to the host, optionally pinned to an attribute path
/// such as `spec.endpoints[0]`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl Diagnostic {
    pub fn error(summary: &str, detail: impl Into<String>) -> Self {
        Diagnostic {
            severity: Severity::Error,
            summary: summary.to_string(),
            detail: detail.into(),
            path: None,
        }
    }

    pub fn attribute_error(path: &str, summary: &str, detail: impl Into<String>) -> Self {
        Diagnostic {
            path: Some(path.to_string()),
            ..Diagnostic::error(summary, detail)
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let severity = match self.severity {
            Severity::Error => "Error",
            Severity::Warning => "Warning",
        };
        match &self.path {
            Some(path) => write!(
                f,
                "{}: {} (at {}): {}",
                severity, self.summary, path, self.detail
            ),
            None => write!(f, "{}: {}: {}", severity, self.summary, self.detail),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics(Vec::new())
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    pub fn has_error(&self) -> bool {
        self.0.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }
}

impl From<Diagnostic> for Diagnostics {
    fn from(diagnostic: Diagnostic) -> Self {
        Diagnostics(vec![diagnostic])
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.0.iter().map(|d| d.to_string()).collect();
        f.write_str(&lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_includes_attribute_path() {
        let diagnostic = Diagnostic::attribute_error(
            "spec.driver",
            "Invalid Attribute Value",
            "value must be one of: etcd, MySQL, PostgreSQL",
        );
        assert_eq!(
            diagnostic.to_string(),
            "Error: Invalid Attribute Value (at spec.driver): value must be one of: etcd, MySQL, PostgreSQL"
        );
    }

    #[test]
    fn test_has_error_ignores_warnings() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Diagnostic {
            severity: Severity::Warning,
            summary: "Deprecated".to_string(),
            detail: "".to_string(),
            path: None,
        });
        assert!(!diagnostics.has_error());
        diagnostics.push(Diagnostic::error("Broken", "details"));
        assert!(diagnostics.has_error());
        assert_eq!(diagnostics.len(), 2);
    }
}
