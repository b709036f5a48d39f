//! Data model for parsed documentation: format-agnostic.

use serde::Serialize;
use std::fmt;

/// All records parsed from a single source file, plus the file context
/// renderers need.
#[derive(Debug, Default, Serialize)]
pub struct Document {
    /// File stem, used as the page title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Path the records were read from
    #[serde(rename = "source", skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    pub records: Vec<DocRecord>,
}

/// One documented item, built from a single comment block.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct DocRecord {
    /// First identifier in the code following the comment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// @brief (last one wins)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brief: Option<String>,
    /// @description, newline-joined across repeats
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// @type
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,
    /// @param entries in source order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Param>,
    /// @returns / @return
    #[serde(rename = "return", skip_serializing_if = "Option::is_none")]
    pub returns: Option<Return>,
    /// @feature tags in source order
    #[serde(rename = "feature", skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    /// Non-fatal problems found while applying annotations
    #[serde(rename = "warnings", skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,
    pub brief: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Return {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,
    pub brief: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// `@command` that has no registered handler
    UnknownAnnotation,
    /// A registered handler rejected its argument
    AnnotationParseFailure,
}

/// A warning attached to the record it was raised for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub detail: String,
    /// The folded comment line that caused the warning
    pub source_line: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (in `{}`)", self.detail, self.source_line)
    }
}

impl DocRecord {
    /// Heading text for renderers; records without an identifier still
    /// need something to show.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("(anonymous)")
    }
}
