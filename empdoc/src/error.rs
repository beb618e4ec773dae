use serde::{Deserialize, Serialize};

use crate::types::Span;

/// Errors raised while loading the docs-site plumbing files.
///
/// The rendering and prediction engines themselves never fail; only the JSON
/// manifest and file index can be rejected.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid manifest: {0}")]
    InvalidManifest(#[source] serde_json::Error),

    #[error("Manifest lists no pages")]
    EmptyManifest,

    #[error("Invalid file index: {0}")]
    InvalidIndex(#[source] serde_json::Error),
}

/// A diagnostic message produced during parsing.
///
/// Diagnostics are non-fatal: the parser continues and produces exactly the
/// same output it would have produced without them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Severity level for diagnostics. Parsing never fails, so every
/// diagnostic is a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
}
