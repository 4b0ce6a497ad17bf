//! Error types surfaced by setters and navigation calls.

use thiserror::Error;

/// Errors the widgets report to callers.
///
/// Malformed input is always recovered locally: the setter returns the error,
/// logs a diagnostic, and the widget keeps its last good state.
#[derive(Debug, Error)]
pub enum Error {
    /// The table specification could not be parsed or validated.
    #[error("invalid table specification: {0}")]
    InvalidData(String),
    /// The style configuration could not be parsed or validated.
    #[error("invalid style configuration: {0}")]
    InvalidStyle(String),
    /// A hierarchical path did not resolve to an existing pane.
    #[error("no pane for path segment '{0}'")]
    PathNotFound(String),
    /// A referenced column key does not exist in the specification.
    #[error("unknown column '{0}'")]
    UnknownColumn(String),
}
