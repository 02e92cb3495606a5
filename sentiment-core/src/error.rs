//! Error types for core operations

use thiserror::Error;

/// Model invocation errors.
///
/// Inputs are validated at the HTTP boundary, so these indicate input that
/// bypassed validation or a defect in the model layer itself. The API layer
/// surfaces them as a generic service error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("Model received empty input")]
    EmptyInput,

    #[error("Model input exceeds {max} code points (got {got})")]
    InputTooLong { max: usize, got: usize },
}

/// Failure to parse a stored sentiment label.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown sentiment label: {0}")]
pub struct ParseLabelError(pub String);
