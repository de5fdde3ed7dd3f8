use regex::Error as RegexError;
use serde::{Deserialize, Serialize};
use serde_json::Error as JsonError;
use thiserror::Error;

/// Crate-wide error type.
///
/// View operations themselves never propagate errors: preconditions degrade
/// to documented no-ops or empty/default results. Errors exist only at the
/// resolution and parsing seams (view label resolution, filter compilation,
/// position field decoding) and are absorbed with a logged warning before
/// they reach an accessor's return value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum GraphViewError {
    #[error("Invalid filter expression: {0}")]
    Filter(String),
    #[error("Invalid view label: {0}")]
    InvalidLabel(String),
    #[error("(De)Serialization error: {0}")]
    Serialization(String),
}

impl From<RegexError> for GraphViewError {
    fn from(src: RegexError) -> GraphViewError {
        GraphViewError::Filter(format!("Regex parse failed: {src}"))
    }
}

impl From<JsonError> for GraphViewError {
    fn from(src: JsonError) -> GraphViewError {
        GraphViewError::Serialization(format!("JSON (de)serialization error: {src}"))
    }
}
