//! Serializable view of a session, for machine-readable output.

use serde::Serialize;

use crate::calculator::{BufferState, EvaluationError, EvaluationErrorKind};

/// Error details attached to a snapshot in the error state.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SnapshotError {
    pub kind: EvaluationErrorKind,
    pub message: String,
}

impl From<&EvaluationError> for SnapshotError {
    fn from(err: &EvaluationError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// What the display shows, and why.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionSnapshot {
    /// The display text exactly as the buffer reports it.
    pub display: String,
    pub state: BufferState,
    /// The numeric value, only while a result is shown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<SnapshotError>,
}

impl SessionSnapshot {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
