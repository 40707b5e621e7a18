//! Typed failures surfaced through transition aggregates.

use thiserror::Error;

/// Terminal failures of a `set` invocation. Missing poses and unknown
/// value keys are degenerate no-ops, not errors; only a transition
/// resolver rejecting its inputs is fatal.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PoseError {
    #[error("transition resolver failed for '{key}': {message}")]
    Resolution { key: String, message: String },
}
