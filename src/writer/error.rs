//! Writer precondition errors.

/// Errors raised synchronously by calls that violate a writer precondition.
///
/// Playback itself never fails: the queue is frozen before it starts, so
/// malformed state is unreachable there.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WriterError {
    #[error("No region named '{target}' on the stage")]
    TargetNotFound { target: String },

    #[error("Playback already started: the instruction queue is frozen")]
    AlreadyStarted,

    #[error("No instruction queued to erase")]
    NoPriorWrite,
}
