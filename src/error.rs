use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the collision engine and its configuration layer.
///
/// Numerically degenerate predictions (parallel motion, grazing contact) are not errors:
/// they are reported as "no collision" by the prediction routines and never surface here.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed construction input or an invalid time step.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// `extract_min` was called on an empty queue. The engine guards against this, so
    /// seeing it means a caller skipped the emptiness check.
    #[error("extract_min called on an empty event queue")]
    EmptyQueue,

    /// An event was built with a NaN or infinite time.
    #[error("invalid event: {0}")]
    InvalidEvent(String),

    /// Scenario generation could not place a particle without overlap.
    #[error("placement failed: {0}")]
    Placement(String),

    /// Malformed scenario description.
    #[error(transparent)]
    Config(#[from] serde_json::Error),
}
