//! Error types for the simulation engine.

use thiserror::Error;

/// Errors surfaced by the simulation engine.
///
/// None of these are recoverable conditions. `EmptyQueue` and `ClearGate`
/// indicate sequencing bugs in the event state machine (callers always check
/// emptiness and channel state first), and `InvalidConfig` is raised eagerly
/// at construction, before any event executes. Silent recovery would corrupt
/// the run's statistics, so every variant surfaces immediately.
#[derive(Debug, Error)]
pub enum SimError {
    /// Removal or peek on an empty queue.
    #[error("empty queue")]
    EmptyQueue,

    /// The channel resource was released while no grant was outstanding.
    #[error("channel released while already free")]
    ClearGate,

    /// The configuration was rejected before any event executed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
