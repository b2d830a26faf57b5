//! Error types for simulation and aggregation.

use miette::Diagnostic;
use thiserror::Error;

/// Result type for simulation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while running or summarising a simulation.
#[derive(Error, Debug, Clone, PartialEq, Diagnostic)]
pub enum Error {
    /// Statistics were requested for an empty sample collection.
    #[error("Cannot summarise an empty sample collection")]
    #[diagnostic(code(schedcast_simulation::statistics::insufficient_samples))]
    InsufficientSamples,

    /// Confidence level outside the open interval (0, 1).
    #[error("Confidence level must lie strictly between 0 and 1, got {value}")]
    #[diagnostic(
        code(schedcast_simulation::statistics::invalid_confidence),
        help("Use a fraction such as 0.95 for a 95% interval")
    )]
    InvalidConfidence {
        /// The rejected level.
        value: f64,
    },

    /// A run was requested with zero trials.
    #[error("Trial count must be positive")]
    #[diagnostic(code(schedcast_simulation::monte_carlo::invalid_trials))]
    InvalidTrialCount,

    /// A histogram was requested with zero or too many bins.
    #[error("Histogram bin count must be between 1 and {}", crate::histogram::MAX_BINS)]
    #[diagnostic(code(schedcast_simulation::histogram::invalid_bins))]
    InvalidBinCount,

    /// A reference distribution could not be constructed.
    #[error("Invalid distribution parameters: {reason}")]
    #[diagnostic(code(schedcast_simulation::statistics::distribution))]
    Distribution {
        /// Why construction failed.
        reason: String,
    },

    /// The task graph rejected an operation.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Graph(#[from] schedcast_task_graph::Error),
}
