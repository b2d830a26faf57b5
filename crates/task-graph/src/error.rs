//! Error types for task graph operations.

use miette::Diagnostic;
use thiserror::Error;

use crate::TaskId;

/// Result type for task graph operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or querying a task graph.
#[derive(Error, Debug, Clone, PartialEq, Diagnostic)]
pub enum Error {
    /// A task's three-point estimate or cost rate is malformed.
    #[error("Invalid parameters for task '{task}': {reason}")]
    #[diagnostic(
        code(schedcast_task_graph::task::invalid_parameters),
        help("Estimates must satisfy 0 <= min <= most likely <= max and the weekly cost must be non-negative")
    )]
    InvalidTaskParameters {
        /// Name of the rejected task.
        task: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A task id does not belong to this graph.
    #[error("Task {id} does not exist in the graph")]
    #[diagnostic(code(schedcast_task_graph::task::unknown))]
    UnknownTask {
        /// The offending id.
        id: TaskId,
    },

    /// Two tasks share a name where names are used as keys.
    #[error("Task '{name}' is defined more than once")]
    #[diagnostic(code(schedcast_task_graph::task::duplicate))]
    DuplicateTask {
        /// The repeated name.
        name: String,
    },

    /// A dependency cycle was detected in the graph.
    #[error("Cycle detected in task graph: {message}")]
    #[diagnostic(code(schedcast_task_graph::graph::cycle))]
    CycleDetected {
        /// Human-readable description of the cycle.
        message: String,
    },
}

impl Error {
    /// Create an invalid-parameters error for the named task.
    pub fn invalid_parameters(task: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTaskParameters {
            task: task.into(),
            reason: reason.into(),
        }
    }
}
