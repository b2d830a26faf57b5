//! Validation utilities for task graphs.
//!
//! Nothing here is fatal to a simulation run: a cyclic graph or an
//! unreachable start task still simulates, it just produces degenerate
//! trials. Validation lets callers report those conditions up front.

use crate::{Error, Result, TaskGraph, TaskId};

/// Result of graph validation.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the graph is valid (no cycles, start reachable).
    pub is_valid: bool,
    /// Whether `start` can be reached from `end` along predecessor edges.
    pub start_reachable: bool,
    /// List of validation errors, if any.
    pub errors: Vec<Error>,
}

impl TaskGraph {
    /// Validate the span between `start` and `end`.
    ///
    /// Checks for:
    /// - Cycles in the predecessor relation
    /// - A predecessor path from `end` back to `start`
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTask`] if either id is not part of this graph.
    pub fn validate(&self, start: TaskId, end: TaskId) -> Result<ValidationResult> {
        let mut errors = Vec::new();

        if self.has_cycles() {
            errors.push(Error::CycleDetected {
                message: "Task predecessor graph contains cycles".to_string(),
            });
        }

        let start_reachable = self.reaches(end, start)?;

        Ok(ValidationResult {
            is_valid: errors.is_empty() && start_reachable,
            start_reachable,
            errors,
        })
    }
}
