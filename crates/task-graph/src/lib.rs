//! Task model and dependency graph for schedcast.
//!
//! This crate holds the static input of a schedule simulation: tasks with
//! three-point duration estimates and weekly cost rates, linked by
//! predecessor edges in a petgraph arena.
//!
//! # Key Types
//!
//! - [`Task`]: one activity with a validated `(min, most likely, max)` estimate
//! - [`TaskGraph`]: the arena of tasks and predecessor edges
//! - [`TaskId`]: index of a task inside its graph
//! - [`VisitedSet`]: bit set used by walks over the graph
//!
//! # Example
//!
//! ```
//! use schedcast_task_graph::{Task, TaskGraph};
//!
//! let mut graph = TaskGraph::new();
//! let design = graph.add_task(Task::new("design", 1.0, 2.0, 3.0, 700.0)?);
//! let build = graph.add_task(Task::new("build", 4.0, 5.0, 6.0, 1400.0)?);
//! graph.add_predecessor(build, design)?;
//!
//! assert_eq!(graph.predecessors(build), &[design]);
//! assert!(graph.reaches(build, design)?);
//! # Ok::<(), schedcast_task_graph::Error>(())
//! ```

mod error;
mod graph;
mod task;
mod traversal;
mod validation;

pub use error::{Error, Result};
pub use graph::{GraphNode, TaskGraph, TaskId};
pub use task::Task;
pub use traversal::VisitedSet;
pub use validation::ValidationResult;
