//! Monte Carlo schedule simulation over schedcast task graphs.
//!
//! A run repeats a randomised backward walk from an end task toward a start
//! task many times, producing one total duration and one total cost per
//! trial, then summarises both collections.
//!
//! # Key Types
//!
//! - [`PathSimulator`]: executes one trial over a `(start, end)` span
//! - [`MonteCarlo`]: repeats trials, sequentially or on the rayon pool
//! - [`SampleSet`]: the collected duration and cost samples
//! - [`Summary`]: mean, median, standard deviation and confidence interval
//! - [`Histogram`]: equal-width bin counts for rendering
//!
//! # Example
//!
//! ```
//! use schedcast_simulation::{MonteCarlo, SimulationConfig};
//! use schedcast_task_graph::{Task, TaskGraph};
//!
//! let mut graph = TaskGraph::new();
//! let a = graph.add_task(Task::new("A", 1.0, 2.0, 3.0, 700.0)?);
//! let b = graph.add_task(Task::new("B", 4.0, 5.0, 6.0, 1400.0)?);
//! graph.add_predecessor(b, a)?;
//!
//! let config = SimulationConfig { trials: 1_000, seed: Some(7), parallel: false };
//! let samples = MonteCarlo::new(&graph, config).run(a, b)?;
//! let summary = samples.summarize(0.95)?;
//!
//! assert!((summary.cost.mean - 2100.0).abs() < 1e-9);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
pub mod histogram;
pub mod monte_carlo;
pub mod path;
pub mod sampler;
pub mod statistics;

pub use error::{Error, Result};
pub use histogram::{Bin, Histogram, MAX_BINS};
pub use monte_carlo::{DEFAULT_TRIALS, MonteCarlo, RunSummary, SampleSet, SimulationConfig, run};
pub use path::{PathSimulator, TrialResult, simulate};
pub use sampler::{RandomSource, SampleDuration, ScriptedSource, triangular};
pub use statistics::{DEFAULT_CONFIDENCE, Summary, summarize};
