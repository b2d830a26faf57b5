//! Monte Carlo driver: repeats the path walk and collects samples.
//!
//! Trials are split into fixed-size batches. A master `StdRng` seeded from
//! the run seed hands out one sub-seed per batch, in batch order, and each
//! batch draws from its own `StdRng`. The sample sequence therefore depends
//! only on the seed and the trial count, the sequential and parallel modes
//! produce identical output, and nearby run seeds share no batch streams.

use crate::path::PathSimulator;
use crate::statistics::{Summary, summarize};
use crate::{Error, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use schedcast_task_graph::{TaskGraph, TaskId};
use serde::Serialize;
use tracing::{debug, instrument, warn};

/// Default number of trials per run.
pub const DEFAULT_TRIALS: usize = 10_000;

const BATCH_SIZE: usize = 256;

/// Settings for one Monte Carlo run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Number of trials. Must be positive.
    pub trials: usize,
    /// Seed for the run; a random one is chosen and recorded when absent.
    pub seed: Option<u64>,
    /// Run batches on the rayon thread pool.
    pub parallel: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            seed: None,
            parallel: false,
        }
    }
}

/// Duration and cost samples from one run, in trial order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleSet {
    /// Total duration of each trial, in days.
    pub durations: Vec<f64>,
    /// Total cost (sum of weekly rates) of each trial.
    pub costs: Vec<f64>,
    /// Trials whose walk never reached the start task.
    pub unreached_trials: usize,
    /// Seed the run used.
    pub seed: u64,
}

/// Summaries of both sample collections.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunSummary {
    /// Summary of the duration samples.
    pub duration: Summary,
    /// Summary of the cost samples.
    pub cost: Summary,
}

impl SampleSet {
    /// Number of trials.
    #[must_use]
    pub fn len(&self) -> usize {
        self.durations.len()
    }

    /// Check whether the set holds no trials.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }

    /// Summarise durations and costs at the given confidence level.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientSamples`] for an empty set and
    /// [`Error::InvalidConfidence`] for a level outside `(0, 1)`.
    pub fn summarize(&self, confidence: f64) -> Result<RunSummary> {
        Ok(RunSummary {
            duration: summarize(&self.durations, confidence)?,
            cost: summarize(&self.costs, confidence)?,
        })
    }
}

/// Monte Carlo driver over one task graph.
#[derive(Debug, Clone)]
pub struct MonteCarlo<'g> {
    graph: &'g TaskGraph,
    config: SimulationConfig,
}

impl<'g> MonteCarlo<'g> {
    /// Create a driver for `graph` with the given settings.
    #[must_use]
    pub fn new(graph: &'g TaskGraph, config: SimulationConfig) -> Self {
        Self { graph, config }
    }

    /// Settings this driver runs with.
    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run all trials for the span from `start` back from `end`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTrialCount`] when configured for zero trials
    /// and a graph error when either id is not part of the graph.
    #[instrument(
        name = "monte_carlo",
        skip(self),
        fields(trials = self.config.trials, parallel = self.config.parallel)
    )]
    pub fn run(&self, start: TaskId, end: TaskId) -> Result<SampleSet> {
        let trials = self.config.trials;
        if trials == 0 {
            return Err(Error::InvalidTrialCount);
        }
        self.graph.ensure_contains(start)?;
        self.graph.ensure_contains(end)?;

        let seed = self
            .config
            .seed
            .unwrap_or_else(|| rand::rng().random::<u64>());
        let batches = trials.div_ceil(BATCH_SIZE);
        debug!(seed, batches, "Starting Monte Carlo run");

        let seeds = batch_seeds(seed, batches);

        let run_batch = |batch: usize| -> Result<Vec<(f64, f64, bool)>> {
            let size = BATCH_SIZE.min(trials - batch * BATCH_SIZE);
            let mut rng = StdRng::seed_from_u64(seeds[batch]);
            let mut simulator = PathSimulator::new(self.graph, start, end)?;

            Ok((0..size)
                .map(|_| {
                    let trial = simulator.simulate(&mut rng);
                    (trial.duration, trial.cost, trial.reached_start)
                })
                .collect())
        };

        let outcomes: Vec<Vec<(f64, f64, bool)>> = if self.config.parallel {
            (0..batches).into_par_iter().map(run_batch).collect::<Result<_>>()?
        } else {
            (0..batches).map(run_batch).collect::<Result<_>>()?
        };

        let mut samples = SampleSet {
            durations: Vec::with_capacity(trials),
            costs: Vec::with_capacity(trials),
            unreached_trials: 0,
            seed,
        };
        for (duration, cost, reached_start) in outcomes.into_iter().flatten() {
            samples.durations.push(duration);
            samples.costs.push(cost);
            if !reached_start {
                samples.unreached_trials += 1;
            }
        }

        if samples.unreached_trials > 0 {
            warn!(
                unreached = samples.unreached_trials,
                trials, "Some trials never reached the start task; their totals are partial"
            );
        }
        debug!(trials = samples.len(), "Monte Carlo run complete");

        Ok(samples)
    }
}

/// Derive one independent sub-seed per batch from the run seed.
fn batch_seeds(seed: u64, batches: usize) -> Vec<u64> {
    let mut master = StdRng::seed_from_u64(seed);
    (0..batches).map(|_| master.random::<u64>()).collect()
}

/// Run `trials` sequential trials with a fresh random seed.
///
/// # Errors
///
/// See [`MonteCarlo::run`].
pub fn run(graph: &TaskGraph, start: TaskId, end: TaskId, trials: usize) -> Result<SampleSet> {
    let config = SimulationConfig {
        trials,
        ..SimulationConfig::default()
    };
    MonteCarlo::new(graph, config).run(start, end)
}
