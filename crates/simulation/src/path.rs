//! Single-trial backward walk from the end task to the start task.
//!
//! Each trial starts at the end task and repeatedly moves to one
//! predecessor: the unvisited one whose throwaway duration sample is
//! strictly largest, first in insertion order on ties. Every visited task
//! contributes a fresh duration sample and its weekly cost rate. The walk
//! stops when it visits the start task or runs out of unvisited
//! predecessors, so cyclic graphs terminate too.
//!
//! Costs are summed as raw weekly rates, not prorated by duration
//! (see [`Task::prorated_cost`](schedcast_task_graph::Task::prorated_cost)
//! for the scaled figure).

use crate::sampler::{RandomSource, SampleDuration};
use crate::Result;
use schedcast_task_graph::{TaskGraph, TaskId, VisitedSet};
use tracing::trace;

/// Outcome of one trial.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialResult {
    /// Sum of the sampled durations of every visited task, in days.
    pub duration: f64,
    /// Sum of the weekly cost rates of every visited task.
    pub cost: f64,
    /// Whether the walk reached the start task. When `false` the totals
    /// cover only the tasks visited before the walk dead-ended.
    pub reached_start: bool,
    /// Visited tasks, end task first.
    pub path: Vec<TaskId>,
}

/// Reusable simulator for one `(start, end)` span of a graph.
///
/// Holds the visited set and work stack so repeated trials do not
/// reallocate them.
#[derive(Debug)]
pub struct PathSimulator<'g> {
    graph: &'g TaskGraph,
    start: TaskId,
    end: TaskId,
    visited: VisitedSet,
    stack: Vec<TaskId>,
}

impl<'g> PathSimulator<'g> {
    /// Prepare a simulator for the span from `start` back from `end`.
    ///
    /// # Errors
    ///
    /// Returns an error if either id is not part of the graph.
    pub fn new(graph: &'g TaskGraph, start: TaskId, end: TaskId) -> Result<Self> {
        graph.ensure_contains(start)?;
        graph.ensure_contains(end)?;

        Ok(Self {
            graph,
            start,
            end,
            visited: VisitedSet::new(graph),
            stack: Vec::new(),
        })
    }

    /// Run one trial.
    pub fn simulate<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> TrialResult {
        let graph = self.graph;
        self.visited.clear();
        self.stack.clear();
        self.stack.push(self.end);

        let mut result = TrialResult {
            duration: 0.0,
            cost: 0.0,
            reached_start: false,
            path: Vec::new(),
        };

        while let Some(current) = self.stack.pop() {
            if !self.visited.insert(current) {
                continue;
            }
            let Some(task) = graph.task(current) else {
                continue;
            };

            result.duration += task.sample_duration(rng);
            result.cost += task.cost_per_week();
            result.path.push(current);

            if current == self.start {
                result.reached_start = true;
                break;
            }

            if let Some(next) = self.longest_unvisited_predecessor(current, rng) {
                self.stack.push(next);
            }
        }

        trace!(
            duration = result.duration,
            cost = result.cost,
            visited = result.path.len(),
            reached_start = result.reached_start,
            "Trial finished"
        );

        result
    }

    /// Pick the unvisited predecessor with the largest throwaway sample.
    fn longest_unvisited_predecessor<R: RandomSource + ?Sized>(
        &self,
        current: TaskId,
        rng: &mut R,
    ) -> Option<TaskId> {
        let graph = self.graph;
        let mut longest: Option<(TaskId, f64)> = None;

        for &predecessor in graph.predecessors(current) {
            if self.visited.contains(predecessor) {
                continue;
            }
            let Some(task) = graph.task(predecessor) else {
                continue;
            };
            let sample = task.sample_duration(rng);
            // Strict comparison: the first of equal samples wins.
            if longest.is_none_or(|(_, best)| sample > best) {
                longest = Some((predecessor, sample));
            }
        }

        longest.map(|(id, _)| id)
    }
}

/// Run a single trial over the span `start..=end`.
///
/// # Errors
///
/// Returns an error if either id is not part of the graph.
pub fn simulate<R: RandomSource + ?Sized>(
    graph: &TaskGraph,
    start: TaskId,
    end: TaskId,
    rng: &mut R,
) -> Result<TrialResult> {
    Ok(PathSimulator::new(graph, start, end)?.simulate(rng))
}
