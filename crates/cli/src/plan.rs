//! TOML plan files: task definitions plus simulation settings.
//!
//! ```toml
//! [simulation]
//! start = "design"
//! end = "ship"
//! trials = 10000
//!
//! [[tasks]]
//! name = "design"
//! min = 1
//! most_likely = 2
//! max = 3
//! cost_per_week = 700
//! start_date = "2015-01-05"
//!
//! [[tasks]]
//! name = "ship"
//! min = 4
//! most_likely = 5
//! max = 6
//! cost_per_week = 1400
//! predecessors = ["design"]
//! ```

use chrono::NaiveDate;
use schedcast_task_graph::{Task, TaskGraph, TaskId};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading a plan or building its graph.
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Failed to read plan file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse plan: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Task(#[from] schedcast_task_graph::Error),

    #[error("Task '{task}' lists unknown predecessor '{predecessor}'")]
    UnknownPredecessor { task: String, predecessor: String },

    #[error("Unknown task '{name}'")]
    UnknownTask { name: String },

    #[error("No {which} task given")]
    MissingSpan { which: &'static str },
}

/// Optional `[simulation]` table of a plan.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationSection {
    pub start: Option<String>,
    pub end: Option<String>,
    pub trials: Option<usize>,
    pub confidence: Option<f64>,
    pub seed: Option<u64>,
    pub parallel: Option<bool>,
    pub bins: Option<usize>,
}

/// One `[[tasks]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskSpec {
    pub name: String,
    pub min: f64,
    pub most_likely: f64,
    pub max: f64,
    pub cost_per_week: f64,
    /// Quoted `YYYY-MM-DD` string.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub predecessors: Vec<String>,
}

/// A parsed plan file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Plan {
    #[serde(default)]
    pub simulation: SimulationSection,
    #[serde(default)]
    pub tasks: Vec<TaskSpec>,
}

/// Graph built from a plan, with its name index.
#[derive(Debug)]
pub struct PlanGraph {
    pub graph: TaskGraph,
    ids: HashMap<String, TaskId>,
}

impl PlanGraph {
    /// Look up a task id by name.
    pub fn id(&self, name: &str) -> Result<TaskId, PlanError> {
        self.ids
            .get(name)
            .copied()
            .ok_or_else(|| PlanError::UnknownTask {
                name: name.to_string(),
            })
    }
}

impl Plan {
    /// Read and parse a plan file.
    pub fn load(path: &Path) -> Result<Self, PlanError> {
        let source = std::fs::read_to_string(path).map_err(|source| PlanError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Loaded plan file");
        Self::parse(&source)
    }

    /// Parse a plan from TOML text.
    pub fn parse(source: &str) -> Result<Self, PlanError> {
        Ok(toml::from_str(source)?)
    }

    /// Build the task graph.
    ///
    /// Every task is added before any edge, so predecessors may be listed
    /// in any order. Names must be unique.
    pub fn build_graph(&self) -> Result<PlanGraph, PlanError> {
        let mut graph = TaskGraph::new();
        let mut ids = HashMap::with_capacity(self.tasks.len());
        let mut order = Vec::with_capacity(self.tasks.len());

        for spec in &self.tasks {
            if ids.contains_key(&spec.name) {
                return Err(schedcast_task_graph::Error::DuplicateTask {
                    name: spec.name.clone(),
                }
                .into());
            }
            let task = Task::new(
                spec.name.as_str(),
                spec.min,
                spec.most_likely,
                spec.max,
                spec.cost_per_week,
            )?;
            let id = graph.add_task(task);
            if let Some(date) = spec.start_date {
                graph.set_start_date(id, date)?;
            }
            ids.insert(spec.name.clone(), id);
            order.push(id);
        }

        for (spec, &id) in self.tasks.iter().zip(&order) {
            for predecessor in &spec.predecessors {
                let predecessor_id = ids.get(predecessor).copied().ok_or_else(|| {
                    PlanError::UnknownPredecessor {
                        task: spec.name.clone(),
                        predecessor: predecessor.clone(),
                    }
                })?;
                graph.add_predecessor(id, predecessor_id)?;
            }
        }

        debug!(tasks = graph.task_count(), "Built plan graph");
        Ok(PlanGraph { graph, ids })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAN: &str = r#"
[simulation]
start = "design"
end = "ship"
trials = 500
seed = 3

[[tasks]]
name = "ship"
min = 4
most_likely = 5
max = 6
cost_per_week = 1400
predecessors = ["design"]

[[tasks]]
name = "design"
min = 1.0
most_likely = 2.0
max = 3.0
cost_per_week = 700.0
start_date = "2015-01-05"
"#;

    #[test]
    fn test_parse_plan() {
        let plan = Plan::parse(PLAN).unwrap();
        assert_eq!(plan.simulation.start.as_deref(), Some("design"));
        assert_eq!(plan.simulation.trials, Some(500));
        assert_eq!(plan.tasks.len(), 2);
        assert_eq!(
            plan.tasks[1].start_date,
            NaiveDate::from_ymd_opt(2015, 1, 5)
        );
    }

    #[test]
    fn test_build_graph_resolves_forward_references() {
        let plan = Plan::parse(PLAN).unwrap();
        let built = plan.build_graph().unwrap();

        let ship = built.id("ship").unwrap();
        let design = built.id("design").unwrap();
        assert_eq!(built.graph.predecessors(ship), &[design]);
        assert!(built.graph.task(design).unwrap().start_date().is_some());
    }

    #[test]
    fn test_unknown_predecessor() {
        let plan = Plan::parse(
            r#"
[[tasks]]
name = "a"
min = 1
most_likely = 1
max = 1
cost_per_week = 0
predecessors = ["ghost"]
"#,
        )
        .unwrap();

        let err = plan.build_graph().unwrap_err();
        assert!(matches!(err, PlanError::UnknownPredecessor { ref predecessor, .. } if predecessor == "ghost"));
    }

    #[test]
    fn test_duplicate_task_names() {
        let task = r#"
[[tasks]]
name = "a"
min = 1
most_likely = 1
max = 1
cost_per_week = 0
"#;
        let plan = Plan::parse(&format!("{task}{task}")).unwrap();
        let err = plan.build_graph().unwrap_err();
        assert!(matches!(
            err,
            PlanError::Task(schedcast_task_graph::Error::DuplicateTask { .. })
        ));
    }

    #[test]
    fn test_invalid_estimate() {
        let plan = Plan::parse(
            r#"
[[tasks]]
name = "a"
min = 5
most_likely = 1
max = 9
cost_per_week = 0
"#,
        )
        .unwrap();
        let err = plan.build_graph().unwrap_err();
        assert!(err.to_string().contains("Invalid parameters for task 'a'"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(matches!(
            Plan::parse("[simulation]\ntrails = 5\n"),
            Err(PlanError::Parse(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Plan::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, PlanError::Io { .. }));
    }
}
