//! Task graph arena built on petgraph.
//!
//! Tasks live in a directed graph whose edges point from a successor to each
//! of its predecessors, so walking outgoing edges moves backward through the
//! schedule.

use crate::{Error, Result, Task};
use chrono::NaiveDate;
use petgraph::algo::{has_path_connecting, is_cyclic_directed};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::IntoNodeReferences;
use std::fmt;
use tracing::debug;

/// Identifier of a task inside a [`TaskGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(NodeIndex);

impl TaskId {
    /// Position of the task in the graph's arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0.index()
    }

    pub(crate) fn node(self) -> NodeIndex {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0.index())
    }
}

/// A node in the task graph.
#[derive(Debug, Clone)]
pub struct GraphNode {
    /// The task data.
    pub task: Task,
    // petgraph iterates neighbours newest-first; this keeps insertion order.
    predecessors: Vec<TaskId>,
}

/// Dependency graph of schedule tasks.
///
/// Built once during setup and read-only afterwards, so a shared reference
/// can be handed to any number of simulation threads.
#[derive(Debug, Clone, Default)]
pub struct TaskGraph {
    graph: DiGraph<GraphNode, ()>,
}

impl TaskGraph {
    /// Create a new empty task graph.
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
        }
    }

    /// Add a task to the graph and return its id.
    ///
    /// Names are not keys: adding two tasks with the same name yields two
    /// distinct nodes.
    pub fn add_task(&mut self, task: Task) -> TaskId {
        let name = task.name().to_string();
        let id = TaskId(self.graph.add_node(GraphNode {
            task,
            predecessors: Vec::new(),
        }));
        debug!(task = %name, id = %id, "Added task node");
        id
    }

    /// Record that `task` depends on the completion of `predecessor`.
    ///
    /// Adding the same edge twice has no effect. Cycles are not rejected
    /// here; see [`TaskGraph::has_cycles`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTask`] if either id is not part of this graph.
    pub fn add_predecessor(&mut self, task: TaskId, predecessor: TaskId) -> Result<()> {
        self.ensure_contains(predecessor)?;
        let node = self
            .graph
            .node_weight_mut(task.node())
            .ok_or(Error::UnknownTask { id: task })?;

        if node.predecessors.contains(&predecessor) {
            return Ok(());
        }
        node.predecessors.push(predecessor);
        self.graph.add_edge(task.node(), predecessor.node(), ());
        debug!(task = %task, predecessor = %predecessor, "Added predecessor edge");

        Ok(())
    }

    /// Set the informational start date of a task.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTask`] if the id is not part of this graph.
    pub fn set_start_date(&mut self, task: TaskId, date: NaiveDate) -> Result<()> {
        let node = self
            .graph
            .node_weight_mut(task.node())
            .ok_or(Error::UnknownTask { id: task })?;
        node.task.set_start_date(date);
        Ok(())
    }

    /// Get a task by id.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.graph.node_weight(id.node()).map(|node| &node.task)
    }

    /// Get a task by id, failing for foreign ids.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTask`] if the id is not part of this graph.
    pub fn get(&self, id: TaskId) -> Result<&Task> {
        self.task(id).ok_or(Error::UnknownTask { id })
    }

    /// Predecessors of a task in the order they were added.
    ///
    /// Unknown ids have no predecessors.
    #[must_use]
    pub fn predecessors(&self, id: TaskId) -> &[TaskId] {
        self.graph
            .node_weight(id.node())
            .map_or(&[], |node| node.predecessors.as_slice())
    }

    /// First task carrying the given name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<TaskId> {
        self.graph
            .node_references()
            .find(|(_, node)| node.task.name() == name)
            .map(|(index, _)| TaskId(index))
    }

    /// Check whether an id belongs to this graph.
    #[must_use]
    pub fn contains(&self, id: TaskId) -> bool {
        id.index() < self.graph.node_count()
    }

    /// Fail with [`Error::UnknownTask`] unless the id belongs to this graph.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTask`] for foreign ids.
    pub fn ensure_contains(&self, id: TaskId) -> Result<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(Error::UnknownTask { id })
        }
    }

    /// Get the number of tasks in the graph.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Check whether the graph has no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Iterate over all tasks in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (TaskId, &Task)> {
        self.graph
            .node_references()
            .map(|(index, node)| (TaskId(index), &node.task))
    }

    /// Check if the predecessor relation contains a cycle.
    #[must_use]
    pub fn has_cycles(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// Check whether `start` can be reached from `end` by following
    /// predecessor edges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTask`] if either id is not part of this graph.
    pub fn reaches(&self, end: TaskId, start: TaskId) -> Result<bool> {
        self.ensure_contains(end)?;
        self.ensure_contains(start)?;
        Ok(has_path_connecting(&self.graph, end.node(), start.node(), None))
    }

    pub(crate) fn inner(&self) -> &DiGraph<GraphNode, ()> {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(name: &str) -> Task {
        Task::new(name, 1.0, 2.0, 3.0, 100.0).unwrap()
    }

    #[test]
    fn test_task_graph_new() {
        let graph = TaskGraph::new();
        assert_eq!(graph.task_count(), 0);
        assert!(graph.is_empty());
    }

    #[test]
    fn test_add_single_task() {
        let mut graph = TaskGraph::new();
        let id = graph.add_task(task("design"));

        assert!(graph.contains(id));
        assert_eq!(graph.task_count(), 1);
        assert_eq!(graph.task(id).unwrap().name(), "design");
        assert!(graph.predecessors(id).is_empty());
    }

    #[test]
    fn test_duplicate_names_are_distinct_nodes() {
        let mut graph = TaskGraph::new();
        let first = graph.add_task(task("review"));
        let second = graph.add_task(task("review"));

        assert_ne!(first, second);
        assert_eq!(graph.task_count(), 2);
        assert_eq!(graph.find_by_name("review"), Some(first));
    }

    #[test]
    fn test_predecessors_keep_insertion_order() {
        let mut graph = TaskGraph::new();
        let integrate = graph.add_task(task("integrate"));
        let a = graph.add_task(task("a"));
        let b = graph.add_task(task("b"));
        let c = graph.add_task(task("c"));

        graph.add_predecessor(integrate, b).unwrap();
        graph.add_predecessor(integrate, a).unwrap();
        graph.add_predecessor(integrate, c).unwrap();

        assert_eq!(graph.predecessors(integrate), &[b, a, c]);
    }

    #[test]
    fn test_add_predecessor_is_idempotent() {
        let mut graph = TaskGraph::new();
        let b = graph.add_task(task("b"));
        let a = graph.add_task(task("a"));

        graph.add_predecessor(b, a).unwrap();
        graph.add_predecessor(b, a).unwrap();

        assert_eq!(graph.predecessors(b), &[a]);
        assert_eq!(graph.inner().edge_count(), 1);
    }

    #[test]
    fn test_add_predecessor_unknown_task() {
        let mut graph = TaskGraph::new();
        let a = graph.add_task(task("a"));

        let mut other = TaskGraph::new();
        other.add_task(task("x"));
        let foreign = other.add_task(task("y"));

        let err = graph.add_predecessor(a, foreign).unwrap_err();
        assert_eq!(err, Error::UnknownTask { id: foreign });
        let err = graph.add_predecessor(foreign, a).unwrap_err();
        assert_eq!(err, Error::UnknownTask { id: foreign });
    }

    #[test]
    fn test_set_start_date() {
        let mut graph = TaskGraph::new();
        let a = graph.add_task(task("a"));
        let date = NaiveDate::from_ymd_opt(2015, 4, 3).unwrap();

        graph.set_start_date(a, date).unwrap();
        assert_eq!(graph.task(a).unwrap().start_date(), Some(date));
    }

    #[test]
    fn test_cycle_detection() {
        let mut graph = TaskGraph::new();
        let a = graph.add_task(task("a"));
        let b = graph.add_task(task("b"));
        let c = graph.add_task(task("c"));

        graph.add_predecessor(b, a).unwrap();
        graph.add_predecessor(c, b).unwrap();
        assert!(!graph.has_cycles());

        graph.add_predecessor(a, c).unwrap();
        assert!(graph.has_cycles());
    }

    #[test]
    fn test_self_dependency_cycle() {
        let mut graph = TaskGraph::new();
        let a = graph.add_task(task("a"));
        graph.add_predecessor(a, a).unwrap();
        assert!(graph.has_cycles());
    }

    #[test]
    fn test_reaches_follows_predecessor_edges() {
        let mut graph = TaskGraph::new();
        let start = graph.add_task(task("start"));
        let mid = graph.add_task(task("mid"));
        let end = graph.add_task(task("end"));
        let island = graph.add_task(task("island"));

        graph.add_predecessor(mid, start).unwrap();
        graph.add_predecessor(end, mid).unwrap();

        assert!(graph.reaches(end, start).unwrap());
        assert!(!graph.reaches(start, end).unwrap());
        assert!(!graph.reaches(end, island).unwrap());
        assert!(graph.reaches(start, start).unwrap());
    }

    #[test]
    fn test_iter_in_insertion_order() {
        let mut graph = TaskGraph::new();
        graph.add_task(task("first"));
        graph.add_task(task("second"));

        let names: Vec<&str> = graph.iter().map(|(_, t)| t.name()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }
}
