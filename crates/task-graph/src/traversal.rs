//! Traversal helpers for walking a task graph.

use crate::graph::GraphNode;
use crate::{TaskGraph, TaskId};
use petgraph::graph::DiGraph;
use petgraph::visit::{VisitMap, Visitable};

type VisitBits = <DiGraph<GraphNode, ()> as Visitable>::Map;

/// Set of tasks already visited during one walk.
///
/// Backed by a bit set sized to the graph, so membership checks are
/// constant time and a set can be reused between walks with
/// [`VisitedSet::clear`].
#[derive(Debug, Clone)]
pub struct VisitedSet {
    bits: VisitBits,
    count: usize,
}

impl VisitedSet {
    /// Create an empty set for the given graph.
    #[must_use]
    pub fn new(graph: &TaskGraph) -> Self {
        Self {
            bits: graph.inner().visit_map(),
            count: 0,
        }
    }

    /// Mark a task visited. Returns `true` if it was not visited before.
    pub fn insert(&mut self, id: TaskId) -> bool {
        let first = self.bits.visit(id.node());
        if first {
            self.count += 1;
        }
        first
    }

    /// Check whether a task has been visited.
    #[must_use]
    pub fn contains(&self, id: TaskId) -> bool {
        self.bits.is_visited(&id.node())
    }

    /// Number of visited tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Check whether nothing has been visited.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Forget all visits.
    pub fn clear(&mut self) {
        self.bits.clear();
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Task;

    #[test]
    fn test_visited_set_tracks_membership() {
        let mut graph = TaskGraph::new();
        let a = graph.add_task(Task::new("a", 1.0, 1.0, 1.0, 0.0).unwrap());
        let b = graph.add_task(Task::new("b", 1.0, 1.0, 1.0, 0.0).unwrap());

        let mut visited = VisitedSet::new(&graph);
        assert!(visited.is_empty());
        assert!(visited.insert(a));
        assert!(!visited.insert(a));
        assert!(visited.contains(a));
        assert!(!visited.contains(b));
        assert_eq!(visited.len(), 1);

        visited.clear();
        assert!(visited.is_empty());
        assert!(!visited.contains(a));
    }
}
