//! Dependency Analyzer service module
//!
//! This service builds and analyzes the dependency graph over submissions,
//! detecting circular dependencies and computing topological ordering.

use std::collections::{HashMap, HashSet, VecDeque};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::domain::entities::Submission;
use crate::domain::errors::EngineError;

/// Service for analyzing submission dependencies
///
/// DependencyAnalyzer builds a directed graph of submission dependencies and
/// provides cycle detection, topological sorting, and neighborhood queries.
/// Only `depends_on` edges that resolve to known submissions become graph
/// edges; unresolved references are surfaced later as validation violations.
pub struct DependencyAnalyzer {
    /// Directed graph; an edge `a -> b` means `b` depends on `a`
    graph: DiGraph<String, ()>,
    /// Map from submission IDs to their graph node indices
    submission_indices: HashMap<String, NodeIndex>,
}

impl DependencyAnalyzer {
    /// Creates a new DependencyAnalyzer with an empty graph
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            submission_indices: HashMap::new(),
        }
    }

    /// Builds the dependency graph from a collection of submissions
    ///
    /// Adds all submissions as nodes in the given order, then adds an edge
    /// for every `depends_on` entry that resolves to a known submission.
    ///
    /// # Arguments
    ///
    /// * `submissions` - Slice of submissions to build the graph from
    pub fn build_graph(&mut self, submissions: &[Submission]) {
        // First pass: add all submissions as nodes
        for submission in submissions {
            self.add_submission(&submission.id);
        }

        // Second pass: add resolvable dependencies as edges
        for submission in submissions {
            for dep_id in &submission.depends_on {
                if self.submission_indices.contains_key(dep_id.as_str()) {
                    self.add_dependency(dep_id, &submission.id);
                }
            }
        }
    }

    /// Adds a submission to the graph; a no-op if it already exists.
    pub fn add_submission(&mut self, submission_id: &str) {
        if !self.submission_indices.contains_key(submission_id) {
            let idx = self.graph.add_node(submission_id.to_string());
            self.submission_indices
                .insert(submission_id.to_string(), idx);
        }
    }

    /// Adds a dependency edge from `dependency_id` to `dependent_id`,
    /// creating either node if needed.
    pub fn add_dependency(&mut self, dependency_id: &str, dependent_id: &str) {
        self.add_submission(dependency_id);
        self.add_submission(dependent_id);

        let from_idx = self.submission_indices[dependency_id];
        let to_idx = self.submission_indices[dependent_id];

        self.graph.add_edge(from_idx, to_idx, ());
    }

    /// Performs a Kahn topological sort over the dependency graph
    ///
    /// Nodes are processed in insertion order so two runs over the same
    /// config produce the same linearization.
    ///
    /// # Returns
    ///
    /// Submission IDs in an order where every dependency precedes its
    /// dependents, or `EngineError::CircularDependency` naming the
    /// submissions left on the cycle.
    pub fn topological_order(&self) -> Result<Vec<String>, EngineError> {
        let mut in_degree: HashMap<NodeIndex, usize> = self
            .graph
            .node_indices()
            .map(|idx| {
                (
                    idx,
                    self.graph.edges_directed(idx, Direction::Incoming).count(),
                )
            })
            .collect();

        let mut queue: VecDeque<NodeIndex> = self
            .graph
            .node_indices()
            .filter(|idx| in_degree[idx] == 0)
            .collect();

        let mut order = Vec::with_capacity(self.graph.node_count());
        while let Some(idx) = queue.pop_front() {
            order.push(self.graph[idx].clone());
            for edge in self.graph.edges_directed(idx, Direction::Outgoing) {
                let entry = in_degree.get_mut(&edge.target()).expect("known node");
                *entry -= 1;
                if *entry == 0 {
                    queue.push_back(edge.target());
                }
            }
        }

        if order.len() != self.graph.node_count() {
            // Whatever still has incoming edges sits on (or behind) a cycle.
            let mut cycle: Vec<String> = in_degree
                .iter()
                .filter(|(_, &degree)| degree > 0)
                .map(|(&idx, _)| self.graph[idx].clone())
                .collect();
            cycle.sort();
            return Err(EngineError::CircularDependency(cycle));
        }

        Ok(order)
    }

    /// Checks if the dependency graph contains circular dependencies.
    pub fn has_circular_dependencies(&self) -> bool {
        self.topological_order().is_err()
    }

    /// Calculates the dependency depth for a submission
    ///
    /// Depth is the length of the longest chain of dependencies above the
    /// submission; independent submissions have depth 1.
    pub fn dependency_depth(&self, submission_id: &str) -> usize {
        if let Some(&idx) = self.submission_indices.get(submission_id) {
            self.calculate_depth(idx, &mut HashSet::new())
        } else {
            0
        }
    }

    fn calculate_depth(&self, node: NodeIndex, visited: &mut HashSet<NodeIndex>) -> usize {
        if visited.contains(&node) {
            return 0;
        }
        visited.insert(node);

        let mut max_depth = 0;
        for edge in self.graph.edges_directed(node, Direction::Incoming) {
            max_depth = max_depth.max(self.calculate_depth(edge.source(), visited));
        }

        visited.remove(&node);
        max_depth + 1
    }

    /// Direct dependencies of a submission (what it waits on).
    pub fn upstream(&self, submission_id: &str) -> Vec<String> {
        if let Some(&idx) = self.submission_indices.get(submission_id) {
            self.graph
                .edges_directed(idx, Direction::Incoming)
                .map(|edge| self.graph[edge.source()].clone())
                .collect()
        } else {
            Vec::new()
        }
    }

    /// Direct dependents of a submission (what waits on it).
    pub fn downstream(&self, submission_id: &str) -> Vec<String> {
        if let Some(&idx) = self.submission_indices.get(submission_id) {
            self.graph
                .edges_directed(idx, Direction::Outgoing)
                .map(|edge| self.graph[edge.target()].clone())
                .collect()
        } else {
            Vec::new()
        }
    }
}

impl Default for DependencyAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
