//! Core graph types
//!
//! This module contains the fundamental data structures used in the dependency
//! graph.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;

use crate::constants::graph::PROJECT_MARKER;

/// A graph node identified by its manifest key
///
/// Keys take the form `"Name/Version"` for resolved packages and
/// `"Name/(project)"` for projects. Matching is case-insensitive but the
/// first-seen casing is kept for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageNode {
    key: String,
}

impl PackageNode {
    /// Create a node from a fully-qualified manifest key
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Create a project node for the given bare name
    pub fn project(name: &str) -> Self {
        Self {
            key: format!("{name}/{PROJECT_MARKER}"),
        }
    }

    /// The full node key, original casing preserved
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The bare name, i.e. everything before the first `/`
    pub fn name(&self) -> &str {
        self.split().0
    }

    /// The version or project marker after the first `/`, if any
    pub fn detail(&self) -> Option<&str> {
        self.split().1
    }

    /// Whether this node represents an in-repo project
    pub fn is_project(&self) -> bool {
        self.detail() == Some(PROJECT_MARKER)
    }

    /// Lowercased key used for case-insensitive identity
    pub fn identity(&self) -> String {
        self.key.to_lowercase()
    }

    // A key starting with '/' has no name segment and is left whole.
    fn split(&self) -> (&str, Option<&str>) {
        match self.key.split_once('/') {
            Some((name, detail)) if !name.is_empty() => (name, Some(detail)),
            _ => (self.key.as_str(), None),
        }
    }
}

/// Directed dependency graph with case-insensitive node identity
///
/// Nodes are deduplicated by lowercased key (first-seen casing wins) and
/// edges form a set: adding the same (from, to) pair twice is a no-op.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    graph: DiGraph<PackageNode, ()>,
    indices: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            indices: HashMap::new(),
        }
    }

    /// Add a node, returning its index; an existing node with the same
    /// case-insensitive key is reused instead
    pub fn add_node(&mut self, node: PackageNode) -> NodeIndex {
        let identity = node.identity();
        if let Some(&idx) = self.indices.get(&identity) {
            return idx;
        }
        let idx = self.graph.add_node(node);
        self.indices.insert(identity, idx);
        idx
    }

    /// Add a directed edge between two existing nodes, skipping duplicates
    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex) {
        if self.graph.find_edge(from, to).is_none() {
            self.graph.add_edge(from, to, ());
        }
    }

    /// Look up a node index by key, case-insensitively
    pub fn node_index(&self, key: &str) -> Option<NodeIndex> {
        self.indices.get(&key.to_lowercase()).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.node_index(key).is_some()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &PackageNode> {
        self.graph.node_weights()
    }

    /// Iterate edges as (from, to) node pairs
    pub fn edges(&self) -> impl Iterator<Item = (&PackageNode, &PackageNode)> {
        self.graph
            .edge_references()
            .map(|edge| (&self.graph[edge.source()], &self.graph[edge.target()]))
    }

    /// Nodes in case-insensitive lexicographic key order
    ///
    /// Ties between keys differing only by case cannot occur (identity is
    /// case-insensitive), so the order is total.
    pub fn sorted_nodes(&self) -> Vec<&PackageNode> {
        let mut nodes: Vec<&PackageNode> = self.nodes().collect();
        nodes.sort_by_key(|node| node.identity());
        nodes
    }

    /// Edges ordered by (from, to) key
    pub fn sorted_edges(&self) -> Vec<(&PackageNode, &PackageNode)> {
        let mut edges: Vec<(&PackageNode, &PackageNode)> = self.edges().collect();
        edges.sort_by_key(|(from, to)| (from.key(), to.key()));
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_splits_at_first_slash() {
        let node = PackageNode::new("Newtonsoft.Json/13.0.3");
        assert_eq!(node.name(), "Newtonsoft.Json");
        assert_eq!(node.detail(), Some("13.0.3"));
        assert!(!node.is_project());
    }

    #[test]
    fn test_project_node_marker() {
        let node = PackageNode::project("MyApp");
        assert_eq!(node.key(), "MyApp/(project)");
        assert_eq!(node.name(), "MyApp");
        assert!(node.is_project());
    }

    #[test]
    fn test_node_without_slash_keeps_whole_key_as_name() {
        let node = PackageNode::new("Standalone");
        assert_eq!(node.name(), "Standalone");
        assert_eq!(node.detail(), None);
    }

    #[test]
    fn test_leading_slash_key_is_not_split() {
        let node = PackageNode::new("/odd");
        assert_eq!(node.name(), "/odd");
        assert_eq!(node.detail(), None);
    }

    #[test]
    fn test_case_insensitive_node_identity() {
        let mut graph = DependencyGraph::new();
        let a = graph.add_node(PackageNode::new("Pkg/1.0"));
        let b = graph.add_node(PackageNode::new("pkg/1.0"));

        assert_eq!(a, b);
        assert_eq!(graph.node_count(), 1);
        // first-seen casing wins
        assert_eq!(graph.nodes().next().map(PackageNode::key), Some("Pkg/1.0"));
    }

    #[test]
    fn test_duplicate_edges_are_collapsed() {
        let mut graph = DependencyGraph::new();
        let a = graph.add_node(PackageNode::new("A/1.0"));
        let b = graph.add_node(PackageNode::new("B/1.0"));

        graph.add_edge(a, b);
        graph.add_edge(a, b);

        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_reverse_edge_is_distinct() {
        let mut graph = DependencyGraph::new();
        let a = graph.add_node(PackageNode::new("A/1.0"));
        let b = graph.add_node(PackageNode::new("B/1.0"));

        graph.add_edge(a, b);
        graph.add_edge(b, a);

        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_sorted_nodes_ignore_case() {
        let mut graph = DependencyGraph::new();
        graph.add_node(PackageNode::new("beta/1.0"));
        graph.add_node(PackageNode::new("Alpha/1.0"));
        graph.add_node(PackageNode::new("gamma/1.0"));

        let keys: Vec<&str> = graph.sorted_nodes().iter().map(|n| n.key()).collect();
        assert_eq!(keys, vec!["Alpha/1.0", "beta/1.0", "gamma/1.0"]);
    }

    #[test]
    fn test_sorted_edges_order_by_from_then_to() {
        let mut graph = DependencyGraph::new();
        let a = graph.add_node(PackageNode::new("A/1.0"));
        let b = graph.add_node(PackageNode::new("B/1.0"));
        let c = graph.add_node(PackageNode::new("C/1.0"));

        graph.add_edge(b, c);
        graph.add_edge(a, c);
        graph.add_edge(a, b);

        let pairs: Vec<(&str, &str)> = graph
            .sorted_edges()
            .iter()
            .map(|(from, to)| (from.key(), to.key()))
            .collect();
        assert_eq!(
            pairs,
            vec![("A/1.0", "B/1.0"), ("A/1.0", "C/1.0"), ("B/1.0", "C/1.0")]
        );
    }

    #[test]
    fn test_node_lookup_is_case_insensitive() {
        let mut graph = DependencyGraph::new();
        graph.add_node(PackageNode::new("Serilog/3.0.0"));

        assert!(graph.contains("serilog/3.0.0"));
        assert!(graph.contains("SERILOG/3.0.0"));
        assert!(!graph.contains("serilog/3.0.1"));
    }
}
