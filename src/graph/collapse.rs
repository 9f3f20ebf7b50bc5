//! Project/package duplicate collapsing
//!
//! A package and an in-repo project sharing a bare name represent the same
//! logical unit, so the package node is folded into the project node after
//! the build. See [`collapse_project_duplicates`].

use std::collections::HashMap;

use super::types::{DependencyGraph, PackageNode};

/// Merge package nodes into same-named project nodes
///
/// Every non-project node whose bare name matches a project node's name is
/// removed, and its edges are redirected to the project node. Edges that
/// become self-loops after redirection are dropped. Names are compared
/// case-insensitively. Pure function, the input graph is left untouched.
pub fn collapse_project_duplicates(source: &DependencyGraph) -> DependencyGraph {
    let mut project_by_name: HashMap<String, &PackageNode> = HashMap::new();
    for node in source.nodes() {
        if node.is_project() {
            project_by_name
                .entry(node.name().to_lowercase())
                .or_insert(node);
        }
    }

    let mut substitutions: HashMap<String, &PackageNode> = HashMap::new();
    for node in source.nodes() {
        if node.is_project() {
            continue;
        }
        if let Some(&project) = project_by_name.get(&node.name().to_lowercase()) {
            substitutions.insert(node.identity(), project);
        }
    }

    let mut collapsed = DependencyGraph::new();
    for node in source.nodes() {
        if !substitutions.contains_key(&node.identity()) {
            collapsed.add_node(node.clone());
        }
    }

    for (from, to) in source.edges() {
        let from = substitutions.get(&from.identity()).copied().unwrap_or(from);
        let to = substitutions.get(&to.identity()).copied().unwrap_or(to);
        if from.identity() == to.identity() {
            continue;
        }
        let from_idx = collapsed.add_node(from.clone());
        let to_idx = collapsed.add_node(to.clone());
        collapsed.add_edge(from_idx, to_idx);
    }

    collapsed
}
