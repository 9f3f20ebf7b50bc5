//! # Graph Construction and Rendering Module
//!
//! This module provides functionality for building and visualizing NuGet
//! dependency graphs. Packages and projects become nodes, "depends on"
//! relations become edges.
//!
//! ## Components
//!
//! ### Graph Building
//! - **DependencyGraphBuilder**: Walks assets manifests and project
//!   references into one unified graph
//! - **PackageNode**: A resolved package or an in-repo project
//! - **collapse_project_duplicates**: Folds package nodes into same-named
//!   project nodes
//!
//! ### Graph Rendering
//! - **GraphRenderer**: Renders graphs in DOT or Mermaid format with
//!   deterministic ordering
//!
//! ## Example
//!
//! ```
//! use nugraph::graph::{DependencyGraph, GraphRenderer, PackageNode};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Build a small graph by hand
//! let mut graph = DependencyGraph::new();
//! let app = graph.add_node(PackageNode::project("App"));
//! let serilog = graph.add_node(PackageNode::new("Serilog/3.0.0"));
//! graph.add_edge(app, serilog);
//!
//! // Render to DOT format
//! let renderer = GraphRenderer::new("project.assets.json", "net8.0");
//! let mut output = Vec::new();
//! renderer.render_dot(&graph, &mut output)?;
//!
//! let dot_output = String::from_utf8(output)?;
//! assert!(dot_output.contains("digraph"));
//! assert!(dot_output.contains("Serilog"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Output Formats
//!
//! - **DOT**: Graphviz format, convertible to PNG/SVG with the `dot` tool
//! - **Mermaid**: Markdown-compatible diagrams for documentation

mod builder;
mod collapse;
mod renderer;
mod types;

// Re-export main types and builders
pub use builder::{DependencyGraphBuilder, GraphAnalysis};
pub use collapse::collapse_project_duplicates;
pub use renderer::GraphRenderer;
pub use types::{DependencyGraph, PackageNode};
