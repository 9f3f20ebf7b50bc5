//! # Nugraph - Visualize NuGet Dependency Trees
//!
//! Nugraph is a tool for visualizing the dependencies of .NET projects. It
//! reads the `project.assets.json` manifest that `dotnet restore` writes,
//! follows project references into sibling projects, and renders the combined
//! package/project graph as Graphviz DOT or Mermaid text.
//!
//! ## Main Components
//!
//! - **Locate**: Resolves a user-supplied path (`.csproj` file, project
//!   directory, or assets manifest) to the files an analysis needs
//! - **Assets**: Parses the resolved-dependency manifest produced by
//!   `dotnet restore`
//! - **Graph**: Builds the cross-project dependency graph, collapses package
//!   nodes that alias in-repo projects, and renders DOT or Mermaid
//! - **Export**: Converts DOT output to PNG/SVG with Graphviz and opens
//!   results in the system viewer
//!
//! ## Usage
//!
//! ### Real-World Example: Graphing a Project's Dependencies
//!
//! ```no_run
//! use std::path::Path;
//!
//! use miette::IntoDiagnostic;
//! use nugraph::assets::AssetsManifest;
//! use nugraph::graph::{DependencyGraphBuilder, GraphRenderer, collapse_project_duplicates};
//! use nugraph::locate::ProjectLocation;
//!
//! # fn main() -> miette::Result<()> {
//! // Step 1: Locate the restore output for the project
//! let location = ProjectLocation::resolve(Path::new("/path/to/MyApp/MyApp.csproj"));
//! let assets_file = location.assets_file().expect("run 'dotnet restore' first");
//!
//! // Step 2: Parse the assets manifest
//! let manifest = AssetsManifest::load(assets_file)?;
//!
//! // Step 3: Build the graph, recursing through project references
//! let analysis = DependencyGraphBuilder::new(
//!     None, // no preferred target framework; the first declared one wins
//! )
//! .build(&location, &manifest, "MyApp", None)?;
//!
//! // Step 4: Merge package entries that alias projects in the repo
//! let graph = collapse_project_duplicates(analysis.graph());
//!
//! println!(
//!     "Resolved {} nodes and {} edges against {}",
//!     graph.node_count(),
//!     graph.edge_count(),
//!     analysis.tfm()
//! );
//!
//! // Step 5: Render to Graphviz DOT
//! let renderer = GraphRenderer::new(manifest.file_name(), analysis.tfm());
//! let mut dot_output = Vec::new();
//! renderer.render_dot(&graph, &mut dot_output)?;
//!
//! std::fs::write("dependencies.dot", dot_output).into_diagnostic()?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Example: Rendering Mermaid for Documentation
//!
//! ```
//! use nugraph::graph::{DependencyGraph, GraphRenderer, PackageNode};
//!
//! # fn main() -> miette::Result<()> {
//! // Graphs can also be assembled by hand
//! let mut graph = DependencyGraph::new();
//! let app = graph.add_node(PackageNode::project("MyApp"));
//! let serilog = graph.add_node(PackageNode::new("Serilog/3.0.0"));
//! graph.add_edge(app, serilog);
//!
//! let renderer = GraphRenderer::new("project.assets.json", "net8.0");
//!
//! // Mermaid output pastes straight into Markdown
//! let mut mermaid_output = Vec::new();
//! renderer.render_mermaid(&graph, &mut mermaid_output)?;
//!
//! println!("{}", String::from_utf8_lossy(&mermaid_output));
//! # Ok(())
//! # }
//! ```
//!
//! ### Example: Pinning a Target Framework
//!
//! ```no_run
//! use std::path::Path;
//!
//! use nugraph::assets::AssetsManifest;
//! use nugraph::graph::DependencyGraphBuilder;
//! use nugraph::locate::ProjectLocation;
//!
//! # fn main() -> miette::Result<()> {
//! let location = ProjectLocation::resolve(Path::new("/path/to/MyLib"));
//! let manifest = AssetsManifest::load(location.assets_file().expect("restored"))?;
//!
//! // A multi-targeted project declares several frameworks
//! for target in manifest.targets() {
//!     println!("declared: {}", target.tfm());
//! }
//!
//! // Resolve against net8.0 specifically; a prefix like "net8" also works
//! // when it matches exactly one declared framework
//! let analysis = DependencyGraphBuilder::new(Some("net8.0".to_string())).build(
//!     &location,
//!     &manifest,
//!     "MyLib",
//!     None,
//! )?;
//!
//! println!("resolved against {}", analysis.tfm());
//! # Ok(())
//! # }
//! ```

// Private modules
mod constants;
mod csproj;
mod progress;
mod utils;

// Public modules
pub mod assets;
pub mod cli;
pub mod commands;
pub mod common;
pub mod config;
pub mod error;
pub mod executors;
pub mod export;
pub mod graph;
pub mod locate;
pub mod restore;

// Main entry point for the library
pub fn run() -> miette::Result<()> {
    use clap::Parser;

    use crate::cli::Cli;
    use crate::commands::execute_command;

    let cli = Cli::parse();
    execute_command(cli.command)
}
