//! Graph serialization into DOT and Mermaid text
//!
//! Output is deterministic: nodes are sorted case-insensitively by key and
//! edges by (from, to), so identical graphs always render to identical
//! bytes regardless of insertion order.

use std::io::Write;

use super::types::DependencyGraph;
use crate::error::NugraphError;

// Helper macro for write operations that converts IO errors
macro_rules! writeln_out {
    ($dst:expr) => {
        writeln!($dst).map_err(NugraphError::from)
    };
    ($dst:expr, $($arg:tt)*) => {
        writeln!($dst, $($arg)*).map_err(NugraphError::from)
    };
}

/// Renders dependency graphs as DOT or Mermaid text
///
/// Holds the pieces of the graph title: the manifest file name and the
/// target framework the graph was resolved against.
pub struct GraphRenderer {
    manifest_name: String,
    tfm: String,
}

impl GraphRenderer {
    pub fn new(manifest_name: impl Into<String>, tfm: impl Into<String>) -> Self {
        Self {
            manifest_name: manifest_name.into(),
            tfm: tfm.into(),
        }
    }

    /// Render the graph in Graphviz DOT format
    ///
    /// Node keys are embedded as quoted identifiers with backslashes and
    /// quotes escaped; labels split the key at the first `/` onto two
    /// lines.
    pub fn render_dot(
        &self,
        graph: &DependencyGraph,
        output: &mut dyn Write,
    ) -> Result<(), NugraphError> {
        writeln_out!(output, "digraph NuGetDeps {{")?;
        writeln_out!(output, "  rankdir=LR;")?;
        writeln_out!(output, "  node [shape=box, fontsize=10];")?;
        writeln_out!(
            output,
            "  label=\"NuGet dependencies for {}\\nTFM: {}\"; labelloc=top; fontsize=12;",
            self.manifest_name,
            self.tfm
        )?;

        for node in graph.sorted_nodes() {
            let label = match node.detail() {
                Some(detail) => format!("{}\\n{}", node.name(), detail),
                None => node.key().to_string(),
            };
            writeln_out!(output, "  {} [label=\"{}\"];", dot_id(node.key()), label)?;
        }

        for (from, to) in graph.sorted_edges() {
            writeln_out!(output, "  {} -> {};", dot_id(from.key()), dot_id(to.key()))?;
        }

        writeln_out!(output, "}}")?;
        Ok(())
    }

    /// Render the graph as a Mermaid flow chart
    ///
    /// Mermaid restricts bare identifiers, so keys are sanitized to an
    /// alphanumeric-and-underscore alphabet; the human-readable label keeps
    /// the original name with the version in parentheses.
    pub fn render_mermaid(
        &self,
        graph: &DependencyGraph,
        output: &mut dyn Write,
    ) -> Result<(), NugraphError> {
        writeln_out!(output, "%% Mermaid graph (paste into Markdown)")?;
        writeln_out!(output, "graph LR")?;
        writeln_out!(output, "  %% {} | {}", self.manifest_name, self.tfm)?;

        for node in graph.sorted_nodes() {
            let label = match node.detail() {
                Some(detail) if !detail.is_empty() => {
                    format!("{} ({})", node.name(), detail)
                }
                _ => node.name().to_string(),
            };
            writeln_out!(output, "  {}[\"{}\"]", mermaid_id(node.key()), label)?;
        }

        for (from, to) in graph.sorted_edges() {
            writeln_out!(
                output,
                "  {} --> {}",
                mermaid_id(from.key()),
                mermaid_id(to.key())
            )?;
        }

        Ok(())
    }
}

fn dot_id(key: &str) -> String {
    format!("\"{}\"", key.replace('\\', "\\\\").replace('"', "\\\""))
}

fn mermaid_id(key: &str) -> String {
    key.chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}
