//! Configuration constants for nugraph
//!
//! This module contains all configurable constants used throughout the
//! application: manifest and project file naming, external tool names, and
//! progress display settings.

use std::time::Duration;

/// NuGet manifest and MSBuild project file naming
pub mod manifest {
    /// File name of the resolved-dependency manifest written by restore
    pub const ASSETS_FILE_NAME: &str = "project.assets.json";

    /// Intermediate output directory that holds the assets file
    pub const OBJ_DIR: &str = "obj";

    /// Extension of MSBuild project description files
    pub const PROJECT_FILE_EXT: &str = "csproj";
}

/// Graph node identifier conventions
pub mod graph {
    /// Detail segment marking a node as an in-repo project rather than a
    /// resolved package (`"MyApp/(project)"`)
    pub const PROJECT_MARKER: &str = "(project)";
}

/// External tools invoked as collaborators
pub mod tools {
    /// .NET CLI used to generate the assets file when it is missing
    pub const DOTNET: &str = "dotnet";

    /// Graphviz layout binary used for optional image conversion
    pub const GRAPHVIZ_DOT: &str = "dot";
}

/// Progress bar configuration
pub mod progress {
    use super::*;

    /// Duration between progress bar updates
    pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

    /// Spinner frames for the package animation
    pub const SPINNER_FRAMES: &[&str] = &[
        "📦 ", // Standard package
        "📦⊙", // With center dot
        "📦◐", // Quarter filled
        "📦◓", // Half filled
        "📦◑", // Three quarters
        "📦◒", // Another quarter
        "📦○", // Empty circle
        "📦●", // Full circle
    ];
}

/// Output formatting configuration
pub mod output {
    /// Default graph notation when not specified
    pub const DEFAULT_FORMAT: &str = "dot";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_constants() {
        assert_eq!(manifest::ASSETS_FILE_NAME, "project.assets.json");
        assert_eq!(manifest::OBJ_DIR, "obj");
        assert_eq!(manifest::PROJECT_FILE_EXT, "csproj");
    }

    #[test]
    fn test_graph_constants() {
        assert_eq!(graph::PROJECT_MARKER, "(project)");
    }

    #[test]
    fn test_progress_constants() {
        assert_eq!(progress::TICK_INTERVAL, Duration::from_millis(100));
        assert_eq!(progress::SPINNER_FRAMES.len(), 8);
    }

    #[test]
    fn test_output_constants() {
        assert_eq!(output::DEFAULT_FORMAT, "dot");
    }
}
