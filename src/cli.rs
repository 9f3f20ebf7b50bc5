use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::common::{AnalysisArgs, RestoreArgs};

#[derive(Parser)]
#[command(
    name = "nugraph",
    about = "📦 Graph NuGet dependency trees from project.assets.json",
    long_about = "nugraph reads the resolved-dependency manifest that 'dotnet restore' writes \
                  (project.assets.json), follows project references into sibling projects, and \
                  renders the combined package/project graph as Graphviz DOT or Mermaid text.",
    subcommand_required = true,
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze one project and emit its dependency graph
    ///
    /// Locates the project.assets.json for the given path, builds the full
    /// package and project-reference graph (recursing into referenced
    /// projects), collapses packages that alias in-repo projects, and writes
    /// the rendered graph to stdout or a file.
    #[command(
        long_about = "Analyze a .NET project and emit its dependency graph. PROJECT may be a \
                      .csproj file, a project directory, or a project.assets.json file. When the \
                      assets file is missing, 'dotnet restore' is invoked once to generate it \
                      (disable with --no-restore). The graph covers resolved packages for one \
                      target framework plus every recursively referenced project, with package \
                      nodes that share a name with a referenced project merged into that project."
    )]
    Analyze {
        /// Path to a .csproj file, project directory, or project.assets.json
        #[arg(value_name = "PROJECT")]
        project: PathBuf,

        #[command(flatten)]
        analysis: AnalysisArgs,

        #[command(flatten)]
        restore: RestoreArgs,

        /// Output file (stdout if not specified)
        #[arg(short, long, env = "NUGRAPH_OUTPUT")]
        output: Option<PathBuf>,

        /// Also render PNG and SVG images with Graphviz (requires --output
        /// and the dot format)
        #[arg(long, env = "NUGRAPH_IMAGES")]
        images: bool,

        /// Open the best rendered artifact in the system viewer
        #[arg(long, env = "NUGRAPH_OPEN")]
        open: bool,
    },

    /// Start an interactive prompt for repeated analyses
    ///
    /// Reads project paths from a prompt and runs one analysis per line,
    /// saving each graph next to the current directory and opening it when a
    /// viewer is available. Handy when exploring a solution project by
    /// project.
    #[command(
        long_about = "Start an interactive prompt. Each line is '<path> [--tfm=TFM] \
                      [--format=dot|mermaid]'; the graph is written to \
                      '<project>_dependencies.<ext>' in the working directory, converted to \
                      PNG/SVG when Graphviz is installed, and opened in the system viewer. \
                      'help' prints usage, 'exit' or 'quit' leaves the prompt."
    )]
    Shell {
        #[command(flatten)]
        analysis: AnalysisArgs,

        #[command(flatten)]
        restore: RestoreArgs,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum GraphFormat {
    Dot,
    Mermaid,
}

impl GraphFormat {
    /// File extension conventionally used for this notation
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Dot => "dot",
            Self::Mermaid => "mmd",
        }
    }
}
