//! Analyze command executor

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};

use crate::assets::AssetsManifest;
use crate::cli::GraphFormat;
use crate::config::AnalyzeConfig;
use crate::error::NugraphError;
use crate::executors::CommandExecutor;
use crate::export::{self, ImageFormat};
use crate::graph::{DependencyGraphBuilder, GraphRenderer, collapse_project_duplicates};
use crate::locate::ProjectLocation;
use crate::progress::ProgressReporter;
use crate::restore::run_restore;

pub struct AnalyzeExecutor;

impl CommandExecutor for AnalyzeExecutor {
    type Config = AnalyzeConfig;

    fn execute(config: Self::Config) -> Result<()> {
        let mut progress = ProgressReporter::new();
        let mut location = ProjectLocation::resolve(&config.project);

        if location.assets_file().is_none() {
            let Some(project_dir) = location.project_dir().map(Path::to_path_buf) else {
                return Err(NugraphError::ProjectDirNotFound {
                    path: config.project.clone(),
                }
                .into());
            };

            if config.no_restore {
                return Err(NugraphError::ManifestNotFound {
                    path: location.input().to_path_buf(),
                }
                .into());
            }

            progress.start_restore(&project_dir);
            let restored = run_restore(&project_dir);
            progress.finish_restore(restored.is_ok());
            restored?;
            location.rescan_assets();
        }

        let Some(assets_file) = location.assets_file().map(Path::to_path_buf) else {
            return Err(NugraphError::ManifestNotFound {
                path: location.input().to_path_buf(),
            }
            .into());
        };

        progress.start_analysis(&assets_file);
        let manifest = AssetsManifest::load(&assets_file)?;

        // Display name for the root node; the manifest's restore section and
        // the directory cover inputs without a .csproj next to them
        let root_name = location
            .project_file_stem()
            .or_else(|| manifest.project_name().map(str::to_string))
            .or_else(|| location.directory_name())
            .or_else(|| location.input_stem())
            .unwrap_or_else(|| "project".to_string());

        let analysis = DependencyGraphBuilder::new(config.tfm.clone())
            .build(&location, &manifest, &root_name, Some(&progress))
            .wrap_err_with(|| format!("Failed to analyze '{}'", manifest.file_name()))?;

        let graph = collapse_project_duplicates(analysis.graph());
        progress.finish_analysis(graph.node_count(), graph.edge_count());
        progress.target_framework(analysis.tfm());

        let renderer = GraphRenderer::new(manifest.file_name(), analysis.tfm());

        // Rendered in memory first; a failed run leaves no partial output
        // file behind
        let mut rendered = Vec::new();
        match config.format {
            GraphFormat::Dot => {
                renderer
                    .render_dot(&graph, &mut rendered)
                    .wrap_err("Failed to render DOT graph")?;
            }
            GraphFormat::Mermaid => {
                renderer
                    .render_mermaid(&graph, &mut rendered)
                    .wrap_err("Failed to render Mermaid graph")?;
            }
        }

        if let Some(output_path) = config.output.as_ref() {
            fs::write(output_path, &rendered)
                .into_diagnostic()
                .wrap_err_with(|| {
                    format!("Failed to write output file '{}'", output_path.display())
                })?;
            eprintln!(
                "{} Graph written to {}",
                style("✓").green(),
                style(output_path.display()).bold()
            );
        } else {
            io::stdout().write_all(&rendered).into_diagnostic()?;
        }

        let mut png_file = None;
        let mut svg_file = None;
        if config.images {
            match (config.format, config.output.as_ref()) {
                (GraphFormat::Dot, Some(dot_file)) => {
                    if export::graphviz_available() {
                        png_file = export::convert_dot(dot_file, ImageFormat::Png);
                        svg_file = export::convert_dot(dot_file, ImageFormat::Svg);
                        for image in [&png_file, &svg_file].into_iter().flatten() {
                            eprintln!(
                                "{} Image rendered to {}",
                                style("🖼").cyan(),
                                style(image.display()).bold()
                            );
                        }
                    } else {
                        eprintln!(
                            "{} Graphviz 'dot' not found on PATH; skipping image generation",
                            style("⚠").yellow()
                        );
                    }
                }
                (GraphFormat::Mermaid, _) => {
                    eprintln!(
                        "{} --images applies to the dot format only",
                        style("⚠").yellow()
                    );
                }
                (_, None) => {
                    eprintln!(
                        "{} --images requires --output so the graph exists on disk",
                        style("⚠").yellow()
                    );
                }
            }
        }

        if config.open {
            if let Some(base) = config.output.as_ref() {
                let target = export::best_viewable(base, png_file.as_deref(), svg_file.as_deref());
                if export::open_in_viewer(target) {
                    eprintln!(
                        "{} Opened {} in the system viewer",
                        style("🚀").cyan(),
                        style(target.display()).bold()
                    );
                } else {
                    eprintln!(
                        "{} Could not open {} in a viewer",
                        style("⚠").yellow(),
                        style(target.display()).bold()
                    );
                }
            } else {
                eprintln!(
                    "{} --open requires --output so there is a file to open",
                    style("⚠").yellow()
                );
            }
        }

        Ok(())
    }
}
