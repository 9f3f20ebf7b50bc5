//! Shell command executor

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use console::style;
use miette::{IntoDiagnostic, Result};

use crate::cli::GraphFormat;
use crate::common::ConfigBuilder;
use crate::config::{AnalyzeConfig, ShellConfig};
use crate::executors::CommandExecutor;
use crate::executors::analyze::AnalyzeExecutor;
use crate::export::output_file_name;
use crate::locate::ProjectLocation;

pub struct ShellExecutor;

/// One parsed prompt line: a project path plus optional overrides
struct ShellLine {
    project: PathBuf,
    tfm: Option<String>,
    format: GraphFormat,
}

impl CommandExecutor for ShellExecutor {
    type Config = ShellConfig;

    fn execute(config: Self::Config) -> Result<()> {
        println!("🔍 NuGet Dependency Graph Analyzer");
        println!("==================================");
        let output_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        println!("📂 Output directory: {}", output_dir.display());
        println!();

        let stdin = io::stdin();
        let mut input = String::new();
        loop {
            println!("Enter project path (.csproj, project folder, or project.assets.json):");
            println!("Or type 'exit' to quit, 'help' for options");
            print!("> ");
            io::stdout().flush().into_diagnostic()?;

            input.clear();
            let bytes = stdin.lock().read_line(&mut input).into_diagnostic()?;
            if bytes == 0 {
                println!();
                println!("Goodbye! 👋");
                return Ok(());
            }

            let line = input.trim();
            if line.is_empty() {
                continue;
            }
            if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
                println!("Goodbye! 👋");
                return Ok(());
            }
            if line.eq_ignore_ascii_case("help") {
                print_help();
                continue;
            }

            let request = match parse_line(line, &config) {
                Ok(request) => request,
                Err(message) => {
                    eprintln!("{} {message}", style("⚠").yellow());
                    continue;
                }
            };

            println!();
            println!(
                "{} Analyzing: {}",
                style("🔄").cyan(),
                style(request.project.display()).bold()
            );

            match run_analysis(request, config.no_restore) {
                Ok(()) => {
                    println!("{} Analysis completed successfully!", style("✅").green());
                }
                Err(report) => {
                    eprintln!("{} Analysis failed", style("❌").red());
                    eprintln!("{report:?}");
                }
            }
            println!();
        }
    }
}

/// Run one analysis, writing the graph to `<project>_dependencies.<ext>`
/// in the working directory and opening the best rendered artifact
fn run_analysis(line: ShellLine, no_restore: bool) -> Result<()> {
    let location = ProjectLocation::resolve(&line.project);
    let project_name = location
        .project_file_stem()
        .or_else(|| location.directory_name())
        .or_else(|| location.input_stem())
        .unwrap_or_default();
    let output = PathBuf::from(output_file_name(&project_name, line.format.extension()));

    let config = AnalyzeConfig::builder()
        .with_project(line.project)
        .with_tfm(line.tfm)
        .with_format(line.format)
        .with_output(Some(output))
        .with_images(line.format == GraphFormat::Dot)
        .with_open(true)
        .with_no_restore(no_restore)
        .build()?;

    AnalyzeExecutor::execute(config)
}

fn parse_line(line: &str, defaults: &ShellConfig) -> Result<ShellLine, String> {
    let mut parts = line.split_whitespace();
    let project = parts
        .next()
        .ok_or_else(|| "Missing project path".to_string())?;
    let project = PathBuf::from(project.trim_matches('"'));

    let mut tfm = defaults.tfm.clone();
    let mut format = defaults.format;
    for part in parts {
        if part.eq_ignore_ascii_case("--mermaid") {
            format = GraphFormat::Mermaid;
        } else if let Some(value) = part.strip_prefix("--tfm=") {
            tfm = Some(value.to_string());
        } else if let Some(value) = part.strip_prefix("--format=") {
            format = parse_format(value)?;
        } else {
            return Err(format!("Unknown option '{part}'"));
        }
    }

    Ok(ShellLine {
        project,
        tfm,
        format,
    })
}

fn parse_format(value: &str) -> Result<GraphFormat, String> {
    match value.to_ascii_lowercase().as_str() {
        "dot" => Ok(GraphFormat::Dot),
        "mermaid" | "mmd" => Ok(GraphFormat::Mermaid),
        other => Err(format!("Unknown format '{other}', expected dot or mermaid")),
    }
}

fn print_help() {
    println!();
    println!("Usage:");
    println!("  <path>                    Path to .csproj, folder, or project.assets.json");
    println!("  <path> --tfm=net8.0       Prefer a target framework");
    println!("  <path> --format=mermaid   Output notation (dot or mermaid)");
    println!("  <path> --mermaid          Shorthand for --format=mermaid");
    println!();
    println!("Graphs are written to '<project>_dependencies.<ext>' in the output");
    println!("directory, converted to PNG and SVG when Graphviz is installed, and");
    println!("opened in the system viewer.");
    println!();
    println!("Type 'exit' or 'quit' to leave.");
}
