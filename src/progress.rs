use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use console::{Term, style};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::constants::progress::{SPINNER_FRAMES, TICK_INTERVAL};
use crate::utils::string::pluralize;

const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg}";

pub struct ProgressReporter {
    term: Term,
    spinner_position: AtomicUsize,
    multi_progress: MultiProgress,
    current_bar: Option<ProgressBar>,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter {
    pub fn new() -> Self {
        let term = Term::stderr();
        Self {
            term,
            spinner_position: AtomicUsize::new(0),
            multi_progress: MultiProgress::new(),
            current_bar: None,
        }
    }

    pub fn create_spinner(&mut self, message: &str) -> ProgressBar {
        let pb = self.multi_progress.add(ProgressBar::new_spinner());
        pb.set_style(
            ProgressStyle::default_spinner()
                .template(SPINNER_TEMPLATE)
                .expect("Spinner template should be valid")
                .tick_strings(&["📦 ", "📦⊙", "📦◐", "📦◓", "📦◑", "📦◒", "📦○", "📦●", "✓"]),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(TICK_INTERVAL);
        pb
    }

    fn get_package_frame(&self) -> &'static str {
        let pos = self.spinner_position.fetch_add(1, Ordering::Relaxed) % SPINNER_FRAMES.len();
        SPINNER_FRAMES[pos]
    }

    pub fn start_restore(&mut self, dir: &Path) {
        let _ = self.term.clear_line();
        eprintln!(
            "{} Running 'dotnet restore' in {}...",
            style("🔄").cyan(),
            style(dir.display()).dim()
        );
        let spinner = self.create_spinner("Restoring NuGet packages...");
        self.current_bar = Some(spinner);
    }

    pub fn finish_restore(&mut self, success: bool) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_and_clear();
        }
        let _ = self.term.clear_line();
        if success {
            eprintln!("\r{} Restore complete", style("✓").green());
        } else {
            eprintln!("\r{} 'dotnet restore' failed", style("✗").red());
        }
    }

    pub fn start_analysis(&mut self, manifest: &Path) {
        let _ = self.term.clear_line();
        eprintln!(
            "{} Analyzing NuGet dependencies from {}...",
            style("🔍").cyan(),
            style(manifest.display()).dim()
        );
        let spinner = self.create_spinner("Walking the package graph...");
        self.current_bar = Some(spinner);
    }

    pub fn visiting_project(&self, name: &str) {
        if let Some(ref pb) = self.current_bar {
            pb.set_message(format!("Visiting project: {name}..."));
        } else {
            let _ = self.term.clear_line();
            eprint!(
                "\r{} Visiting project: {}... ",
                style(self.get_package_frame()).yellow(),
                style(name).green()
            );
        }
    }

    pub fn target_framework(&self, tfm: &str) {
        let _ = self.term.clear_line();
        eprintln!(
            "\r{} Target framework: {}",
            style("🎯").cyan(),
            style(tfm).green().bold()
        );
    }

    pub fn finish_analysis(&mut self, node_count: usize, edge_count: usize) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_and_clear();
        }
        let _ = self.term.clear_line();
        eprintln!(
            "\r{} Graph complete: {} {}, {} {}",
            style("✓").green(),
            style(node_count).yellow().bold(),
            pluralize("package", node_count),
            style(edge_count).yellow().bold(),
            pluralize("dependency", edge_count)
        );
    }
}
