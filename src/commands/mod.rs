//! Command implementations for the nugraph CLI
//!
//! This module contains the implementations for each CLI command:
//! - analyze: Build and render the dependency graph for one project
//! - shell: Run an interactive prompt over repeated analyses

pub mod analyze;
pub mod shell;

use miette::Result;

use crate::cli::Commands;

/// Execute a command based on CLI input
pub fn execute_command(command: Commands) -> Result<()> {
    match &command {
        Commands::Analyze { .. } => analyze::execute_analyze_command(command),
        Commands::Shell { .. } => shell::execute_shell_command(command),
    }
}
