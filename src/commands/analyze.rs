//! Analyze command implementation

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::AnalyzeConfig;
use crate::error::NugraphError;

impl FromCommand for AnalyzeConfig {
    fn from_command(command: Commands) -> Result<Self, NugraphError> {
        match command {
            Commands::Analyze {
                project,
                analysis,
                restore,
                output,
                images,
                open,
            } => AnalyzeConfig::builder()
                .with_project(project)
                .with_tfm(analysis.tfm)
                .with_format(analysis.format)
                .with_output(output)
                .with_images(images)
                .with_open(open)
                .with_no_restore(restore.no_restore)
                .build(),
            _ => Err(NugraphError::ConfigurationError {
                message: "Invalid command type for AnalyzeConfig".to_string(),
            }),
        }
    }
}

crate::impl_try_from_command!(AnalyzeConfig);

/// Execute the analyze command for a single project
pub fn execute_analyze_command(command: Commands) -> Result<()> {
    let config = AnalyzeConfig::from_command(command)
        .wrap_err("Failed to parse analyze command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::analyze::AnalyzeExecutor;
    AnalyzeExecutor::execute(config)
}
