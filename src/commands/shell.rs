//! Shell command implementation

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::ShellConfig;
use crate::error::NugraphError;

impl FromCommand for ShellConfig {
    fn from_command(command: Commands) -> Result<Self, NugraphError> {
        match command {
            Commands::Shell { analysis, restore } => ShellConfig::builder()
                .with_tfm(analysis.tfm)
                .with_format(analysis.format)
                .with_no_restore(restore.no_restore)
                .build(),
            _ => Err(NugraphError::ConfigurationError {
                message: "Invalid command type for ShellConfig".to_string(),
            }),
        }
    }
}

crate::impl_try_from_command!(ShellConfig);

/// Execute the shell command for the interactive prompt
pub fn execute_shell_command(command: Commands) -> Result<()> {
    let config = ShellConfig::from_command(command)
        .wrap_err("Failed to parse shell command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::shell::ShellExecutor;
    ShellExecutor::execute(config)
}
