//! Common functionality shared across commands

use clap::Args;

/// Analysis arguments shared by the one-shot and interactive commands
#[derive(Args, Debug, Clone)]
pub struct AnalysisArgs {
    /// Preferred target framework (first declared framework when omitted)
    #[arg(long, value_name = "TFM", env = "NUGRAPH_TFM")]
    pub tfm: Option<String>,

    /// Graph notation to emit
    #[arg(short, long, value_enum, default_value = crate::constants::output::DEFAULT_FORMAT, env = "NUGRAPH_FORMAT")]
    pub format: crate::cli::GraphFormat,
}

/// Restore behavior arguments
#[derive(Args, Debug, Clone)]
pub struct RestoreArgs {
    /// Never invoke 'dotnet restore', even when the assets file is missing
    #[arg(long, env = "NUGRAPH_NO_RESTORE")]
    pub no_restore: bool,
}

/// Generic builder trait for configuration objects
pub trait ConfigBuilder: Sized {
    type Config;

    /// Build the configuration, returning an error if validation fails
    fn build(self) -> Result<Self::Config, crate::error::NugraphError>;
}

/// Trait for configurations that can be created from CLI commands
/// This trait simplifies command-to-config conversions
pub trait FromCommand: Sized {
    /// The command variant that this config can be created from
    fn from_command(command: crate::cli::Commands) -> Result<Self, crate::error::NugraphError>;
}

/// Macro to implement `TryFrom<Commands>` using [`FromCommand`] trait
#[macro_export]
macro_rules! impl_try_from_command {
    ($config:ty) => {
        impl std::convert::TryFrom<$crate::cli::Commands> for $config {
            type Error = $crate::error::NugraphError;

            fn try_from(command: $crate::cli::Commands) -> Result<Self, Self::Error> {
                <$config as $crate::common::FromCommand>::from_command(command)
            }
        }
    };
}
