//! Shell command configuration

use crate::cli::GraphFormat;

/// Configuration for the interactive shell command
///
/// These values are the prompt's defaults; individual lines may override
/// the framework and notation per analysis.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Preferred target framework (None = first declared)
    pub tfm: Option<String>,
    /// Default graph notation to emit
    pub format: GraphFormat,
    /// Never invoke 'dotnet restore'
    pub no_restore: bool,
}

impl ShellConfig {
    pub fn builder() -> ShellConfigBuilder {
        ShellConfigBuilder::new()
    }
}

#[derive(Default)]
pub struct ShellConfigBuilder {
    tfm: Option<Option<String>>,
    format: Option<GraphFormat>,
    no_restore: Option<bool>,
}

impl ShellConfigBuilder {
    pub fn new() -> Self {
        Self {
            tfm: None,
            format: None,
            no_restore: None,
        }
    }

    pub fn with_tfm(mut self, tfm: Option<String>) -> Self {
        self.tfm = Some(tfm);
        self
    }

    pub fn with_format(mut self, format: GraphFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_no_restore(mut self, no_restore: bool) -> Self {
        self.no_restore = Some(no_restore);
        self
    }
}

impl crate::common::ConfigBuilder for ShellConfigBuilder {
    type Config = ShellConfig;

    fn build(self) -> Result<Self::Config, crate::error::NugraphError> {
        Ok(ShellConfig {
            tfm: self.tfm.ok_or_else(|| {
                crate::error::NugraphError::ConfigurationError {
                    message: "Missing required field: tfm".to_string(),
                }
            })?,
            format: self.format.ok_or_else(|| {
                crate::error::NugraphError::ConfigurationError {
                    message: "Missing required field: format".to_string(),
                }
            })?,
            no_restore: self.no_restore.ok_or_else(|| {
                crate::error::NugraphError::ConfigurationError {
                    message: "Missing required field: no_restore".to_string(),
                }
            })?,
        })
    }
}
