//! Analyze command configuration

use std::path::PathBuf;

use crate::cli::GraphFormat;

/// Configuration for the analyze command
///
/// This struct contains all options for building and rendering one
/// project's dependency graph.
#[derive(Debug, Clone)]
pub struct AnalyzeConfig {
    /// Path to a .csproj file, project directory, or project.assets.json
    pub project: PathBuf,
    /// Preferred target framework (None = first declared)
    pub tfm: Option<String>,
    /// Graph notation to emit
    pub format: GraphFormat,
    /// Output file (None = stdout)
    pub output: Option<PathBuf>,
    /// Also render PNG/SVG images with Graphviz
    pub images: bool,
    /// Open the best rendered artifact in the system viewer
    pub open: bool,
    /// Never invoke 'dotnet restore'
    pub no_restore: bool,
}

impl AnalyzeConfig {
    pub fn builder() -> AnalyzeConfigBuilder {
        AnalyzeConfigBuilder::new()
    }
}

#[derive(Default)]
pub struct AnalyzeConfigBuilder {
    project: Option<PathBuf>,
    tfm: Option<Option<String>>,
    format: Option<GraphFormat>,
    output: Option<Option<PathBuf>>,
    images: Option<bool>,
    open: Option<bool>,
    no_restore: Option<bool>,
}

impl AnalyzeConfigBuilder {
    pub fn new() -> Self {
        Self {
            project: None,
            tfm: None,
            format: None,
            output: None,
            images: None,
            open: None,
            no_restore: None,
        }
    }

    pub fn with_project(mut self, project: PathBuf) -> Self {
        self.project = Some(project);
        self
    }

    pub fn with_tfm(mut self, tfm: Option<String>) -> Self {
        self.tfm = Some(tfm);
        self
    }

    pub fn with_format(mut self, format: GraphFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = Some(output);
        self
    }

    pub fn with_images(mut self, images: bool) -> Self {
        self.images = Some(images);
        self
    }

    pub fn with_open(mut self, open: bool) -> Self {
        self.open = Some(open);
        self
    }

    pub fn with_no_restore(mut self, no_restore: bool) -> Self {
        self.no_restore = Some(no_restore);
        self
    }
}

impl crate::common::ConfigBuilder for AnalyzeConfigBuilder {
    type Config = AnalyzeConfig;

    fn build(self) -> Result<Self::Config, crate::error::NugraphError> {
        Ok(AnalyzeConfig {
            project: self.project.ok_or_else(|| {
                crate::error::NugraphError::ConfigurationError {
                    message: "Missing required field: project".to_string(),
                }
            })?,
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
            output: self.output.ok_or_else(|| {
                crate::error::NugraphError::ConfigurationError {
                    message: "Missing required field: output".to_string(),
                }
            })?,
            images: self.images.ok_or_else(|| {
                crate::error::NugraphError::ConfigurationError {
                    message: "Missing required field: images".to_string(),
                }
            })?,
            open: self.open.ok_or_else(|| {
                crate::error::NugraphError::ConfigurationError {
                    message: "Missing required field: open".to_string(),
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
