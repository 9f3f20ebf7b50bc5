//! # Configuration Module
//!
//! This module provides configuration structures for both nugraph commands.
//! Each command has its own config module with builder patterns for easy
//! construction.
//!
//! ## Command Configurations
//!
//! - **AnalyzeConfig**: Configuration for the `analyze` command that builds
//!   and renders one project's dependency graph
//! - **ShellConfig**: Configuration for the `shell` command that runs an
//!   interactive prompt over repeated analyses
//!
//! ## Example
//!
//! ```
//! use nugraph::cli::GraphFormat;
//! use nugraph::config::AnalyzeConfig;
//!
//! // Each configuration struct provides a builder pattern with with_*
//! // methods for each field
//! let builder = AnalyzeConfig::builder()
//!     .with_project("./MyApp".into())
//!     .with_tfm(Some("net8.0".to_string()))
//!     .with_format(GraphFormat::Dot);
//! ```

pub mod analyze;
pub mod shell;

pub use analyze::AnalyzeConfig;
pub use shell::ShellConfig;
