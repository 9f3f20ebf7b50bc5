use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
#[error("Invalid JSON in '{file}'")]
#[diagnostic(
    code(nugraph::assets_parse_error),
    help("The assets file is corrupt; re-run 'dotnet restore' to regenerate it")
)]
pub struct AssetsParseError {
    pub file: String,
    #[source_code]
    pub source_code: NamedSource<String>,
    #[label("syntax error here")]
    pub span: Option<SourceSpan>,
    #[source]
    pub source: serde_json::Error,
}

#[derive(Error, Debug, Diagnostic)]
pub enum NugraphError {
    #[error("Could not resolve a project directory from '{path}'")]
    #[diagnostic(
        code(nugraph::project_dir_not_found),
        help("Pass a .csproj file, a project directory, or a project.assets.json file")
    )]
    ProjectDirNotFound { path: PathBuf },

    #[error("'dotnet restore' failed in '{dir}'")]
    #[diagnostic(
        code(nugraph::restore_failed),
        help("Run 'dotnet restore' in the project directory to see its output")
    )]
    RestoreFailed {
        dir: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("No project.assets.json found for '{path}'")]
    #[diagnostic(
        code(nugraph::manifest_not_found),
        help("Run 'dotnet restore' on the project first, or check the path")
    )]
    ManifestNotFound { path: PathBuf },

    #[error("Assets file '{path}' has no 'targets' section")]
    #[diagnostic(
        code(nugraph::manifest_malformed),
        help("The file does not look like a NuGet assets manifest; re-run 'dotnet restore'")
    )]
    ManifestMalformed { path: PathBuf },

    #[error(transparent)]
    #[diagnostic(transparent)]
    AssetsParseError(Box<AssetsParseError>),

    #[error("Assets file '{path}' declares no target frameworks")]
    #[diagnostic(
        code(nugraph::environment_not_found),
        help("The 'targets' section is empty; the project may not have restored cleanly")
    )]
    EnvironmentNotFound { path: PathBuf },

    #[error("Failed to read file '{path}'")]
    #[diagnostic(
        code(nugraph::io_error),
        help("Check if the file exists and you have read permissions")
    )]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid XML in project file '{path}'")]
    #[diagnostic(
        code(nugraph::xml_parse_error),
        help("Check the project file for unbalanced tags or bad attributes")
    )]
    XmlParseError {
        path: PathBuf,
        #[source]
        source: quick_xml::Error,
    },

    #[error("IO error")]
    #[diagnostic(code(nugraph::io_error), help("Check file permissions and disk space"))]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(nugraph::config_error),
        help("Check your command arguments and configuration")
    )]
    ConfigurationError { message: String },
}

impl NugraphError {
    /// Process exit code for this failure. Structural root-level failures
    /// each carry a distinct code so callers can tell them apart; anything
    /// unexpected falls into the catch-all.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::ProjectDirNotFound { .. } => 3,
            Self::RestoreFailed { .. } => 4,
            Self::ManifestNotFound { .. } => 5,
            Self::ManifestMalformed { .. } | Self::AssetsParseError(_) => 6,
            Self::EnvironmentNotFound { .. } => 7,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use miette::NamedSource;

    use super::*;

    #[test]
    fn test_assets_parse_error_display() {
        let source_code = "{not json}";
        let json_err = serde_json::from_str::<serde_json::Value>(source_code).unwrap_err();

        let error = AssetsParseError {
            file: "project.assets.json".to_string(),
            source_code: NamedSource::new("project.assets.json", source_code.to_string()),
            span: Some((1, 3).into()),
            source: json_err,
        };

        let error_str = error.to_string();
        assert_eq!(error_str, "Invalid JSON in 'project.assets.json'");
    }

    #[test]
    fn test_file_read_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error = NugraphError::FileReadError {
            path: PathBuf::from("/tmp/missing.csproj"),
            source: io_err,
        };

        let error_str = error.to_string();
        assert_eq!(error_str, "Failed to read file '/tmp/missing.csproj'");
    }

    #[test]
    fn test_environment_not_found_display() {
        let error = NugraphError::EnvironmentNotFound {
            path: PathBuf::from("obj/project.assets.json"),
        };

        let error_str = error.to_string();
        assert_eq!(
            error_str,
            "Assets file 'obj/project.assets.json' declares no target frameworks"
        );
    }

    #[test]
    fn test_configuration_error() {
        let error = NugraphError::ConfigurationError {
            message: "Invalid configuration value".to_string(),
        };

        let error_str = error.to_string();
        assert_eq!(
            error_str,
            "Configuration error: Invalid configuration value"
        );
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        let codes = [
            NugraphError::ProjectDirNotFound {
                path: PathBuf::from("x"),
            }
            .exit_code(),
            NugraphError::RestoreFailed {
                dir: PathBuf::from("x"),
                source: None,
            }
            .exit_code(),
            NugraphError::ManifestNotFound {
                path: PathBuf::from("x"),
            }
            .exit_code(),
            NugraphError::ManifestMalformed {
                path: PathBuf::from("x"),
            }
            .exit_code(),
            NugraphError::EnvironmentNotFound {
                path: PathBuf::from("x"),
            }
            .exit_code(),
        ];

        assert_eq!(codes, [3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_catch_all_exit_code() {
        let error = NugraphError::ConfigurationError {
            message: "missing argument".to_string(),
        };
        assert_eq!(error.exit_code(), 1);

        let io_err: NugraphError = io::Error::other("some io error").into();
        assert_eq!(io_err.exit_code(), 1);
    }

    #[test]
    fn test_error_codes() {
        // All user-facing variants carry diagnostic codes and help text
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let file_err = NugraphError::FileReadError {
            path: PathBuf::from("test.csproj"),
            source: io_err,
        };

        use miette::Diagnostic;
        assert!(file_err.code().is_some());
        assert!(file_err.help().is_some());
    }

    #[test]
    fn test_error_conversion_from_io() {
        let io_err = io::Error::other("some io error");
        let nugraph_err: NugraphError = io_err.into();

        match nugraph_err {
            NugraphError::Io(_) => {}
            _ => panic!("Expected Io variant"),
        }
    }
}
