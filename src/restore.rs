//! Invocation of `dotnet restore` for projects missing an assets manifest

use std::path::Path;
use std::process::Command;

use crate::constants::tools::DOTNET;
use crate::error::NugraphError;

/// Run `dotnet restore` in the project directory, swallowing its output.
///
/// The restore is only a means to an end: we need the project.assets.json
/// it leaves behind under obj/. A missing `dotnet` binary and a failing
/// restore both surface as [`NugraphError::RestoreFailed`].
pub fn run_restore(project_dir: &Path) -> Result<(), NugraphError> {
    let output = Command::new(DOTNET)
        .arg("restore")
        .current_dir(project_dir)
        .output()
        .map_err(|source| NugraphError::RestoreFailed {
            dir: project_dir.to_path_buf(),
            source: Some(source),
        })?;

    if !output.status.success() {
        return Err(NugraphError::RestoreFailed {
            dir: project_dir.to_path_buf(),
            source: None,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_in_missing_directory_fails() {
        let result = run_restore(Path::new("/nonexistent/project/dir"));

        match result {
            Err(NugraphError::RestoreFailed { dir, .. }) => {
                assert_eq!(dir, Path::new("/nonexistent/project/dir"));
            }
            other => panic!("Expected RestoreFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_restore_failure_exit_code() {
        let error = NugraphError::RestoreFailed {
            dir: Path::new("/tmp/app").to_path_buf(),
            source: None,
        };
        assert_eq!(error.exit_code(), 4);
    }
}
