//! Extraction of `<ProjectReference>` paths from MSBuild project files.
//!
//! This is the secondary discovery path for project references: the assets
//! manifest and the csproj can each enumerate references the other misses,
//! so the graph builder consumes both and lets set semantics deduplicate.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::NugraphError;

const PROJECT_REFERENCE_TAG: &[u8] = b"ProjectReference";
const INCLUDE_ATTR: &[u8] = b"Include";

/// Read `ProjectReference/@Include` paths from a project file.
///
/// Paths come back as written (relative, separators normalized to `/`),
/// deduplicated case-insensitively with first occurrence preserved.
pub fn project_references(csproj: &Path) -> Result<Vec<PathBuf>, NugraphError> {
    let content = std::fs::read_to_string(csproj).map_err(|e| NugraphError::FileReadError {
        path: csproj.to_path_buf(),
        source: e,
    })?;

    parse_project_references(csproj, &content)
}

/// Parse project references from csproj XML that has already been read
pub fn parse_project_references(
    csproj: &Path,
    content: &str,
) -> Result<Vec<PathBuf>, NugraphError> {
    let xml_error = |source: quick_xml::Error| NugraphError::XmlParseError {
        path: csproj.to_path_buf(),
        source,
    };

    let mut reader = Reader::from_str(content);
    let mut seen = HashSet::new();
    let mut references = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(element) | Event::Empty(element)) => {
                if element.local_name().as_ref() != PROJECT_REFERENCE_TAG {
                    continue;
                }

                for attribute in element.attributes() {
                    let attribute = attribute
                        .map_err(quick_xml::Error::from)
                        .map_err(xml_error)?;
                    if attribute.key.local_name().as_ref() != INCLUDE_ATTR {
                        continue;
                    }

                    let value = attribute.unescape_value().map_err(xml_error)?;
                    // csproj files routinely carry Windows separators
                    let normalized = value.replace('\\', "/");
                    if seen.insert(normalized.to_lowercase()) {
                        references.push(PathBuf::from(normalized));
                    }
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(xml_error(e)),
        }
    }

    Ok(references)
}
