//! Optional Graphviz image conversion and viewer launching
//!
//! Everything in this module is best effort: a missing or failing external
//! tool degrades to text-only output and never fails the run.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::constants::tools::GRAPHVIZ_DOT;

/// Image formats the Graphviz `dot` binary can render a graph file into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    fn render_flag(self) -> &'static str {
        match self {
            ImageFormat::Png => "-Tpng",
            ImageFormat::Svg => "-Tsvg",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

/// Check whether the Graphviz `dot` binary is on the PATH
pub fn graphviz_available() -> bool {
    match Command::new(GRAPHVIZ_DOT).arg("-V").output() {
        Ok(output) => output.status.success(),
        Err(_) => false,
    }
}

/// Render a DOT file into an image next to it, returning the image path.
///
/// Returns `None` when `dot` is missing, exits non-zero, or did not
/// actually produce the file.
pub fn convert_dot(dot_file: &Path, format: ImageFormat) -> Option<PathBuf> {
    let image_file = dot_file.with_extension(format.extension());
    let output = Command::new(GRAPHVIZ_DOT)
        .arg(format.render_flag())
        .arg(dot_file)
        .arg("-o")
        .arg(&image_file)
        .output()
        .ok()?;

    (output.status.success() && image_file.is_file()).then_some(image_file)
}

/// Pick the most viewer-friendly file from the conversion results.
///
/// Priority is PNG, then SVG, then the text file itself.
pub fn best_viewable<'a>(
    base_file: &'a Path,
    png: Option<&'a Path>,
    svg: Option<&'a Path>,
) -> &'a Path {
    if let Some(png) = png.filter(|p| p.is_file()) {
        return png;
    }
    if let Some(svg) = svg.filter(|p| p.is_file()) {
        return svg;
    }
    base_file
}

/// Launch the platform's default viewer for a file, fire and forget
pub fn open_in_viewer(path: &Path) -> bool {
    #[cfg(target_os = "macos")]
    let mut command = Command::new("open");

    #[cfg(target_os = "windows")]
    let mut command = {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]);
        cmd
    };

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let mut command = Command::new("xdg-open");

    command.arg(path).spawn().is_ok()
}

/// Build the output file name for a project: `<name>_dependencies.<ext>`.
///
/// Characters that are unsafe in file names are replaced with underscores;
/// an empty project name falls back to "dependencies".
pub fn output_file_name(project_name: &str, extension: &str) -> String {
    let safe: String = project_name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if safe.is_empty() {
        format!("dependencies_dependencies.{extension}")
    } else {
        format!("{safe}_dependencies.{extension}")
    }
}
