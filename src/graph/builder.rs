//! Dependency graph construction
//!
//! Walks a project's resolved assets manifest and its declared project
//! references, recursively visiting referenced projects and accumulating
//! everything into one [`DependencyGraph`].

use std::collections::HashSet;
use std::path::Path;

use petgraph::graph::NodeIndex;

use super::types::{DependencyGraph, PackageNode};
use crate::assets::AssetsManifest;
use crate::csproj;
use crate::error::NugraphError;
use crate::locate::{ProjectLocation, canonical_key, resolve_reference};
use crate::progress::ProgressReporter;

/// Builder for constructing NuGet dependency graphs
///
/// The root project's manifest is walked for resolved packages and their
/// inter-package dependencies, then every declared project reference is
/// visited the same way. A visited set keyed by canonicalized manifest path
/// keeps cyclic and diamond-shaped reference graphs from being processed
/// twice.
pub struct DependencyGraphBuilder {
    graph: DependencyGraph,
    visited: HashSet<String>,
    requested_tfm: Option<String>,
}

/// A finished graph build: the unified graph plus the target framework the
/// root manifest was resolved against
#[derive(Debug)]
pub struct GraphAnalysis {
    graph: DependencyGraph,
    tfm: String,
}

impl GraphAnalysis {
    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    /// Target framework chosen for the root manifest
    pub fn tfm(&self) -> &str {
        &self.tfm
    }
}

impl DependencyGraphBuilder {
    /// Create a new dependency graph builder
    ///
    /// # Arguments
    /// * `requested_tfm` - Preferred target framework; the root and every
    ///   visited sub-project resolve against it (see
    ///   [`AssetsManifest::select_target`] for the fallback rules)
    pub fn new(requested_tfm: Option<String>) -> Self {
        Self {
            graph: DependencyGraph::new(),
            visited: HashSet::new(),
            requested_tfm,
        }
    }

    /// Build the graph rooted at an already-located project.
    ///
    /// Structural problems in the root manifest (no declared frameworks)
    /// abort the run. Problems inside referenced sub-projects never do: a
    /// missing or unreadable sub-manifest truncates that branch while its
    /// project node and incoming edge survive.
    pub fn build(
        mut self,
        location: &ProjectLocation,
        manifest: &AssetsManifest,
        root_name: &str,
        progress: Option<&ProgressReporter>,
    ) -> Result<GraphAnalysis, NugraphError> {
        self.visited.insert(canonical_key(manifest.path()));

        let root = self.graph.add_node(PackageNode::project(root_name));
        if let Some(p) = progress {
            p.visiting_project(root_name);
        }

        let tfm = self.process_manifest(location, manifest, root, progress)?;
        self.scan_project_file_references(location, root, progress);

        Ok(GraphAnalysis {
            graph: self.graph,
            tfm,
        })
    }

    /// Add one manifest's packages, direct dependencies and project
    /// references, returning the target framework it resolved to
    fn process_manifest(
        &mut self,
        location: &ProjectLocation,
        manifest: &AssetsManifest,
        project: NodeIndex,
        progress: Option<&ProgressReporter>,
    ) -> Result<String, NugraphError> {
        let target = manifest.select_target(self.requested_tfm.as_deref())?;
        let index = target.name_index();

        // Resolved packages and their package-to-package dependencies.
        // Unresolvable dependency names are skipped, not errors.
        for entry in target.entries() {
            let from = self.graph.add_node(PackageNode::new(entry.key()));
            for dependency in entry.dependencies() {
                if let Some(key) = index.resolve(dependency) {
                    let to = self.graph.add_node(PackageNode::new(key));
                    self.graph.add_edge(from, to);
                }
            }
        }

        // The project's own direct dependencies under the chosen framework
        if let Some(section) = manifest.framework_section(target.tfm()) {
            for dependency in section.dependencies() {
                if let Some(key) = index.resolve(dependency) {
                    let to = self.graph.add_node(PackageNode::new(key));
                    self.graph.add_edge(project, to);
                }
            }
        }

        let tfm = target.tfm().to_string();

        let base_dir = location
            .project_dir()
            .or_else(|| manifest.path().parent())
            .map(Path::to_path_buf);
        if let Some(base_dir) = base_dir {
            for reference in manifest.project_reference_paths() {
                let child_path = resolve_reference(&base_dir, reference);
                self.visit_child(&child_path, project, progress);
            }
        }

        Ok(tfm)
    }

    /// Visit a referenced project, adding its node, the edge from its
    /// parent, and everything its own manifest declares
    fn visit_child(&mut self, path: &Path, parent: NodeIndex, progress: Option<&ProgressReporter>) {
        let location = ProjectLocation::resolve(path);

        let Some(assets) = location.assets_file() else {
            // No manifest. Register the project node if a project file is
            // there to name it; package info stays unknown.
            if let Some(name) = location.project_file_stem() {
                let child = self.graph.add_node(PackageNode::project(&name));
                self.graph.add_edge(parent, child);
            }
            return;
        };

        // Mark before recursing; a revisited manifest adds nothing,
        // including the edge from this parent.
        if !self.visited.insert(canonical_key(assets)) {
            return;
        }

        let manifest = match AssetsManifest::load(assets) {
            Ok(manifest) => manifest,
            Err(_) => {
                // Unreadable sub-manifest truncates this branch; the
                // project node itself survives.
                if let Some(name) = child_display_name(&location, None) {
                    let child = self.graph.add_node(PackageNode::project(&name));
                    self.graph.add_edge(parent, child);
                }
                return;
            }
        };

        let Some(name) = child_display_name(&location, manifest.project_name()) else {
            return;
        };
        let child = self.graph.add_node(PackageNode::project(&name));
        self.graph.add_edge(parent, child);

        if let Some(p) = progress {
            p.visiting_project(&name);
        }

        // A child manifest with no usable framework truncates this branch
        self.process_manifest(&location, &manifest, child, progress)
            .ok();
    }

    /// Recover project references declared only in the root's project file.
    ///
    /// The manifest and the project file enumerate references with
    /// different completeness, so both are scanned; the child edge is added
    /// unconditionally here and set semantics absorb any overlap with the
    /// manifest-declared walk.
    fn scan_project_file_references(
        &mut self,
        location: &ProjectLocation,
        root: NodeIndex,
        progress: Option<&ProgressReporter>,
    ) {
        let Some(project_file) = location.project_file() else {
            return;
        };
        let Some(base_dir) = location.project_dir().map(Path::to_path_buf) else {
            return;
        };
        let Ok(references) = csproj::project_references(project_file) else {
            return;
        };

        for reference in references {
            let child_path = resolve_reference(&base_dir, &reference.to_string_lossy());
            if let Some(stem) = child_path.file_stem() {
                let child = self
                    .graph
                    .add_node(PackageNode::project(&stem.to_string_lossy()));
                self.graph.add_edge(root, child);
            }
            self.visit_child(&child_path, root, progress);
        }
    }
}

fn child_display_name(location: &ProjectLocation, manifest_name: Option<&str>) -> Option<String> {
    location
        .project_file_stem()
        .or_else(|| manifest_name.map(str::to_owned))
        .or_else(|| location.directory_name())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    use tempfile::TempDir;

    use super::*;

    const EMPTY_CSPROJ: &str = "<Project Sdk=\"Microsoft.NET.Sdk\">\n</Project>\n";

    fn write_project(root: &Path, name: &str, assets: &str) -> PathBuf {
        write_project_with_csproj(root, name, assets, EMPTY_CSPROJ)
    }

    fn write_project_with_csproj(
        root: &Path,
        name: &str,
        assets: &str,
        csproj: &str,
    ) -> PathBuf {
        let dir = root.join(name);
        fs::create_dir_all(dir.join("obj")).unwrap();
        fs::write(dir.join(format!("{name}.csproj")), csproj).unwrap();
        fs::write(dir.join("obj").join("project.assets.json"), assets).unwrap();
        dir
    }

    fn try_build(dir: &Path, tfm: Option<&str>) -> Result<GraphAnalysis, NugraphError> {
        let location = ProjectLocation::resolve(dir);
        let manifest = AssetsManifest::load(location.assets_file().unwrap())?;
        let root_name = location.project_file_stem().unwrap();
        DependencyGraphBuilder::new(tfm.map(str::to_owned)).build(
            &location,
            &manifest,
            &root_name,
            None,
        )
    }

    fn build(dir: &Path) -> GraphAnalysis {
        try_build(dir, None).unwrap()
    }

    fn edge_keys(analysis: &GraphAnalysis) -> Vec<(String, String)> {
        analysis
            .graph()
            .sorted_edges()
            .iter()
            .map(|(from, to)| (from.key().to_string(), to.key().to_string()))
            .collect()
    }

    #[test]
    fn test_packages_and_transitive_dependencies() {
        let temp = TempDir::new().unwrap();
        let dir = write_project(
            temp.path(),
            "App",
            r#"{
  "targets": {
    "net8.0": {
      "Newtonsoft.Json/13.0.3": {},
      "Serilog/3.0.0": {
        "dependencies": {
          "Newtonsoft.Json": "13.0.1"
        }
      }
    }
  }
}"#,
        );

        let analysis = build(&dir);

        assert_eq!(analysis.tfm(), "net8.0");
        assert_eq!(analysis.graph().node_count(), 3);
        assert!(analysis.graph().contains("App/(project)"));
        assert!(analysis.graph().contains("Newtonsoft.Json/13.0.3"));
        assert!(analysis.graph().contains("Serilog/3.0.0"));
        assert_eq!(
            edge_keys(&analysis),
            vec![(
                "Serilog/3.0.0".to_string(),
                "Newtonsoft.Json/13.0.3".to_string()
            )]
        );
    }

    #[test]
    fn test_direct_dependencies_edge_from_project() {
        let temp = TempDir::new().unwrap();
        let dir = write_project(
            temp.path(),
            "App",
            r#"{
  "targets": {
    "net8.0": {
      "Serilog/3.0.0": {}
    }
  },
  "project": {
    "frameworks": {
      "net8.0": {
        "dependencies": {
          "Serilog": {
            "version": "[3.0.0, )"
          }
        }
      }
    }
  }
}"#,
        );

        let analysis = build(&dir);

        assert_eq!(
            edge_keys(&analysis),
            vec![("App/(project)".to_string(), "Serilog/3.0.0".to_string())]
        );
    }

    #[test]
    fn test_unresolvable_dependency_is_skipped() {
        let temp = TempDir::new().unwrap();
        let dir = write_project(
            temp.path(),
            "App",
            r#"{
  "targets": {
    "net8.0": {
      "Serilog/3.0.0": {
        "dependencies": {
          "Stripped.Package": "1.0.0"
        }
      }
    }
  }
}"#,
        );

        let analysis = build(&dir);

        assert_eq!(analysis.graph().node_count(), 2);
        assert_eq!(analysis.graph().edge_count(), 0);
        assert!(!analysis.graph().contains("Stripped.Package/1.0.0"));
    }

    #[test]
    fn test_project_references_recurse() {
        let temp = TempDir::new().unwrap();
        write_project(
            temp.path(),
            "LibB",
            r#"{
  "targets": {
    "net8.0": {
      "Newtonsoft.Json/13.0.3": {}
    }
  }
}"#,
        );
        write_project(
            temp.path(),
            "LibA",
            r#"{
  "targets": {
    "net8.0": {
      "Serilog/3.0.0": {}
    }
  },
  "project": {
    "frameworks": {
      "net8.0": {
        "projectReferences": {
          "../LibB/LibB.csproj": {}
        }
      }
    }
  }
}"#,
        );
        let app = write_project(
            temp.path(),
            "App",
            r#"{
  "targets": {
    "net8.0": {}
  },
  "project": {
    "frameworks": {
      "net8.0": {
        "projectReferences": {
          "../LibA/LibA.csproj": {}
        }
      }
    }
  }
}"#,
        );

        let analysis = build(&app);

        assert!(analysis.graph().contains("App/(project)"));
        assert!(analysis.graph().contains("LibA/(project)"));
        assert!(analysis.graph().contains("LibB/(project)"));
        assert!(analysis.graph().contains("Serilog/3.0.0"));
        assert!(analysis.graph().contains("Newtonsoft.Json/13.0.3"));
        assert_eq!(
            edge_keys(&analysis),
            vec![
                ("App/(project)".to_string(), "LibA/(project)".to_string()),
                ("LibA/(project)".to_string(), "LibB/(project)".to_string()),
            ]
        );
    }

    #[test]
    fn test_top_level_project_references_are_followed() {
        let temp = TempDir::new().unwrap();
        write_project(
            temp.path(),
            "Legacy",
            r#"{
  "targets": {
    "net8.0": {}
  }
}"#,
        );
        let app = write_project(
            temp.path(),
            "App",
            r#"{
  "targets": {
    "net8.0": {}
  },
  "project": {
    "projectReferences": {
      "../Legacy/Legacy.csproj": {}
    }
  }
}"#,
        );

        let analysis = build(&app);

        assert_eq!(
            edge_keys(&analysis),
            vec![("App/(project)".to_string(), "Legacy/(project)".to_string())]
        );
    }

    #[test]
    fn test_cyclic_references_terminate() {
        let temp = TempDir::new().unwrap();
        let a = write_project(
            temp.path(),
            "A",
            r#"{
  "targets": {
    "net8.0": {}
  },
  "project": {
    "frameworks": {
      "net8.0": {
        "projectReferences": {
          "../B/B.csproj": {}
        }
      }
    }
  }
}"#,
        );
        write_project(
            temp.path(),
            "B",
            r#"{
  "targets": {
    "net8.0": {}
  },
  "project": {
    "frameworks": {
      "net8.0": {
        "projectReferences": {
          "../A/A.csproj": {}
        }
      }
    }
  }
}"#,
        );

        let analysis = build(&a);

        // Each project appears once; the back-edge to the already-visited
        // root is not recorded
        assert_eq!(analysis.graph().node_count(), 2);
        assert_eq!(
            edge_keys(&analysis),
            vec![("A/(project)".to_string(), "B/(project)".to_string())]
        );
    }

    #[test]
    fn test_diamond_references_visit_shared_child_once() {
        let temp = TempDir::new().unwrap();
        write_project(temp.path(), "D", r#"{"targets": {"net8.0": {}}}"#);
        write_project(
            temp.path(),
            "B",
            r#"{
  "targets": {
    "net8.0": {}
  },
  "project": {
    "frameworks": {
      "net8.0": {
        "projectReferences": {
          "../D/D.csproj": {}
        }
      }
    }
  }
}"#,
        );
        write_project(
            temp.path(),
            "C",
            r#"{
  "targets": {
    "net8.0": {}
  },
  "project": {
    "frameworks": {
      "net8.0": {
        "projectReferences": {
          "../D/D.csproj": {}
        }
      }
    }
  }
}"#,
        );
        let a = write_project(
            temp.path(),
            "A",
            r#"{
  "targets": {
    "net8.0": {}
  },
  "project": {
    "frameworks": {
      "net8.0": {
        "projectReferences": {
          "../B/B.csproj": {},
          "../C/C.csproj": {}
        }
      }
    }
  }
}"#,
        );

        let analysis = build(&a);

        assert_eq!(analysis.graph().node_count(), 4);
        // D is reached through B first; C's rediscovery adds nothing
        assert_eq!(
            edge_keys(&analysis),
            vec![
                ("A/(project)".to_string(), "B/(project)".to_string()),
                ("A/(project)".to_string(), "C/(project)".to_string()),
                ("B/(project)".to_string(), "D/(project)".to_string()),
            ]
        );
    }

    #[test]
    fn test_missing_child_manifest_degrades_to_node_only() {
        let temp = TempDir::new().unwrap();
        // Ghost has a project file but was never restored
        let ghost = temp.path().join("Ghost");
        fs::create_dir_all(&ghost).unwrap();
        fs::write(ghost.join("Ghost.csproj"), EMPTY_CSPROJ).unwrap();

        let app = write_project(
            temp.path(),
            "App",
            r#"{
  "targets": {
    "net8.0": {}
  },
  "project": {
    "frameworks": {
      "net8.0": {
        "projectReferences": {
          "../Ghost/Ghost.csproj": {}
        }
      }
    }
  }
}"#,
        );

        let analysis = build(&app);

        assert!(analysis.graph().contains("Ghost/(project)"));
        assert_eq!(
            edge_keys(&analysis),
            vec![("App/(project)".to_string(), "Ghost/(project)".to_string())]
        );
    }

    #[test]
    fn test_unparseable_child_manifest_degrades_to_node_only() {
        let temp = TempDir::new().unwrap();
        write_project(temp.path(), "Broken", "not json at all");
        let app = write_project(
            temp.path(),
            "App",
            r#"{
  "targets": {
    "net8.0": {}
  },
  "project": {
    "frameworks": {
      "net8.0": {
        "projectReferences": {
          "../Broken/Broken.csproj": {}
        }
      }
    }
  }
}"#,
        );

        let analysis = build(&app);

        assert!(analysis.graph().contains("Broken/(project)"));
        assert_eq!(
            edge_keys(&analysis),
            vec![("App/(project)".to_string(), "Broken/(project)".to_string())]
        );
    }

    #[test]
    fn test_child_without_frameworks_keeps_node_and_edge() {
        let temp = TempDir::new().unwrap();
        write_project(temp.path(), "Empty", r#"{"targets": {}}"#);
        let app = write_project(
            temp.path(),
            "App",
            r#"{
  "targets": {
    "net8.0": {}
  },
  "project": {
    "frameworks": {
      "net8.0": {
        "projectReferences": {
          "../Empty/Empty.csproj": {}
        }
      }
    }
  }
}"#,
        );

        let analysis = build(&app);

        assert!(analysis.graph().contains("Empty/(project)"));
        assert_eq!(
            edge_keys(&analysis),
            vec![("App/(project)".to_string(), "Empty/(project)".to_string())]
        );
    }

    #[test]
    fn test_root_without_frameworks_is_fatal() {
        let temp = TempDir::new().unwrap();
        let dir = write_project(temp.path(), "App", r#"{"targets": {}}"#);

        match try_build(&dir, None) {
            Err(NugraphError::EnvironmentNotFound { .. }) => {}
            other => panic!("Expected EnvironmentNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_project_file_references_supplement_manifest() {
        let temp = TempDir::new().unwrap();
        write_project(
            temp.path(),
            "LibA",
            r#"{
  "targets": {
    "net8.0": {
      "Serilog/3.0.0": {}
    }
  }
}"#,
        );
        // The manifest declares no references; only the project file does
        let app = write_project_with_csproj(
            temp.path(),
            "App",
            r#"{"targets": {"net8.0": {}}}"#,
            "<Project Sdk=\"Microsoft.NET.Sdk\">\n  <ItemGroup>\n    <ProjectReference \
             Include=\"..\\LibA\\LibA.csproj\" />\n  </ItemGroup>\n</Project>\n",
        );

        let analysis = build(&app);

        assert!(analysis.graph().contains("LibA/(project)"));
        assert!(analysis.graph().contains("Serilog/3.0.0"));
        assert_eq!(
            edge_keys(&analysis),
            vec![("App/(project)".to_string(), "LibA/(project)".to_string())]
        );
    }

    #[test]
    fn test_requested_tfm_flows_into_children() {
        let temp = TempDir::new().unwrap();
        write_project(
            temp.path(),
            "Lib",
            r#"{
  "targets": {
    "net6.0": {
      "Old.Package/1.0.0": {}
    },
    "net8.0": {
      "New.Package/2.0.0": {}
    }
  }
}"#,
        );
        let app = write_project(
            temp.path(),
            "App",
            r#"{
  "targets": {
    "net6.0": {},
    "net8.0": {}
  },
  "project": {
    "frameworks": {
      "net8.0": {
        "projectReferences": {
          "../Lib/Lib.csproj": {}
        }
      }
    }
  }
}"#,
        );

        let analysis = try_build(&app, Some("net8.0")).unwrap();

        assert_eq!(analysis.tfm(), "net8.0");
        assert!(analysis.graph().contains("New.Package/2.0.0"));
        assert!(!analysis.graph().contains("Old.Package/1.0.0"));
    }
}
