use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::utils::{BundleError, Result};

/// A source file that goes into a bundle. Contents are read fresh on every build.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceFile {
    pub path: PathBuf,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// One output file and the ordered sources concatenated into it.
///
/// Source order is the runtime load order of the bundle, so it is never
/// sorted or deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleSpec {
    pub target: PathBuf,
    pub sources: Vec<SourceFile>,
}

impl BundleSpec {
    pub fn new<I, P>(target: impl Into<PathBuf>, sources: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            target: target.into(),
            sources: sources.into_iter().map(SourceFile::new).collect(),
        }
    }

    fn resolved(&self, root: &Path) -> Self {
        Self {
            target: root.join(&self.target),
            sources: self
                .sources
                .iter()
                .map(|source| SourceFile::new(root.join(&source.path)))
                .collect(),
        }
    }
}

/// Ordered list of bundles produced by one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BundleCatalog {
    pub bundles: Vec<BundleSpec>,
}

impl BundleCatalog {
    pub fn new(bundles: Vec<BundleSpec>) -> Self {
        Self { bundles }
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BundleSpec> {
        self.bundles.iter()
    }

    /// Rejects catalogs that could not produce a meaningful build.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for spec in &self.bundles {
            if spec.target.as_os_str().is_empty() {
                return Err(BundleError::config("bundle with an empty target path"));
            }
            if spec.sources.is_empty() {
                return Err(BundleError::config(format!(
                    "bundle {} has no sources",
                    spec.target.display()
                )));
            }
            if !seen.insert(&spec.target) {
                return Err(BundleError::config(format!(
                    "bundle {} is listed more than once",
                    spec.target.display()
                )));
            }
        }
        Ok(())
    }

    /// Anchors every relative path at `root`. Absolute paths pass through.
    pub fn resolve_against(&self, root: &Path) -> Self {
        Self {
            bundles: self.bundles.iter().map(|spec| spec.resolved(root)).collect(),
        }
    }
}

impl Default for BundleCatalog {
    /// Display layer, the embedded-shell variant, then the VM engine.
    fn default() -> Self {
        Self::new(vec![
            BundleSpec::new(
                "lib/glkote.min.js",
                [
                    "src/glkote/glkote.js",
                    "src/glkote/dialog.js",
                    "src/glkote/glkapi.js",
                ],
            ),
            BundleSpec::new(
                "lib/elkote.min.js",
                [
                    "src/glkote/glkote.js",
                    "src/glkote/electrofs.js",
                    "src/glkote/glkapi.js",
                ],
            ),
            BundleSpec::new(
                "lib/quixe.min.js",
                [
                    "src/quixe/quixe.js",
                    "src/quixe/gi_dispa.js",
                    "src/quixe/gi_load.js",
                ],
            ),
        ])
    }
}

/// How to launch the external minifier: reads stdin, writes stdout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinifierCommand {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,
}

impl MinifierCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            working_dir: None,
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }
}

impl Default for MinifierCommand {
    fn default() -> Self {
        Self::new("python3", ["tools/rjsmin.py"])
    }
}

/// Outcome of one successfully assembled bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleReport {
    pub target: PathBuf,
    pub sources: usize,
    pub bytes_read: usize,
    pub bytes_sent: usize,
    pub debug_fragments_stripped: usize,
    pub output_size: u64,
}

#[derive(Debug, Default)]
pub struct BuildReport {
    pub bundles: Vec<BundleReport>,
    pub build_time: std::time::Duration,
}
