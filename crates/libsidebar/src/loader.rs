//! Loading sidebar files from a rustdoc output tree.
//!
//! rustdoc writes one `sidebar-items.js` per module directory, so the module path of a file is
//! its directory relative to the documentation root: `doc/tokio/task/sidebar-items.js` holds
//! the sidebar for `tokio::task`.

use std::{
    fs,
    path::{Component, Path, PathBuf},
};

use ignore::WalkBuilder;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::{
    error::{Result, SidebarError},
    index::SidebarIndex,
    registry::{LoadFailure, LoadReport},
};

/// File name rustdoc uses for sidebar data.
pub const SIDEBAR_FILE_NAME: &str = "sidebar-items.js";

/// Loads sidebar indexes from disk.
#[derive(Debug, Clone)]
pub struct Loader {
    /// Name of the sidebar file looked for in each module directory.
    file_name: String,

    /// Whether modules are decoded on the rayon thread pool.
    parallel: bool,

    /// Whether symlinked directories are followed while walking.
    follow_links: bool,
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

impl Loader {
    /// Creates a loader that reads `sidebar-items.js` files in parallel.
    pub fn new() -> Self {
        Self {
            file_name: SIDEBAR_FILE_NAME.to_string(),
            parallel: true,
            follow_links: false,
        }
    }

    /// Sets the sidebar file name to look for.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Enables or disables parallel decoding.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Enables or disables following symlinks while walking the tree.
    pub fn with_follow_links(mut self, follow_links: bool) -> Self {
        self.follow_links = follow_links;
        self
    }

    /// Derive the module path for a sidebar file under `root`.
    ///
    /// A file directly inside `root` yields an empty module path, which fails validation when
    /// the index is built.
    pub fn module_path(&self, root: &Path, file: &Path) -> Result<String> {
        let relative = file
            .strip_prefix(root)
            .map_err(|_| SidebarError::InvalidPath(file.to_path_buf()))?;
        let dir = relative
            .parent()
            .ok_or_else(|| SidebarError::InvalidPath(file.to_path_buf()))?;

        let mut segments = Vec::new();
        for component in dir.components() {
            match component {
                Component::Normal(segment) => segments.push(
                    segment
                        .to_str()
                        .ok_or_else(|| SidebarError::InvalidPath(file.to_path_buf()))?,
                ),
                Component::CurDir => {}
                _ => return Err(SidebarError::InvalidPath(file.to_path_buf())),
            }
        }
        Ok(segments.join("::"))
    }

    /// Where the sidebar file for `module` lives under `root`.
    pub fn sidebar_path(&self, root: &Path, module: &str) -> PathBuf {
        let mut path = root.to_path_buf();
        path.extend(module.split("::").filter(|segment| !segment.is_empty()));
        path.push(&self.file_name);
        path
    }

    /// Find every sidebar file under `root`, sorted by path.
    ///
    /// Hidden directories and ignore files are not special: rustdoc output is walked as-is.
    pub fn discover(&self, root: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(self.follow_links)
            .build()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable path under {}: {e}", root.display());
                    None
                }
            })
            .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
            .filter(|entry| entry.file_name() == self.file_name.as_str())
            .map(ignore::DirEntry::into_path)
            .collect();
        files.sort();
        files
    }

    /// Load the sidebar file at `path`, naming the module from its location under `root`.
    pub fn load_file(&self, root: &Path, path: &Path) -> Result<SidebarIndex> {
        let module = self.module_path(root, path)?;
        debug!("Loading sidebar for {module} from {}", path.display());
        let bytes = fs::read(path)?;
        SidebarIndex::from_json(&module, &bytes)
    }

    /// Load every sidebar under `root`.
    ///
    /// Fails only if `root` is not a directory. Each module loads independently; a module that
    /// cannot be read or decoded is recorded in the report and does not affect the others.
    pub fn load_dir(&self, root: &Path) -> Result<LoadReport> {
        if !root.is_dir() {
            return Err(SidebarError::InvalidPath(root.to_path_buf()));
        }

        let files = self.discover(root);
        let results: Vec<_> = if self.parallel {
            files
                .par_iter()
                .map(|path| (path, self.load_file(root, path)))
                .collect()
        } else {
            files
                .iter()
                .map(|path| (path, self.load_file(root, path)))
                .collect()
        };

        let mut report = LoadReport::default();
        for (path, result) in results {
            match result {
                Ok(index) => {
                    if let Some(previous) = report.registry.insert(index) {
                        warn!("Module {} loaded more than once", previous.module());
                    }
                }
                Err(error) => {
                    let source = self
                        .module_path(root, path)
                        .unwrap_or_else(|_| path.display().to_string());
                    warn!("Skipping sidebar for {source}: {error}");
                    report.failures.push(LoadFailure { source, error });
                }
            }
        }

        info!(
            "Loaded {} sidebars from {} ({} failed)",
            report.registry.len(),
            root.display(),
            report.failures.len()
        );
        Ok(report)
    }
}
