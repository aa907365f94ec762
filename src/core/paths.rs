//! core::paths
//!
//! Workspace discovery and ict storage locations.
//!
//! A Bazel workspace root is the nearest directory, starting from the working
//! directory and walking up, that contains one of [`WORKSPACE_MARKERS`].
//! Workspace-scoped ict files live under `<root>/.ict/`.
//!
//! # Example
//!
//! ```
//! use ict::core::paths::WorkspacePaths;
//! use std::path::PathBuf;
//!
//! let paths = WorkspacePaths::new(PathBuf::from("/src/ic"));
//! assert_eq!(paths.config_path(), PathBuf::from("/src/ic/.ict/config.toml"));
//! ```

use std::path::{Path, PathBuf};

/// Files marking a Bazel workspace root.
pub const WORKSPACE_MARKERS: [&str; 3] = ["MODULE.bazel", "WORKSPACE.bazel", "WORKSPACE"];

/// Locations inside one workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspacePaths {
    /// The workspace root directory.
    pub root: PathBuf,
}

impl WorkspacePaths {
    /// Paths for a known workspace root.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Find the workspace containing `start`.
    ///
    /// Returns `None` outside of any workspace.
    pub fn discover(start: &Path) -> Option<Self> {
        start
            .ancestors()
            .find(|dir| WORKSPACE_MARKERS.iter().any(|m| dir.join(m).is_file()))
            .map(|dir| Self::new(dir.to_path_buf()))
    }

    /// Directory holding workspace-scoped ict files.
    pub fn ict_dir(&self) -> PathBuf {
        self.root.join(".ict")
    }

    /// Workspace config file.
    pub fn config_path(&self) -> PathBuf {
        self.ict_dir().join("config.toml")
    }
}
