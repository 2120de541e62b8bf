//! Where everything lives on disk.
//!
//! The project sits inside a fips workspace; build outputs and the
//! deployment directory live next to it under `fips-deploy/`:
//!
//! ```text
//! <workspace>/
//! ├── learnopengl-examples/            # project dir
//! │   └── webpage/                     # templates, support files, screenshots
//! ├── fips-sdks/emsdk/                 # enables compilation
//! └── fips-deploy/
//!     ├── learnopengl-examples/
//!     │   └── webgl2-wasm-ninja-release/   # compiled .wasm/.js + assets
//!     └── learnopengl-examples-webpage/    # deployment directory
//! ```

use crate::config::SiteConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("cannot resolve project directory {path}: {source}")]
    Project {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("project directory {0} has no parent to use as workspace")]
    NoWorkspace(PathBuf),
}

/// Resolved directories for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub project_dir: PathBuf,
    pub workspace_dir: PathBuf,
    /// Templates, support files and screenshots.
    pub webpage_src: PathBuf,
    /// Compiled examples and runtime assets.
    pub build_output: PathBuf,
    pub deploy_dir: PathBuf,
    /// Present when the toolchain is installed.
    pub sdk_dir: PathBuf,
}

impl Layout {
    /// Canonicalize the project directory and derive everything else from it.
    pub fn resolve(project_dir: &Path, config: &SiteConfig) -> Result<Self, LayoutError> {
        let project_dir = project_dir
            .canonicalize()
            .map_err(|source| LayoutError::Project {
                path: project_dir.to_path_buf(),
                source,
            })?;
        let workspace_dir = project_dir
            .parent()
            .ok_or_else(|| LayoutError::NoWorkspace(project_dir.clone()))?
            .to_path_buf();
        Ok(Self::from_dirs(project_dir, workspace_dir, config))
    }

    /// Build a layout from already-known directories without touching disk.
    pub fn from_dirs(project_dir: PathBuf, workspace_dir: PathBuf, config: &SiteConfig) -> Self {
        let deploy_root = workspace_dir.join("fips-deploy");
        Self {
            webpage_src: project_dir.join(&config.webpage_dir),
            build_output: deploy_root
                .join(&config.project_name)
                .join(&config.build.config),
            deploy_dir: deploy_root.join(&config.deploy_dir),
            sdk_dir: workspace_dir.join(&config.build.sdk_dir),
            project_dir,
            workspace_dir,
        }
    }

    /// Project-relative catalog path from config, if one is set.
    pub fn catalog_path(&self, config: &SiteConfig) -> Option<PathBuf> {
        config
            .catalog
            .as_ref()
            .map(|rel| self.project_dir.join(rel))
    }
}
