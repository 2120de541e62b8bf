//! Deployment: compile, render, and copy everything into the deployment
//! directory.
//!
//! ## Directory State
//!
//! The deployment directory is observed once at the start of a run and
//! driven through an explicit state machine:
//!
//! | observed       | rebuild | actions             | result         |
//! |----------------|---------|---------------------|----------------|
//! | `Absent`       | any     | `Create`            | `PresentFresh` |
//! | `PresentStale` | true    | `RemoveAll, Create` | `PresentFresh` |
//! | `PresentStale` | false   | none                | `PresentStale` |
//!
//! [`DirState::transition`] is pure; [`Deployer`] applies the actions through
//! the [`Filesystem`] trait. A plain `build` leaves files from earlier runs in
//! place.
//!
//! ## Effect Steps
//!
//! 1. Compile the examples if the toolchain is installed. A failed build aborts.
//! 2. Write `index.html` and one `{id}.html` viewer page per example.
//! 3. Copy the support files. Every one of them must exist.
//! 4. Copy `{id}.wasm` / `{id}.js` from the build output (toolchain runs only).
//! 5. Copy the catalog's runtime assets from the build output.
//! 6. Copy `{id}.jpg` screenshots from the webpage sources.
//!
//! Steps 4 to 6 skip missing files and record them as [`CopyStatus::Missing`].

use crate::catalog::Catalog;
use crate::config::{SiteConfig, is_valid_date_format};
use crate::filesystem::Filesystem;
use crate::generate::{self, EXAMPLE_PLACEHOLDERS, INDEX_PLACEHOLDERS, Thumbnails};
use crate::layout::Layout;
use crate::template::{PlaceholderSet, Template};
use crate::toolchain::{Toolchain, ToolchainError};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("cannot prepare deployment directory {path}: {source}")]
    Prepare {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot read template {path}: {source}")]
    Template {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("required support file {path}: {source}")]
    SupportFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot copy {path}: {source}")]
    Copy {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("example build failed: {0}")]
    Toolchain(#[from] ToolchainError),
}

/// State of the deployment directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirState {
    Absent,
    /// Exists and may hold files from an earlier run.
    PresentStale,
    /// Created by this run.
    PresentFresh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirAction {
    RemoveAll,
    Create,
}

impl DirState {
    /// Any existing directory counts as stale.
    pub fn observe(fs: &impl Filesystem, dir: &Path) -> Self {
        if fs.is_dir(dir) {
            Self::PresentStale
        } else {
            Self::Absent
        }
    }

    /// Next state and the directory actions that get there.
    pub fn transition(self, rebuild: bool) -> (Self, Vec<DirAction>) {
        match (self, rebuild) {
            (Self::Absent, _) => (Self::PresentFresh, vec![DirAction::Create]),
            (Self::PresentStale, true) => (
                Self::PresentFresh,
                vec![DirAction::RemoveAll, DirAction::Create],
            ),
            (Self::PresentStale, false) => (Self::PresentStale, vec![]),
            (Self::PresentFresh, _) => (Self::PresentFresh, vec![]),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolchainStatus {
    Built,
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Support,
    Artifact,
    Asset,
    Screenshot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyStatus {
    Copied,
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedFile {
    pub kind: FileKind,
    pub name: String,
    pub status: CopyStatus,
}

/// What a deployment run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployReport {
    pub deploy_dir: PathBuf,
    pub dir_state: DirState,
    pub toolchain: ToolchainStatus,
    /// Written pages, `index.html` first.
    pub pages: Vec<String>,
    pub files: Vec<DeployedFile>,
}

impl DeployReport {
    pub fn count(&self, kind: FileKind, status: CopyStatus) -> usize {
        self.files
            .iter()
            .filter(|f| f.kind == kind && f.status == status)
            .count()
    }

    pub fn copied(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.status == CopyStatus::Copied)
            .count()
    }
}

/// Placeholder findings for one page template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateCheck {
    pub path: PathBuf,
    /// Required placeholders the template never mentions.
    pub missing: Vec<&'static str>,
    /// Placeholders that no page kind fills; they render verbatim.
    pub undeclared: Vec<String>,
}

fn read_template(fs: &impl Filesystem, path: &Path) -> Result<Template, DeployError> {
    let text = fs
        .read_to_string(path)
        .map_err(|source| DeployError::Template {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Template::parse(&text))
}

/// Read both page templates and compare them against their placeholder sets.
///
/// Fails like a deployment would when a template is missing.
pub fn check_templates(
    fs: &impl Filesystem,
    layout: &Layout,
    config: &SiteConfig,
) -> Result<Vec<TemplateCheck>, DeployError> {
    [
        (&config.pages.index_template, &INDEX_PLACEHOLDERS),
        (&config.pages.example_template, &EXAMPLE_PLACEHOLDERS),
    ]
    .into_iter()
    .map(|(name, set)| -> Result<TemplateCheck, DeployError> {
        let path = layout.webpage_src.join(name);
        let template = read_template(fs, &path)?;
        Ok(TemplateCheck {
            missing: template.missing_required(set),
            undeclared: template
                .undeclared(set)
                .into_iter()
                .map(str::to_string)
                .collect(),
            path,
        })
    })
    .collect()
}

fn today(date_format: &str) -> Option<String> {
    if !is_valid_date_format(date_format) {
        log::warn!("invalid pages.date_format {date_format:?}, leaving $date unfilled");
        return None;
    }
    Some(chrono::Local::now().format(date_format).to_string())
}

pub struct Deployer<'a, F: Filesystem, T: Toolchain> {
    fs: &'a F,
    toolchain: &'a T,
    layout: &'a Layout,
    config: &'a SiteConfig,
    catalog: &'a Catalog,
    date: Option<String>,
}

impl<'a, F: Filesystem, T: Toolchain> Deployer<'a, F, T> {
    /// Stamps the index page with today's local date. An unusable
    /// `date_format` leaves `$date` unfilled.
    pub fn new(
        fs: &'a F,
        toolchain: &'a T,
        layout: &'a Layout,
        config: &'a SiteConfig,
        catalog: &'a Catalog,
    ) -> Self {
        Self {
            fs,
            toolchain,
            layout,
            config,
            catalog,
            date: today(&config.pages.date_format),
        }
    }

    /// Override the build date, or leave `$date` unfilled with `None`.
    pub fn with_date(mut self, date: Option<String>) -> Self {
        self.date = date;
        self
    }

    pub fn run(&self, rebuild: bool) -> Result<DeployReport, DeployError> {
        let deploy_dir = &self.layout.deploy_dir;
        let dir_state = self.prepare(rebuild)?;

        for id in self.catalog.duplicate_output_ids() {
            log::warn!("output id `{id}` is used by more than one example; later pages overwrite earlier ones");
        }

        let toolchain = if self.toolchain.is_available() {
            log::debug!("building {}", self.config.build.config);
            self.toolchain.build(&self.config.build.config)?;
            ToolchainStatus::Built
        } else {
            log::warn!(
                "toolchain not found at {}, skipping example build",
                self.layout.sdk_dir.display()
            );
            ToolchainStatus::Unavailable
        };

        let pages = self.write_pages()?;

        let mut files = Vec::new();
        for name in self.required_files() {
            self.copy_required(name)?;
            files.push(DeployedFile {
                kind: FileKind::Support,
                name: name.to_string(),
                status: CopyStatus::Copied,
            });
        }

        if toolchain == ToolchainStatus::Built {
            for (_, _, example) in self.catalog.examples() {
                for name in example.artifact_files() {
                    let status = self.copy_optional(&self.layout.build_output, &name)?;
                    files.push(DeployedFile {
                        kind: FileKind::Artifact,
                        name,
                        status,
                    });
                }
            }
        }

        for name in &self.catalog.assets {
            let status = self.copy_optional(&self.layout.build_output, name)?;
            files.push(DeployedFile {
                kind: FileKind::Asset,
                name: name.clone(),
                status,
            });
        }

        for (_, _, example) in self.catalog.examples() {
            let name = example.screenshot_file();
            let status = self.copy_optional(&self.layout.webpage_src, &name)?;
            files.push(DeployedFile {
                kind: FileKind::Screenshot,
                name,
                status,
            });
        }

        Ok(DeployReport {
            deploy_dir: deploy_dir.clone(),
            dir_state,
            toolchain,
            pages,
            files,
        })
    }

    /// Support files plus the fallback thumbnail the gallery links to.
    fn required_files(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.config.support_files.iter().map(String::as_str).collect();
        let fallback = self.config.pages.fallback_thumbnail.as_str();
        if !names.contains(&fallback) {
            names.push(fallback);
        }
        names
    }

    fn prepare(&self, rebuild: bool) -> Result<DirState, DeployError> {
        let dir = &self.layout.deploy_dir;
        let observed = DirState::observe(self.fs, dir);
        let (next, actions) = observed.transition(rebuild);
        log::debug!("deployment directory {observed:?} -> {next:?}");
        for action in actions {
            let result = match action {
                DirAction::RemoveAll => self.fs.remove_dir_all(dir),
                DirAction::Create => self.fs.create_dir_all(dir),
            };
            result.map_err(|source| DeployError::Prepare {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(next)
    }

    fn load_template(&self, name: &str, set: &PlaceholderSet) -> Result<Template, DeployError> {
        let path = self.layout.webpage_src.join(name);
        let template = read_template(self.fs, &path)?;
        let missing = template.missing_required(set);
        if !missing.is_empty() {
            log::warn!(
                "template {} has no ${} placeholder",
                path.display(),
                missing.join(", $")
            );
        }
        Ok(template)
    }

    fn write_pages(&self) -> Result<Vec<String>, DeployError> {
        let pages = &self.config.pages;
        let index_template = self.load_template(&pages.index_template, &INDEX_PLACEHOLDERS)?;
        let example_template =
            self.load_template(&pages.example_template, &EXAMPLE_PLACEHOLDERS)?;

        let thumbnails = Thumbnails::new(
            self.fs,
            &self.layout.webpage_src,
            &pages.fallback_thumbnail,
        );
        let index = generate::render_index(
            self.catalog,
            &index_template,
            |example| thumbnails.resolve(example),
            self.date.as_deref(),
        );
        let mut written = vec!["index.html".to_string()];
        self.write_page("index.html", &index)?;

        for (_, lesson, example) in self.catalog.examples() {
            let html = generate::render_example_page(
                example,
                lesson,
                &example_template,
                &self.config.source_url,
            );
            let name = example.page_file();
            self.write_page(&name, &html)?;
            written.push(name);
        }
        Ok(written)
    }

    fn write_page(&self, name: &str, html: &str) -> Result<(), DeployError> {
        let path = self.layout.deploy_dir.join(name);
        log::debug!("writing {}", path.display());
        self.fs
            .write(&path, html)
            .map_err(|source| DeployError::Write { path, source })
    }

    fn copy_required(&self, name: &str) -> Result<(), DeployError> {
        let from = self.layout.webpage_src.join(name);
        log::debug!("copying {}", from.display());
        self.fs
            .copy(&from, &self.layout.deploy_dir.join(name))
            .map_err(|source| DeployError::SupportFile { path: from, source })
    }

    fn copy_optional(&self, src_dir: &Path, name: &str) -> Result<CopyStatus, DeployError> {
        let from = src_dir.join(name);
        if !self.fs.is_file(&from) {
            log::debug!("skipping {}, not found", from.display());
            return Ok(CopyStatus::Missing);
        }
        log::debug!("copying {}", from.display());
        self.fs
            .copy(&from, &self.layout.deploy_dir.join(name))
            .map_err(|source| DeployError::Copy { path: from, source })?;
        Ok(CopyStatus::Copied)
    }
}

// ============================================================================
// Tests
// ============================================================================
