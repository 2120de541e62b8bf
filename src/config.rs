//! Webpage configuration.
//!
//! Handles loading and validating `webpage.toml`. The file is
//! optional and sparse: it lives in the project directory and overrides
//! only the stock defaults it mentions.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! source_url = "https://github.com/geertarien/learnopengl-examples/tree/master/src"
//! project_name = "learnopengl-examples"   # fips-deploy/<project_name>/<build config>
//! webpage_dir = "webpage"                 # templates, support files, screenshots
//! deploy_dir = "learnopengl-examples-webpage"
//! # catalog = "webpage/catalog.toml"      # omit to use the built-in catalog
//! support_files = ["dummy.jpg", "favicon.png", "fontello.woff", "fontello.woff2"]
//!
//! [build]
//! config = "webgl2-wasm-ninja-release"
//! sdk_dir = "fips-sdks/emsdk"
//!
//! [pages]
//! index_template = "index.html"
//! example_template = "wasm.html"
//! fallback_thumbnail = "dummy.jpg"
//! date_format = "%B %d %Y"
//!
//! [server]
//! command = "http-server -c-1 -g -o"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;
use std::fs;
use std::path::{Component, Path};
use thiserror::Error;

/// Name of the config file inside the project directory.
pub const CONFIG_FILENAME: &str = "webpage.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Webpage configuration loaded from `webpage.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Repository URL that example source and shader links are built from.
    pub source_url: String,
    /// Project name, used to locate the compiled examples under `fips-deploy/`.
    pub project_name: String,
    /// Project-relative directory holding templates, support files and screenshots.
    pub webpage_dir: String,
    /// Deployment directory name under `fips-deploy/`. Deleted by `rebuild`.
    pub deploy_dir: String,
    /// Project-relative catalog file. `None` uses the built-in catalog.
    pub catalog: Option<String>,
    /// Files copied from the webpage directory on every build. All required.
    pub support_files: Vec<String>,
    pub build: BuildConfig,
    pub pages: PagesConfig,
    pub server: ServerConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            source_url: "https://github.com/geertarien/learnopengl-examples/tree/master/src"
                .to_string(),
            project_name: "learnopengl-examples".to_string(),
            webpage_dir: "webpage".to_string(),
            deploy_dir: "learnopengl-examples-webpage".to_string(),
            catalog: None,
            support_files: vec![
                "dummy.jpg".to_string(),
                "favicon.png".to_string(),
                "fontello.woff".to_string(),
                "fontello.woff2".to_string(),
            ],
            build: BuildConfig::default(),
            pages: PagesConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source_url.trim().is_empty() {
            return Err(ConfigError::Validation("source_url must not be empty".into()));
        }
        if self.build.config.trim().is_empty() {
            return Err(ConfigError::Validation(
                "build.config must not be empty".into(),
            ));
        }
        if !is_plain_segment(&self.deploy_dir) {
            return Err(ConfigError::Validation(format!(
                "deploy_dir must be a single directory name, got {:?}",
                self.deploy_dir
            )));
        }
        if self.pages.fallback_thumbnail.trim().is_empty() {
            return Err(ConfigError::Validation(
                "pages.fallback_thumbnail must not be empty".into(),
            ));
        }
        if !self.support_files.contains(&self.pages.fallback_thumbnail) {
            return Err(ConfigError::Validation(format!(
                "pages.fallback_thumbnail {:?} must be listed in support_files, \
                 otherwise the gallery links an image that is never deployed",
                self.pages.fallback_thumbnail
            )));
        }
        if !is_valid_date_format(&self.pages.date_format) {
            return Err(ConfigError::Validation(format!(
                "pages.date_format is not a valid strftime format: {:?}",
                self.pages.date_format
            )));
        }
        if self.server.command.trim().is_empty() {
            return Err(ConfigError::Validation(
                "server.command must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// True when chrono can format dates with `format` without panicking.
pub fn is_valid_date_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// True for a single relative path component like `site`, never `.`, `..`,
/// `a/b` or an absolute path.
fn is_plain_segment(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Compiled-example build settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// fips build configuration used for the WebAssembly examples.
    pub config: String,
    /// Workspace-relative emscripten SDK directory. Its presence means the
    /// toolchain is available.
    pub sdk_dir: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            config: "webgl2-wasm-ninja-release".to_string(),
            sdk_dir: "fips-sdks/emsdk".to_string(),
        }
    }
}

/// Page generation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PagesConfig {
    /// Gallery template inside the webpage directory.
    pub index_template: String,
    /// Per-example viewer template inside the webpage directory.
    pub example_template: String,
    /// Thumbnail shown for examples without a screenshot. Must be one of
    /// `support_files`.
    pub fallback_thumbnail: String,
    /// chrono strftime format for the index page's `$date`.
    pub date_format: String,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            index_template: "index.html".to_string(),
            example_template: "wasm.html".to_string(),
            fallback_thumbnail: "dummy.jpg".to_string(),
            date_format: "%B %d %Y".to_string(),
        }
    }
}

/// Local preview server settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Shell command run inside the deployment directory.
    pub command: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            command: "http-server -c-1 -g -o".to_string(),
        }
    }
}

// =============================================================================
// Config loading
// =============================================================================

/// Parse and validate `webpage.toml` content.
///
/// Every table carries `#[serde(default)]`, so keys the file leaves out keep
/// their stock values, including siblings inside a partially given table.
pub fn parse_config(content: &str) -> Result<SiteConfig, ConfigError> {
    let config: SiteConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load config from `webpage.toml` in the project directory.
///
/// A missing file yields the (validated) stock defaults.
pub fn load_config(project_dir: &Path) -> Result<SiteConfig, ConfigError> {
    let config_path = project_dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        let config = SiteConfig::default();
        config.validate()?;
        return Ok(config);
    }
    parse_config(&fs::read_to_string(&config_path)?)
}

/// Returns a fully-commented stock `webpage.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# learnopengl-examples webpage configuration
# ==========================================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.
#
# Place this file as webpage.toml in the project directory.

# Repository URL that example source and shader links are built from:
#   <source_url>/<lesson dir>/<file>
source_url = "https://github.com/geertarien/learnopengl-examples/tree/master/src"

# Project name; compiled examples are read from
#   <workspace>/fips-deploy/<project_name>/<build.config>/
project_name = "learnopengl-examples"

# Project-relative directory holding the page templates, support files
# and the <example id>.jpg screenshots.
webpage_dir = "webpage"

# Deployment directory, created under <workspace>/fips-deploy/.
# `rebuild` deletes it first, so it must be a single directory name.
deploy_dir = "learnopengl-examples-webpage"

# Project-relative catalog file. Omit to use the built-in catalog.
# catalog = "webpage/catalog.toml"

# Files copied from the webpage directory on every build.
# A missing file fails the build.
support_files = ["dummy.jpg", "favicon.png", "fontello.woff", "fontello.woff2"]

# ---------------------------------------------------------------------------
# Compiled examples
# ---------------------------------------------------------------------------
[build]
# fips build configuration for the WebAssembly examples.
config = "webgl2-wasm-ninja-release"

# Workspace-relative emscripten SDK directory. When it is missing the
# examples are not compiled and no .wasm/.js files are deployed.
sdk_dir = "fips-sdks/emsdk"

# ---------------------------------------------------------------------------
# Pages
# ---------------------------------------------------------------------------
[pages]
# Gallery template; placeholders: $samples (required), $date
index_template = "index.html"

# Viewer template; placeholders: $name $prog $source $glsl $hidden
example_template = "wasm.html"

# Thumbnail used when an example has no <id>.jpg screenshot.
# Must also be listed in support_files so it gets deployed.
fallback_thumbnail = "dummy.jpg"

# strftime format of the build date shown on the gallery page.
date_format = "%B %d %Y"

# ---------------------------------------------------------------------------
# Local preview
# ---------------------------------------------------------------------------
[server]
# Shell command run inside the deployment directory by `serve`.
command = "http-server -c-1 -g -o"
"##
}
