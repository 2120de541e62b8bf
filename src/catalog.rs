//! The example catalog: chapters → lessons → examples.
//!
//! The catalog is plain data loaded from TOML. It is the only surface that
//! changes when an example is added; nothing in the page generator or the
//! deployer knows about individual examples.
//!
//! ## File Format
//!
//! ```toml
//! assets = ["awesomeface.png", "backpack.obj"]
//!
//! [[chapter]]
//! title = "Getting started"
//!
//! [[chapter.lesson]]
//! title = "Hello Triangle"
//! url = "https://learnopengl.com/Getting-started/Hello-Triangle"
//! dir = "1-4-hello-triangle"
//! examples = [
//!     { name = "triangle", id = "1-4-1-triangle", source = "1-triangle.c", shader = "1-triangle.glsl" },
//! ]
//! ```
//!
//! Order is display order at every level. The example `id` is the filename
//! stem of everything the example produces: `{id}.html`, `{id}.wasm`,
//! `{id}.js` and the screenshot `{id}.jpg`.
//!
//! The project's own catalog is embedded in the binary (see
//! [`Catalog::builtin`]); `webpage.toml` can point at a different file.

use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const BUILTIN_CATALOG: &str = include_str!("../static/catalog.toml");

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    /// Runtime assets (textures, models) copied from the build output.
    #[serde(default)]
    pub assets: Vec<String>,
    #[serde(default, rename = "chapter")]
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Chapter {
    pub title: String,
    #[serde(default, rename = "lesson")]
    pub lessons: Vec<Lesson>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Lesson {
    pub title: String,
    /// Tutorial page the lesson heading links to.
    #[serde(rename = "url")]
    pub external_reference_url: String,
    /// Directory under the repository's `src/` holding the example sources.
    #[serde(rename = "dir")]
    pub source_subdirectory: String,
    #[serde(default)]
    pub examples: Vec<Example>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Example {
    #[serde(rename = "name")]
    pub display_name: String,
    #[serde(rename = "id")]
    pub output_id: String,
    #[serde(rename = "source")]
    pub source_file: String,
    #[serde(default, rename = "shader")]
    pub shader_file: Option<String>,
}

impl Example {
    /// Viewer page filename: `{id}.html`.
    pub fn page_file(&self) -> String {
        format!("{}.html", self.output_id)
    }

    /// Screenshot/thumbnail filename: `{id}.jpg`.
    pub fn screenshot_file(&self) -> String {
        format!("{}.jpg", self.output_id)
    }

    /// Compiled WebAssembly module and its JavaScript loader.
    pub fn artifact_files(&self) -> [String; 2] {
        [
            format!("{}.wasm", self.output_id),
            format!("{}.js", self.output_id),
        ]
    }
}

impl Catalog {
    /// The learnopengl-examples catalog shipped with the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Every example with its owning chapter and lesson, in display order.
    pub fn examples(&self) -> impl Iterator<Item = (&Chapter, &Lesson, &Example)> {
        self.chapters.iter().flat_map(|chapter| {
            chapter.lessons.iter().flat_map(move |lesson| {
                lesson
                    .examples
                    .iter()
                    .map(move |example| (chapter, lesson, example))
            })
        })
    }

    pub fn example_count(&self) -> usize {
        self.examples().count()
    }

    /// Output ids that occur more than once, in order of their second
    /// occurrence.
    ///
    /// Duplicates make two examples write the same page and share one
    /// screenshot. They are reported, not rejected.
    pub fn duplicate_output_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for (_, _, example) in self.examples() {
            let id = example.output_id.as_str();
            if !seen.insert(id) && !duplicates.contains(&id) {
                duplicates.push(id);
            }
        }
        duplicates
    }
}
