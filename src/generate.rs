//! HTML page generation.
//!
//! Walks the catalog once and produces:
//!
//! - **Index page** (`index.html`): the thumbnail gallery, grouped by chapter
//!   and lesson, substituted into the project's index template as `$samples`.
//! - **Viewer pages** (`{id}.html`): one per example, filled from the
//!   project's WebAssembly viewer template.
//!
//! ## Gallery Markup
//!
//! ```text
//! <h2>Getting started</h2>
//! <article>
//!   <section class="header"><h3><a href="{lesson url}">Hello Triangle <i class="icon-link-ext"></i></a></h3></section>
//!   <section class="group examples">
//!     <figure class="col-15">
//!       <figcaption><h4>triangle</h4></figcaption>
//!       <div><img class="responsive" src="1-4-1-triangle.jpg" alt=""></div>
//!       <a href="1-4-1-triangle.html">Read More</a>
//!     </figure>
//!   </section>
//! </article>
//! <hr>
//! ```
//!
//! The gallery is built with [maud](https://maud.lambda.xyz/), so catalog
//! titles are escaped. Everything here is pure string construction; the
//! deployer does the writing.

use crate::catalog::{Catalog, Example, Lesson};
use crate::filesystem::Filesystem;
use crate::template::{PlaceholderSet, Substitutions, Template};
use maud::{Markup, html};
use std::path::Path;

/// Placeholders of the gallery template.
pub const INDEX_PLACEHOLDERS: PlaceholderSet = PlaceholderSet {
    required: &["samples"],
    optional: &["date"],
};

/// Placeholders of the viewer template.
pub const EXAMPLE_PLACEHOLDERS: PlaceholderSet = PlaceholderSet {
    required: &["name", "prog", "source", "glsl", "hidden"],
    optional: &[],
};

/// `$glsl` value for examples without a shader file.
pub const NO_SHADER_URL: &str = ".";

/// `$hidden` value that hides the shader link section.
pub const HIDDEN_MARKER: &str = "hidden";

/// Resolves an example's gallery thumbnail.
///
/// `{id}.jpg` when the screenshot exists in the webpage source directory,
/// otherwise the fallback placeholder image.
pub struct Thumbnails<'a, F: Filesystem> {
    fs: &'a F,
    dir: &'a Path,
    fallback: &'a str,
}

impl<'a, F: Filesystem> Thumbnails<'a, F> {
    pub fn new(fs: &'a F, dir: &'a Path, fallback: &'a str) -> Self {
        Self { fs, dir, fallback }
    }

    pub fn resolve(&self, example: &Example) -> String {
        let name = example.screenshot_file();
        if self.fs.is_file(&self.dir.join(&name)) {
            name
        } else {
            self.fallback.to_string()
        }
    }
}

/// `{base_url}/{lesson dir}/{file}`.
pub fn source_url(base_url: &str, lesson: &Lesson, file: &str) -> String {
    format!(
        "{}/{}/{}",
        base_url.trim_end_matches('/'),
        lesson.source_subdirectory,
        file
    )
}

/// Renders the thumbnail gallery for the whole catalog.
pub fn render_gallery(catalog: &Catalog, thumbnail: impl Fn(&Example) -> String) -> Markup {
    html! {
        @for chapter in &catalog.chapters {
            h2 { (chapter.title) }
            @for lesson in &chapter.lessons {
                article {
                    section.header {
                        h3 {
                            a href=(lesson.external_reference_url) {
                                (lesson.title) " " i.icon-link-ext {}
                            }
                        }
                    }
                    section.group.examples {
                        @for example in &lesson.examples {
                            (render_gallery_entry(example, &thumbnail(example)))
                        }
                    }
                }
            }
            hr;
        }
    }
}

fn render_gallery_entry(example: &Example, thumbnail: &str) -> Markup {
    html! {
        figure."col-15" {
            figcaption { h4 { (example.display_name) } }
            div { img.responsive src=(thumbnail) alt=""; }
            a href=(example.page_file()) { "Read More" }
        }
    }
}

/// Renders the index page: the gallery substituted into `template`.
pub fn render_index(
    catalog: &Catalog,
    template: &Template,
    thumbnail: impl Fn(&Example) -> String,
    date: Option<&str>,
) -> String {
    let mut values = Substitutions::new().markup("samples", render_gallery(catalog, thumbnail));
    if let Some(date) = date {
        values = values.text("date", date);
    }
    template.render(&values)
}

/// Renders one example's viewer page.
pub fn render_example_page(
    example: &Example,
    lesson: &Lesson,
    template: &Template,
    base_url: &str,
) -> String {
    let source = source_url(base_url, lesson, &example.source_file);
    let (glsl, hidden) = match &example.shader_file {
        Some(shader) => (source_url(base_url, lesson, shader), ""),
        None => (NO_SHADER_URL.to_string(), HIDDEN_MARKER),
    };
    let values = Substitutions::new()
        .text("name", &example.output_id)
        .text("prog", &example.output_id)
        .text("source", &source)
        .text("glsl", &glsl)
        .text("hidden", hidden);
    template.render(&values)
}

// ============================================================================
// Tests
// ============================================================================
