//! Shared test fixtures: small catalogs, page templates, and a seeded
//! in-memory project.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let fs = MemoryFs::new();
//! let (config, layout) = test_project();
//! seed_project(&fs, &layout, &config);
//!
//! let catalog = single_example_catalog();
//! ```

use crate::catalog::Catalog;
use crate::config::SiteConfig;
use crate::filesystem::tests::MemoryFs;
use crate::layout::Layout;

/// Gallery template with both placeholders.
pub const INDEX_TEMPLATE: &str = r#"<!DOCTYPE html>
<html><head><title>Examples</title></head>
<body>
<main>$samples</main>
<footer>Built $date</footer>
</body></html>
"#;

/// Viewer template with every viewer placeholder.
pub const VIEWER_TEMPLATE: &str = r#"<!DOCTYPE html>
<html><head><title>$name</title></head>
<body>
<a id="source" href="$source">source</a>
<a id="glsl" class="$hidden" href="$glsl">glsl</a>
<canvas id="canvas"></canvas>
<script src="${prog}.js"></script>
</body></html>
"#;

/// One chapter "C", one lesson "L" (url "U", dir "d"), one example "E"/"e1"
/// without a shader.
pub fn single_example_catalog() -> Catalog {
    Catalog::from_toml_str(
        r#"
[[chapter]]
title = "C"

[[chapter.lesson]]
title = "L"
url = "U"
dir = "d"
examples = [{ name = "E", id = "e1", source = "e1.c" }]
"#,
    )
    .unwrap()
}

/// Two chapters, three lessons, mixed shader presence, two assets.
pub fn two_chapter_catalog() -> Catalog {
    Catalog::from_toml_str(
        r#"
assets = ["container.jpg", "backpack.obj"]

[[chapter]]
title = "First"

[[chapter.lesson]]
title = "Alpha"
url = "https://learnopengl.com/Alpha"
dir = "1-1-alpha"
examples = [
    { name = "a one", id = "a1", source = "1-a.c" },
    { name = "a two", id = "a2", source = "2-a.c", shader = "2-a.glsl" },
]

[[chapter.lesson]]
title = "Beta"
url = "https://learnopengl.com/Beta"
dir = "1-2-beta"
examples = [{ name = "b one", id = "b1", source = "1-b.c", shader = "shaders.glsl" }]

[[chapter]]
title = "Second"

[[chapter.lesson]]
title = "Gamma"
url = "https://learnopengl.com/Gamma"
dir = "2-1-gamma"
examples = [{ name = "e one", id = "e1", source = "1-e.c", shader = "1-e.glsl" }]
"#,
    )
    .unwrap()
}

/// Two examples sharing the output id `same`.
pub fn catalog_with_duplicate_id() -> Catalog {
    Catalog::from_toml_str(
        r#"
[[chapter]]
title = "C"

[[chapter.lesson]]
title = "L"
url = "U"
dir = "d"
examples = [
    { name = "first", id = "same", source = "1.c" },
    { name = "second", id = "same", source = "2.c" },
]
"#,
    )
    .unwrap()
}

/// Titles carrying markup at every level.
pub fn catalog_with_markup_titles() -> Catalog {
    Catalog::from_toml_str(
        r#"
[[chapter]]
title = "<b>bold</b>"

[[chapter.lesson]]
title = "<script>alert(1)</script>"
url = "U"
dir = "d"
examples = [{ name = "a & b", id = "x1", source = "x.c" }]
"#,
    )
    .unwrap()
}

/// Default config and a layout rooted at `/ws/proj`.
pub fn test_project() -> (SiteConfig, Layout) {
    let config = SiteConfig::default();
    let layout = Layout::from_dirs("/ws/proj".into(), "/ws".into(), &config);
    (config, layout)
}

/// Write both templates and every support file into the webpage source dir.
pub fn seed_project(fs: &MemoryFs, layout: &Layout, config: &SiteConfig) {
    let src = &layout.webpage_src;
    fs.add_file(src.join(&config.pages.index_template), INDEX_TEMPLATE);
    fs.add_file(src.join(&config.pages.example_template), VIEWER_TEMPLATE);
    for name in &config.support_files {
        fs.add_file(src.join(name), name);
    }
}
