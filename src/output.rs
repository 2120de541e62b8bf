//! CLI output formatting for `check` and `build`.
//!
//! # Entity Display Contract
//!
//! Every entity is shown as a header line (positional index + title, with an
//! optional count) followed by indented context lines, the same shape at
//! every level of the catalog.
//!
//! # Output Format
//!
//! ## Catalog
//!
//! ```text
//! 001 Getting started
//!     001 Hello Triangle (3 examples)
//!         Source: 1-4-hello-triangle/
//!         001 triangle → 1-4-1-triangle.html
//!             Source: 1-triangle.c
//!             Shader: 1-triangle.glsl
//!
//! Assets
//!     29 files
//!
//! Warnings
//!     Output id 1-4-1-triangle is used more than once
//! ```
//!
//! ## Deploy
//!
//! ```text
//! Directory: fips-deploy/learnopengl-examples-webpage (created)
//! Toolchain: built
//! Pages
//!     index.html
//!     81 viewer pages
//! Files
//!     Support: 4 copied
//!     Artifact: 150 copied, 12 missing
//!     Asset: 29 copied
//!     Screenshot: 70 copied, 11 missing
//!
//! Deployed 82 pages and 253 files
//! ```
//!
//! Each `format_*` function is pure and returns lines; the `print_*`
//! wrappers write them to stdout.

use crate::catalog::Catalog;
use crate::deploy::{CopyStatus, DeployReport, DirState, FileKind, TemplateCheck, ToolchainStatus};

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an entity header: positional index + title, with optional count.
///
/// ```text
/// 001 Hello Triangle (3 examples)
/// 001 Getting started
/// ```
fn entity_header(index: usize, title: &str, count: Option<usize>) -> String {
    match count {
        Some(1) => format!("{} {} (1 example)", format_index(index), title),
        Some(n) => format!("{} {} ({} examples)", format_index(index), title, n),
        None => format!("{} {}", format_index(index), title),
    }
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

// ============================================================================
// Catalog
// ============================================================================

pub fn format_catalog_output(catalog: &Catalog) -> Vec<String> {
    let mut lines = Vec::new();

    for (ci, chapter) in catalog.chapters.iter().enumerate() {
        lines.push(entity_header(ci + 1, &chapter.title, None));
        for (li, lesson) in chapter.lessons.iter().enumerate() {
            lines.push(format!(
                "{}{}",
                indent(1),
                entity_header(li + 1, &lesson.title, Some(lesson.examples.len()))
            ));
            lines.push(format!(
                "{}Source: {}/",
                indent(2),
                lesson.source_subdirectory
            ));
            for (ei, example) in lesson.examples.iter().enumerate() {
                lines.push(format!(
                    "{}{} {} → {}",
                    indent(2),
                    format_index(ei + 1),
                    example.display_name,
                    example.page_file()
                ));
                lines.push(format!("{}Source: {}", indent(3), example.source_file));
                if let Some(shader) = &example.shader_file {
                    lines.push(format!("{}Shader: {}", indent(3), shader));
                }
            }
        }
    }

    if !catalog.assets.is_empty() {
        lines.push(String::new());
        lines.push("Assets".to_string());
        lines.push(format!(
            "{}{}",
            indent(1),
            plural(catalog.assets.len(), "file", "files")
        ));
    }

    let duplicates = catalog.duplicate_output_ids();
    if !duplicates.is_empty() {
        lines.push(String::new());
        lines.push("Warnings".to_string());
        for id in duplicates {
            lines.push(format!("{}Output id {} is used more than once", indent(1), id));
        }
    }

    lines
}

pub fn print_catalog_output(catalog: &Catalog) {
    for line in format_catalog_output(catalog) {
        println!("{}", line);
    }
}

// ============================================================================
// Templates
// ============================================================================

fn placeholder_list<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(|n| format!("${}", n.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// ```text
/// Templates
///     /proj/webpage/index.html
///     /proj/webpage/wasm.html
///         Missing: $hidden
///         Left as-is: $canvas
/// ```
pub fn format_template_checks(checks: &[TemplateCheck]) -> Vec<String> {
    let mut lines = vec!["Templates".to_string()];
    for check in checks {
        lines.push(format!("{}{}", indent(1), check.path.display()));
        if !check.missing.is_empty() {
            lines.push(format!(
                "{}Missing: {}",
                indent(2),
                placeholder_list(&check.missing)
            ));
        }
        if !check.undeclared.is_empty() {
            lines.push(format!(
                "{}Left as-is: {}",
                indent(2),
                placeholder_list(&check.undeclared)
            ));
        }
    }
    lines
}

pub fn print_template_checks(checks: &[TemplateCheck]) {
    for line in format_template_checks(checks) {
        println!("{}", line);
    }
}

// ============================================================================
// Deploy
// ============================================================================

fn kind_label(kind: FileKind) -> &'static str {
    match kind {
        FileKind::Support => "Support",
        FileKind::Artifact => "Artifact",
        FileKind::Asset => "Asset",
        FileKind::Screenshot => "Screenshot",
    }
}

fn dir_state_label(state: DirState) -> &'static str {
    match state {
        DirState::PresentFresh => "created",
        DirState::PresentStale => "reused, earlier files kept",
        DirState::Absent => "absent",
    }
}

pub fn format_deploy_output(report: &DeployReport) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!(
        "Directory: {} ({})",
        report.deploy_dir.display(),
        dir_state_label(report.dir_state)
    ));
    lines.push(match report.toolchain {
        ToolchainStatus::Built => "Toolchain: built".to_string(),
        ToolchainStatus::Unavailable => "Toolchain: not installed, artifacts skipped".to_string(),
    });

    lines.push("Pages".to_string());
    let mut pages = report.pages.iter();
    if let Some(index) = pages.next() {
        lines.push(format!("{}{}", indent(1), index));
    }
    let viewers = pages.count();
    lines.push(format!(
        "{}{}",
        indent(1),
        plural(viewers, "viewer page", "viewer pages")
    ));

    lines.push("Files".to_string());
    for kind in [
        FileKind::Support,
        FileKind::Artifact,
        FileKind::Asset,
        FileKind::Screenshot,
    ] {
        let copied = report.count(kind, CopyStatus::Copied);
        let missing = report.count(kind, CopyStatus::Missing);
        if copied + missing == 0 {
            continue;
        }
        let line = if missing > 0 {
            format!("{}: {} copied, {} missing", kind_label(kind), copied, missing)
        } else {
            format!("{}: {} copied", kind_label(kind), copied)
        };
        lines.push(format!("{}{}", indent(1), line));
    }

    lines.push(String::new());
    lines.push(format!(
        "Deployed {} and {}",
        plural(report.pages.len(), "page", "pages"),
        plural(report.copied(), "file", "files")
    ));
    lines
}

pub fn print_deploy_output(report: &DeployReport) {
    for line in format_deploy_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
