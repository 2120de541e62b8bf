//! # lopgl-webpage
//!
//! Builds the demonstration webpage for the learnopengl-examples project: a
//! thumbnail gallery of every example, one WebAssembly viewer page per
//! example, and the compiled programs and assets they load.
//!
//! # Architecture: Three Stages
//!
//! ```text
//! 1. Catalog   catalog.toml           →  chapters / lessons / examples
//! 2. Generate  catalog + templates    →  index.html, {id}.html
//! 3. Deploy    pages + build output   →  fips-deploy/learnopengl-examples-webpage/
//! ```
//!
//! The catalog is read once and never mutated. Page generation is pure
//! string construction. All disk and process effects happen in the deploy
//! stage, behind the [`filesystem::Filesystem`] and [`toolchain::Toolchain`]
//! traits, so the deploy logic is testable in memory.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | Typed chapters, lessons, examples and assets, loaded from TOML |
//! | [`template`] | `$name` placeholder substitution with declared placeholder sets |
//! | [`generate`] | Gallery and viewer page rendering using Maud |
//! | [`deploy`] | Deployment directory state machine and the copy steps |
//! | [`filesystem`] | Filesystem seam used by the deployer |
//! | [`toolchain`] | fips build driver, host platform, external commands |
//! | [`config`] | `webpage.toml` loading and validation |
//! | [`layout`] | Workspace, build output and deployment directory paths |
//! | [`serve`] | Local preview through a static-file server |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Catalog as Data
//!
//! The example table is a TOML file embedded in the binary, not code. Adding
//! an example is a data edit. A project can point `catalog` in
//! `webpage.toml` at its own copy.
//!
//! ## Escaped by Default
//!
//! The gallery is built with [Maud](https://maud.lambda.xyz/), so chapter,
//! lesson and example titles are escaped. Text substituted into the
//! project's templates is escaped as well; only the gallery markup itself
//! is inserted verbatim.
//!
//! ## Skip vs. Fail
//!
//! Per-example files (compiled programs, assets, screenshots) are optional
//! and skipped when absent, since a partial toolchain run still yields a
//! usable page. Templates and support files are required: without them the
//! page is broken, so the run fails.

pub mod catalog;
pub mod config;
pub mod deploy;
pub mod filesystem;
pub mod generate;
pub mod layout;
pub mod output;
pub mod serve;
pub mod template;
pub mod toolchain;

#[cfg(test)]
pub(crate) mod test_helpers;
