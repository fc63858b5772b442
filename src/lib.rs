//! # Bandstand
//!
//! A minimal static site generator for band websites. Your filesystem is the
//! data source: markdown files become pages, YAML files become the concert
//! calendar and discography, and two image directories become a derived
//! photo gallery.
//!
//! # Architecture: One Build, Three Phases
//!
//! A build runs start to finish in a single pass over the source tree:
//!
//! ```text
//! 1. Content    content/  →  pages, concerts, albums   (parse + sort)
//! 2. Assets     photos/, images/  →  dist/…/{original,1600,thumb}
//! 3. Render     everything  →  dist/*.html
//! ```
//!
//! Every build is clean-room: the output directory is deleted and recreated,
//! so the result depends only on the current source tree. There is no cache
//! and no incremental mode — a band site is small enough that a full rebuild
//! is the simple, predictable option.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`site`] | Build driver — orchestrates content, assets, and rendering |
//! | [`pipeline`] | Image asset pipeline: discover, copy originals, derive tiers |
//! | [`imaging`] | Pure calculations plus the JPEG decode/resize/encode codec |
//! | [`layout`] | Output tier directory layout and derived file naming |
//! | [`content`] | Markdown pages, concert calendar, and album list loading |
//! | [`render`] | Maud HTML templates for every generated page |
//! | [`config`] | Optional `site.toml` loading and validation |
//! | [`output`] | CLI output formatting — phase lines, warnings, summary |
//!
//! # Design Decisions
//!
//! ## Originals Are Sacred
//!
//! Every gallery source is copied byte-for-byte into `original/` before any
//! derivation is attempted, and a failed derivation only degrades that file's
//! gallery URLs back to the original copy. A corrupt photo can never lose
//! data or abort the batch; a failed *copy* aborts the build, because then
//! the output would silently miss a file.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system, rather than a runtime template engine. Malformed HTML
//! is a build error, interpolation is auto-escaped, and there is no template
//! directory to ship or get out of sync.
//!
//! ## Pure-Rust Imaging
//!
//! The [`imaging`] module uses the `image` crate (Lanczos3 resampling, JPEG
//! encoding) — pure Rust, no ImageMagick or libvips to install. The binary
//! is fully self-contained.
//!
//! ## Sequential Pipeline
//!
//! Images are processed one at a time, in sorted order. Gallery batches are
//! small, the ordering makes logs and outputs reproducible, and there is no
//! thread pool to configure or debug.

pub mod config;
pub mod content;
pub mod imaging;
pub mod layout;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod site;

#[cfg(test)]
pub(crate) mod test_helpers;
