//! Photo and image asset pipeline.
//!
//! Walks a source directory of photographs, copies every accepted file into
//! the `original/` tier, derives a width-capped JPEG and a thumbnail for
//! each, and returns one [`AssetRecord`] per source file for page rendering.
//!
//! ## Ordering
//!
//! Files are enumerated recursively and then sorted by their path relative
//! to the source root, so repeated builds from unchanged input produce an
//! identical record sequence. Platform traversal order is never trusted.
//!
//! ## Failure model
//!
//! Per-file processing moves through a fixed sequence: the original is
//! copied first, then both derived encodings are attempted. When decode or
//! encode fails (corrupt file, zero-width image), the failure becomes a
//! warning in the report, the record's derived URLs fall back to the
//! original copy, and the batch continues — a single bad photo never aborts
//! the build. Filesystem errors (copying the original, writing derived
//! bytes, uncreatable directories) are fatal and propagate.

use crate::config::SiteConfig;
use crate::imaging::{CodecError, DeriveSpec, ImageCodec, Quality, TierSpec};
use crate::layout::{AssetLayout, to_url_path};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Configuration for the asset pipeline.
///
/// Defaults mirror [`SiteConfig`](crate::config::SiteConfig) stock values;
/// tests override them for small fixtures.
#[derive(Debug, Clone)]
pub struct ImagePipelineConfig {
    pub resized_width: u32,
    pub thumb_width: u32,
    pub resized_quality: u8,
    pub thumb_quality: u8,
    /// Accepted source extensions, lowercase, without the dot.
    pub extensions: Vec<String>,
}

impl ImagePipelineConfig {
    /// Build a pipeline config from site config values.
    pub fn from_site_config(config: &SiteConfig) -> Self {
        let img = &config.images;
        Self {
            resized_width: img.resized_width,
            thumb_width: img.thumb_width,
            resized_quality: img.resized_quality,
            thumb_quality: img.thumb_quality,
            extensions: img.extensions.iter().map(|e| e.to_lowercase()).collect(),
        }
    }

    fn derive_spec(&self) -> DeriveSpec {
        DeriveSpec {
            resized: TierSpec {
                max_width: self.resized_width,
                quality: Quality::new(self.resized_quality),
            },
            thumb: TierSpec {
                max_width: self.thumb_width,
                quality: Quality::new(self.thumb_quality),
            },
        }
    }

    /// Whether a path carries an accepted image extension (case-insensitive).
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .is_some_and(|ext| self.extensions.iter().any(|a| *a == ext))
    }
}

impl Default for ImagePipelineConfig {
    fn default() -> Self {
        Self::from_site_config(&SiteConfig::default())
    }
}

/// One processed source image, consumed by page rendering.
///
/// `resized_url` and `thumb_url` equal `original_url` when derivation
/// failed for this file — the untouched copy is the degraded fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRecord {
    pub original_url: String,
    pub resized_url: String,
    pub thumb_url: String,
    /// Source path relative to its root, forward slashes. Used as a caption.
    pub display_name: String,
}

/// A non-fatal per-file derivation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeriveWarning {
    pub file_name: String,
    pub message: String,
}

/// Ordered records plus the warnings accumulated while producing them.
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    pub assets: Vec<AssetRecord>,
    pub warnings: Vec<DeriveWarning>,
}

/// Enumerate accepted source files under a root, sorted by relative path.
///
/// Returns an empty list when the root does not exist — a missing gallery
/// is a valid "no photos" state, not a failure.
pub fn discover(source_root: &Path, config: &ImagePipelineConfig) -> Result<Vec<PathBuf>, PipelineError> {
    if !source_root.exists() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(source_root) {
        let entry = entry?;
        if entry.file_type().is_file() && config.accepts(entry.path()) {
            let rel = entry.path().strip_prefix(source_root).unwrap();
            files.push(rel.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

/// Process every accepted image under `source_root` into `dest_root`.
///
/// Public asset URLs are composed from `url_prefix` plus the tier-relative
/// path, e.g. `photos/original/live/a.png`.
pub fn process_images(
    codec: &impl ImageCodec,
    source_root: &Path,
    dest_root: &Path,
    url_prefix: &str,
    config: &ImagePipelineConfig,
) -> Result<PipelineReport, PipelineError> {
    if !source_root.exists() {
        return Ok(PipelineReport::default());
    }
    let files = discover(source_root, config)?;

    let layout = AssetLayout::new(dest_root, config.resized_width);
    layout.ensure_tier_roots()?;

    let spec = config.derive_spec();
    let mut report = PipelineReport::default();

    for rel in &files {
        let source = source_root.join(rel);
        let tiers = layout.tier_paths(rel)?;

        // The original copy comes first and must succeed; it is the only
        // always-available data for a photo.
        fs::copy(&source, &tiers.original)?;
        copy_mtime(&source, &tiers.original);

        let original_url = format!("{}/{}", url_prefix, tiers.original_rel);

        let (resized_url, thumb_url) = match codec.derive(&source, &spec) {
            Ok(derived) => {
                fs::write(&tiers.resized, &derived.resized.bytes)?;
                fs::write(&tiers.thumb, &derived.thumb.bytes)?;
                (
                    format!("{}/{}", url_prefix, tiers.resized_rel),
                    format!("{}/{}", url_prefix, tiers.thumb_rel),
                )
            }
            Err(err) => {
                report.warnings.push(DeriveWarning {
                    file_name: file_name_of(rel),
                    message: err.to_string(),
                });
                (original_url.clone(), original_url.clone())
            }
        };

        report.assets.push(AssetRecord {
            original_url,
            resized_url,
            thumb_url,
            display_name: to_url_path(rel),
        });
    }

    Ok(report)
}

fn file_name_of(rel: &Path) -> String {
    rel.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Carry the source's modification time onto the copied original.
///
/// Best effort: timestamps are preserved where the platform allows, and a
/// failure here never affects the build.
fn copy_mtime(source: &Path, dest: &Path) {
    let Ok(meta) = fs::metadata(source) else {
        return;
    };
    let Ok(mtime) = meta.modified() else {
        return;
    };
    if let Ok(file) = fs::File::options().write(true).open(dest) {
        let _ = file.set_modified(mtime);
    }
}

// Trivial helper used by the build driver for error display.
impl DeriveWarning {
    pub fn message_line(&self) -> String {
        format!("could not process {}: {}", self.file_name, self.message)
    }
}
