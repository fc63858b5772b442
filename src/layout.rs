//! Destination layout for derived photo assets.
//!
//! Every processed source root gets three sibling tiers under its destination
//! root, each mirroring the source's subdirectory structure:
//!
//! ```text
//! dist/photos/
//! ├── original/           # byte-for-byte copies of the sources
//! │   └── live/a.png
//! ├── 1600/               # width-capped JPEG re-encodes
//! │   └── live/a-1600.jpg
//! └── thumb/
//!     └── live/a-thumb.jpg
//! ```
//!
//! Derived filenames append the tier suffix before forcing a `.jpg`
//! extension, so two distinct source paths can never collide.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Directory name for untouched source copies.
pub const ORIGINAL_DIR: &str = "original";
/// Directory name for thumbnails.
pub const THUMB_DIR: &str = "thumb";

/// Maps source-relative paths to the three tier destinations.
#[derive(Debug, Clone)]
pub struct AssetLayout {
    dest_root: PathBuf,
    resized_width: u32,
}

/// Destination paths for one source file, absolute and tier-relative.
///
/// The `*_rel` strings use forward slashes and include the tier directory
/// (`original/live/a.png`), ready for URL composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierPaths {
    pub original: PathBuf,
    pub resized: PathBuf,
    pub thumb: PathBuf,
    pub original_rel: String,
    pub resized_rel: String,
    pub thumb_rel: String,
}

/// Render a relative path with forward slashes for URLs and captions.
pub fn to_url_path(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

impl AssetLayout {
    pub fn new(dest_root: &Path, resized_width: u32) -> Self {
        Self {
            dest_root: dest_root.to_path_buf(),
            resized_width,
        }
    }

    /// The resized tier directory is named after its pixel cap, e.g. `1600`.
    pub fn resized_dir(&self) -> String {
        self.resized_width.to_string()
    }

    /// Create the three tier root directories. Idempotent.
    pub fn ensure_tier_roots(&self) -> io::Result<()> {
        fs::create_dir_all(self.dest_root.join(ORIGINAL_DIR))?;
        fs::create_dir_all(self.dest_root.join(self.resized_dir()))?;
        fs::create_dir_all(self.dest_root.join(THUMB_DIR))?;
        Ok(())
    }

    /// Resolve the three destination paths for a source-relative file,
    /// creating any missing parent directories. Repeated calls with the same
    /// path do not error.
    pub fn tier_paths(&self, rel: &Path) -> io::Result<TierPaths> {
        let subdir = rel.parent().unwrap_or(Path::new(""));
        let stem = rel
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let resized_name = format!("{}-{}.jpg", stem, self.resized_width);
        let thumb_name = format!("{}-thumb.jpg", stem);

        let original = self.dest_root.join(ORIGINAL_DIR).join(rel);
        let resized = self
            .dest_root
            .join(self.resized_dir())
            .join(subdir)
            .join(&resized_name);
        let thumb = self.dest_root.join(THUMB_DIR).join(subdir).join(&thumb_name);

        for path in [&original, &resized, &thumb] {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
        }

        let sub_url = to_url_path(subdir);
        let prefix = if sub_url.is_empty() {
            String::new()
        } else {
            format!("{}/", sub_url)
        };

        Ok(TierPaths {
            original,
            resized,
            thumb,
            original_rel: format!("{}/{}", ORIGINAL_DIR, to_url_path(rel)),
            resized_rel: format!("{}/{}{}", self.resized_dir(), prefix, resized_name),
            thumb_rel: format!("{}/{}{}", THUMB_DIR, prefix, thumb_name),
        })
    }
}
