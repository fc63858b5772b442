//! Site configuration module.
//!
//! Handles loading and validating the optional `site.toml` at the source
//! root. All options have stock defaults, so a site with no config file
//! builds with the conventional widths and qualities.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "bandstand"       # Site title used in page <title> and header
//! homepage_shows = 5        # Upcoming shows listed on the homepage
//! homepage_photos = 6       # Gallery thumbnails shown on the homepage
//!
//! [images]
//! resized_width = 1600      # Width cap for the large derived tier
//! thumb_width = 400         # Width cap for thumbnails
//! resized_quality = 88      # JPEG quality for the large tier (1-100)
//! thumb_quality = 85        # JPEG quality for thumbnails (1-100)
//! extensions = ["jpg", "jpeg", "png", "webp", "gif"]
//! ```
//!
//! Config files are sparse — override just the values you want. Unknown keys
//! are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `site.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site identity and homepage layout.
    pub site: SiteSection,
    /// Derived image generation settings.
    pub images: ImagesConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let img = &self.images;
        if img.resized_width == 0 || img.thumb_width == 0 {
            return Err(ConfigError::Validation(
                "images widths must be non-zero".into(),
            ));
        }
        if img.thumb_width >= img.resized_width {
            return Err(ConfigError::Validation(
                "images.thumb_width must be smaller than images.resized_width".into(),
            ));
        }
        if !(1..=100).contains(&img.resized_quality) || !(1..=100).contains(&img.thumb_quality) {
            return Err(ConfigError::Validation(
                "images qualities must be 1-100".into(),
            ));
        }
        if img.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "images.extensions must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Site identity and homepage layout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Title shown in the page header and `<title>`.
    pub title: String,
    /// How many upcoming shows the homepage lists.
    pub homepage_shows: usize,
    /// How many gallery thumbnails the homepage shows.
    pub homepage_photos: usize,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: "bandstand".to_string(),
            homepage_shows: 5,
            homepage_photos: 6,
        }
    }
}

/// Derived image generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    /// Width cap in pixels for the large derived tier.
    pub resized_width: u32,
    /// Width cap in pixels for thumbnails.
    pub thumb_width: u32,
    /// JPEG quality for the large tier (1-100).
    pub resized_quality: u8,
    /// JPEG quality for thumbnails (1-100).
    pub thumb_quality: u8,
    /// Accepted source file extensions, matched case-insensitively.
    pub extensions: Vec<String>,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            resized_width: 1600,
            thumb_width: 400,
            resized_quality: 88,
            thumb_quality: 85,
            extensions: ["jpg", "jpeg", "png", "webp", "gif"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Load `site.toml` from the source root, falling back to defaults when the
/// file does not exist.
pub fn load_config(source_root: &Path) -> Result<SiteConfig, ConfigError> {
    let path = source_root.join("site.toml");
    let config = if path.exists() {
        let raw = fs::read_to_string(&path)?;
        toml::from_str(&raw)?
    } else {
        SiteConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// A documented stock `site.toml` with every option at its default.
pub fn stock_config_toml() -> String {
    let defaults = SiteSection::default();
    let images = ImagesConfig::default();
    format!(
        r#"# bandstand site configuration
# All options are optional - defaults shown below.

[site]
title = "{title}"
homepage_shows = {shows}
homepage_photos = {photos}

[images]
resized_width = {rw}
thumb_width = {tw}
resized_quality = {rq}
thumb_quality = {tq}
extensions = ["jpg", "jpeg", "png", "webp", "gif"]
"#,
        title = defaults.title,
        shows = defaults.homepage_shows,
        photos = defaults.homepage_photos,
        rw = images.resized_width,
        tw = images.thumb_width,
        rq = images.resized_quality,
        tq = images.thumb_quality,
    )
}
