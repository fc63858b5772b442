//! The build driver: one full site build, start to finish.
//!
//! ## Source Layout
//!
//! ```text
//! site/
//! ├── site.toml            # Optional configuration
//! ├── content/
//! │   ├── pages/*.md       # Content pages
//! │   ├── concerts.yaml
//! │   └── albums.yaml
//! ├── photos/              # Gallery sources → dist/photos/{original,1600,thumb}
//! ├── images/              # Banner/artwork sources → dist/images/...
//! └── static/              # Copied verbatim → dist/static/
//! ```
//!
//! Every build is clean-room: the output root is deleted and recreated, so
//! no stale file survives a prior run. An interrupted build leaves a partial
//! tree behind; the next run replaces it wholesale. There is no incremental
//! mode.
//!
//! Per-file image derivation failures degrade to the original copy and are
//! reported as warnings. Everything else — an uncreatable output root, a
//! failed original copy, a render write error — aborts the build.

use crate::config::{self, ConfigError, SiteConfig};
use crate::content::{self, ContentError};
use crate::imaging::JpegCodec;
use crate::output;
use crate::pipeline::{self, AssetRecord, ImagePipelineConfig, PipelineError};
use crate::render::{self, PageContext};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Content error: {0}")]
    Content(#[from] ContentError),
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),
}

/// Counts reported after a completed build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub pages: usize,
    pub photos: usize,
    pub images: usize,
    pub warnings: usize,
}

/// Build the whole site from `source_root` into `output_root`.
pub fn build(source_root: &Path, output_root: &Path) -> Result<BuildSummary, BuildError> {
    let config = config::load_config(source_root)?;

    // Clean-room: recreate the output root before anything is written
    if output_root.exists() {
        fs::remove_dir_all(output_root)?;
    }
    fs::create_dir_all(output_root)?;

    output::print_phase("Loading content");
    let content_dir = source_root.join("content");
    let pages = content::load_pages(&content_dir.join("pages"))?;
    let today = chrono::Local::now().date_naive();
    let (upcoming, past) = content::load_concerts(&content_dir.join("concerts.yaml"), today)?;
    let albums = content::load_albums(&content_dir.join("albums.yaml"))?;

    let static_dir = source_root.join("static");
    if static_dir.exists() {
        output::print_phase("Copying static/");
        copy_dir_recursive(&static_dir, &output_root.join("static"))?;
    }

    let codec = JpegCodec::new();
    let pipeline_config = ImagePipelineConfig::from_site_config(&config);

    output::print_phase("Processing photos");
    let photo_report = pipeline::process_images(
        &codec,
        &source_root.join("photos"),
        &output_root.join("photos"),
        "photos",
        &pipeline_config,
    )?;
    output::print_derive_warnings(&photo_report.warnings);

    output::print_phase("Processing images");
    let image_report = pipeline::process_images(
        &codec,
        &source_root.join("images"),
        &output_root.join("images"),
        "images",
        &pipeline_config,
    )?;
    output::print_derive_warnings(&image_report.warnings);

    render_site(
        output_root,
        &config,
        &pages,
        &upcoming,
        &past,
        &albums,
        &photo_report.assets,
    )?;

    Ok(BuildSummary {
        pages: pages.len(),
        photos: photo_report.assets.len(),
        images: image_report.assets.len(),
        warnings: photo_report.warnings.len() + image_report.warnings.len(),
    })
}

/// Validate a source tree without writing anything: load config and content,
/// enumerate photo and image sources.
pub fn check(source_root: &Path) -> Result<BuildSummary, BuildError> {
    let config = config::load_config(source_root)?;
    let content_dir = source_root.join("content");
    let pages = content::load_pages(&content_dir.join("pages"))?;
    let today = chrono::Local::now().date_naive();
    content::load_concerts(&content_dir.join("concerts.yaml"), today)?;
    content::load_albums(&content_dir.join("albums.yaml"))?;

    let pipeline_config = ImagePipelineConfig::from_site_config(&config);
    let photos = pipeline::discover(&source_root.join("photos"), &pipeline_config)?;
    let images = pipeline::discover(&source_root.join("images"), &pipeline_config)?;

    Ok(BuildSummary {
        pages: pages.len(),
        photos: photos.len(),
        images: images.len(),
        warnings: 0,
    })
}

fn render_site(
    output_root: &Path,
    config: &SiteConfig,
    pages: &[content::Page],
    upcoming: &[content::Concert],
    past: &[content::Concert],
    albums: &[content::Album],
    photos: &[AssetRecord],
) -> Result<(), BuildError> {
    let root_ctx = PageContext {
        config,
        nav_pages: pages,
        base: "",
    };
    let sub_ctx = PageContext {
        config,
        nav_pages: pages,
        base: "..",
    };

    output::print_phase("Writing index.html");
    let shown_concerts = &upcoming[..upcoming.len().min(config.site.homepage_shows)];
    let shown_photos = &photos[..photos.len().min(config.site.homepage_photos)];
    let index = render::render_index(&root_ctx, shown_concerts, albums, shown_photos);
    fs::write(output_root.join("index.html"), index.into_string())?;

    for page in pages {
        output::print_phase(&format!("Writing {}/index.html", page.slug));
        let page_dir = output_root.join(&page.slug);
        fs::create_dir_all(&page_dir)?;
        let html = render::render_page(&sub_ctx, page);
        fs::write(page_dir.join("index.html"), html.into_string())?;
    }

    output::print_phase("Writing shows/index.html");
    let shows_dir = output_root.join("shows");
    fs::create_dir_all(&shows_dir)?;
    let shows = render::render_shows(&sub_ctx, upcoming, past);
    fs::write(shows_dir.join("index.html"), shows.into_string())?;

    output::print_phase("Writing albums/index.html");
    let albums_dir = output_root.join("albums");
    fs::create_dir_all(&albums_dir)?;
    let albums_page = render::render_albums(&sub_ctx, albums);
    fs::write(albums_dir.join("index.html"), albums_page.into_string())?;

    Ok(())
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{create_test_jpeg, scaffold_site};
    use tempfile::TempDir;

    #[test]
    fn build_on_empty_source_still_produces_site_shell() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("site");
        fs::create_dir_all(&source).unwrap();
        let out = tmp.path().join("dist");

        let summary = build(&source, &out).unwrap();
        assert_eq!(summary, BuildSummary::default());
        assert!(out.join("index.html").exists());
        assert!(out.join("shows/index.html").exists());
        assert!(out.join("albums/index.html").exists());
        // No gallery sources — no asset trees
        assert!(!out.join("photos").exists());
    }

    #[test]
    fn rebuild_removes_stale_files() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("site");
        fs::create_dir_all(&source).unwrap();
        let out = tmp.path().join("dist");

        fs::create_dir_all(&out).unwrap();
        fs::write(out.join("stale.html"), "old").unwrap();

        build(&source, &out).unwrap();
        assert!(!out.join("stale.html").exists());
        assert!(out.join("index.html").exists());
    }

    #[test]
    fn check_counts_without_writing() {
        let tmp = TempDir::new().unwrap();
        let source = scaffold_site(tmp.path());
        create_test_jpeg(&source.join("photos/a.jpg"), 60, 40);

        let summary = check(&source).unwrap();
        assert_eq!(summary.pages, 1);
        assert_eq!(summary.photos, 1);
        assert!(!tmp.path().join("dist").exists());
    }

    #[test]
    fn static_dir_is_copied_verbatim() {
        let tmp = TempDir::new().unwrap();
        let source = tmp.path().join("site");
        fs::create_dir_all(source.join("static/fonts")).unwrap();
        fs::write(source.join("static/style.css"), "body {}").unwrap();
        fs::write(source.join("static/fonts/a.woff2"), "font").unwrap();

        let out = tmp.path().join("dist");
        build(&source, &out).unwrap();
        assert_eq!(fs::read_to_string(out.join("static/style.css")).unwrap(), "body {}");
        assert!(out.join("static/fonts/a.woff2").exists());
    }
}
