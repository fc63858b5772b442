//! Shared test utilities for the bandstand test suite.
//!
//! Synthetic image writers plus a minimal site scaffold. Tests get isolated
//! trees under a caller-owned temp directory they can mutate freely.

use image::{ImageEncoder, RgbImage, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};

/// Create a small valid JPEG file with the given dimensions.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Create a small valid PNG with an alpha channel.
pub fn create_test_png_rgba(path: &Path, width: u32, height: u32) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let img = RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([(x % 256) as u8, (y % 256) as u8, 64, 200])
    });
    img.save(path).unwrap();
}

/// Scaffold a minimal site source tree: one page, concerts, albums, and the
/// photo/static directories. Returns the source root.
pub fn scaffold_site(dir: &Path) -> PathBuf {
    let source = dir.join("site");
    fs::create_dir_all(source.join("content/pages")).unwrap();
    fs::create_dir_all(source.join("photos")).unwrap();
    fs::create_dir_all(source.join("static")).unwrap();

    fs::write(
        source.join("content/pages/about.md"),
        "---\ntitle: About\n---\nWe are a band.\n",
    )
    .unwrap();
    fs::write(
        source.join("content/concerts.yaml"),
        "concerts:\n  - date: 2099-06-01\n    venue: Paradiso\n    city: Amsterdam\n  - date: 2020-01-15\n    venue: Vera\n    city: Groningen\n",
    )
    .unwrap();
    fs::write(
        source.join("content/albums.yaml"),
        "albums:\n  - title: First LP\n    date: 2021-03-01\n",
    )
    .unwrap();
    fs::write(source.join("static/style.css"), "body { margin: 0; }\n").unwrap();

    source
}
