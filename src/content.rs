//! Content loading: Markdown pages and YAML concert/album lists.
//!
//! Everything under `content/` is opaque data for rendering — these loaders
//! parse it, derive display fields, and sort it; they never touch images.
//!
//! ## Layout
//!
//! ```text
//! content/
//! ├── pages/
//! │   ├── about.md             # Page — YAML front matter + markdown body
//! │   └── contact.md
//! ├── concerts.yaml            # List of shows, split into upcoming/past
//! └── albums.yaml              # Discography, newest first
//! ```
//!
//! Missing files are a valid empty state, not an error. YAML lists may be
//! bare sequences or wrapped in a `concerts:`/`albums:` key.

use chrono::NaiveDate;
use pulldown_cmark::{Parser, html as md_html};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

/// A page generated from a markdown file under `content/pages/`.
#[derive(Debug, Clone)]
pub struct Page {
    /// URL slug (the file stem); pages render to `<slug>/index.html`.
    pub slug: String,
    /// Title from front matter, or the file stem as fallback.
    pub title: String,
    /// Markdown body rendered to HTML.
    pub html: String,
}

/// A show loaded from `concerts.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Concert {
    /// `YYYY-MM-DD`. Unparseable dates sort as past and display verbatim.
    pub date: String,
    pub venue: String,
    pub city: String,
    pub url: Option<String>,
    pub tickets: Option<String>,
    /// Formatted as `07 Mar 2026`; derived, never read from YAML.
    #[serde(skip)]
    pub date_display: String,
}

/// A release loaded from `albums.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Album {
    pub title: String,
    /// `YYYY-MM-DD` or just `YYYY`; sort key, newest first.
    pub date: String,
    pub cover: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    /// Release year derived from the first four date characters.
    #[serde(skip)]
    pub year: Option<i32>,
}

/// YAML files accept either a bare list or a single wrapping key.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListFile<T> {
    Wrapped(std::collections::BTreeMap<String, Vec<T>>),
    Bare(Vec<T>),
}

impl<T> ListFile<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            ListFile::Bare(items) => items,
            ListFile::Wrapped(map) => map.into_values().next().unwrap_or_default(),
        }
    }
}

/// Parse `YYYY-MM-DD`, tolerating trailing text (timestamps, whitespace).
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let head = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// Format `YYYY-MM-DD` as `07 Mar 2026`; unparseable input passes through.
pub fn format_date_display(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    match parse_date(raw) {
        Some(date) => date.format("%d %b %Y").to_string(),
        None => raw.to_string(),
    }
}

/// Render a markdown string to HTML.
pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut html = String::new();
    md_html::push_html(&mut html, parser);
    html
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FrontMatter {
    title: Option<String>,
}

/// Split a `---`-delimited YAML front matter block from a markdown body.
///
/// Returns `(None, full_text)` when there is no well-formed block.
fn split_front_matter(raw: &str) -> (Option<&str>, &str) {
    let Some(rest) = raw.strip_prefix("---") else {
        return (None, raw);
    };
    let Some(rest) = rest.strip_prefix('\n').or_else(|| rest.strip_prefix("\r\n")) else {
        return (None, raw);
    };
    for (idx, _) in rest.match_indices("\n---") {
        let after = &rest[idx + 4..];
        let after = after.strip_prefix('\r').unwrap_or(after);
        if after.is_empty() || after.starts_with('\n') {
            let body = after.strip_prefix('\n').unwrap_or(after);
            return (Some(&rest[..idx]), body);
        }
    }
    (None, raw)
}

/// Load all markdown pages from a directory, sorted by file name.
pub fn load_pages(pages_dir: &Path) -> Result<Vec<Page>, ContentError> {
    if !pages_dir.exists() {
        return Ok(Vec::new());
    }

    let mut paths: Vec<_> = fs::read_dir(pages_dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && p.extension()
                    .map(|e| e.eq_ignore_ascii_case("md"))
                    .unwrap_or(false)
        })
        .collect();
    paths.sort();

    let mut pages = Vec::new();
    for path in &paths {
        let raw = fs::read_to_string(path)?;
        let (front, body) = split_front_matter(&raw);

        // Malformed front matter falls back to treating the whole file as body
        let (meta, body) = match front.map(serde_yaml_ng::from_str::<FrontMatter>) {
            Some(Ok(meta)) => (meta, body),
            Some(Err(_)) => (FrontMatter::default(), raw.as_str()),
            None => (FrontMatter::default(), body),
        };

        let slug = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        pages.push(Page {
            title: meta.title.unwrap_or_else(|| slug.clone()),
            html: markdown_to_html(body),
            slug,
        });
    }
    Ok(pages)
}

/// Load concerts and split them around `today`.
///
/// Upcoming shows (date on or after `today`) come back soonest first; past
/// shows latest first. Both are tie-broken by venue. A `url` is promoted to
/// `tickets` when no explicit ticket link exists.
pub fn load_concerts(
    path: &Path,
    today: NaiveDate,
) -> Result<(Vec<Concert>, Vec<Concert>), ContentError> {
    if !path.exists() {
        return Ok((Vec::new(), Vec::new()));
    }
    let raw = fs::read_to_string(path)?;
    let file: ListFile<Concert> = serde_yaml_ng::from_str(&raw)?;

    let mut upcoming = Vec::new();
    let mut past = Vec::new();
    for mut concert in file.into_items() {
        concert.date_display = format_date_display(&concert.date);
        if concert.tickets.is_none() {
            concert.tickets = concert.url.clone();
        }
        match parse_date(&concert.date) {
            Some(date) if date >= today => upcoming.push(concert),
            _ => past.push(concert),
        }
    }

    upcoming.sort_by(|a, b| (&a.date, &a.venue).cmp(&(&b.date, &b.venue)));
    past.sort_by(|a, b| (&b.date, &b.venue).cmp(&(&a.date, &a.venue)));
    Ok((upcoming, past))
}

/// Load albums sorted newest first, with display years derived.
pub fn load_albums(path: &Path) -> Result<Vec<Album>, ContentError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let raw = fs::read_to_string(path)?;
    let file: ListFile<Album> = serde_yaml_ng::from_str(&raw)?;

    let mut albums = file.into_items();
    for album in &mut albums {
        album.year = album.date.get(..4).and_then(|y| y.parse().ok());
    }
    albums.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(albums)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    // =========================================================================
    // Date formatting
    // =========================================================================

    #[test]
    fn date_display_format() {
        assert_eq!(format_date_display("2026-03-07"), "07 Mar 2026");
        assert_eq!(format_date_display("2026-11-21"), "21 Nov 2026");
    }

    #[test]
    fn date_display_tolerates_trailing_text() {
        assert_eq!(format_date_display("2026-03-07 20:00"), "07 Mar 2026");
        assert_eq!(format_date_display("  2026-03-07  "), "07 Mar 2026");
    }

    #[test]
    fn date_display_passes_through_garbage() {
        assert_eq!(format_date_display("TBA"), "TBA");
        assert_eq!(format_date_display(""), "");
    }

    // =========================================================================
    // Front matter
    // =========================================================================

    #[test]
    fn front_matter_split() {
        let (front, body) = split_front_matter("---\ntitle: About\n---\n# Hi\n");
        assert_eq!(front, Some("title: About"));
        assert_eq!(body, "# Hi\n");
    }

    #[test]
    fn no_front_matter() {
        let (front, body) = split_front_matter("# Just markdown\n");
        assert_eq!(front, None);
        assert_eq!(body, "# Just markdown\n");
    }

    #[test]
    fn unterminated_front_matter_is_body() {
        let raw = "---\ntitle: broken\nno closing fence";
        let (front, body) = split_front_matter(raw);
        assert_eq!(front, None);
        assert_eq!(body, raw);
    }

    #[test]
    fn crlf_front_matter() {
        let (front, body) = split_front_matter("---\r\ntitle: About\r\n---\r\nbody\r\n");
        assert_eq!(front, Some("title: About\r"));
        assert_eq!(body, "body\r\n");
    }

    // =========================================================================
    // Pages
    // =========================================================================

    #[test]
    fn pages_missing_dir_is_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(load_pages(&tmp.path().join("pages")).unwrap().is_empty());
    }

    #[test]
    fn pages_load_sorted_with_titles() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("about.md"),
            "---\ntitle: About Us\n---\nWe play loud.\n",
        )
        .unwrap();
        std::fs::write(tmp.path().join("contact.md"), "Email us.\n").unwrap();
        std::fs::write(tmp.path().join("notes.txt"), "ignored").unwrap();

        let pages = load_pages(tmp.path()).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].slug, "about");
        assert_eq!(pages[0].title, "About Us");
        assert!(pages[0].html.contains("We play loud."));
        // No front matter — title falls back to the stem
        assert_eq!(pages[1].title, "contact");
    }

    #[test]
    fn page_with_bad_yaml_front_matter_keeps_full_text() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("odd.md"),
            "---\ntitle: [unclosed\n---\nbody text\n",
        )
        .unwrap();
        let pages = load_pages(tmp.path()).unwrap();
        assert_eq!(pages[0].title, "odd");
        // The fence itself survives into the body when YAML fails to parse
        assert!(pages[0].html.contains("body text"));
    }

    // =========================================================================
    // Concerts
    // =========================================================================

    const CONCERTS: &str = "\
concerts:
  - date: 2026-09-01
    venue: Paradiso
    city: Amsterdam
    url: https://example.com/p
  - date: 2026-10-01
    venue: Vera
    city: Groningen
    tickets: https://example.com/v
  - date: 2025-05-01
    venue: Melkweg
    city: Amsterdam
  - date: 2025-06-01
    venue: Ekko
    city: Utrecht
";

    #[test]
    fn concerts_split_and_sorted() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("concerts.yaml");
        std::fs::write(&path, CONCERTS).unwrap();

        let (upcoming, past) = load_concerts(&path, date("2026-08-25")).unwrap();
        let up: Vec<&str> = upcoming.iter().map(|c| c.venue.as_str()).collect();
        let pa: Vec<&str> = past.iter().map(|c| c.venue.as_str()).collect();
        assert_eq!(up, vec!["Paradiso", "Vera"]);
        assert_eq!(pa, vec!["Ekko", "Melkweg"]);
        assert_eq!(upcoming[0].date_display, "01 Sep 2026");
    }

    #[test]
    fn concert_on_today_is_upcoming() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("concerts.yaml");
        std::fs::write(&path, "- date: 2026-08-25\n  venue: Tonight\n").unwrap();
        let (upcoming, past) = load_concerts(&path, date("2026-08-25")).unwrap();
        assert_eq!(upcoming.len(), 1);
        assert!(past.is_empty());
    }

    #[test]
    fn url_promoted_to_tickets() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("concerts.yaml");
        std::fs::write(&path, CONCERTS).unwrap();

        let (upcoming, _) = load_concerts(&path, date("2026-08-25")).unwrap();
        assert_eq!(upcoming[0].tickets.as_deref(), Some("https://example.com/p"));
        // An explicit tickets link is not overwritten
        assert_eq!(upcoming[1].tickets.as_deref(), Some("https://example.com/v"));
    }

    #[test]
    fn dateless_concert_lands_in_past_with_verbatim_display() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("concerts.yaml");
        std::fs::write(&path, "- venue: Mystery\n  date: TBA\n").unwrap();
        let (upcoming, past) = load_concerts(&path, date("2026-08-25")).unwrap();
        assert!(upcoming.is_empty());
        assert_eq!(past[0].date_display, "TBA");
    }

    #[test]
    fn concerts_accept_bare_list() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("concerts.yaml");
        std::fs::write(&path, "- date: 2099-01-01\n  venue: Future\n").unwrap();
        let (upcoming, _) = load_concerts(&path, date("2026-08-25")).unwrap();
        assert_eq!(upcoming[0].venue, "Future");
    }

    #[test]
    fn concerts_missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let (upcoming, past) =
            load_concerts(&tmp.path().join("concerts.yaml"), date("2026-08-25")).unwrap();
        assert!(upcoming.is_empty() && past.is_empty());
    }

    // =========================================================================
    // Albums
    // =========================================================================

    #[test]
    fn albums_newest_first_with_years() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("albums.yaml");
        std::fs::write(
            &path,
            "albums:\n  - title: First\n    date: 2019-04-01\n  - title: Second\n    date: 2023-10-15\n",
        )
        .unwrap();

        let albums = load_albums(&path).unwrap();
        assert_eq!(albums[0].title, "Second");
        assert_eq!(albums[0].year, Some(2023));
        assert_eq!(albums[1].year, Some(2019));
    }

    #[test]
    fn album_without_date_has_no_year_and_sorts_last() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("albums.yaml");
        std::fs::write(&path, "- title: Demo\n- title: LP\n  date: 2020-01-01\n").unwrap();

        let albums = load_albums(&path).unwrap();
        assert_eq!(albums[0].title, "LP");
        assert_eq!(albums[1].year, None);
    }
}
