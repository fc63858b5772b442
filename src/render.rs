//! HTML page rendering.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping; the only
//! [`PreEscaped`] content is HTML already rendered from markdown.
//!
//! ## Generated Pages
//!
//! - **Homepage** (`/index.html`): upcoming shows, discography, gallery strip
//! - **Content pages** (`/{slug}/index.html`): one per markdown file
//! - **Shows page** (`/shows/index.html`): upcoming and past, latest first
//! - **Albums page** (`/albums/index.html`): full discography
//!
//! Pages rendered into a subdirectory receive `base = ".."` so relative
//! asset URLs resolve from one level down.

use crate::config::SiteConfig;
use crate::content::{Album, Concert, Page};
use crate::pipeline::AssetRecord;
use chrono::Datelike;
use maud::{DOCTYPE, Markup, PreEscaped, html};

/// Shared context for every rendered page.
pub struct PageContext<'a> {
    pub config: &'a SiteConfig,
    pub nav_pages: &'a [Page],
    /// Relative prefix back to the site root: `""` at the root, `".."` one
    /// level down.
    pub base: &'a str,
}

impl PageContext<'_> {
    /// Resolve a root-relative path against this page's base prefix.
    fn href(&self, path: &str) -> String {
        if self.base.is_empty() {
            path.to_string()
        } else {
            format!("{}/{}", self.base, path)
        }
    }
}

/// Renders the base HTML document structure.
fn base_document(ctx: &PageContext, title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href=(ctx.href("static/style.css"));
            }
            body {
                (site_header(ctx))
                main { (content) }
                (site_footer())
            }
        }
    }
}

/// Renders the site header with title and navigation.
fn site_header(ctx: &PageContext) -> Markup {
    html! {
        header.site-header {
            a.site-title href=(ctx.href("index.html")) { (ctx.config.site.title) }
            nav.site-nav {
                ul {
                    @for page in ctx.nav_pages {
                        li {
                            a href=(ctx.href(&format!("{}/index.html", page.slug))) {
                                (page.title)
                            }
                        }
                    }
                    li { a href=(ctx.href("shows/index.html")) { "Shows" } }
                    li { a href=(ctx.href("albums/index.html")) { "Albums" } }
                }
            }
        }
    }
}

fn site_footer() -> Markup {
    let year = chrono::Local::now().year();
    html! {
        footer.site-footer {
            p { "© " (year) }
        }
    }
}

/// One row in a concert listing.
fn concert_row(concert: &Concert) -> Markup {
    html! {
        li.concert {
            span.concert-date { (concert.date_display) }
            span.concert-venue { (concert.venue) }
            @if !concert.city.is_empty() {
                span.concert-city { (concert.city) }
            }
            @if let Some(tickets) = &concert.tickets {
                a.concert-tickets href=(tickets) { "Tickets" }
            }
        }
    }
}

fn album_card(album: &Album, ctx: &PageContext) -> Markup {
    html! {
        li.album {
            @if let Some(cover) = &album.cover {
                img.album-cover src=(ctx.href(cover)) alt=(album.title);
            }
            span.album-title { (album.title) }
            @if let Some(year) = album.year {
                span.album-year { (year) }
            }
            @if let Some(url) = &album.url {
                a.album-link href=(url) { "Listen" }
            }
        }
    }
}

/// A linked gallery thumbnail: thumb image pointing at the large tier.
fn photo_thumb(asset: &AssetRecord, ctx: &PageContext) -> Markup {
    html! {
        li.photo {
            a href=(ctx.href(&asset.resized_url)) {
                img src=(ctx.href(&asset.thumb_url)) alt=(asset.display_name) loading="lazy";
            }
        }
    }
}

/// Renders the homepage: upcoming shows, discography, gallery strip.
pub fn render_index(
    ctx: &PageContext,
    concerts: &[Concert],
    albums: &[Album],
    photos: &[AssetRecord],
) -> Markup {
    let content = html! {
        @if !concerts.is_empty() {
            section.upcoming {
                h2 { "Upcoming shows" }
                ul.concert-list {
                    @for concert in concerts { (concert_row(concert)) }
                }
            }
        }
        @if !albums.is_empty() {
            section.discography {
                h2 { "Albums" }
                ul.album-list {
                    @for album in albums { (album_card(album, ctx)) }
                }
            }
        }
        @if !photos.is_empty() {
            section.gallery {
                h2 { "Photos" }
                ul.photo-grid {
                    @for asset in photos { (photo_thumb(asset, ctx)) }
                }
            }
        }
    };
    base_document(ctx, &ctx.config.site.title, content)
}

/// Renders a markdown content page.
pub fn render_page(ctx: &PageContext, page: &Page) -> Markup {
    let content = html! {
        article.page {
            (PreEscaped(&page.html))
        }
    };
    let title = format!("{} — {}", page.title, ctx.config.site.title);
    base_document(ctx, &title, content)
}

/// Renders the shows page with upcoming and past sections.
pub fn render_shows(ctx: &PageContext, upcoming: &[Concert], past: &[Concert]) -> Markup {
    let content = html! {
        h1 { "Shows" }
        section.upcoming {
            h2 { "Upcoming" }
            @if upcoming.is_empty() {
                p.empty { "No shows announced." }
            } @else {
                ul.concert-list {
                    @for concert in upcoming { (concert_row(concert)) }
                }
            }
        }
        @if !past.is_empty() {
            section.past {
                h2 { "Past" }
                ul.concert-list {
                    @for concert in past { (concert_row(concert)) }
                }
            }
        }
    };
    let title = format!("Shows — {}", ctx.config.site.title);
    base_document(ctx, &title, content)
}

/// Renders the albums/discography page.
pub fn render_albums(ctx: &PageContext, albums: &[Album]) -> Markup {
    let content = html! {
        h1 { "Albums" }
        @if albums.is_empty() {
            p.empty { "Nothing released yet." }
        } @else {
            ul.album-list {
                @for album in albums { (album_card(album, ctx)) }
            }
        }
        @for album in albums {
            @if let Some(description) = &album.description {
                section.album-notes {
                    h2 { (album.title) }
                    p { (description) }
                }
            }
        }
    };
    let title = format!("Albums — {}", ctx.config.site.title);
    base_document(ctx, &title, content)
}
