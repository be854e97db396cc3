//! HTML rendering.
//!
//! All markup is built with [maud](https://maud.lambda.xyz/): templates are
//! plain Rust, interpolation is escaped by default, and only the markdown
//! body goes in unescaped.
//!
//! ## Pages
//!
//! - **Index**: site header followed by every post, newest first
//! - **Article** ([`LayoutKind::Default`]): header, title, formatted date, body
//! - **Gallery** ([`LayoutKind::Gallery`]): the post's images only, on a
//!   white, margin-free page
//! - **Not found**: shown for any route that doesn't resolve
//! - **Redirect**: sends an id route to a post's canonical url
//!
//! [`render_route`] is the single entry point for a navigation path. Unknown
//! post ids are turned into the not-found page here and never surface as
//! errors.

use crate::config::{self, SiteConfig};
use crate::layout::LayoutKind;
use crate::registry::Site;
use crate::route::Route;
use crate::types::Entry;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Options, Parser, html as md_html};

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Whether a route resolved to real content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    Found,
    NotFound,
}

#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub status: PageStatus,
    pub html: Markup,
}

impl RenderedPage {
    fn found(html: Markup) -> Self {
        Self {
            status: PageStatus::Found,
            html,
        }
    }

    fn not_found(html: Markup) -> Self {
        Self {
            status: PageStatus::NotFound,
            html,
        }
    }
}

/// Full stylesheet: color variables from config, then the static rules.
pub fn stylesheet(config: &SiteConfig) -> String {
    format!("{}\n\n{}", config::generate_color_css(&config.colors), CSS_STATIC)
}

/// Render whatever lives at a navigation path.
///
/// A post's canonical url wins over another post's id route, the same way
/// the generated site lays out its files.
pub fn render_route(site: &Site, path: &str) -> RenderedPage {
    let route = Route::parse(path, &site.config.blog.url_prefix);
    if route == Route::Home {
        return RenderedPage::found(render_index(site));
    }
    if let Ok(entry) = site.registry.resolve_url(path) {
        return RenderedPage::found(render_entry(site, entry));
    }
    match route {
        Route::Post(id) => render_post(site, &id),
        Route::Home | Route::Unknown(_) => {
            RenderedPage::not_found(render_not_found(site, Some(path)))
        }
    }
}

/// Render a post by id, or the not-found page if there is no such post.
pub fn render_post(site: &Site, id: &str) -> RenderedPage {
    match site.registry.resolve(id) {
        Ok(entry) => RenderedPage::found(render_entry(site, entry)),
        Err(_) => {
            let path = site.config.blog.route_for(id);
            RenderedPage::not_found(render_not_found(site, Some(&path)))
        }
    }
}

/// Render a resolved post with its declared layout.
pub fn render_entry(site: &Site, entry: &Entry) -> Markup {
    match entry.layout {
        LayoutKind::Default => render_article(site, entry),
        LayoutKind::Gallery => render_gallery(site, entry),
    }
}

/// Convert a markdown body to HTML.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);
    let parser = Parser::new_ext(markdown, options);
    let mut body_html = String::new();
    md_html::push_html(&mut body_html, parser);
    body_html
}

// ============================================================================
// HTML Components
// ============================================================================

fn base_document(
    config: &SiteConfig,
    title: &str,
    body_class: Option<&str>,
    content: Markup,
) -> Markup {
    let description = Some(config.site.description.as_str()).filter(|d| !d.is_empty());
    let author = Some(config.site.author.as_str()).filter(|a| !a.is_empty());
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                @if let Some(description) = description {
                    meta name="description" content=(description);
                }
                @if let Some(author) = author {
                    meta name="author" content=(author);
                }
                title { (title) }
                style { (PreEscaped(stylesheet(config))) }
            }
            body class=[body_class] {
                (content)
            }
        }
    }
}

/// Title, avatar, bio and external links.
pub fn site_header(config: &SiteConfig) -> Markup {
    let site = &config.site;
    html! {
        header.site-header {
            @if let Some(avatar) = &site.avatar {
                div {
                    img.avatar src={ "/" (avatar_filename(avatar)) } alt=(site.title);
                }
            }
            div {
                h1 { a href="/" { (site.title) } }
                @if !site.bio.is_empty() {
                    p.site-bio { (site.bio) }
                }
                @if !site.links.is_empty() {
                    nav.site-links {
                        @for link in &site.links {
                            a href=(link.url) { (link.label) }
                        }
                    }
                }
            }
        }
    }
}

/// The avatar is copied to the output root under its own filename.
pub fn avatar_filename(avatar: &str) -> &str {
    avatar.rsplit(['/', '\\']).next().unwrap_or(avatar)
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Listing page with every post, newest first.
pub fn render_index(site: &Site) -> Markup {
    let content = html! {
        (site_header(&site.config))
        main.index-page {
            @for metadata in site.registry.list_all() {
                div.post-item {
                    h2 { a href=(metadata.url) { (metadata.name) } }
                    p.post-date { (metadata.date) }
                }
            }
        }
    };
    base_document(&site.config, &site.config.site.title, None, content)
}

fn render_article(site: &Site, entry: &Entry) -> Markup {
    let date = entry.date().formatted(&site.config.blog.date_format);
    let body_html = markdown_to_html(&entry.body.markdown);

    let content = html! {
        (site_header(&site.config))
        main.post-page {
            article {
                h2 { (entry.metadata.name) }
                h3.post-date { (date) }
                div.post-content {
                    (PreEscaped(body_html))
                }
            }
        }
    };
    base_document(&site.config, &entry.metadata.name, None, content)
}

fn render_gallery(site: &Site, entry: &Entry) -> Markup {
    let content = html! {
        main.gallery {
            @for (idx, image) in entry.gallery.iter().enumerate() {
                img.gallery-image
                    src=(asset_url(&entry.metadata.url, &image.filename))
                    alt={ (entry.metadata.name) " " (idx + 1) }
                    width=(image.width)
                    height=(image.height)
                    loading=[(idx > 0).then_some("lazy")];
            }
        }
    };
    base_document(
        &site.config,
        &entry.metadata.name,
        Some("gallery-view"),
        content,
    )
}

/// Absolute url of a file written next to the page at `page_url`.
fn asset_url(page_url: &str, filename: &str) -> String {
    let dir = if page_url.ends_with(".html") {
        page_url.rsplit_once('/').map(|(dir, _)| dir).unwrap_or_default()
    } else {
        page_url.trim_end_matches('/')
    };
    format!("{dir}/{filename}")
}

/// Not-found view. `path` is the address that failed, when known.
pub fn render_not_found(site: &Site, path: Option<&str>) -> Markup {
    let content = html! {
        (site_header(&site.config))
        main.not-found-page {
            h2 { "Post not found" }
            @if let Some(path) = path {
                p { "There is nothing at " code { (path) } "." }
            }
            p { a href="/" { "Back to all posts" } }
        }
    };
    base_document(&site.config, "Not found", None, content)
}

/// A page that forwards to `target`.
pub fn render_redirect(target: &str) -> Markup {
    let refresh = format!("0; url={target}");
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta http-equiv="refresh" content=(refresh);
                link rel="canonical" href=(target);
                title { "Redirecting" }
            }
            body {
                p { "This post has moved to " a href=(target) { (target) } "." }
            }
        }
    }
}
