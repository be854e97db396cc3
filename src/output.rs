//! CLI output formatting for all pipeline stages.
//!
//! # Information-First Display
//!
//! Every post is shown by its position and title first. Filesystem paths,
//! dates and urls follow as indented context lines, so the output reads as a
//! content inventory that can still be traced back to files.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Posts
//! 001 Binary Objections (3 photos)
//!     Source: posts/binary-objections.md
//!     Date: 3-14-2020
//!     Gallery: images/binary-objections/
//! 002 Happy New Year
//!     Source: posts/happy-new-year.md
//!     Date: 1-1-2020
//!
//! Config
//!     config.toml
//!     avatar: images/profile-photo.png
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//! 001 Binary Objections → blog/binary-objections/index.html
//! 002 Happy New Year → blog/happy-new-year/index.html
//! Redirects
//!     Component Based Rails Views → blog/rvc/index.html
//! Not found → 404.html
//!
//! Generated 2 posts (1 gallery), 1 redirect
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Warnings go to stderr.

use crate::generate::{GenerateReport, PageKind};
use crate::layout::LayoutKind;
use crate::registry::{Site, normalize_url};
use crate::types::Entry;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Post header: index and title, plus photo count for galleries.
///
/// ```text
/// 001 Happy New Year
/// 002 Binary Objections (3 photos)
/// ```
fn entity_header(index: usize, entry: &Entry) -> String {
    match entry.layout {
        LayoutKind::Gallery => format!(
            "{} {} ({} photos)",
            format_index(index),
            entry.metadata.name,
            entry.gallery.len()
        ),
        LayoutKind::Default => format!("{} {}", format_index(index), entry.metadata.name),
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// Stage 1: Scan output
// ============================================================================

/// Format scan stage output showing every discovered post, newest first.
pub fn format_scan_output(site: &Site, source_root: &Path) -> Vec<String> {
    let mut lines = vec!["Posts".to_string()];

    for (i, entry) in site.registry.entries_by_date().into_iter().enumerate() {
        lines.push(entity_header(i + 1, entry));
        lines.push(format!("    Source: {}", entry.body.source_path));
        lines.push(format!("    Date: {}", entry.metadata.date));
        if !entry.url_matches_id() {
            lines.push(format!("    Url: {}", entry.metadata.url));
        }
        if let Some(first) = entry.gallery.first()
            && let Some((dir, _)) = first.source_path.rsplit_once('/')
        {
            lines.push(format!("    Gallery: {}/", dir));
        }
    }
    if site.registry.is_empty() {
        lines.push("    (none)".to_string());
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join(crate::config::CONFIG_FILE).exists() {
        lines.push(format!("    {}", crate::config::CONFIG_FILE));
    } else {
        lines.push("    (stock defaults)".to_string());
    }
    if let Some(avatar) = &site.config.site.avatar {
        lines.push(format!("    avatar: {}", avatar));
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(site: &Site, source_root: &Path) {
    for line in format_scan_output(site, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Generate output
// ============================================================================

/// Format generate stage output showing every written page.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();
    let mut redirects = Vec::new();
    let mut post_index = 0;

    for page in &report.pages {
        let path = page.path.to_string_lossy().replace('\\', "/");
        match page.kind {
            PageKind::Index => lines.push(format!("Home \u{2192} {}", path)),
            PageKind::Post(_) => {
                post_index += 1;
                lines.push(format!(
                    "{} {} \u{2192} {}",
                    format_index(post_index),
                    page.title,
                    path
                ));
            }
            PageKind::Redirect => {
                redirects.push(format!("    {} \u{2192} {}", page.title, path));
            }
            PageKind::NotFound => {
                if !redirects.is_empty() {
                    lines.push("Redirects".to_string());
                    lines.append(&mut redirects);
                }
                lines.push(format!("Not found \u{2192} {}", path));
            }
        }
    }

    let galleries = report.count(PageKind::Post(LayoutKind::Gallery));
    let mut summary = format!("Generated {}", plural(post_index, "post"));
    if galleries > 0 {
        summary.push_str(&format!(" ({} gallery)", galleries));
    }
    let redirect_count = report.count(PageKind::Redirect);
    if redirect_count > 0 {
        summary.push_str(&format!(", {}", plural(redirect_count, "redirect")));
    }
    lines.push(String::new());
    lines.push(summary);

    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Listing and warnings
// ============================================================================

/// One line per post, newest first: date, title, url.
pub fn format_listing(site: &Site) -> Vec<String> {
    site.registry
        .list_all()
        .into_iter()
        .enumerate()
        .map(|(i, meta)| {
            format!(
                "{} {:<12} {} \u{2192} {}",
                format_index(i + 1),
                meta.date,
                meta.name,
                meta.url
            )
        })
        .collect()
}

pub fn print_listing(site: &Site) {
    for line in format_listing(site) {
        println!("{}", line);
    }
}

/// Posts whose canonical url is not their id route.
pub fn format_url_warnings(site: &Site) -> Vec<String> {
    site.registry
        .iter()
        .filter(|entry| normalize_url(&site.route_for(entry)) != normalize_url(&entry.metadata.url))
        .map(|entry| {
            let route = site.route_for(entry);
            match site.route_taken_by(entry) {
                Some(owner) => format!(
                    "warning: post '{}' lives at {}, {} is taken by post '{}' so it gets no redirect",
                    entry.id, entry.metadata.url, route, owner.id
                ),
                None => format!(
                    "warning: post '{}' lives at {}, {} will redirect there",
                    entry.id, entry.metadata.url, route
                ),
            }
        })
        .collect()
}

/// Print url warnings to stderr.
pub fn print_url_warnings(site: &Site) {
    for line in format_url_warnings(site) {
        eprintln!("{}", line);
    }
}
