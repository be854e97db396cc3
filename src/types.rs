//! Shared types passed from scan to generate.
//!
//! These are serialized into the scan manifest and read back by the generate
//! stage, so both sides see exactly the same entries.

use crate::layout::LayoutKind;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Route key, unique across the registry (`happy-new-year`).
    pub id: String,
    pub metadata: EntryMetadata,
    #[serde(default)]
    pub layout: LayoutKind,
    pub body: RenderUnit,
    /// Ordered gallery images. Only populated for gallery posts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gallery: Vec<GalleryImage>,
}

impl Entry {
    pub fn date(&self) -> PostDate {
        PostDate::parse(&self.metadata.date)
    }

    /// Whether the canonical url's last path segment is the id.
    pub fn url_matches_id(&self) -> bool {
        last_segment(&self.metadata.url) == self.id
    }
}

fn last_segment(url: &str) -> &str {
    let trimmed = url.trim_end_matches('/');
    let trimmed = trimmed.strip_suffix("/index.html").unwrap_or(trimmed);
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// What the listing page shows for a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryMetadata {
    pub name: String,
    /// Free-form display date, kept exactly as authored.
    pub date: String,
    /// Canonical path of the post page.
    pub url: String,
}

/// Content handed to the renderer. The registry never looks inside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderUnit {
    /// Path of the markdown file, relative to the content root.
    pub source_path: String,
    /// Markdown body with front matter removed.
    pub markdown: String,
}

/// An image shown by the gallery layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub filename: String,
    /// Path relative to the content root.
    pub source_path: String,
    pub width: u32,
    pub height: u32,
}

/// A display date with an optional calendar value for ordering.
///
/// Dates are free-form text. The formats below are recognized for sorting;
/// anything else still displays but sorts after every dated post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDate {
    pub display: String,
    pub value: Option<NaiveDate>,
}

const DATE_FORMATS: &[&str] = &["%m-%d-%Y", "%Y-%m-%d", "%B %d, %Y", "%d %B %Y"];

impl PostDate {
    pub fn parse(display: &str) -> Self {
        let trimmed = display.trim();
        let value = DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok());
        Self {
            display: display.to_string(),
            value,
        }
    }

    /// Format with a strftime pattern, or return the text as authored.
    pub fn formatted(&self, format: &str) -> String {
        match self.value {
            Some(date) => date.format(format).to_string(),
            None => self.display.clone(),
        }
    }

    /// Newest first; undated last.
    pub fn cmp_newest_first(&self, other: &Self) -> Ordering {
        match (self.value, other.value) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}
