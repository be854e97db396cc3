//! Layout selection for posts.
//!
//! Every post renders with one of two layouts:
//!
//! - [`LayoutKind::Default`]: title, formatted date, and the markdown body.
//! - [`LayoutKind::Gallery`]: the post's images edge to edge, no prose.
//!
//! The layout is a field on each entry, declared in front matter:
//!
//! ```toml
//! +++
//! title = "Binary Objections"
//! date = "3-14-2020"
//! layout = "gallery"
//! +++
//! ```
//!
//! Posts that do not declare one fall back to a title match against
//! `[layout] gallery_titles` when the content is scanned. Rendering only ever
//! reads the stored field.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The title that historically switched a post to the gallery layout.
pub const BINARY_OBJECTIONS_TITLE: &str = "Binary Objections";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    #[default]
    Default,
    Gallery,
}

impl LayoutKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutKind::Default => "default",
            LayoutKind::Gallery => "gallery",
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pick a layout from a post title alone, using the stock reserved titles.
pub fn select_layout(title: &str) -> LayoutKind {
    LayoutConfig::default().select(title)
}

/// `[layout]` config section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Exact titles that imply the gallery layout when none is declared.
    pub gallery_titles: Vec<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            gallery_titles: vec![BINARY_OBJECTIONS_TITLE.to_string()],
        }
    }
}

impl LayoutConfig {
    /// Exact, case-sensitive match against the reserved titles.
    pub fn select(&self, title: &str) -> LayoutKind {
        if self.gallery_titles.iter().any(|t| t == title) {
            LayoutKind::Gallery
        } else {
            LayoutKind::Default
        }
    }

    /// A declared layout wins; otherwise fall back to the title match.
    pub fn resolve(&self, declared: Option<LayoutKind>, title: &str) -> LayoutKind {
        declared.unwrap_or_else(|| self.select(title))
    }
}
