//! TOML front matter for post files.
//!
//! A post starts with a `+++` fenced TOML block followed by markdown:
//!
//! ```text
//! +++
//! title = "Happy New Year"
//! date = "1-1-2020"
//! path = "/blog/happy-new-year"
//! +++
//!
//! 🎉 Happy New Year! 🎉
//! ```

use crate::layout::LayoutKind;
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use serde::Deserialize;
use thiserror::Error;

const FENCE: &str = "+++";

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("missing opening `+++` line")]
    Missing,
    #[error("front matter is not closed with `+++`")]
    Unterminated,
    #[error("invalid front matter: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Frontmatter {
    pub title: Option<String>,
    pub date: String,
    /// Canonical url. Defaults to `<url_prefix>/<id>`.
    pub path: Option<String>,
    pub layout: Option<LayoutKind>,
    /// Directory under `images_dir` holding gallery images. Defaults to the id.
    pub gallery: Option<String>,
}

/// Split a post file into its front matter and markdown body.
pub fn split(content: &str) -> Result<(Frontmatter, &str), FrontmatterError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split_inclusive('\n');

    match lines.next() {
        Some(first) if first.trim_end() == FENCE => {}
        _ => return Err(FrontmatterError::Missing),
    }

    let mut offset = content.find('\n').map(|i| i + 1).unwrap_or(content.len());
    let header_start = offset;
    for line in lines {
        if line.trim_end() == FENCE {
            let header = &content[header_start..offset];
            let body = &content[offset + line.len()..];
            let frontmatter: Frontmatter = toml::from_str(header)?;
            return Ok((frontmatter, body.trim_start_matches(['\r', '\n'])));
        }
        offset += line.len();
    }
    Err(FrontmatterError::Unterminated)
}

/// Text of the first top-level heading in a markdown body.
///
/// Both `# Title` and setext (`Title` over `===`) headings count. Lines in
/// code blocks never do.
pub fn first_heading(markdown: &str) -> Option<String> {
    let mut title: Option<String> = None;
    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => title = Some(String::new()),
            Event::Text(text) | Event::Code(text) => {
                if let Some(title) = title.as_mut() {
                    title.push_str(&text);
                }
            }
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                if let Some(found) = title.take().map(|t| t.trim().to_string())
                    && !found.is_empty()
                {
                    return Some(found);
                }
            }
            _ => {}
        }
    }
    None
}
