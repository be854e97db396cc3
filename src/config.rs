//! Site configuration.
//!
//! An optional `config.toml` at the content root overrides the stock
//! defaults. Files are sparse: only the keys you want to change need to be
//! present, everything else keeps its default.
//!
//! ```toml
//! [site]
//! title = "Carlos D. Quinones"
//! description = "Personal site of a NYC based software engineer"
//! bio = "Engineering lead. I write music and ride my bike."
//! avatar = "images/profile-photo.png"
//!
//! [[site.links]]
//! label = "GitHub"
//! url = "https://github.com/cquinones100"
//!
//! [blog]
//! posts_dir = "posts"
//! images_dir = "images"
//! url_prefix = "/blog"
//! date_format = "%B %d, %Y"
//!
//! [layout]
//! gallery_titles = ["Binary Objections"]
//!
//! [colors.light]
//! background = "#ffffff"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::layout::LayoutConfig;
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Identity shown in the header of every page.
    pub site: SiteInfo,
    /// Where posts and images live, and how post urls look.
    pub blog: BlogConfig,
    /// Fallback layout selection for posts that don't declare one.
    pub layout: LayoutConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Validation("site.title must not be empty".into()));
        }
        if self.blog.posts_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "blog.posts_dir must not be empty".into(),
            ));
        }
        if !self.blog.url_prefix.starts_with('/') {
            return Err(ConfigError::Validation(
                "blog.url_prefix must start with '/'".into(),
            ));
        }
        if self.blog.url_prefix.len() > 1 && self.blog.url_prefix.ends_with('/') {
            return Err(ConfigError::Validation(
                "blog.url_prefix must not end with '/'".into(),
            ));
        }
        if StrftimeItems::new(&self.blog.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::Validation(format!(
                "blog.date_format is not a valid strftime pattern: {}",
                self.blog.date_format
            )));
        }
        for link in &self.site.links {
            if link.label.trim().is_empty() || link.url.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "site.links entries need both a label and a url".into(),
                ));
            }
        }
        Ok(())
    }
}

/// `[site]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    pub title: String,
    /// `<meta name="description">` content.
    pub description: String,
    pub author: String,
    /// Short paragraph shown under the title.
    pub bio: String,
    /// Profile photo, relative to the content root. Copied to the output root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub links: Vec<SiteLink>,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            description: String::new(),
            author: String::new(),
            bio: String::new(),
            avatar: None,
            links: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteLink {
    pub label: String,
    pub url: String,
}

/// `[blog]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlogConfig {
    /// Directory of `*.md` posts, relative to the content root.
    pub posts_dir: String,
    /// Directory of gallery folders, relative to the content root.
    pub images_dir: String,
    /// Route prefix for posts; a post with id `x` routes to `<prefix>/x`.
    pub url_prefix: String,
    /// strftime pattern used to display parsed post dates.
    pub date_format: String,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            posts_dir: "posts".to_string(),
            images_dir: "images".to_string(),
            url_prefix: "/blog".to_string(),
            date_format: "%B %d, %Y".to_string(),
        }
    }
}

impl BlogConfig {
    /// The route a post id is reachable at.
    pub fn route_for(&self, id: &str) -> String {
        format!("{}/{}", self.url_prefix.trim_end_matches('/'), id)
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Dates and the bio paragraph.
    pub text_muted: String,
    /// Code block background.
    pub code_background: String,
    pub link: String,
    pub link_hover: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#1a1a1a".to_string(),
            text_muted: "#666666".to_string(),
            code_background: "#f4f4f4".to_string(),
            link: "#0f4c81".to_string(),
            link_hover: "#000000".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#111111".to_string(),
            text: "#eeeeee".to_string(),
            text_muted: "#999999".to_string(),
            code_background: "#222222".to_string(),
            link: "#8ab4f8".to_string(),
            link_hover: "#ffffff".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// The stock default config as a `toml::Value::Table`, the base layer that
/// user overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key by key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read `config.toml` from a directory. `Ok(None)` when there is none.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the site config for a content root.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(root)?)
}

/// A fully commented stock `config.toml`, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# folio configuration
# ===================
# All settings are optional. Values shown are the defaults.
# Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Site identity (header of every page)
# ---------------------------------------------------------------------------
[site]
title = "My Blog"
description = ""
author = ""
# Short paragraph shown under the title.
bio = ""
# Profile photo relative to the content root, copied to the output root.
# avatar = "images/profile-photo.png"

# External links shown in the header, in order.
links = []
# [[site.links]]
# label = "GitHub"
# url = "https://github.com/you"

# ---------------------------------------------------------------------------
# Posts
# ---------------------------------------------------------------------------
[blog]
# Markdown posts with +++ TOML front matter.
posts_dir = "posts"
# Gallery image folders, one per gallery post (named after the post id
# unless the post sets `gallery = "..."`).
images_dir = "images"
# Posts route to <url_prefix>/<id>.
url_prefix = "/blog"
# strftime pattern for dates on post pages. Dates that can't be parsed are
# shown exactly as written.
date_format = "%B %d, %Y"

# ---------------------------------------------------------------------------
# Layout selection
# ---------------------------------------------------------------------------
[layout]
# Posts without `layout = "..."` in their front matter use the gallery
# layout when their title is exactly one of these.
gallery_titles = ["Binary Objections"]

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#1a1a1a"
text_muted = "#666666"    # Dates, bio
code_background = "#f4f4f4"
link = "#0f4c81"
link_hover = "#000000"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#111111"
text = "#eeeeee"
text_muted = "#999999"
code_background = "#222222"
link = "#8ab4f8"
link_hover = "#ffffff"
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
{light}
}}

@media (prefers-color-scheme: dark) {{
    :root {{
{dark}
    }}
}}"#,
        light = color_properties(&colors.light, "    "),
        dark = color_properties(&colors.dark, "        "),
    )
}

fn color_properties(scheme: &ColorScheme, indent: &str) -> String {
    [
        ("--color-bg", &scheme.background),
        ("--color-text", &scheme.text),
        ("--color-text-muted", &scheme.text_muted),
        ("--color-code-bg", &scheme.code_background),
        ("--color-link", &scheme.link),
        ("--color-link-hover", &scheme.link_hover),
    ]
    .iter()
    .map(|(name, value)| format!("{indent}{name}: {value};"))
    .collect::<Vec<_>>()
    .join("\n")
}
