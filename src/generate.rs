//! Static site generation.
//!
//! Stage 2 of the build. Reads the scan manifest, builds the [`Site`] once,
//! and writes every page.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                        # Listing, newest first
//! ├── 404.html                          # Not-found page
//! ├── profile-photo.png                 # [site] avatar, if configured
//! └── blog/
//!     ├── happy-new-year/index.html     # Article layout
//!     ├── binary-objections/
//!     │   ├── index.html                # Gallery layout
//!     │   ├── 001-stairs.png            # Gallery images, copied as-is
//!     │   └── 002-window.png
//!     ├── component-based-rails-views/
//!     │   └── index.html                # Canonical url of post `rvc`
//!     └── rvc/index.html                # Redirect to the canonical url
//! ```
//!
//! Each post is written at its canonical url. When that url differs from the
//! post's id route, the id route gets a redirect page so both keep working.

use crate::layout::LayoutKind;
use crate::registry::{RegistryError, Site};
use crate::render;
use crate::scan::Manifest;
use maud::Markup;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("url does not map to a file inside the output directory: {0}")]
    UnsafeUrl(String),
    #[error("two pages would be written to {0}")]
    PathConflict(PathBuf),
}

/// What was written, for CLI output.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateReport {
    pub pages: Vec<GeneratedPage>,
}

impl GenerateReport {
    pub fn count(&self, kind: PageKind) -> usize {
        self.pages.iter().filter(|p| p.kind == kind).count()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPage {
    pub title: String,
    /// Path relative to the output directory.
    pub path: PathBuf,
    pub kind: PageKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Index,
    Post(LayoutKind),
    Redirect,
    NotFound,
}

/// Generate the site from a manifest file written by the scan stage.
pub fn generate(
    manifest_path: &Path,
    source_root: &Path,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&manifest_content)?;
    let site = Site::new(manifest.posts, manifest.config)?;
    generate_site(&site, source_root, output_dir)
}

/// Write every page of `site` into `output_dir`.
pub fn generate_site(
    site: &Site,
    source_root: &Path,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    fs::create_dir_all(output_dir)?;
    let mut writer = PageWriter {
        output_dir,
        written: BTreeSet::new(),
        report: GenerateReport { pages: Vec::new() },
    };

    writer.write(
        PathBuf::from("index.html"),
        &site.config.site.title,
        PageKind::Index,
        render::render_index(site),
    )?;

    for entry in site.registry.entries_by_date() {
        let page_path = url_to_path(&entry.metadata.url)?;
        writer.write(
            page_path.clone(),
            &entry.metadata.name,
            PageKind::Post(entry.layout),
            render::render_entry(site, entry),
        )?;

        let page_dir = output_dir.join(page_path.parent().unwrap_or(Path::new("")));
        for image in &entry.gallery {
            fs::copy(
                source_root.join(&image.source_path),
                page_dir.join(&image.filename),
            )?;
        }
    }

    // Redirects go last so a canonical page always wins its own path. A route
    // taken by another post's page gets no redirect; `check` warns about it.
    for entry in site.registry.entries_by_date() {
        let route_path = url_to_path(&site.route_for(entry))?;
        let page_path = url_to_path(&entry.metadata.url)?;
        if route_path != page_path && site.route_taken_by(entry).is_none() {
            writer.write(
                route_path,
                &entry.metadata.name,
                PageKind::Redirect,
                render::render_redirect(&entry.metadata.url),
            )?;
        }
    }

    writer.write(
        PathBuf::from("404.html"),
        "Not found",
        PageKind::NotFound,
        render::render_not_found(site, None),
    )?;

    if let Some(avatar) = &site.config.site.avatar {
        fs::copy(
            source_root.join(avatar),
            output_dir.join(render::avatar_filename(avatar)),
        )?;
    }

    Ok(writer.report)
}

struct PageWriter<'a> {
    output_dir: &'a Path,
    written: BTreeSet<PathBuf>,
    report: GenerateReport,
}

impl PageWriter<'_> {
    fn write(
        &mut self,
        rel_path: PathBuf,
        title: &str,
        kind: PageKind,
        html: Markup,
    ) -> Result<(), GenerateError> {
        if !self.written.insert(rel_path.clone()) {
            return Err(GenerateError::PathConflict(rel_path));
        }
        let full_path = self.output_dir.join(&rel_path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full_path, html.into_string())?;
        self.report.pages.push(GeneratedPage {
            title: title.to_string(),
            path: rel_path,
            kind,
        });
        Ok(())
    }
}

/// Map a site url to a file path relative to the output directory.
///
/// `/blog/x` and `/blog/x/` become `blog/x/index.html`; urls ending in
/// `.html` are used as-is.
pub fn url_to_path(url: &str) -> Result<PathBuf, GenerateError> {
    let trimmed = url.trim_matches('/');
    let mut path = PathBuf::new();
    for segment in trimmed.split('/').filter(|s| !s.is_empty()) {
        let component = Path::new(segment).components().next();
        if !matches!(component, Some(Component::Normal(_))) || segment.contains('\\') {
            return Err(GenerateError::UnsafeUrl(url.to_string()));
        }
        path.push(segment);
    }
    if path.extension().is_some_and(|ext| ext == "html") {
        Ok(path)
    } else {
        Ok(path.join("index.html"))
    }
}
