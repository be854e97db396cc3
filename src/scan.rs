//! Content scanning and manifest generation.
//!
//! Stage 1 of the build. Reads the content directory and produces a
//! [`Manifest`] holding every post entry plus the resolved site config.
//!
//! ## Content Layout
//!
//! ```text
//! content/
//! ├── config.toml                     # Site config (optional)
//! ├── posts/
//! │   ├── happy-new-year.md           # id: happy-new-year
//! │   ├── 010-binary-objections.md    # id: binary-objections (prefix dropped)
//! │   └── ...
//! └── images/
//!     ├── profile-photo.png           # [site] avatar (optional)
//!     └── binary-objections/          # gallery for the post of that id
//!         ├── 001-stairs.png
//!         └── 002-window.png
//! ```
//!
//! ## Per-Post Resolution
//!
//! - **id**: file stem, number prefix stripped, slugified
//! - **name**: front matter `title` → first `# heading` → display title from filename
//! - **url**: front matter `path` → `<url_prefix>/<id>`
//! - **layout**: front matter `layout` → `[layout] gallery_titles` match → default
//! - **gallery**: images in `<images_dir>/<gallery or id>/`, gallery posts only
//!
//! ## Validation
//!
//! - Every post has front matter with a `date`
//! - No two posts share an id
//! - Urls are absolute paths
//! - Gallery posts have at least one image
//! - A configured avatar exists

use crate::config::{self, SiteConfig};
use crate::frontmatter::{self, FrontmatterError};
use crate::gallery::{self, GalleryError};
use crate::layout::LayoutKind;
use crate::naming;
use crate::registry::{EntryRegistry, RegistryError};
use crate::types::{Entry, EntryMetadata, RenderUnit};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Posts directory not found: {0}")]
    MissingPostsDir(PathBuf),
    #[error("Cannot derive a post id from filename: {0}")]
    InvalidId(PathBuf),
    #[error("{path}: {source}")]
    Frontmatter {
        path: PathBuf,
        source: FrontmatterError,
    },
    #[error("{path}: url must start with '/': {url}")]
    InvalidUrl { path: PathBuf, url: String },
    #[error("Gallery error: {0}")]
    Gallery(#[from] GalleryError),
    #[error("Gallery post '{id}' has no images in {dir}")]
    EmptyGallery { id: String, dir: PathBuf },
    #[error("Avatar image not found: {0}")]
    MissingAvatar(PathBuf),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Manifest output from the scan stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Every post, in id order.
    pub posts: Vec<Entry>,
    pub config: SiteConfig,
}

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    // Uses defaults if config.toml doesn't exist
    let config = config::load_config(root)?;

    if let Some(avatar) = &config.site.avatar {
        let avatar_path = root.join(avatar);
        if !avatar_path.is_file() {
            return Err(ScanError::MissingAvatar(avatar_path));
        }
    }

    let posts_dir = root.join(&config.blog.posts_dir);
    if !posts_dir.is_dir() {
        return Err(ScanError::MissingPostsDir(posts_dir));
    }

    let entries = collect_markdown(&posts_dir)?
        .iter()
        .map(|path| read_post(path, root, &config))
        .collect::<Result<Vec<_>, _>>()?;

    let registry = EntryRegistry::new(entries)?;

    Ok(Manifest {
        posts: registry.into_entries(),
        config,
    })
}

fn collect_markdown(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut md_files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            let hidden = p
                .file_name()
                .is_some_and(|n| n.to_string_lossy().starts_with('.'));
            !hidden
                && p.is_file()
                && p.extension()
                    .map(|e| e.eq_ignore_ascii_case("md"))
                    .unwrap_or(false)
        })
        .collect();

    md_files.sort();
    Ok(md_files)
}

fn read_post(path: &Path, root: &Path, config: &SiteConfig) -> Result<Entry, ScanError> {
    let rel_path = path.strip_prefix(root).unwrap_or(path).to_path_buf();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    let id = naming::post_id(&stem);
    if id.is_empty() {
        return Err(ScanError::InvalidId(rel_path));
    }

    let content = fs::read_to_string(path)?;
    let (fm, body) = frontmatter::split(&content).map_err(|source| ScanError::Frontmatter {
        path: rel_path.clone(),
        source,
    })?;

    let name = fm
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .or_else(|| frontmatter::first_heading(body))
        .unwrap_or_else(|| naming::parse_entry_name(&stem).display_title);

    let url = fm.path.clone().unwrap_or_else(|| config.blog.route_for(&id));
    if !url.starts_with('/') {
        return Err(ScanError::InvalidUrl {
            path: rel_path,
            url,
        });
    }

    let layout = config.layout.resolve(fm.layout, &name);

    let gallery = match layout {
        LayoutKind::Gallery => {
            let folder = fm.gallery.as_deref().unwrap_or(&id);
            let dir = root.join(&config.blog.images_dir).join(folder);
            let images = gallery::collect_images(&dir, root)?;
            if images.is_empty() {
                return Err(ScanError::EmptyGallery { id, dir });
            }
            images
        }
        LayoutKind::Default => Vec::new(),
    };

    Ok(Entry {
        id,
        metadata: EntryMetadata {
            name,
            date: fm.date,
            url,
        },
        layout,
        body: RenderUnit {
            source_path: rel_path.to_string_lossy().replace('\\', "/"),
            markdown: body.to_string(),
        },
        gallery,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn scan_with_posts(posts: &[(&str, &str, &str)]) -> (TempDir, Result<Manifest, ScanError>) {
        let tmp = TempDir::new().unwrap();
        for (filename, fm, body) in posts {
            write_post(tmp.path(), filename, fm, body);
        }
        let result = scan(tmp.path());
        (tmp, result)
    }

    // =========================================================================
    // Fixture tests
    // =========================================================================

    #[test]
    fn scan_finds_all_fixture_posts() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();

        assert_eq!(
            post_ids(&manifest),
            vec![
                "a-dsl-for-writing-html-in-ruby",
                "binary-objections",
                "component-based-rails-views",
                "happy-new-year",
            ]
        );
    }

    #[test]
    fn fixture_config_is_loaded() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.config.site.title, "Carlos D. Quinones");
        assert_eq!(manifest.config.site.links.len(), 2);
    }

    #[test]
    fn fixture_gallery_post_uses_gallery_layout() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();

        let post = find_post(&manifest, "binary-objections");
        assert_eq!(post.layout, LayoutKind::Gallery);
        let files: Vec<&str> = post.gallery.iter().map(|i| i.filename.as_str()).collect();
        assert_eq!(files, vec!["001-stairs.png", "002-window.png", "003-roof.png"]);
    }

    #[test]
    fn fixture_article_posts_use_default_layout() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();

        let post = find_post(&manifest, "happy-new-year");
        assert_eq!(post.layout, LayoutKind::Default);
        assert!(post.gallery.is_empty());
        assert_eq!(post.metadata.url, "/blog/happy-new-year");
        assert_eq!(post.body.source_path, "posts/happy-new-year.md");
    }

    // =========================================================================
    // Per-post resolution
    // =========================================================================

    #[test]
    fn id_strips_number_prefix() {
        let (_tmp, result) = scan_with_posts(&[(
            "010-Happy-New-Year.md",
            r#"date = "1-1-2020""#,
            "Happy New Year!",
        )]);
        let manifest = result.unwrap();
        assert_eq!(post_ids(&manifest), vec!["happy-new-year"]);
    }

    #[test]
    fn title_falls_back_to_heading_then_filename() {
        let (_tmp, result) = scan_with_posts(&[
            ("with-heading.md", r#"date = "1-1-2020""#, "# From Heading\n\nText"),
            ("no-heading.md", r#"date = "1-1-2020""#, "Just text"),
            (
                "explicit.md",
                "title = \"From Front Matter\"\ndate = \"1-1-2020\"",
                "# Ignored Heading",
            ),
        ]);
        let manifest = result.unwrap();
        assert_eq!(find_post(&manifest, "with-heading").metadata.name, "From Heading");
        assert_eq!(find_post(&manifest, "no-heading").metadata.name, "no heading");
        assert_eq!(find_post(&manifest, "explicit").metadata.name, "From Front Matter");
    }

    #[test]
    fn explicit_path_is_kept_as_canonical_url() {
        let (_tmp, result) = scan_with_posts(&[(
            "rvc.md",
            "title = \"Component Based Rails Views\"\ndate = \"1-1-2020\"\npath = \"/blog/component-based-rails-views\"",
            "",
        )]);
        let manifest = result.unwrap();
        let post = find_post(&manifest, "rvc");
        assert_eq!(post.metadata.url, "/blog/component-based-rails-views");
        assert!(!post.url_matches_id());
    }

    #[test]
    fn relative_path_is_rejected() {
        let (_tmp, result) = scan_with_posts(&[(
            "post.md",
            "date = \"1-1-2020\"\npath = \"blog/post\"",
            "",
        )]);
        assert!(matches!(result, Err(ScanError::InvalidUrl { .. })));
    }

    #[test]
    fn body_excludes_front_matter() {
        let (_tmp, result) = scan_with_posts(&[("post.md", r#"date = "1-1-2020""#, "Hello **world**")]);
        let manifest = result.unwrap();
        assert_eq!(find_post(&manifest, "post").body.markdown, "Hello **world**");
    }

    #[test]
    fn non_markdown_and_hidden_files_ignored() {
        let tmp = TempDir::new().unwrap();
        write_post(tmp.path(), "post.md", r#"date = "1-1-2020""#, "");
        fs::write(tmp.path().join("posts/notes.txt"), "x").unwrap();
        fs::write(tmp.path().join("posts/.draft.md"), "x").unwrap();

        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(post_ids(&manifest), vec!["post"]);
    }

    // =========================================================================
    // Layout resolution
    // =========================================================================

    #[test]
    fn reserved_title_implies_gallery() {
        let tmp = TempDir::new().unwrap();
        write_post(
            tmp.path(),
            "binary-objections.md",
            "title = \"Binary Objections\"\ndate = \"3-14-2020\"",
            "",
        );
        write_png(&tmp.path().join("images/binary-objections/001-a.png"), 4, 3);

        let manifest = scan(tmp.path()).unwrap();
        let post = find_post(&manifest, "binary-objections");
        assert_eq!(post.layout, LayoutKind::Gallery);
        assert_eq!(post.gallery[0].width, 4);
        assert_eq!(post.gallery[0].source_path, "images/binary-objections/001-a.png");
    }

    #[test]
    fn declared_default_overrides_reserved_title() {
        let (_tmp, result) = scan_with_posts(&[(
            "binary-objections.md",
            "title = \"Binary Objections\"\ndate = \"3-14-2020\"\nlayout = \"default\"",
            "Words instead of pictures.",
        )]);
        let manifest = result.unwrap();
        let post = find_post(&manifest, "binary-objections");
        assert_eq!(post.layout, LayoutKind::Default);
        assert!(post.gallery.is_empty());
    }

    #[test]
    fn gallery_folder_can_be_named_explicitly() {
        let tmp = TempDir::new().unwrap();
        write_post(
            tmp.path(),
            "photos.md",
            "date = \"1-1-2020\"\nlayout = \"gallery\"\ngallery = \"shared\"",
            "",
        );
        write_png(&tmp.path().join("images/shared/001-a.png"), 1, 1);

        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(find_post(&manifest, "photos").gallery.len(), 1);
    }

    #[test]
    fn gallery_without_images_is_error() {
        let tmp = TempDir::new().unwrap();
        write_post(tmp.path(), "photos.md", "date = \"1-1-2020\"\nlayout = \"gallery\"", "");
        fs::create_dir_all(tmp.path().join("images/photos")).unwrap();
        fs::write(tmp.path().join("images/photos/readme.txt"), "x").unwrap();

        let result = scan(tmp.path());
        assert!(matches!(result, Err(ScanError::EmptyGallery { ref id, .. }) if id == "photos"));
    }

    #[test]
    fn gallery_without_folder_is_error() {
        let (_tmp, result) = scan_with_posts(&[(
            "photos.md",
            "date = \"1-1-2020\"\nlayout = \"gallery\"",
            "",
        )]);
        assert!(matches!(
            result,
            Err(ScanError::Gallery(GalleryError::MissingDir(_)))
        ));
    }

    #[test]
    fn configured_gallery_titles_apply() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "[layout]\ngallery_titles = [\"Tokyo\"]\n",
        )
        .unwrap();
        write_post(tmp.path(), "tokyo.md", "title = \"Tokyo\"\ndate = \"1-1-2020\"", "");
        write_png(&tmp.path().join("images/tokyo/001-a.png"), 1, 1);
        write_post(
            tmp.path(),
            "binary-objections.md",
            "title = \"Binary Objections\"\ndate = \"1-1-2020\"",
            "",
        );

        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(find_post(&manifest, "tokyo").layout, LayoutKind::Gallery);
        assert_eq!(
            find_post(&manifest, "binary-objections").layout,
            LayoutKind::Default
        );
    }

    // =========================================================================
    // Validation errors
    // =========================================================================

    #[test]
    fn duplicate_ids_are_rejected() {
        let (_tmp, result) = scan_with_posts(&[
            ("001-hello.md", r#"date = "1-1-2020""#, ""),
            ("hello.md", r#"date = "1-1-2020""#, ""),
        ]);
        assert!(matches!(
            result,
            Err(ScanError::Registry(RegistryError::DuplicateId(ref id))) if id == "hello"
        ));
    }

    #[test]
    fn missing_front_matter_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("posts")).unwrap();
        fs::write(tmp.path().join("posts/bare.md"), "# Bare\n").unwrap();

        let err = scan(tmp.path()).unwrap_err();
        assert!(matches!(
            err,
            ScanError::Frontmatter {
                source: FrontmatterError::Missing,
                ..
            }
        ));
        assert!(err.to_string().contains("posts/bare.md"));
    }

    #[test]
    fn missing_date_is_error() {
        let (_tmp, result) = scan_with_posts(&[("post.md", r#"title = "No Date""#, "")]);
        assert!(matches!(result, Err(ScanError::Frontmatter { .. })));
    }

    #[test]
    fn unusable_filename_is_error() {
        let (_tmp, result) = scan_with_posts(&[("!!!.md", r#"date = "1-1-2020""#, "")]);
        assert!(matches!(result, Err(ScanError::InvalidId(_))));
    }

    #[test]
    fn missing_posts_dir_is_error() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(scan(tmp.path()), Err(ScanError::MissingPostsDir(_))));
    }

    #[test]
    fn empty_posts_dir_is_an_empty_site() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("posts")).unwrap();
        let manifest = scan(tmp.path()).unwrap();
        assert!(manifest.posts.is_empty());
    }

    #[test]
    fn missing_avatar_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("posts")).unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "[site]\navatar = \"images/me.png\"\n",
        )
        .unwrap();
        assert!(matches!(scan(tmp.path()), Err(ScanError::MissingAvatar(_))));
    }

    #[test]
    fn manifest_roundtrips_through_json() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let json = serde_json::to_string_pretty(&manifest).unwrap();
        let back: Manifest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.posts, manifest.posts);
    }
}
