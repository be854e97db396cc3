//! Shared test utilities.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path()).unwrap();
//!
//! let post = find_post(&manifest, "happy-new-year");
//! assert_eq!(post.metadata.name, "Happy New Year");
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::layout::LayoutKind;
use crate::scan::Manifest;
use crate::types::{Entry, EntryMetadata, RenderUnit};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write `<root>/posts/<filename>` with the given front matter and body.
pub fn write_post(root: &Path, filename: &str, frontmatter: &str, body: &str) {
    let dir = root.join("posts");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(filename), format!("+++\n{frontmatter}\n+++\n\n{body}")).unwrap();
}

/// Write a solid-color PNG of the given size, creating parent directories.
pub fn write_png(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    image::RgbImage::from_pixel(width, height, image::Rgb([200, 200, 200]))
        .save(path)
        .unwrap();
}

// =========================================================================
// Entry builders
// =========================================================================

/// A default-layout entry whose url is `/blog/<id>`.
pub fn sample_entry(id: &str, name: &str, date: &str) -> Entry {
    Entry {
        id: id.to_string(),
        metadata: EntryMetadata {
            name: name.to_string(),
            date: date.to_string(),
            url: format!("/blog/{id}"),
        },
        layout: LayoutKind::Default,
        body: RenderUnit {
            source_path: format!("posts/{id}.md"),
            markdown: format!("Body of {name}."),
        },
        gallery: vec![],
    }
}

// =========================================================================
// Manifest lookups (panic with a clear message on miss)
// =========================================================================

/// Find a post by id. Panics if not found.
pub fn find_post<'a>(manifest: &'a Manifest, id: &str) -> &'a Entry {
    manifest
        .posts
        .iter()
        .find(|p| p.id == id)
        .unwrap_or_else(|| {
            let ids = post_ids(manifest);
            panic!("post '{id}' not found. Available: {ids:?}")
        })
}

/// All post ids in manifest order.
pub fn post_ids(manifest: &Manifest) -> Vec<&str> {
    manifest.posts.iter().map(|p| p.id.as_str()).collect()
}
