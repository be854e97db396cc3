//! Gallery image discovery.
//!
//! A gallery post shows every image in its folder under `images_dir`:
//!
//! ```text
//! images/binary-objections/
//! ├── 001-stairs.png      # shown first
//! ├── 002-window.png
//! ├── 010-roof.png        # gaps in numbering are fine
//! └── sketch.png          # unnumbered images follow, by filename
//! ```
//!
//! Only image headers are read, to record dimensions for the `<img>` tags.
//! Files are copied to the output untouched.

use crate::naming::parse_entry_name;
use crate::types::GalleryImage;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("gallery directory not found: {0}")]
    MissingDir(PathBuf),
    #[error("cannot list {path}: {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
    #[error("cannot read image {path}: {source}")]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },
}

pub fn is_image(path: &Path) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// List the images directly inside `dir`, in display order.
///
/// `root` is the content root; recorded source paths are relative to it.
pub fn collect_images(dir: &Path, root: &Path) -> Result<Vec<GalleryImage>, GalleryError> {
    if !dir.is_dir() {
        return Err(GalleryError::MissingDir(dir.to_path_buf()));
    }
    let mut found = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|source| GalleryError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let filename = entry.file_name().to_string_lossy().to_string();
        if filename.starts_with('.') || !entry.file_type().is_file() || !is_image(path) {
            continue;
        }
        found.push((sort_key(&filename), filename, path.to_path_buf()));
    }
    found.sort();

    found
        .into_iter()
        .map(|(_, filename, path)| {
            let (width, height) =
                image::image_dimensions(&path).map_err(|source| GalleryError::Image {
                    path: path.clone(),
                    source,
                })?;
            let source_path = path
                .strip_prefix(root)
                .unwrap_or(&path)
                .to_string_lossy()
                .replace('\\', "/");
            Ok(GalleryImage {
                filename,
                source_path,
                width,
                height,
            })
        })
        .collect()
}

/// Numbered images first in numeric order, then the rest.
fn sort_key(filename: &str) -> u32 {
    let stem = Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    parse_entry_name(&stem).number.unwrap_or(u32::MAX)
}
