//! # Folio
//!
//! A minimal static site generator for a personal portfolio and blog.
//! Posts are markdown files with TOML front matter; gallery posts show a
//! folder of images instead of prose.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      content/  →  manifest.json    (filesystem → structured data)
//! 2. Generate  manifest  →  dist/            (final HTML site)
//! ```
//!
//! The manifest is human-readable JSON, so a scan can be inspected before
//! anything is written, and `check` can validate content without building.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: reads posts and gallery folders, produces the manifest |
//! | [`generate`] | Stage 2: writes the HTML site from the manifest |
//! | [`registry`] | Immutable id → entry registry and the shared [`registry::Site`] |
//! | [`render`] | Maud templates for every page, and the not-found boundary |
//! | [`route`] | Navigation path → route parsing |
//! | [`layout`] | Layout kinds and the title-based fallback selection |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`frontmatter`] | `+++`-delimited TOML front matter |
//! | [`gallery`] | Gallery image discovery and ordering |
//! | [`types`] | Types serialized between stages (`Entry`, `PostDate`) |
//! | [`naming`] | `NNN-name` filename convention and slugs |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Ids Route, Urls Locate
//!
//! A post's id comes from its filename and is the key it is routed by
//! (`/blog/<id>`). Its url is where the page actually lives, and may be set
//! independently with front matter `path`. When the two differ the id route
//! becomes a redirect, and `check` reports it.
//!
//! ## Declared Layouts
//!
//! The layout is part of each entry. Title matching against
//! `[layout] gallery_titles` only supplies a default at scan time, so
//! renaming a post never silently changes how it renders.
//!
//! ## Lookups Fail Loudly
//!
//! [`registry::EntryRegistry::resolve`] returns an error for unknown ids.
//! [`render::render_route`] is the one place that error becomes a page.

pub mod config;
pub mod frontmatter;
pub mod gallery;
pub mod generate;
pub mod layout;
pub mod naming;
pub mod output;
pub mod registry;
pub mod render;
pub mod route;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
