//! The entry registry: every post, keyed by id.
//!
//! Built once from the scan manifest and never modified afterwards. Everything
//! that needs a post (the listing page, post pages, the CLI) borrows the same
//! registry through [`Site`].
//!
//! Lookups are explicit: [`EntryRegistry::resolve`] returns
//! [`RegistryError::NotFound`] for an unknown id instead of handing back
//! something that fails later. Posts can also be found by their canonical
//! url with [`EntryRegistry::resolve_url`], since a post's url need not end
//! in its id.

use crate::config::SiteConfig;
use crate::types::{Entry, EntryMetadata};
use std::collections::BTreeMap;
use std::collections::btree_map;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown post identifier: {0}")]
    NotFound(String),
    #[error("duplicate post identifier: {0}")]
    DuplicateId(String),
    #[error("posts '{first}' and '{second}' share the url {url}")]
    DuplicateUrl {
        url: String,
        first: String,
        second: String,
    },
}

#[derive(Debug, Clone, Default)]
pub struct EntryRegistry {
    entries: BTreeMap<String, Entry>,
    /// Normalized canonical url → id.
    by_url: BTreeMap<String, String>,
}

impl EntryRegistry {
    /// Build the registry, rejecting duplicate ids and duplicate urls.
    pub fn new(entries: impl IntoIterator<Item = Entry>) -> Result<Self, RegistryError> {
        let mut map = BTreeMap::new();
        let mut by_url: BTreeMap<String, String> = BTreeMap::new();
        for entry in entries {
            let url = normalize_url(&entry.metadata.url);
            match map.entry(entry.id.clone()) {
                btree_map::Entry::Occupied(_) => return Err(RegistryError::DuplicateId(entry.id)),
                btree_map::Entry::Vacant(slot) => {
                    if let Some(first) = by_url.get(&url) {
                        return Err(RegistryError::DuplicateUrl {
                            url,
                            first: first.clone(),
                            second: entry.id,
                        });
                    }
                    by_url.insert(url, entry.id.clone());
                    slot.insert(entry);
                }
            }
        }
        Ok(Self {
            entries: map,
            by_url,
        })
    }

    /// Look up a post by id.
    pub fn resolve(&self, id: &str) -> Result<&Entry, RegistryError> {
        self.entries
            .get(id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    /// Look up a post by its canonical url.
    ///
    /// `/blog/x`, `/blog/x/` and `/blog/x/index.html` are the same url.
    pub fn resolve_url(&self, url: &str) -> Result<&Entry, RegistryError> {
        self.by_url
            .get(&normalize_url(url))
            .and_then(|id| self.entries.get(id))
            .ok_or_else(|| RegistryError::NotFound(url.to_string()))
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Metadata of every post, newest first.
    ///
    /// Posts on the same day, and posts whose date can't be parsed, are
    /// ordered by id. Undated posts come last.
    pub fn list_all(&self) -> Vec<&EntryMetadata> {
        self.entries_by_date()
            .into_iter()
            .map(|entry| &entry.metadata)
            .collect()
    }

    /// Every entry in listing order.
    pub fn entries_by_date(&self) -> Vec<&Entry> {
        let mut dated: Vec<_> = self
            .entries
            .values()
            .map(|entry| (entry.date(), entry))
            .collect();
        // BTreeMap iteration is id-ordered and sort_by is stable, so ties keep id order.
        dated.sort_by(|(a, _), (b, _)| a.cmp_newest_first(b));
        dated.into_iter().map(|(_, entry)| entry).collect()
    }

    /// Entries whose canonical url does not end in their id.
    pub fn url_mismatches(&self) -> Vec<&Entry> {
        self.entries
            .values()
            .filter(|entry| !entry.url_matches_id())
            .collect()
    }

    /// Entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in id order, consuming the registry.
    pub fn into_entries(self) -> Vec<Entry> {
        self.entries.into_values().collect()
    }
}

/// Comparable form of a site url: no query or fragment, no trailing
/// `/index.html`, no trailing slash. The site root is `/`.
pub fn normalize_url(url: &str) -> String {
    let url = url.split(['?', '#']).next().unwrap_or_default();
    let url = url.strip_suffix("/index.html").unwrap_or(url);
    let url = url.trim_end_matches('/');
    if url.is_empty() {
        "/".to_string()
    } else {
        url.to_string()
    }
}

/// Everything a render needs: the registry and the config it was built with.
///
/// Constructed once per process and passed by reference.
#[derive(Debug, Clone)]
pub struct Site {
    pub registry: EntryRegistry,
    pub config: SiteConfig,
}

impl Site {
    pub fn new(entries: Vec<Entry>, config: SiteConfig) -> Result<Self, RegistryError> {
        Ok(Self {
            registry: EntryRegistry::new(entries)?,
            config,
        })
    }

    /// The route a post is reachable at, independent of its canonical url.
    pub fn route_for(&self, entry: &Entry) -> String {
        self.config.blog.route_for(&entry.id)
    }

    /// The post whose canonical page occupies `entry`'s id route, if it is
    /// another post. Such a route cannot carry a redirect for `entry`.
    pub fn route_taken_by(&self, entry: &Entry) -> Option<&Entry> {
        self.registry
            .resolve_url(&self.route_for(entry))
            .ok()
            .filter(|owner| owner.id != entry.id)
    }
}
