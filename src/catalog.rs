//! Story catalog types.
//!
//! The catalog is an external, read-only data source: an ordered sequence of
//! [`Story`] records, each holding an ordered sequence of page content
//! references. The engine reads it once at construction and never mutates it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque reference to a page's content, e.g. an image URL or a bundled
/// asset name. The engine never interprets it beyond deciding whether it is
/// worth prefetching.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageRef(String);

impl PageRef {
    pub fn new<S: Into<String>>(source: S) -> Self {
        Self(source.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this reference points at remote content (absolute http/https
    /// URL). Local asset references are already on disk and never prefetched.
    pub fn is_remote(&self) -> bool {
        self.0.starts_with("http://") || self.0.starts_with("https://")
    }
}

impl fmt::Display for PageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageRef {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

/// One story: an ordered collection of pages presented as a single
/// slideshow unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    /// Position in the catalog. Immutable once loaded.
    pub index: usize,
    /// Display title for the story tile.
    pub title: String,
    /// Tile icon shown on the home screen.
    pub icon: Option<PageRef>,
    /// Ordered page content references.
    pub pages: Vec<PageRef>,
}

impl Story {
    pub fn new<S: Into<String>>(index: usize, title: S, pages: Vec<PageRef>) -> Self {
        Self {
            index,
            title: title.into(),
            icon: None,
            pages,
        }
    }

    pub fn with_icon(mut self, icon: PageRef) -> Self {
        self.icon = Some(icon);
        self
    }
}

/// Read-only source of stories.
///
/// Implemented by whatever supplies the content (static seed data, a REST
/// client, a database). The engine calls [`stories`](Self::stories) once at
/// construction.
pub trait StoryCatalog: Send + Sync {
    fn stories(&self) -> Vec<Story>;
}

/// Catalog backed by an in-memory list, for seed data and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    stories: Vec<Story>,
}

impl InMemoryCatalog {
    pub fn new(stories: Vec<Story>) -> Self {
        Self { stories }
    }
}

impl StoryCatalog for InMemoryCatalog {
    fn stories(&self) -> Vec<Story> {
        self.stories.clone()
    }
}
