//! Storyreel - Segmented story playback engine
//!
//! Drives an auto-advancing "stories" overlay: each story is an ordered set
//! of pages, each page plays for a fixed duration while a frame-paced loop
//! publishes progress to subscribers. User interaction (scrubbing forward or
//! backward, closing the overlay) supersedes the running loop through an
//! epoch/generation counter, so a stale loop can never write over the state
//! of a newer one.
//!
//! The engine is UI-agnostic: subscribers receive [`PlaybackState`] snapshots
//! over a broadcast channel and render them however they like. Content
//! warm-up is delegated to an [`ImageCache`] implementation and runs as
//! detached best-effort work that never touches playback state.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod epoch;
pub mod error;
pub mod prefetch;
pub mod publisher;
pub mod state;

pub use catalog::{InMemoryCatalog, PageRef, Story, StoryCatalog};
pub use config::{PlayerConfig, PrefetchConfig};
pub use engine::PlaybackEngine;
pub use epoch::{Epoch, EpochGuard};
pub use error::{PlaybackError, Result};
pub use prefetch::{ImageCache, NullImageCache, PrefetchCoordinator};
pub use publisher::ProgressPublisher;
pub use state::PlaybackState;
