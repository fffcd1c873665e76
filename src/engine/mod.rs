//! Playback engine: the state machine behind the stories overlay.
//!
//! The engine owns the live [`PlaybackState`] behind a lock. Every
//! state-changing operation (open, scrub, close) requests a fresh epoch and,
//! except for close, spawns a new driver task under it; whatever loop was
//! running before notices it is stale on its next tick and stops without
//! writing. The tick loop itself lives in the `driver` submodule.

mod driver;

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::catalog::{Story, StoryCatalog};
use crate::config::PlayerConfig;
use crate::epoch::EpochGuard;
use crate::prefetch::{ImageCache, PrefetchCoordinator};
use crate::publisher::ProgressPublisher;
use crate::state::PlaybackState;

/// Engine internals shared with driver tasks.
pub(crate) struct Shared {
    pub(crate) stories: Vec<Story>,
    pub(crate) state: Mutex<PlaybackState>,
    pub(crate) epochs: EpochGuard,
    pub(crate) publisher: ProgressPublisher,
    pub(crate) prefetch: PrefetchCoordinator,
    pub(crate) config: PlayerConfig,
}

impl Shared {
    /// First story at or after `start` that has at least one page.
    pub(crate) fn first_playable_at(&self, start: usize) -> Option<usize> {
        (start..self.stories.len()).find(|&i| !self.stories[i].pages.is_empty())
    }
}

/// Drives story playback and publishes [`PlaybackState`] snapshots.
///
/// Methods are synchronous and must be called from within a Tokio runtime;
/// tick loops and prefetches run as spawned tasks.
#[derive(Clone)]
pub struct PlaybackEngine {
    shared: Arc<Shared>,
}

impl PlaybackEngine {
    /// Create an engine over `catalog`, reading the story list once.
    ///
    /// # Arguments
    ///
    /// * `catalog` - Read-only story source.
    /// * `cache` - Image/content cache asked to warm upcoming pages.
    /// * `config` - Page duration, tick cadence, and prefetch settings.
    pub fn new(
        catalog: &dyn StoryCatalog,
        cache: Arc<dyn ImageCache>,
        config: PlayerConfig,
    ) -> Self {
        let stories = catalog.stories();
        info!(stories = stories.len(), "Playback engine initialized");

        Self {
            shared: Arc::new(Shared {
                stories,
                state: Mutex::new(PlaybackState::idle()),
                epochs: EpochGuard::new(),
                publisher: ProgressPublisher::new(),
                prefetch: PrefetchCoordinator::new(cache, config.prefetch.clone()),
                config,
            }),
        }
    }

    /// Subscribe to state snapshots. Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<PlaybackState> {
        self.shared.publisher.subscribe()
    }

    /// Current state snapshot.
    pub fn state(&self) -> PlaybackState {
        self.shared.state.lock().snapshot()
    }

    /// Open the overlay at `story_index`, page 0.
    ///
    /// An out-of-range index is ignored. A story with zero pages is skipped
    /// in favor of the next playable one; if none remain the overlay stays
    /// (or becomes) idle.
    pub fn open(&self, story_index: usize) {
        let catalog_len = self.shared.stories.len();
        if story_index >= catalog_len {
            warn!(story_index, catalog_len, "Ignoring open for out-of-range story");
            return;
        }

        match self.shared.first_playable_at(story_index) {
            Some(playable) => {
                info!(story_index = playable, "Opening story overlay");
                self.resume_at(playable, 0);
            }
            None => {
                debug!(story_index, "No playable story at or after index");
                self.close();
            }
        }
    }

    /// Scrub forward: next page, or the next story's first page, or idle
    /// when the catalog is exhausted. No-op while closed.
    pub fn advance_forward(&self) {
        let Some((story_index, page_index)) = self.position() else {
            return;
        };

        let page_count = self
            .shared
            .stories
            .get(story_index)
            .map(|s| s.pages.len())
            .unwrap_or(0);

        if page_index + 1 < page_count {
            self.resume_at(story_index, page_index + 1);
        } else if story_index + 1 < self.shared.stories.len() {
            self.resume_at(story_index + 1, 0);
        } else {
            self.close();
        }
    }

    /// Scrub backward: previous page, or the previous story's last page, or
    /// a restart of the very first page. No-op while closed.
    pub fn advance_backward(&self) {
        let Some((story_index, page_index)) = self.position() else {
            return;
        };

        if page_index >= 1 {
            self.resume_at(story_index, page_index - 1);
        } else if story_index >= 1 {
            let last_page = self
                .shared
                .stories
                .get(story_index - 1)
                .map(|s| s.pages.len().saturating_sub(1))
                .unwrap_or(0);
            self.resume_at(story_index - 1, last_page);
        } else {
            self.resume_at(0, 0);
        }
    }

    /// Close the overlay: invalidate any running loop (no replacement is
    /// started) and publish the idle snapshot.
    pub fn close(&self) {
        let mut state = self.shared.state.lock();
        self.shared.epochs.new_epoch();
        state.reset();
        self.shared.publisher.publish(state.snapshot());
        info!("Story overlay closed");
    }

    /// Current `(story, page)` position, if the overlay is open.
    fn position(&self) -> Option<(usize, usize)> {
        let state = self.shared.state.lock();
        if !state.is_open {
            return None;
        }
        Some((state.current_story_index?, state.current_page_index?))
    }

    /// Jump to `(story_index, page_index)` under a fresh epoch, marking
    /// earlier pages of that story as complete, and start a driver task.
    /// A zero-page target closes the overlay.
    fn resume_at(&self, story_index: usize, page_index: usize) {
        let shared = &self.shared;
        let Some(story) = shared.stories.get(story_index) else {
            return;
        };
        if story.pages.is_empty() {
            self.close();
            return;
        }
        let page_index = page_index.min(story.pages.len() - 1);

        let epoch = {
            let mut state = shared.state.lock();
            let epoch = shared.epochs.new_epoch();
            state.enter_story(story_index, story, page_index);
            shared.publisher.publish(state.snapshot());
            epoch
        };

        debug!(story_index, page_index, "Starting segment under new epoch");
        tokio::spawn(driver::run(
            Arc::clone(shared),
            epoch,
            story_index,
            page_index,
        ));
    }
}
