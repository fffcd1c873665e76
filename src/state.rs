//! Playback state snapshot and its mutation helpers.
//!
//! The live [`PlaybackState`] is exclusively owned by the engine (behind its
//! lock); subscribers only ever receive clones, never a mutable reference.

use serde::{Deserialize, Serialize};

use crate::catalog::{PageRef, Story};
use crate::error::{PlaybackError, Result};

/// Full state of the stories overlay.
///
/// While the overlay is open, `segment_progress` always has one entry per
/// page of the current story. While closed, the indices are `None` and the
/// vector is empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaybackState {
    pub is_open: bool,
    pub current_story_index: Option<usize>,
    pub current_page_index: Option<usize>,
    /// Content reference of the page currently on screen.
    pub current_page: Option<PageRef>,
    /// Per-segment progress, each in `[0, 1]`.
    pub segment_progress: Vec<f64>,
    /// Progress of the active segment, mirrored as a scalar.
    pub global_progress: f64,
}

impl PlaybackState {
    /// The hidden/idle shape.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Reset to the idle shape (overlay closed, no position, no progress).
    pub fn reset(&mut self) {
        *self = Self::idle();
    }

    /// Make `story` current and scrub to `page_index`: segments before it are
    /// complete, the rest (including the target) start at zero.
    pub fn enter_story(&mut self, story_index: usize, story: &Story, page_index: usize) {
        self.is_open = true;
        self.current_story_index = Some(story_index);
        self.current_page_index = Some(page_index);
        self.current_page = story.pages.get(page_index).cloned();
        self.segment_progress = (0..story.pages.len())
            .map(|i| if i < page_index { 1.0 } else { 0.0 })
            .collect();
        self.global_progress = 0.0;
    }

    /// Move to another page of the current story without touching the
    /// progress already accumulated by earlier segments.
    pub fn enter_page(&mut self, page_index: usize, page: PageRef) {
        self.current_page_index = Some(page_index);
        self.current_page = Some(page);
        if let Some(slot) = self.segment_progress.get_mut(page_index) {
            *slot = 0.0;
        }
        self.global_progress = 0.0;
    }

    /// Write the active segment's progress, mirrored into `global_progress`.
    pub fn set_progress(&mut self, page_index: usize, value: f64) -> Result<()> {
        if !self.is_open {
            return Err(PlaybackError::NotActive);
        }
        let len = self.segment_progress.len();
        let slot = self
            .segment_progress
            .get_mut(page_index)
            .ok_or(PlaybackError::SegmentOutOfRange {
                index: page_index,
                len,
            })?;
        *slot = value;
        self.global_progress = value;
        Ok(())
    }

    /// Clone handed out to subscribers.
    pub fn snapshot(&self) -> PlaybackState {
        self.clone()
    }
}
