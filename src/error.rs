//! Playback error types.
//!
//! Errors here never surface to the presentation layer: a superseded loop is
//! expected and silently discarded, anything else is logged and freezes
//! playback on the current page.

/// Error raised by playback state mutations.
#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    /// The requested story index does not exist in the catalog.
    #[error("Story index out of range: {index} (catalog has {len})")]
    StoryOutOfRange { index: usize, len: usize },

    /// A progress write targeted a segment the current state does not have.
    #[error("Segment index out of range: {index} (story has {len})")]
    SegmentOutOfRange { index: usize, len: usize },

    /// A progress write was attempted while the overlay is closed.
    #[error("Playback is not active")]
    NotActive,
}

pub type Result<T> = std::result::Result<T, PlaybackError>;
