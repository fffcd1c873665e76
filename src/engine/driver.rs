//! Per-epoch tick loop and auto-advance.
//!
//! One driver task runs per epoch. It paces the active segment's progress,
//! then iterates to the next page or story flat (no recursion, no re-open)
//! until the catalog is exhausted or a newer epoch supersedes it. Epoch
//! currency is checked under the state lock immediately before every write
//! and publication, so a superseded task produces zero stale writes.

use std::sync::Arc;

use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{error, info, trace};

use crate::epoch::Epoch;

use super::Shared;

enum SegmentOutcome {
    /// Progress reached 1.0 under a current epoch.
    Completed,
    /// A newer epoch took over; nothing was written after it appeared.
    Superseded,
    /// An unexpected failure; playback stays frozen on the current page.
    Faulted,
}

pub(crate) async fn run(
    shared: Arc<Shared>,
    epoch: Epoch,
    mut story_index: usize,
    mut page_index: usize,
) {
    loop {
        match run_segment(&shared, epoch, story_index, page_index).await {
            SegmentOutcome::Completed => {}
            SegmentOutcome::Superseded => return,
            SegmentOutcome::Faulted => return,
        }

        let page_count = match shared.stories.get(story_index) {
            Some(story) => story.pages.len(),
            None => return,
        };

        if page_index + 1 < page_count {
            // Next page of the same story.
            page_index += 1;
            let page = shared.stories[story_index].pages[page_index].clone();
            let mut state = shared.state.lock();
            if !shared.epochs.is_current(epoch) {
                return;
            }
            state.enter_page(page_index, page);
            shared.publisher.publish(state.snapshot());
        } else {
            // Next playable story, or the end of the catalog.
            match shared.first_playable_at(story_index + 1) {
                Some(next) => {
                    story_index = next;
                    page_index = 0;
                    let story = &shared.stories[next];
                    let mut state = shared.state.lock();
                    if !shared.epochs.is_current(epoch) {
                        return;
                    }
                    state.enter_story(next, story, 0);
                    shared.publisher.publish(state.snapshot());
                }
                None => {
                    finish(&shared, epoch);
                    return;
                }
            }
        }
    }
}

/// Pace one segment from 0.0 to 1.0, publishing each tick.
async fn run_segment(
    shared: &Shared,
    epoch: Epoch,
    story_index: usize,
    page_index: usize,
) -> SegmentOutcome {
    // Warm the next page of this story ahead of display. Best effort,
    // independent of this epoch.
    if let Some(story) = shared.stories.get(story_index) {
        if let Some(next) = story.pages.get(page_index + 1) {
            shared.prefetch.warm(next.clone());
        }
    }

    let duration = shared.config.page_duration();
    let started = Instant::now();
    let mut ticker = interval(shared.config.tick_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;

        let ratio = if duration.is_zero() {
            1.0
        } else {
            (started.elapsed().as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
        };

        {
            let mut state = shared.state.lock();
            if !shared.epochs.is_current(epoch) {
                trace!(story_index, page_index, "Segment superseded by newer epoch");
                return SegmentOutcome::Superseded;
            }
            if let Err(e) = state.set_progress(page_index, ratio) {
                error!(
                    story_index,
                    page_index,
                    error = %e,
                    "Unexpected tick failure; freezing playback"
                );
                return SegmentOutcome::Faulted;
            }
            shared.publisher.publish(state.snapshot());
        }

        if ratio >= 1.0 {
            return SegmentOutcome::Completed;
        }
    }
}

/// Catalog exhausted: reset to idle under a fresh epoch and publish the idle
/// snapshot, unless a newer epoch already took over.
fn finish(shared: &Shared, epoch: Epoch) {
    let mut state = shared.state.lock();
    if !shared.epochs.is_current(epoch) {
        return;
    }
    shared.epochs.new_epoch();
    state.reset();
    shared.publisher.publish(state.snapshot());
    info!("Catalog exhausted; story overlay closed");
}
