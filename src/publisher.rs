//! Progress fan-out to subscribers.
//!
//! A thin wrapper over a broadcast channel so the engine never depends on a
//! particular UI mechanism. Subscribers receive full [`PlaybackState`]
//! snapshots in publish order; dropping the receiver unsubscribes.

use tokio::sync::broadcast;
use tracing::debug;

use crate::state::PlaybackState;

/// Channel capacity for state snapshots.
const CHANNEL_CAPACITY: usize = 256;

/// Publishes playback state snapshots to any number of subscribers.
#[derive(Debug, Clone)]
pub struct ProgressPublisher {
    tx: broadcast::Sender<PlaybackState>,
}

impl ProgressPublisher {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Subscribe to state snapshots. Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> broadcast::Receiver<PlaybackState> {
        self.tx.subscribe()
    }

    /// Broadcast a snapshot to all subscribers.
    pub fn publish(&self, snapshot: PlaybackState) {
        if self.tx.send(snapshot).is_err() {
            debug!("No subscribers for playback state");
        }
    }
}

impl Default for ProgressPublisher {
    fn default() -> Self {
        Self::new()
    }
}
