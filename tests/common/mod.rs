//! Shared test harness for integration tests.
//!
//! Builds a [`PlaybackEngine`] over an in-memory catalog with a recording
//! image cache and fast timings so full playback runs finish quickly under
//! Tokio's paused clock.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::broadcast;

use storyreel::{
    ImageCache, InMemoryCatalog, PageRef, PlaybackEngine, PlaybackState, PlayerConfig, Story,
};

/// Image cache stub that records every warm request.
#[derive(Default)]
pub struct RecordingCache {
    warmed: Mutex<Vec<String>>,
}

impl RecordingCache {
    pub fn warmed(&self) -> Vec<String> {
        self.warmed.lock().clone()
    }
}

#[async_trait]
impl ImageCache for RecordingCache {
    async fn warm(&self, page: &PageRef, _validity: Duration) -> anyhow::Result<()> {
        self.warmed.lock().push(page.as_str().to_string());
        Ok(())
    }
}

/// Engine plus the cache stub it prefetches into.
pub struct TestEngine {
    pub engine: PlaybackEngine,
    pub cache: Arc<RecordingCache>,
}

/// Fast timings: 200 ms pages at a 20 ms cadence.
pub fn fast_config() -> PlayerConfig {
    PlayerConfig {
        page_duration_ms: 200,
        tick_interval_ms: 20,
        ..PlayerConfig::default()
    }
}

pub fn engine_with(stories: Vec<Story>) -> TestEngine {
    // Opt-in logs for debugging: RUST_LOG=storyreel=trace cargo test
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let cache = Arc::new(RecordingCache::default());
    let catalog = InMemoryCatalog::new(stories);
    let engine = PlaybackEngine::new(&catalog, cache.clone(), fast_config());
    TestEngine { engine, cache }
}

/// A story whose pages are remote URLs (so they qualify for prefetch).
pub fn remote_story(index: usize, pages: usize) -> Story {
    Story::new(
        index,
        format!("Story {index}"),
        (0..pages)
            .map(|p| PageRef::new(format!("https://cdn.example.com/s{index}/p{p}.png")))
            .collect(),
    )
}

/// Receive the next snapshot, failing the test if none arrives in time.
pub async fn next_snapshot(rx: &mut broadcast::Receiver<PlaybackState>) -> PlaybackState {
    tokio::time::timeout(Duration::from_secs(10), rx.recv())
        .await
        .expect("Timed out waiting for playback snapshot")
        .expect("Snapshot channel closed")
}

/// Drain snapshots until one satisfies `pred`, returning everything seen
/// (the matching snapshot last).
pub async fn collect_until(
    rx: &mut broadcast::Receiver<PlaybackState>,
    pred: impl Fn(&PlaybackState) -> bool,
) -> Vec<PlaybackState> {
    let mut seen = Vec::new();
    loop {
        let snapshot = next_snapshot(rx).await;
        let done = pred(&snapshot);
        seen.push(snapshot);
        if done {
            return seen;
        }
    }
}
