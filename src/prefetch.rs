//! Best-effort warm-up of upcoming page content.
//!
//! Prefetches run as detached background tasks that never touch playback
//! state, so they need no synchronization with the tick loop. A stale
//! prefetch for a page the user skipped is harmless waste; a failed prefetch
//! is logged and forgotten.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::catalog::PageRef;
use crate::config::PrefetchConfig;

/// External image/content cache the engine asks to warm pages ahead of
/// display.
#[async_trait]
pub trait ImageCache: Send + Sync {
    /// Fetch `page` into the cache, keeping it valid for at least `validity`.
    async fn warm(&self, page: &PageRef, validity: Duration) -> Result<()>;
}

/// No-op cache for consumers that have nothing to warm.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullImageCache;

#[async_trait]
impl ImageCache for NullImageCache {
    async fn warm(&self, _page: &PageRef, _validity: Duration) -> Result<()> {
        Ok(())
    }
}

/// Fire-and-forget prefetch front-end.
#[derive(Clone)]
pub struct PrefetchCoordinator {
    cache: Arc<dyn ImageCache>,
    config: PrefetchConfig,
}

impl PrefetchCoordinator {
    pub fn new(cache: Arc<dyn ImageCache>, config: PrefetchConfig) -> Self {
        Self { cache, config }
    }

    /// Warm `page` in the background. Never blocks, never fails the caller;
    /// failures are logged and have no effect on playback.
    pub fn warm(&self, page: PageRef) {
        if !self.config.enabled {
            return;
        }
        if !page.is_remote() {
            debug!(page = %page, "Skipping prefetch of local content");
            return;
        }

        let cache = Arc::clone(&self.cache);
        let validity = self.config.cache_validity();
        tokio::spawn(async move {
            if let Err(e) = cache.warm(&page, validity).await {
                warn!(page = %page, error = %e, "Prefetch failed; continuing playback");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    /// Cache stub that records warm requests and optionally fails them.
    #[derive(Default)]
    struct RecordingCache {
        warmed: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl ImageCache for RecordingCache {
        async fn warm(&self, page: &PageRef, _validity: Duration) -> Result<()> {
            self.warmed.lock().push(page.as_str().to_string());
            if self.fail {
                anyhow::bail!("cache unavailable");
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn warms_remote_pages() {
        let cache = Arc::new(RecordingCache::default());
        let coordinator =
            PrefetchCoordinator::new(cache.clone(), PrefetchConfig::default());

        coordinator.warm(PageRef::new("https://cdn.example.com/p1.png"));
        tokio::task::yield_now().await;

        assert_eq!(
            cache.warmed.lock().as_slice(),
            ["https://cdn.example.com/p1.png"]
        );
    }

    #[tokio::test]
    async fn skips_local_pages() {
        let cache = Arc::new(RecordingCache::default());
        let coordinator =
            PrefetchCoordinator::new(cache.clone(), PrefetchConfig::default());

        coordinator.warm(PageRef::new("bundled_story.png"));
        tokio::task::yield_now().await;

        assert!(cache.warmed.lock().is_empty());
    }

    #[tokio::test]
    async fn disabled_prefetch_does_nothing() {
        let cache = Arc::new(RecordingCache::default());
        let config = PrefetchConfig {
            enabled: false,
            ..PrefetchConfig::default()
        };
        let coordinator = PrefetchCoordinator::new(cache.clone(), config);

        coordinator.warm(PageRef::new("https://cdn.example.com/p1.png"));
        tokio::task::yield_now().await;

        assert!(cache.warmed.lock().is_empty());
    }

    #[tokio::test]
    async fn failures_are_swallowed() {
        let cache = Arc::new(RecordingCache {
            fail: true,
            ..RecordingCache::default()
        });
        let coordinator =
            PrefetchCoordinator::new(cache.clone(), PrefetchConfig::default());

        // Must not panic or surface the error anywhere.
        coordinator.warm(PageRef::new("https://cdn.example.com/p1.png"));
        tokio::task::yield_now().await;

        assert_eq!(cache.warmed.lock().len(), 1);
    }
}
