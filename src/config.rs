//! Engine configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerConfig {
    /// How long each page is shown before auto-advancing, in milliseconds.
    #[serde(default = "default_page_duration_ms")]
    pub page_duration_ms: u64,

    /// Progress publication cadence, in milliseconds (~60 Hz by default).
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    #[serde(default)]
    pub prefetch: PrefetchConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PrefetchConfig {
    /// Warm the next page's content ahead of display.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Cache validity hint passed to the image cache, in seconds.
    #[serde(default = "default_cache_validity_secs")]
    pub cache_validity_secs: u64,
}

fn default_page_duration_ms() -> u64 {
    5500
}
fn default_tick_interval_ms() -> u64 {
    16
}
fn default_enabled() -> bool {
    true
}
fn default_cache_validity_secs() -> u64 {
    3 * 60 * 60
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            page_duration_ms: default_page_duration_ms(),
            tick_interval_ms: default_tick_interval_ms(),
            prefetch: PrefetchConfig::default(),
        }
    }
}

impl Default for PrefetchConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            cache_validity_secs: default_cache_validity_secs(),
        }
    }
}

impl PlayerConfig {
    pub fn page_duration(&self) -> Duration {
        Duration::from_millis(self.page_duration_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl PrefetchConfig {
    pub fn cache_validity(&self) -> Duration {
        Duration::from_secs(self.cache_validity_secs)
    }
}
