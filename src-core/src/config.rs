use std::time::Duration;

use crate::scroll::ScrollConfig;
use crate::transcript::DEFAULT_PARAGRAPH_SIZE;

const ENV_PREFIX: &str = "MEDIA_NOTES_";

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptConfig {
    pub paragraph_size: usize,
    pub scroll_bias_px: f64,
    pub scroll_threshold_px: f64,
    pub scroll_duration_ms: f64,
    pub poll_interval_ms: u64,
    pub preferred_language: String,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            paragraph_size: DEFAULT_PARAGRAPH_SIZE,
            scroll_bias_px: 50.0,
            scroll_threshold_px: 10.0,
            scroll_duration_ms: 300.0,
            poll_interval_ms: 1_000,
            preferred_language: "en".to_string(),
        }
    }
}

impl TranscriptConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides(ENV_PREFIX);
        config
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn scroll_config(&self) -> ScrollConfig {
        ScrollConfig {
            bias_px: self.scroll_bias_px,
            threshold_px: self.scroll_threshold_px,
            duration_ms: self.scroll_duration_ms,
        }
    }

    pub fn apply_env_overrides(&mut self, prefix: &str) {
        let parse_env = |suffix: &str| std::env::var(format!("{prefix}{suffix}")).ok();
        let apply = |suffix: &str, target: &mut f64| {
            if let Some(v) = parse_env(suffix).and_then(|s| s.parse().ok()) {
                *target = v;
            }
        };

        apply("SCROLL_BIAS_PX", &mut self.scroll_bias_px);
        apply("SCROLL_THRESHOLD_PX", &mut self.scroll_threshold_px);
        apply("SCROLL_DURATION_MS", &mut self.scroll_duration_ms);

        if let Some(v) = parse_env("PARAGRAPH_SIZE").and_then(|s| s.parse::<usize>().ok()) {
            self.paragraph_size = v.max(1);
        }
        if let Some(v) = parse_env("POLL_INTERVAL_MS").and_then(|s| s.parse::<u64>().ok()) {
            self.poll_interval_ms = v.max(50);
        }
        if let Some(v) = parse_env("LANGUAGE") {
            let v = v.trim();
            if !v.is_empty() {
                self.preferred_language = v.to_string();
            }
        }
    }
}
