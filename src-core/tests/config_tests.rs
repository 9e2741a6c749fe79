use std::time::Duration;

use media_notes_lib::TranscriptConfig;

#[test]
fn default_config_has_sane_values() {
    let config = TranscriptConfig::default();
    assert_eq!(config.paragraph_size, 3);
    assert_eq!(config.poll_interval(), Duration::from_secs(1));
    assert_eq!(config.preferred_language, "en");

    let scroll = config.scroll_config();
    assert_eq!(scroll.threshold_px, 10.0);
    assert_eq!(scroll.duration_ms, 300.0);
}

#[test]
fn env_overrides_apply_with_prefix() {
    std::env::set_var("CFGTEST_PARAGRAPH_SIZE", "0");
    std::env::set_var("CFGTEST_SCROLL_BIAS_PX", "12.5");
    std::env::set_var("CFGTEST_POLL_INTERVAL_MS", "5");
    std::env::set_var("CFGTEST_LANGUAGE", " fr ");
    std::env::set_var("CFGTEST_SCROLL_DURATION_MS", "not a number");

    let mut config = TranscriptConfig::default();
    config.apply_env_overrides("CFGTEST_");

    assert_eq!(config.paragraph_size, 1);
    assert_eq!(config.scroll_bias_px, 12.5);
    assert_eq!(config.poll_interval_ms, 50);
    assert_eq!(config.preferred_language, "fr");
    assert_eq!(config.scroll_duration_ms, 300.0);
}
