//! Host-side state behind the front end's commands.
//!
//! The shell owns one [`MediaNotesHost`], forwards `invoke` calls to
//! [`crate::commands::handle_command`] and drives [`MediaNotesHost::on_timer`]
//! from its event loop. Everything runs on that one thread.

use crate::config::TranscriptConfig;
use crate::error::{AppError, TranscriptError};
use crate::fetch::TranscriptSource;
use crate::media_url::get_video_id;
use crate::playback::{
    PlaybackPoller, PlayerEntry, PlayerId, PlayerRegistry, PositionSource, PositionStore,
    SeekSink,
};
use crate::transcript::CaptionLine;

/// Where inserted note text goes: the editor cursor in the real shell.
pub trait NoteSink {
    fn insert_text(&mut self, text: &str);
}

/// The embedded player as the host sees it.
pub trait PlayerPort: PositionSource + SeekSink {}

impl<T: PositionSource + SeekSink> PlayerPort for T {}

pub struct MediaNotesHost {
    config: TranscriptConfig,
    source: Box<dyn TranscriptSource>,
    store: Box<dyn PositionStore>,
    player: Box<dyn PlayerPort>,
    notes: Box<dyn NoteSink>,
    registry: PlayerRegistry,
    poller: PlaybackPoller,
    active: Option<PlayerId>,
}

impl MediaNotesHost {
    pub fn new(
        config: TranscriptConfig,
        source: Box<dyn TranscriptSource>,
        store: Box<dyn PositionStore>,
        player: Box<dyn PlayerPort>,
        notes: Box<dyn NoteSink>,
    ) -> Self {
        let poller = PlaybackPoller::new(config.poll_interval());
        Self {
            config,
            source,
            store,
            player,
            notes,
            registry: PlayerRegistry::new(),
            poller,
            active: None,
        }
    }

    /// Environment config, the YouTube timedtext source and the on-disk
    /// position store.
    #[cfg(feature = "fetch")]
    pub fn with_defaults(
        player: Box<dyn PlayerPort>,
        notes: Box<dyn NoteSink>,
    ) -> Result<Self, AppError> {
        let source = crate::fetch::YoutubeTranscriptSource::new()?;
        let store = crate::playback::JsonPositionStore::open_default()?;
        Ok(Self::new(
            TranscriptConfig::from_env(),
            Box::new(source),
            Box::new(store),
            player,
            notes,
        ))
    }

    pub fn config(&self) -> &TranscriptConfig {
        &self.config
    }

    /// A note with an embedded player became active. The previous player is
    /// closed first so its position is saved.
    pub fn open_media(&mut self, media_url: &str) -> Result<PlayerId, AppError> {
        self.close_media()?;
        let id = self.registry.register(media_url, self.store.as_ref());
        self.active = Some(id);
        Ok(id)
    }

    pub fn close_media(&mut self) -> Result<(), AppError> {
        let Some(id) = self.active.take() else {
            return Ok(());
        };
        self.poller.stop();
        self.registry.unregister(id, self.store.as_mut())?;
        Ok(())
    }

    pub fn active_player(&self) -> Option<&PlayerEntry> {
        self.registry.get(self.active?)
    }

    /// Play/pause notification from the player. Returns `false` when no
    /// player is open.
    pub fn set_playing(&mut self, playing: bool, now_ms: f64) -> bool {
        let Some(id) = self.active else {
            return false;
        };
        self.registry.set_playing(id, playing);
        if playing {
            self.poller.on_play(now_ms);
        } else {
            self.poller.on_pause();
        }
        true
    }

    /// Host timer callback: samples the player when a poll is due and records
    /// the position.
    pub fn on_timer(&mut self, now_ms: f64) -> Option<f64> {
        let id = self.active?;
        let time_ms = self.poller.poll_due(now_ms, self.player.as_mut())?;
        self.registry.update_position(id, time_ms / 1000.0);
        Some(time_ms)
    }

    pub fn flush_positions(&mut self) -> Result<(), AppError> {
        self.registry.flush_all(self.store.as_mut())?;
        Ok(())
    }

    pub fn current_media_url(&self) -> Option<String> {
        self.active_player().map(|entry| entry.media_url.clone())
    }

    /// Blank `language` falls back to the configured preference.
    pub fn fetch_transcript(
        &self,
        media_url: &str,
        language: &str,
    ) -> Result<Vec<CaptionLine>, AppError> {
        let video_id = get_video_id(media_url)
            .ok_or_else(|| TranscriptError::InvalidMediaUrl(media_url.to_string()))?;
        let language = match language.trim() {
            "" => self.config.preferred_language.as_str(),
            lang => lang,
        };
        Ok(self.source.fetch(&video_id, language)?)
    }

    pub fn player_current_time(&self) -> Option<f64> {
        self.active_player()
            .map(|entry| entry.last_position_secs * 1000.0)
    }

    pub fn player_is_playing(&self) -> bool {
        self.active_player().is_some_and(|entry| entry.playing)
    }

    pub fn player_seek(&mut self, seconds: f64) -> Result<(), AppError> {
        let id = self.active.ok_or(AppError::NoActivePlayer)?;
        let seconds = if seconds.is_finite() {
            seconds.max(0.0)
        } else {
            0.0
        };
        self.player.seek_to(seconds);
        self.registry.update_position(id, seconds);
        Ok(())
    }

    pub fn insert_into_note(&mut self, text: &str) {
        self.notes.insert_text(text);
    }
}
