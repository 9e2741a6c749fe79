use std::collections::HashMap;

use serde::Serialize;

use super::store::{PositionStore, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PlayerId(u64);

impl PlayerId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerEntry {
    pub media_url: String,
    pub last_position_secs: f64,
    pub playing: bool,
}

/// Players mounted in the current workspace, keyed by an opaque id. Passed
/// explicitly to whatever needs a lookup.
#[derive(Debug, Default)]
pub struct PlayerRegistry {
    next_id: u64,
    players: HashMap<PlayerId, PlayerEntry>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount: the entry starts at the position last saved for `media_url`.
    pub fn register<S>(&mut self, media_url: &str, store: &S) -> PlayerId
    where
        S: PositionStore + ?Sized,
    {
        self.next_id += 1;
        let id = PlayerId(self.next_id);
        let last_position_secs = store.load(media_url).unwrap_or(0.0);

        log::info!(
            "Registered player {} for {media_url} at {last_position_secs:.1}s",
            id.0
        );
        self.players.insert(
            id,
            PlayerEntry {
                media_url: media_url.to_string(),
                last_position_secs,
                playing: false,
            },
        );
        id
    }

    /// Unmount: removes the entry and saves its last position.
    pub fn unregister<S: PositionStore + ?Sized>(
        &mut self,
        id: PlayerId,
        store: &mut S,
    ) -> Result<Option<PlayerEntry>, StoreError> {
        let Some(entry) = self.players.remove(&id) else {
            return Ok(None);
        };
        log::info!("Unregistered player {}", id.0);
        store.save(&entry.media_url, entry.last_position_secs)?;
        Ok(Some(entry))
    }

    pub fn get(&self, id: PlayerId) -> Option<&PlayerEntry> {
        self.players.get(&id)
    }

    pub fn get_mut(&mut self, id: PlayerId) -> Option<&mut PlayerEntry> {
        self.players.get_mut(&id)
    }

    pub fn update_position(&mut self, id: PlayerId, seconds: f64) -> bool {
        match self.players.get_mut(&id) {
            Some(entry) => {
                entry.last_position_secs = seconds;
                true
            }
            None => false,
        }
    }

    pub fn set_playing(&mut self, id: PlayerId, playing: bool) -> bool {
        match self.players.get_mut(&id) {
            Some(entry) => {
                entry.playing = playing;
                true
            }
            None => false,
        }
    }

    /// Saves every live entry without unmounting; stops at the first failure.
    pub fn flush_all<S: PositionStore + ?Sized>(&self, store: &mut S) -> Result<(), StoreError> {
        let mut ids: Vec<_> = self.players.keys().copied().collect();
        ids.sort();
        for id in ids {
            if let Some(entry) = self.players.get(&id) {
                store.save(&entry.media_url, entry.last_position_secs)?;
            }
        }
        log::debug!("Flushed {} player positions", self.players.len());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
