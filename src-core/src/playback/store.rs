use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid position file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Last known playback position per media URL.
pub trait PositionStore {
    fn load(&self, media_url: &str) -> Option<f64>;
    fn save(&mut self, media_url: &str, seconds: f64) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryPositionStore {
    positions: HashMap<String, f64>,
}

impl MemoryPositionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PositionStore for MemoryPositionStore {
    fn load(&self, media_url: &str) -> Option<f64> {
        self.positions.get(media_url).copied()
    }

    fn save(&mut self, media_url: &str, seconds: f64) -> Result<(), StoreError> {
        self.positions.insert(media_url.to_string(), seconds);
        Ok(())
    }
}

pub fn default_store_path() -> PathBuf {
    let base = dirs_next::data_dir()
        .or_else(|| std::env::var_os("HOME").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));

    base.join("media-notes").join("positions.json")
}

/// JSON file store, rewritten on every save.
#[derive(Debug)]
pub struct JsonPositionStore {
    path: PathBuf,
    positions: HashMap<String, f64>,
}

impl JsonPositionStore {
    /// Opens `path`, starting empty when the file does not exist yet.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let positions = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => HashMap::new(),
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(err.into()),
        };

        log::info!(
            "Loaded {} saved positions from {}",
            positions.len(),
            path.display()
        );
        Ok(Self { path, positions })
    }

    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(default_store_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(&self.positions)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl PositionStore for JsonPositionStore {
    fn load(&self, media_url: &str) -> Option<f64> {
        self.positions.get(media_url).copied()
    }

    fn save(&mut self, media_url: &str, seconds: f64) -> Result<(), StoreError> {
        self.positions.insert(media_url.to_string(), seconds);
        self.persist()
    }
}
