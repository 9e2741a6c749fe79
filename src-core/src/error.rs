use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::playback::StoreError;

/// Unified app errors.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Transcript: {0}")]
    Transcript(#[from] TranscriptError),

    #[error("Timestamp: {0}")]
    Timestamp(#[from] TimestampError),

    #[error("Store: {0}")]
    Store(#[from] StoreError),

    #[error("No media player is open")]
    NoActivePlayer,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid command arguments: {0}")]
    InvalidArgs(String),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transcript(err) => err.kind(),
            Self::Timestamp(_) => "timestamp",
            Self::Store(_) => "store",
            Self::NoActivePlayer => "no_active_player",
            Self::UnknownCommand(_) => "unknown_command",
            Self::InvalidArgs(_) => "invalid_args",
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidArgs(err.to_string())
    }
}

/// Crosses the command boundary as `{ "kind": ..., "detail": ... }`.
/// Transcript errors keep their own detail so the caller can rebuild the
/// exact [`TranscriptError`].
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if let Self::Transcript(err) = self {
            return err.serialize(serializer);
        }
        let mut state = serializer.serialize_struct("AppError", 2)?;
        state.serialize_field("kind", self.kind())?;
        state.serialize_field("detail", &self.to_string())?;
        state.end()
    }
}

/// Transcript fetch and parse errors
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum TranscriptError {
    #[error("Transcript request failed: {0}")]
    Transport(String),

    #[error("No transcript available for {0}")]
    NotFound(String),

    #[error("No transcript in language {0}")]
    UnsupportedLanguage(String),

    #[error("Could not parse transcript: {0}")]
    Parse(String),

    #[error("Not a supported media URL: {0}")]
    InvalidMediaUrl(String),
}

impl TranscriptError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport",
            Self::NotFound(_) => "not_found",
            Self::UnsupportedLanguage(_) => "unsupported_language",
            Self::Parse(_) => "parse",
            Self::InvalidMediaUrl(_) => "invalid_media_url",
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Transport(_) => {
                "Could not load the transcript. Check your internet connection and try again."
            }
            Self::NotFound(_) => "This video has no transcript.",
            Self::UnsupportedLanguage(_) => {
                "No transcript is available in your preferred language."
            }
            Self::Parse(_) => "The transcript could not be read.",
            Self::InvalidMediaUrl(_) => "Transcripts are only available for YouTube videos.",
        }
    }
}

#[cfg(feature = "fetch")]
impl From<reqwest::Error> for TranscriptError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for TranscriptError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Timestamp text errors. Ranges are never checked, only the shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    #[error("Empty timestamp")]
    Empty,

    #[error("Timestamp part is not an integer: {0:?}")]
    InvalidPart(String),

    #[error("Timestamp has {0} parts, expected at most 3")]
    TooManyParts(usize),
}
