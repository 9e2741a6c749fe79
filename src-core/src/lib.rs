pub mod commands;
pub mod config;
pub mod error;
pub mod fetch;
pub mod host;
pub mod media_url;
pub mod notes;
pub mod playback;
pub mod scroll;
pub mod timestamp;
pub mod transcript;

pub use config::TranscriptConfig;
pub use error::{AppError, TimestampError, TranscriptError};
pub use host::{MediaNotesHost, NoteSink, PlayerPort};
pub use media_url::{classify_url, get_video_id, is_media_url, PlayerKind};
pub use timestamp::{format_timestamp, parse_timestamp};
