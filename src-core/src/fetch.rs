//! Transcript retrieval.

use serde::Deserialize;

use crate::error::TranscriptError;
use crate::transcript::CaptionLine;

pub trait TranscriptSource {
    fn fetch(&self, video_id: &str, language: &str) -> Result<Vec<CaptionLine>, TranscriptError>;
}

#[derive(Debug, Deserialize)]
struct Json3Transcript {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Json3Event {
    #[serde(default)]
    t_start_ms: f64,
    #[serde(default)]
    d_duration_ms: f64,
    #[serde(default)]
    segs: Vec<Json3Segment>,
}

#[derive(Debug, Deserialize)]
struct Json3Segment {
    #[serde(default)]
    utf8: String,
}

/// Parses a `fmt=json3` timedtext body. Events without text are skipped.
pub fn parse_json3(body: &str) -> Result<Vec<CaptionLine>, TranscriptError> {
    let transcript: Json3Transcript = serde_json::from_str(body)?;

    Ok(transcript
        .events
        .into_iter()
        .filter_map(|event| {
            let raw: String = event.segs.iter().map(|seg| seg.utf8.as_str()).collect();
            let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");
            if text.is_empty() {
                return None;
            }
            Some(CaptionLine {
                text,
                offset_ms: event.t_start_ms,
                duration_ms: event.d_duration_ms,
            })
        })
        .collect())
}

#[cfg(feature = "fetch")]
pub use youtube::YoutubeTranscriptSource;

#[cfg(feature = "fetch")]
mod youtube {
    use std::time::Duration;

    use reqwest::blocking::Client;
    use reqwest::StatusCode;

    use super::{parse_json3, TranscriptSource};
    use crate::error::TranscriptError;
    use crate::transcript::CaptionLine;

    const TIMEDTEXT_URL: &str = "https://www.youtube.com/api/timedtext";

    pub struct YoutubeTranscriptSource {
        client: Client,
        base_url: String,
    }

    impl YoutubeTranscriptSource {
        pub fn new() -> Result<Self, TranscriptError> {
            Self::with_base_url(TIMEDTEXT_URL)
        }

        pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, TranscriptError> {
            let client = Client::builder()
                .timeout(Duration::from_secs(15))
                .build()?;
            Ok(Self {
                client,
                base_url: base_url.into(),
            })
        }

        fn fetch_track(
            &self,
            video_id: &str,
            language: &str,
            auto_generated: bool,
        ) -> Result<Vec<CaptionLine>, TranscriptError> {
            let mut query = vec![("v", video_id), ("lang", language), ("fmt", "json3")];
            if auto_generated {
                query.push(("kind", "asr"));
            }

            log::info!(
                "Fetching transcript for {video_id} (lang={language}, asr={auto_generated})"
            );
            let response = self.client.get(&self.base_url).query(&query).send()?;

            if response.status() == StatusCode::NOT_FOUND {
                return Err(TranscriptError::NotFound(video_id.to_string()));
            }
            let body = response.error_for_status()?.text()?;
            if body.trim().is_empty() {
                return Err(TranscriptError::NotFound(video_id.to_string()));
            }

            let lines = parse_json3(&body)?;
            if lines.is_empty() {
                return Err(TranscriptError::NotFound(video_id.to_string()));
            }
            Ok(lines)
        }
    }

    impl TranscriptSource for YoutubeTranscriptSource {
        fn fetch(
            &self,
            video_id: &str,
            language: &str,
        ) -> Result<Vec<CaptionLine>, TranscriptError> {
            match self.fetch_track(video_id, language, false) {
                Err(TranscriptError::NotFound(_)) => {
                    log::debug!("No manual {language} track for {video_id}, trying asr");
                    self.fetch_track(video_id, language, true)
                        .map_err(|err| match err {
                            TranscriptError::NotFound(_) => {
                                TranscriptError::UnsupportedLanguage(language.to_string())
                            }
                            other => other,
                        })
                }
                other => other,
            }
        }
    }
}
