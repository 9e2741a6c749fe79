use serde::{Deserialize, Serialize};

/// One timed entry as delivered by the captioning system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionLine {
    pub text: String,
    pub offset_ms: f64,
    pub duration_ms: f64,
}

impl CaptionLine {
    pub fn new(text: impl Into<String>, offset_ms: f64, duration_ms: f64) -> Self {
        Self {
            text: text.into(),
            offset_ms,
            duration_ms,
        }
    }

    pub fn end_ms(&self) -> f64 {
        self.offset_ms + self.duration_ms.max(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    pub text: String,
    pub start_offset_ms: f64,
    pub end_offset_ms: f64,
    /// Index of the caption line this sentence was cut from.
    pub source_line_index: usize,
}

impl Sentence {
    pub fn duration_ms(&self) -> f64 {
        self.end_offset_ms - self.start_offset_ms
    }

    /// Inclusive on both ends.
    pub fn contains(&self, time_ms: f64) -> bool {
        self.start_offset_ms <= time_ms && time_ms <= self.end_offset_ms
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub sentences: Vec<Sentence>,
    pub start_offset_ms: f64,
    pub end_offset_ms: f64,
}

impl Paragraph {
    /// Returns `None` for an empty batch; a paragraph always holds at least one sentence.
    pub fn from_sentences(sentences: Vec<Sentence>) -> Option<Self> {
        let start_offset_ms = sentences.first()?.start_offset_ms;
        let end_offset_ms = sentences.last()?.end_offset_ms;
        Some(Self {
            sentences,
            start_offset_ms,
            end_offset_ms,
        })
    }

    pub fn contains(&self, time_ms: f64) -> bool {
        self.start_offset_ms <= time_ms && time_ms <= self.end_offset_ms
    }

    pub fn text(&self) -> String {
        self.sentences
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
