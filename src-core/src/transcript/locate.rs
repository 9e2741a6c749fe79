use serde::Serialize;

use super::caption::Paragraph;

/// Paragraph and sentence currently under the playback cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ActiveLocation {
    pub paragraph: Option<usize>,
    pub sentence: Option<usize>,
}

impl ActiveLocation {
    pub const NONE: Self = Self {
        paragraph: None,
        sentence: None,
    };

    /// Paragraph index in the UI's `-1` when none convention.
    pub fn paragraph_index_or_neg(&self) -> i64 {
        self.paragraph.map_or(-1, |i| i as i64)
    }

    pub fn sentence_index_or_neg(&self) -> i64 {
        self.sentence.map_or(-1, |i| i as i64)
    }
}

/// Linear scan, first inclusive match wins at both levels. A time that sits
/// exactly on a boundary shared by two units resolves to the earlier one.
pub fn locate(paragraphs: &[Paragraph], current_time_ms: f64) -> ActiveLocation {
    let Some(paragraph) = paragraphs.iter().position(|p| p.contains(current_time_ms)) else {
        return ActiveLocation::NONE;
    };

    let sentence = paragraphs[paragraph]
        .sentences
        .iter()
        .position(|s| s.contains(current_time_ms));

    ActiveLocation {
        paragraph: Some(paragraph),
        sentence,
    }
}

/// Remembers the last reported location so repeated ticks inside the same
/// sentence do not produce updates.
#[derive(Debug, Default)]
pub struct PositionTracker {
    last: Option<ActiveLocation>,
}

impl PositionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the new location only when it differs from the previous call.
    pub fn update(
        &mut self,
        paragraphs: &[Paragraph],
        current_time_ms: f64,
    ) -> Option<ActiveLocation> {
        let location = locate(paragraphs, current_time_ms);
        if self.last == Some(location) {
            return None;
        }

        log::debug!(
            "Active location at {:.0}ms: paragraph={} sentence={}",
            current_time_ms,
            location.paragraph_index_or_neg(),
            location.sentence_index_or_neg()
        );
        self.last = Some(location);
        Some(location)
    }

    pub fn current(&self) -> ActiveLocation {
        self.last.unwrap_or_default()
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
