use serde::Serialize;

use super::caption::{CaptionLine, Paragraph, Sentence};
use super::locate::{ActiveLocation, PositionTracker};
use super::paragraph::group_paragraphs;
use super::segment::segment_sentences;
use crate::config::TranscriptConfig;
use crate::error::TranscriptError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum PanelStatus {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// Handed out by [`TranscriptPanel::begin_fetch`]; only the most recent
/// ticket may apply its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Transcript model behind one mounted transcript view.
pub struct TranscriptPanel {
    paragraph_size: usize,
    paragraphs: Vec<Paragraph>,
    tracker: PositionTracker,
    status: PanelStatus,
    latest_fetch: u64,
    closed: bool,
}

impl Default for TranscriptPanel {
    fn default() -> Self {
        Self::new(&TranscriptConfig::default())
    }
}

impl TranscriptPanel {
    pub fn new(config: &TranscriptConfig) -> Self {
        Self {
            paragraph_size: config.paragraph_size,
            paragraphs: Vec::new(),
            tracker: PositionTracker::new(),
            status: PanelStatus::Idle,
            latest_fetch: 0,
            closed: false,
        }
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.latest_fetch += 1;
        self.status = PanelStatus::Loading;
        log::info!("Transcript fetch #{} started", self.latest_fetch);
        FetchTicket(self.latest_fetch)
    }

    /// Applies a fetch result. Returns `false` when the result was dropped
    /// because a newer fetch started or the panel was closed.
    pub fn apply_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<CaptionLine>, TranscriptError>,
    ) -> bool {
        if self.closed {
            log::debug!("Dropping transcript fetch #{} for closed panel", ticket.0);
            return false;
        }
        if ticket.0 != self.latest_fetch {
            log::debug!(
                "Dropping stale transcript fetch #{} (latest #{})",
                ticket.0,
                self.latest_fetch
            );
            return false;
        }

        self.tracker.reset();
        match result {
            Ok(lines) => {
                self.load_lines(&lines);
                log::info!(
                    "Transcript loaded: {} lines, {} paragraphs",
                    lines.len(),
                    self.paragraphs.len()
                );
            }
            Err(err) => {
                log::warn!("Transcript fetch failed: {err}");
                self.paragraphs.clear();
                self.status = PanelStatus::Failed(err.user_message().to_string());
            }
        }
        true
    }

    /// Builds the model directly from caption lines, bypassing fetch sequencing.
    pub fn load_lines(&mut self, lines: &[CaptionLine]) {
        let sentences = segment_sentences(lines);
        self.paragraphs = group_paragraphs(&sentences, self.paragraph_size);
        self.tracker.reset();
        self.status = PanelStatus::Ready;
    }

    /// Feeds one playback tick. `Some` only when the active location changed.
    pub fn on_time(&mut self, current_time_ms: f64) -> Option<ActiveLocation> {
        if self.closed {
            return None;
        }
        self.tracker.update(&self.paragraphs, current_time_ms)
    }

    pub fn active(&self) -> ActiveLocation {
        self.tracker.current()
    }

    pub fn close(&mut self) {
        self.closed = true;
        self.paragraphs.clear();
        self.tracker.reset();
        self.status = PanelStatus::Idle;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn status(&self) -> &PanelStatus {
        &self.status
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn sentence(&self, paragraph: usize, sentence: usize) -> Option<&Sentence> {
        self.paragraphs.get(paragraph)?.sentences.get(sentence)
    }

    /// Plain text of the whole transcript, one blank line between paragraphs.
    pub fn full_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
