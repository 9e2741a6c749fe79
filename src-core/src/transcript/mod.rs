pub mod caption;
pub mod locate;
pub mod panel;
pub mod paragraph;
pub mod segment;

pub use caption::{CaptionLine, Paragraph, Sentence};
pub use locate::{locate, ActiveLocation, PositionTracker};
pub use panel::{FetchTicket, PanelStatus, TranscriptPanel};
pub use paragraph::{group_paragraphs, DEFAULT_PARAGRAPH_SIZE};
pub use segment::{segment_line, segment_sentences, split_sentences};
