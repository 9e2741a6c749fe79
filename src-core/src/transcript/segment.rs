//! Caption line to sentence splitting.
//!
//! Timing inside a line is interpolated: the line's duration is spread evenly
//! over the sentences it produced. Speech rate is not linear, so sentence
//! boundaries are an approximation and must not be treated as exact.

use std::sync::LazyLock;

use regex::Regex;

use super::caption::{CaptionLine, Sentence};

static SENTENCE_BOUNDARY_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"([.!?])\s+"));

/// Splits `text` after every `.`, `!` or `?` that is followed by whitespace.
/// Pieces are trimmed and empty pieces dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;

    if let Ok(regex) = &*SENTENCE_BOUNDARY_RE {
        for caps in regex.captures_iter(text) {
            let (Some(boundary), Some(mark)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            pieces.push(&text[start..mark.end()]);
            start = boundary.end();
        }
    }
    pieces.push(&text[start..]);

    pieces
        .into_iter()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect()
}

pub fn segment_line(line: &CaptionLine, line_index: usize) -> Vec<Sentence> {
    let pieces = split_sentences(&line.text);
    if pieces.is_empty() {
        return Vec::new();
    }

    // Missing or negative durations collapse to zero-length sentences.
    let duration = if line.duration_ms.is_finite() {
        line.duration_ms.max(0.0)
    } else {
        0.0
    };
    let slice = duration / pieces.len() as f64;

    pieces
        .into_iter()
        .enumerate()
        .map(|(i, piece)| Sentence {
            text: piece.to_string(),
            start_offset_ms: line.offset_ms + i as f64 * slice,
            end_offset_ms: line.offset_ms + (i + 1) as f64 * slice,
            source_line_index: line_index,
        })
        .collect()
}

pub fn segment_sentences(lines: &[CaptionLine]) -> Vec<Sentence> {
    let sentences: Vec<Sentence> = lines
        .iter()
        .enumerate()
        .flat_map(|(index, line)| segment_line(line, index))
        .collect();

    log::debug!(
        "Segmented {} caption lines into {} sentences",
        lines.len(),
        sentences.len()
    );
    sentences
}
