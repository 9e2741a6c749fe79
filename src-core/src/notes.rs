//! Timestamp references inside note text: inserting them at the cursor and
//! finding the one a click landed on.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::timestamp::{format_timestamp, parse_timestamp};

// Bracketed `[1:02:03]` or bare `12:34`; bare raw seconds are too ambiguous.
static TIMESTAMP_RE: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| {
    Regex::new(r"\[(\d{1,3}(?::\d{1,2}){0,2})\]|\b(\d{1,3}(?::\d{2}){1,2})\b")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimestampRef {
    /// Byte range of the whole match, brackets included.
    pub range: Range<usize>,
    pub seconds: u64,
}

/// Text inserted into a note for the current playback position.
pub fn timestamp_link(seconds: f64) -> String {
    format!("[{}]", format_timestamp(Some(seconds)))
}

pub fn find_timestamps(text: &str) -> Vec<TimestampRef> {
    let Ok(regex) = &*TIMESTAMP_RE else {
        return Vec::new();
    };

    regex
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let inner = caps.get(1).or_else(|| caps.get(2))?;
            let seconds = parse_timestamp(inner.as_str()).ok()?;
            Some(TimestampRef {
                range: whole.range(),
                seconds,
            })
        })
        .collect()
}

/// Timestamp covering `byte_offset`, if any.
pub fn timestamp_at(text: &str, byte_offset: usize) -> Option<TimestampRef> {
    find_timestamps(text)
        .into_iter()
        .find(|found| found.range.start <= byte_offset && byte_offset < found.range.end)
}
