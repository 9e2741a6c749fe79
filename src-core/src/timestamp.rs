//! `H:MM:SS` / `MM:SS` timestamp text.
//!
//! Parsing is deliberately permissive: part ranges are not checked, so
//! `"90:00"` is 5400 seconds. Callers that seek with the result own any
//! sanity checks.

use crate::error::TimestampError;

/// Formats whole seconds (fractions truncated). `None` and non-finite input
/// produce an empty string.
pub fn format_timestamp(seconds: Option<f64>) -> String {
    let Some(seconds) = seconds.filter(|s| s.is_finite()) else {
        return String::new();
    };

    let total = seconds.max(0.0).trunc() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}

pub fn format_seconds(seconds: u64) -> String {
    format_timestamp(Some(seconds as f64))
}

/// Parses `H:MM:SS`, `MM:SS` or raw seconds into seconds.
pub fn parse_timestamp(text: &str) -> Result<u64, TimestampError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(TimestampError::Empty);
    }

    let parts = text
        .split(':')
        .map(|part| {
            part.trim()
                .parse::<u64>()
                .map_err(|_| TimestampError::InvalidPart(part.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    match parts.as_slice() {
        [h, m, s] => Ok(h
            .saturating_mul(3600)
            .saturating_add(m.saturating_mul(60))
            .saturating_add(*s)),
        [m, s] => Ok(m.saturating_mul(60).saturating_add(*s)),
        [s] => Ok(*s),
        _ => Err(TimestampError::TooManyParts(parts.len())),
    }
}
