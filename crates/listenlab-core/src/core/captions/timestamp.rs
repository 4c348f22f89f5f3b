//! Caption Timestamp Codec
//!
//! Converts between the SRT timestamp form `HH:MM:SS,mmm` and seconds.
//!
//! Formatting truncates to whole milliseconds, so for every `t` in
//! `[0, 359999.999]`:
//!
//! ```rust,ignore
//! assert_eq!(parse_timestamp(&format_timestamp(t))?, truncate_to_millis(t));
//! ```

use std::sync::OnceLock;

use regex::Regex;

use crate::core::{CoreError, CoreResult, TimeMs, TimeSec};

/// Absorbs binary representation error (e.g. `4.001 * 1000.0 == 4000.9999…`)
/// before truncating to whole milliseconds.
const MS_EPSILON: f64 = 1e-6;

static TIMESTAMP_REGEX: OnceLock<Regex> = OnceLock::new();

fn timestamp_regex() -> &'static Regex {
    TIMESTAMP_REGEX.get_or_init(|| {
        Regex::new(r"^([0-9]{2}):([0-9]{2}):([0-9]{2}),([0-9]{3})$")
            .expect("Failed to compile timestamp regex")
    })
}

/// Parses an SRT timestamp (e.g., "00:01:23,456") into seconds
///
/// Surrounding whitespace is ignored. Every field is fixed-width and
/// zero-padded; anything else is a [`CoreError::MalformedTimestamp`].
pub fn parse_timestamp(ts: &str) -> CoreResult<TimeSec> {
    let trimmed = ts.trim();
    let caps = timestamp_regex()
        .captures(trimmed)
        .ok_or_else(|| CoreError::MalformedTimestamp(ts.to_string()))?;

    let field = |i: usize| -> CoreResult<TimeMs> {
        caps[i]
            .parse::<TimeMs>()
            .map_err(|_| CoreError::MalformedTimestamp(ts.to_string()))
    };

    let hours = field(1)?;
    let minutes = field(2)?;
    let seconds = field(3)?;
    let millis = field(4)?;

    let total_ms = ((hours * 60 + minutes) * 60 + seconds) * 1000 + millis;
    Ok(millis_to_seconds(total_ms))
}

/// Formats seconds as SRT timestamp (00:00:00,000)
///
/// # Panics
///
/// Panics when `seconds` is negative or not finite. Use
/// [`try_format_timestamp`] when the value comes from untrusted input.
pub fn format_timestamp(seconds: TimeSec) -> String {
    assert!(
        is_valid_duration(seconds),
        "format_timestamp requires non-negative finite seconds, got {seconds}"
    );
    format_millis(seconds_to_millis(seconds))
}

/// Fallible variant of [`format_timestamp`].
pub fn try_format_timestamp(seconds: TimeSec) -> CoreResult<String> {
    if !is_valid_duration(seconds) {
        return Err(CoreError::InvalidDuration(seconds));
    }
    Ok(format_millis(seconds_to_millis(seconds)))
}

/// Drops everything below one millisecond.
pub fn truncate_to_millis(seconds: TimeSec) -> TimeSec {
    millis_to_seconds(seconds_to_millis(seconds))
}

fn is_valid_duration(seconds: TimeSec) -> bool {
    seconds.is_finite() && seconds >= 0.0
}

fn seconds_to_millis(seconds: TimeSec) -> TimeMs {
    (seconds * 1000.0 + MS_EPSILON).floor() as TimeMs
}

fn millis_to_seconds(ms: TimeMs) -> TimeSec {
    ms as TimeSec / 1000.0
}

fn format_millis(total_ms: TimeMs) -> String {
    let ms = total_ms % 1000;
    let total_secs = total_ms / 1000;
    let secs = total_secs % 60;
    let total_mins = total_secs / 60;
    let mins = total_mins % 60;
    let hours = total_mins / 60;

    format!("{:02}:{:02}:{:02},{:03}", hours, mins, secs, ms)
}
