use std::borrow::Cow;
use std::path::Path;
use anyhow::{Result, Context};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{AppError, SubtitleError};

// @module: Subtitle timestamp parsing, formatting and shifting

// @const: SRT timestamp-range regex, anchored at line start
static SRT_TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2}:\d{2}:\d{2},\d{3}) --> (\d{2}:\d{2}:\d{2},\d{3})").unwrap()
});

// @const: WebVTT timestamp-range regex, anchored at line start
static VTT_TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2}:\d{2}:\d{2}\.\d{3}) --> (\d{2}:\d{2}:\d{2}\.\d{3})").unwrap()
});

/// Subtitle container format, selected once per run from the input extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtitleFormat {
    /// SubRip; comma sub-second separator
    Srt,
    /// Web Video Text Tracks; period sub-second separator
    WebVtt,
}

impl SubtitleFormat {
    /// Select the format from a file path extension (case-insensitive)
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase());

        match extension.as_deref() {
            Some("srt") => Ok(SubtitleFormat::Srt),
            Some("vtt") => Ok(SubtitleFormat::WebVtt),
            _ => Err(AppError::UnsupportedExtension(path.to_path_buf())),
        }
    }

    /// Sub-second separator character used in this format's timestamps
    pub fn separator(&self) -> char {
        match self {
            SubtitleFormat::Srt => ',',
            SubtitleFormat::WebVtt => '.',
        }
    }

    /// Canonical file extension, without the leading dot - used by tests
    /// and external consumers
    #[allow(dead_code)]
    pub fn extension(&self) -> &'static str {
        match self {
            SubtitleFormat::Srt => "srt",
            SubtitleFormat::WebVtt => "vtt",
        }
    }

    // @returns: Anchored timestamp-range regex for this format
    fn timestamp_regex(&self) -> &'static Regex {
        match self {
            SubtitleFormat::Srt => &SRT_TIMESTAMP_REGEX,
            SubtitleFormat::WebVtt => &VTT_TIMESTAMP_REGEX,
        }
    }
}

/// Options for a shift pass, applied identically to every timestamp
#[derive(Debug, Clone, Copy)]
pub struct ShiftOptions {
    /// Signed delay in milliseconds
    pub delay_ms: i64,

    /// Clamp would-be-negative timestamps to zero
    pub prevent_underflow: bool,
}

/// Parse a `HH:MM:SS<sep>mmm` timestamp into total milliseconds.
///
/// Only the shape is validated: each field must be numeric, hours at least
/// two digits, minutes and seconds exactly two, millis exactly three. Field
/// ranges are not checked, so `00:99:00,000` parses to 99 minutes worth of
/// milliseconds.
pub fn parse_timestamp(timestamp: &str, separator: char) -> Result<i64> {
    let parts: Vec<&str> = timestamp.split([':', separator]).collect();
    if parts.len() != 4 {
        return Err(SubtitleError::InvalidTimestamp(timestamp.to_string()).into());
    }

    let widths_ok = parts[0].len() >= 2
        && parts[1].len() == 2
        && parts[2].len() == 2
        && parts[3].len() == 3;
    let digits_ok = parts
        .iter()
        .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()));
    if !widths_ok || !digits_ok {
        return Err(SubtitleError::InvalidTimestamp(timestamp.to_string()).into());
    }

    let hours: i64 = parts[0].parse().context("Failed to parse hours")?;
    let minutes: i64 = parts[1].parse().context("Failed to parse minutes")?;
    let seconds: i64 = parts[2].parse().context("Failed to parse seconds")?;
    let millis: i64 = parts[3].parse().context("Failed to parse milliseconds")?;

    Ok(((hours * 60 + minutes) * 60 + seconds) * 1_000 + millis)
}

/// Format a total-millisecond count as `HH:MM:SS<sep>mmm`.
///
/// Fields are zero-padded to 2/2/2/3 digits; hours widen naturally past 99.
/// A negative total formats as the absolute value prefixed with `-`.
pub fn format_timestamp(total_ms: i64, separator: char) -> String {
    let sign = if total_ms < 0 { "-" } else { "" };
    let ms = total_ms.unsigned_abs();

    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!(
        "{}{:02}:{:02}:{:02}{}{:03}",
        sign, hours, minutes, seconds, separator, millis
    )
}

// @applies: Delay and underflow policy to one total-millisecond value
fn shift_total_ms(total_ms: i64, options: &ShiftOptions) -> i64 {
    let shifted = total_ms + options.delay_ms;
    if options.prevent_underflow && shifted < 0 {
        0
    } else {
        shifted
    }
}

/// Shift a single timestamp text by the configured delay
pub fn shift_timestamp(
    timestamp: &str,
    format: SubtitleFormat,
    options: &ShiftOptions,
) -> Result<String> {
    let separator = format.separator();
    let total_ms = parse_timestamp(timestamp, separator)?;
    Ok(format_timestamp(shift_total_ms(total_ms, options), separator))
}

/// Rewrite one line if it carries a timestamp range, pass it through otherwise.
///
/// The line is rebuilt from the two capture-group spans, so every byte
/// outside the matched timestamps (arrow token, trailing cue settings, the
/// line ending itself) is preserved verbatim.
pub fn shift_line<'a>(
    line: &'a str,
    format: SubtitleFormat,
    options: &ShiftOptions,
) -> Result<Cow<'a, str>> {
    let Some(captures) = format.timestamp_regex().captures(line) else {
        return Ok(Cow::Borrowed(line));
    };
    let (Some(start), Some(end)) = (captures.get(1), captures.get(2)) else {
        return Ok(Cow::Borrowed(line));
    };

    let shifted_start = shift_timestamp(start.as_str(), format, options)?;
    let shifted_end = shift_timestamp(end.as_str(), format, options)?;

    let mut shifted = String::with_capacity(line.len());
    shifted.push_str(&line[..start.start()]);
    shifted.push_str(&shifted_start);
    shifted.push_str(&line[start.end()..end.start()]);
    shifted.push_str(&shifted_end);
    shifted.push_str(&line[end.end()..]);

    Ok(Cow::Owned(shifted))
}

/// Apply the delay to every timestamp-range line of a whole document.
///
/// Lines are split inclusively so the original line endings (LF or CRLF,
/// and a missing final newline) survive the pass; a zero delay therefore
/// round-trips byte-identically.
pub fn shift_content(
    content: &str,
    format: SubtitleFormat,
    options: &ShiftOptions,
) -> Result<String> {
    let mut output = String::with_capacity(content.len());
    for line in content.split_inclusive('\n') {
        output.push_str(&shift_line(line, format, options)?);
    }
    Ok(output)
}
