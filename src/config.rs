use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, Utc};
use url::Url;

use crate::errors::TimerError;

pub const PARAM_LANGUAGE: &str = "lang";
pub const PARAM_TIME: &str = "time";
pub const PARAM_PROGRESS: &str = "progress";
pub const PARAM_FINISHED: &str = "finished";
pub const PARAM_STYLE: &str = "style";

/// A complete timer configuration, as carried across the URL boundary.
///
/// Decoded once per render session and immutable afterwards. Absent optional
/// fields mean "use the language default" for the messages and "no extra
/// styling" for the stylesheet; an empty string is never a meaningful value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerConfig {
    pub language: String,
    pub target_time: DateTime<Utc>,
    pub progress_message: Option<String>,
    pub finished_message: Option<String>,
    pub styling: Option<String>,
}

/// Decode a configuration URL into a [`TimerConfig`].
///
/// `lang` and `time` are required and their absence is reported separately.
/// When a parameter repeats, the first occurrence wins.
pub fn decode(url: &Url) -> Result<TimerConfig, TimerError> {
    let mut language = None;
    let mut time = None;
    let mut progress_message = None;
    let mut finished_message = None;
    let mut styling = None;

    for (key, value) in url.query_pairs() {
        let slot = match key.as_ref() {
            PARAM_LANGUAGE => &mut language,
            PARAM_TIME => &mut time,
            PARAM_PROGRESS => &mut progress_message,
            PARAM_FINISHED => &mut finished_message,
            PARAM_STYLE => &mut styling,
            _ => continue,
        };
        if slot.is_none() && !value.is_empty() {
            *slot = Some(value.into_owned());
        }
    }

    let language = language.ok_or(TimerError::MissingLanguage)?;
    let time = time.ok_or(TimerError::MissingTimestamp)?;
    let target_time = parse_target_time(&time)?;

    Ok(TimerConfig {
        language,
        target_time,
        progress_message,
        finished_message,
        styling,
    })
}

/// Parse the `time` parameter into an absolute instant.
///
/// A pure-numeric value (optionally with a fractional part) is a Unix epoch
/// time in seconds. Anything else is parsed as RFC 3339 first, then as a
/// handful of common offset-less date-time forms taken as UTC.
fn parse_target_time(raw: &str) -> Result<DateTime<Utc>, TimerError> {
    let malformed = || TimerError::MalformedTimestamp {
        value: raw.to_string(),
    };

    if is_epoch_literal(raw) {
        let seconds: f64 = raw.parse().map_err(|_| malformed())?;
        let millis = (seconds * 1000.0).round() as i64;
        return DateTime::from_timestamp_millis(millis).ok_or_else(malformed);
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }

    Err(malformed())
}

/// True when the whole string is digits with at most one fractional part.
/// A partial match is not enough; "2024-01-01" contains digits but is a
/// calendar string.
fn is_epoch_literal(raw: &str) -> bool {
    fn all_digits(part: &str) -> bool {
        !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit())
    }

    match raw.split_once('.') {
        Some((whole, fraction)) => all_digits(whole) && all_digits(fraction),
        None => all_digits(raw),
    }
}

/// Configuration for the render loop's tick behavior.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    /// Interval between display refreshes.
    pub tick_interval: Duration,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
        }
    }
}

impl RenderConfig {
    pub fn for_testing() -> Self {
        Self {
            tick_interval: Duration::from_millis(1), // Much faster for tests
        }
    }
}
