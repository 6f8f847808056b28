use chrono::{DateTime, SecondsFormat, Utc};
use url::Url;

use crate::config::{PARAM_FINISHED, PARAM_LANGUAGE, PARAM_PROGRESS, PARAM_STYLE, PARAM_TIME};
use crate::countdown::{DAYS_MS, HOURS_MS, MINUTES_MS, MONTHS_MS};
use crate::errors::TimerError;
use crate::messages::get_message;

/// The fixed rendering endpoint every configuration URL points at.
pub const RENDER_ENDPOINT: &str = "https://viken-k.github.io/timer/timer.html";

pub const WEEKS_MS: u64 = DAYS_MS * 7;
pub const YEARS_MS: u64 = DAYS_MS * 365;

/// Build a shareable configuration URL.
///
/// The target instant is always start plus duration, serialized as RFC 3339
/// UTC with millisecond precision. Optional texts are only appended when
/// non-empty; an absent parameter is the "use the default" signal.
pub fn build_url(
    language: &str,
    start: DateTime<Utc>,
    duration_ms: u64,
    progress_message: Option<&str>,
    finished_message: Option<&str>,
    styling: Option<&str>,
) -> Url {
    let target = start + chrono::Duration::milliseconds(duration_ms as i64);

    let mut url = Url::parse(RENDER_ENDPOINT).expect("render endpoint is a valid URL");
    {
        let mut params = url.query_pairs_mut();
        params.append_pair(PARAM_LANGUAGE, language);
        params.append_pair(
            PARAM_TIME,
            &target.to_rfc3339_opts(SecondsFormat::Millis, true),
        );

        if let Some(progress) = non_empty(progress_message) {
            params.append_pair(PARAM_PROGRESS, progress);
        }
        if let Some(finished) = non_empty(finished_message) {
            params.append_pair(PARAM_FINISHED, finished);
        }
        if let Some(style) = non_empty(styling) {
            params.append_pair(PARAM_STYLE, style);
        }
    }

    url
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Render the embeddable markup for a configuration URL.
///
/// `%%url%%` in the template becomes the bare URL and `%%iframe%%` a wikitext
/// iframe block of the given size. Only the first occurrence of each
/// placeholder is substituted.
pub fn build_embed(template: &str, url: &Url, width: &str, height: &str) -> String {
    let iframe = format!("[[iframe {url} style=\"width: {width}; height: {height}; border: 0;\"]]");

    template
        .replacen("%%url%%", url.as_str(), 1)
        .replacen("%%iframe%%", &iframe, 1)
}

/// Parse a duration selection such as `45m`, `36h`, `1d`, `2w`, `6mo` or
/// `1y` into milliseconds.
///
/// The unit suffix is required; a missing or unusable value blocks the build
/// rather than defaulting.
pub fn parse_duration(raw: &str) -> Result<u64, TimerError> {
    let raw = raw.trim();
    let split = raw
        .find(|c: char| !c.is_ascii_digit())
        .ok_or(TimerError::MissingFormField { field: "duration" })?;
    let (value, suffix) = raw.split_at(split);

    let value: u64 = value
        .parse()
        .map_err(|_| TimerError::MissingFormField { field: "duration" })?;

    let unit_ms = match suffix {
        "m" | "min" => MINUTES_MS,
        "h" => HOURS_MS,
        "d" => DAYS_MS,
        "w" => WEEKS_MS,
        "mo" => MONTHS_MS,
        "y" => YEARS_MS,
        _ => return Err(TimerError::MissingFormField { field: "duration" }),
    };

    Ok(value * unit_ms)
}

/// Timer types the builder offers. Each one prefills the messages and the
/// output template from the message table; `Generic` leaves the messages on
/// their language defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    Generic,
    Deletion,
    Translation,
    Ban,
}

/// Prefilled builder texts for a timer type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetText {
    pub progress_message: Option<String>,
    pub finished_message: Option<String>,
    pub template: String,
}

pub fn preset_text(kind: TimerKind, language: &str) -> Result<PresetText, TimerError> {
    let preset = match kind {
        TimerKind::Generic => PresetText {
            progress_message: None,
            finished_message: None,
            template: "%%iframe%%".to_string(),
        },
        TimerKind::Deletion => PresetText {
            progress_message: Some(get_message(language, "message-deletion-progress")?),
            finished_message: Some(get_message(language, "message-deletion-finished")?),
            template: get_message(language, "template-deletion")?,
        },
        TimerKind::Translation => PresetText {
            progress_message: Some(get_message(language, "message-translation-progress")?),
            finished_message: Some(get_message(language, "message-translation-finished")?),
            template: get_message(language, "template-translation")?,
        },
        TimerKind::Ban => PresetText {
            progress_message: Some(get_message(language, "message-ban-progress")?),
            finished_message: Some(get_message(language, "message-ban-finished")?),
            template: get_message(language, "template-ban")?,
        },
    };

    Ok(preset)
}
