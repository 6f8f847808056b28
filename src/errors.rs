use thiserror::Error;

/// Fatal configuration errors.
///
/// None of these are retried; each one replaces the normal display entirely
/// for the rest of the session. Error text is English only.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TimerError {
    /// The requested language has no message table at all.
    #[error("No translations for language: {language}")]
    NoTranslations { language: String },

    /// The language exists but lacks a required message key.
    #[error("No such message key: {key}")]
    NoSuchMessage { language: String, key: String },

    /// The config URL carries no `lang` parameter.
    #[error("No language set")]
    MissingLanguage,

    /// The config URL carries no `time` parameter.
    #[error("No timestamp set")]
    MissingTimestamp,

    /// The `time` parameter is present but not parseable as an instant.
    #[error("Invalid timestamp: {value}")]
    MalformedTimestamp { value: String },

    /// A required builder selection is absent or unusable.
    #[error("Missing required field: {field}")]
    MissingFormField { field: &'static str },
}

impl TimerError {
    /// Secondary helper line shown under the primary error message, where one
    /// exists.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            TimerError::MissingLanguage => Some("Use \"en\" for English"),
            _ => None,
        }
    }
}
