use thiserror::Error;

/// Failures at the edges of the tour: configuration and user-supplied codes.
/// The quiz itself never fails, it degrades.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TourError {
    #[error("Unknown language code: {0}")]
    UnknownLanguage(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidSetting { key: String, value: String },
}
