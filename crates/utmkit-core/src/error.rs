use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid url format: {0}")]
    InvalidUrl(String),
    #[error("invalid date: {0}")]
    InvalidDate(String),
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("invalid custom parameter: {0}")]
    InvalidCustomParam(String),
    #[error("option label is required")]
    EmptyOptionLabel,
    #[error("invalid option value: {0}")]
    InvalidOptionValue(String),
    #[error("invalid option kind: {0}")]
    InvalidOptionKind(String),
    #[error("invalid setting key: {0}")]
    InvalidSettingKey(String),
}
