use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("you must provide at least one URL")]
    NoUrls,

    #[error("invalid URL address: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("monitor has already been started")]
    AlreadyStarted,
}

pub type Result<T> = std::result::Result<T, Error>;
