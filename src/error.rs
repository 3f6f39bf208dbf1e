use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Payload or config file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Payload or config is not valid JSON
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The data source refused to produce a payload
    #[error("data source error: {0}")]
    Source(String),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
