use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{method} {path} failed with status {status}")]
    Status {
        method: &'static str,
        path: String,
        status: reqwest::StatusCode,
    },
    #[error("invalid server url: {0}")]
    InvalidUrl(String),
    #[error("parse error: {0}")]
    Parse(#[from] models::errors::ModelError),
}
