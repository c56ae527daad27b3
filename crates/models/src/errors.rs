use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),
    #[error("record {key:?} is not a city record: {source}")]
    Record {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
