use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid mesh: face {face}: {reason}")]
    InvalidMesh { face: usize, reason: String },

    #[error("Invalid fill at index {index}: {reason}")]
    InvalidFill { index: usize, reason: String },

    #[error("Fill count mismatch: {faces} faces but {fills} fills")]
    FillCountMismatch { faces: usize, fills: usize },

    #[error("Invalid color: {0:?}")]
    InvalidColor(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Malformed JSON input: {0}")]
    Json(#[from] serde_json::Error),
}
