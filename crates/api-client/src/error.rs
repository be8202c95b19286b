use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to reach the journal API: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("The journal API returned an error: {0} (code {1})")]
    Api(String, i32),

    #[error("Failed to deserialize the API response: {0}")]
    Deserialization(String),

    #[error("Invalid data format from the journal API: {0}")]
    InvalidData(String),
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::InvalidData(err.to_string())
    }
}
