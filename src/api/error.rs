//! Transport-level failures of API calls

use thiserror::Error;

/// Anything that prevents a mutation result from reaching the form.
///
/// Structured validation errors are not represented here; they arrive as
/// part of a successful [`super::RegisterResponse`].
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("could not reach the server: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server responded with status {0}")]
    Status(reqwest::StatusCode),

    #[error("{0}")]
    GraphQl(String),

    #[error("response is missing `{0}`")]
    MissingData(&'static str),
}
