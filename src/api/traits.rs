//! Trait abstraction for the API client to enable mocking in tests

use super::{ApiError, RegisterResponse};
use crate::register::RegistrationFields;
use async_trait::async_trait;

/// Registration mutation endpoint
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationApi: Send + Sync {
    /// Run the `register` mutation with the serialized form value
    async fn register(&self, payload: &RegistrationFields) -> Result<RegisterResponse, ApiError>;
}
