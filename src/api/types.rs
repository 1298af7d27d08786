//! GraphQL request and response envelopes

use super::ApiError;
use crate::register::ObjectError;
use serde::{Deserialize, Serialize};

pub const REGISTER_MUTATION: &str = r#"
mutation Register($data: RegisterInputType!) {
    register(data: $data) {
        ok
        errors
    }
}
"#;

#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a, V> {
    pub query: &'a str,
    pub variables: V,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlErrorMessage>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlErrorMessage {
    pub message: String,
}

impl<T> GraphQlResponse<T> {
    /// Top-level GraphQL errors win over partial data
    pub fn into_data(self) -> Result<T, ApiError> {
        if !self.errors.is_empty() {
            let message = self
                .errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ApiError::GraphQl(message));
        }
        self.data.ok_or(ApiError::MissingData("data"))
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterData {
    pub register: Option<RegisterResponse>,
}

/// Result of the `register` mutation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterResponse {
    pub ok: bool,
    #[serde(default)]
    pub errors: Option<Vec<ObjectError>>,
}

#[cfg(test)]
impl RegisterResponse {
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: None,
        }
    }

    pub fn rejected(errors: Vec<ObjectError>) -> Self {
        Self {
            ok: false,
            errors: Some(errors),
        }
    }
}
