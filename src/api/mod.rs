//! GraphQL client for the Kitab Bazar API

mod client;
mod error;
mod traits;
mod types;

pub use client::GraphQlClient;
pub use error::ApiError;
pub use traits::RegistrationApi;
pub use types::RegisterResponse;

#[cfg(test)]
pub use traits::MockRegistrationApi;
