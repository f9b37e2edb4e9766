//! Liveness check endpoint.

use serde::Deserialize;

use crate::client::{Client, ClientRequest};
use crate::error::Error;

/// Response of the liveness endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthCheckResponse {
    /// Status message.
    pub message: String,
    /// Status code.
    pub code: i64,
}

impl Client {
    /// Check that the SubRow API is reachable.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn health_check(&self) -> Result<HealthCheckResponse, Error> {
        let request = ClientRequest::new("health");
        self.get(&request).await
    }
}
