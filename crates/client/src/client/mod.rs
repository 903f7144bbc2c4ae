//! HTTP client for the leave management server.

pub mod holidays;
pub mod leaves;

use serde::Deserialize;
use url::Url;

use leavecal_core::ports::FieldErrors;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// HTTP client for the leave management server.
///
/// Implements the holiday and leave store collaborators of the engine.
#[derive(Debug, Clone)]
pub struct LeavecalClient {
    client: reqwest::Client,
    base_url: Url,
}

impl LeavecalClient {
    /// Create a new client from `config`.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Create from environment (`LEAVECAL_URL`, `LEAVECAL_TIMEOUT_SECS`).
    pub fn from_env() -> Result<Self> {
        Self::new(&ClientConfig::from_env()?)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a URL for an endpoint, relative to the base URL.
    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Handle error responses.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
        resource: &str,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return response.json().await.map_err(ClientError::from);
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        match status.as_u16() {
            404 => Err(ClientError::NotFound {
                resource: resource.to_string(),
            }),
            422 => match parse_validation_errors(&message) {
                Some(errors) => Err(ClientError::Validation(errors)),
                None => Err(ClientError::ServerError {
                    status: 422,
                    message,
                }),
            },
            status => Err(ClientError::ServerError { status, message }),
        }
    }
}

/// Extracts field errors from a 422 body.
///
/// Accepts the bare `{ field: [...] }` map as well as the
/// `{ message, errors: { field: [...] } }` envelope.
pub fn parse_validation_errors(body: &str) -> Option<FieldErrors> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Body {
        Wrapped { errors: FieldErrors },
        Bare(FieldErrors),
    }

    match serde_json::from_str(body).ok()? {
        Body::Wrapped { errors } | Body::Bare(errors) => Some(errors),
    }
}
