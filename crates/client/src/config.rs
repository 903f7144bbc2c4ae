use std::{env, time::Duration};

use url::Url;

use crate::error::{ClientError, Result};

const DEFAULT_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP client configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the leave management server
    pub base_url: Url,
    /// Timeout applied to every request; failures are not retried
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            timeout,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `LEAVECAL_URL` - Server base URL (default: http://localhost:8000)
    /// - `LEAVECAL_TIMEOUT_SECS` - Request timeout in seconds (default: 30)
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("LEAVECAL_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
        let timeout_secs = match env::var("LEAVECAL_TIMEOUT_SECS") {
            Ok(v) => v.parse().map_err(|_| {
                ClientError::InvalidInput(format!("LEAVECAL_TIMEOUT_SECS is not a number: {v}"))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };
        Self::new(&base_url, Duration::from_secs(timeout_secs))
    }
}

/// Parses `raw`, making sure the path ends with `/` so relative joins keep it.
fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw)?;
    if url.cannot_be_a_base() {
        return Err(ClientError::InvalidInput(format!("not a base URL: {raw}")));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config =
            ClientConfig::new(DEFAULT_URL, Duration::from_secs(DEFAULT_TIMEOUT_SECS)).unwrap();
        assert_eq!(config.base_url.as_str(), "http://localhost:8000/");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let config =
            ClientConfig::new("https://hr.example.com/api", Duration::from_secs(5)).unwrap();
        assert_eq!(config.base_url.as_str(), "https://hr.example.com/api/");
    }

    #[test]
    fn test_rejects_invalid_url() {
        assert!(matches!(
            ClientConfig::new("not a url", Duration::from_secs(5)),
            Err(ClientError::Url(_))
        ));
        assert!(matches!(
            ClientConfig::new("mailto:hr@example.com", Duration::from_secs(5)),
            Err(ClientError::InvalidInput(_))
        ));
    }
}
