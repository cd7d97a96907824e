//! reqwest-backed transport with a cookie session.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use tracing::debug;
use url::Url;

use crate::config::ForumConfig;

use super::{Transport, TransportError};

/// Blocking HTTP transport.
///
/// The wrapped client must keep cookies for logins to stick; [`HttpTransport::new`]
/// enables the cookie store, and a client passed to [`HttpTransport::from_client`]
/// is used as-is (preset cookies, proxies, headers).
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    timeout: Duration,
}

impl HttpTransport {
    /// Create a transport with a fresh cookie-keeping client.
    pub fn new(config: &ForumConfig) -> Result<Self, TransportError> {
        let timeout = Duration::from_secs(u64::from(config.timeout_secs));
        let client = Client::builder()
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .map_err(|e| {
                TransportError::RequestFailed(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client, timeout })
    }

    /// Reuse an existing client, e.g. one that already carries session cookies.
    pub fn from_client(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    fn send(&self, request: RequestBuilder, url: &Url) -> Result<String, TransportError> {
        let response = request.timeout(self.timeout).send().map_err(map_reqwest_error)?;

        let status = response.status();
        debug!(url = %url, status = status.as_u16(), "Forum response");
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response.text().map_err(map_reqwest_error)
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &Url) -> Result<String, TransportError> {
        self.send(self.client.get(url.as_str()), url)
    }

    fn post_form(&self, url: &Url, form: &[(&str, &str)]) -> Result<String, TransportError> {
        self.send(self.client.post(url.as_str()).form(form), url)
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout(e.to_string())
    } else if e.is_connect() {
        TransportError::ConnectionFailed(e.to_string())
    } else {
        TransportError::RequestFailed(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_configured_timeout() {
        let config = ForumConfig {
            base_url: "http://nnmclub.to/".to_string(),
            timeout_secs: 7,
        };
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(transport.timeout, Duration::from_secs(7));
    }

    #[test]
    fn test_from_client_keeps_timeout() {
        let transport = HttpTransport::from_client(Client::new(), Duration::from_secs(3));
        assert_eq!(transport.timeout, Duration::from_secs(3));
    }
}
