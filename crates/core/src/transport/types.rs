//! Types for the HTTP transport seam.

use thiserror::Error;
use url::Url;

/// Errors raised while talking to the forum over HTTP.
///
/// These are never retried or swallowed by the client.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timeout: {0}")]
    Timeout(String),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Request failed: {0}")]
    RequestFailed(String),
}

/// A blocking request/response channel to the forum.
///
/// Implementations keep whatever session state (cookies) the forum hands out,
/// so a successful login carries over to later requests on the same transport.
pub trait Transport {
    /// GET `url` and return the decoded body.
    fn get(&self, url: &Url) -> Result<String, TransportError>;

    /// POST `form` url-encoded to `url` and return the decoded body.
    fn post_form(&self, url: &Url, form: &[(&str, &str)]) -> Result<String, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &Url) -> Result<String, TransportError> {
        (**self).get(url)
    }

    fn post_form(&self, url: &Url, form: &[(&str, &str)]) -> Result<String, TransportError> {
        (**self).post_form(url, form)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn get(&self, url: &Url) -> Result<String, TransportError> {
        (**self).get(url)
    }

    fn post_form(&self, url: &Url, form: &[(&str, &str)]) -> Result<String, TransportError> {
        (**self).post_form(url, form)
    }
}
