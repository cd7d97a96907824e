//! Types for the forum client.

use std::fmt;

use thiserror::Error;
use url::Url;

use crate::extract::ParsingError;
use crate::transport::TransportError;

/// Errors surfaced by [`NnmClub`](super::NnmClub).
#[derive(Debug, Error)]
pub enum NnmClubError {
    #[error("Invalid credentials: username={username} password={password}")]
    InvalidCredentials { username: String, password: String },

    #[error("Parsing error: {0}")]
    Parsing(#[from] ParsingError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Credentials of the last login attempt.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Absolute URLs the client talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// `<base>/forum/`; relative links on forum pages resolve against it.
    pub forum: Url,
    pub login: Url,
    pub search: Url,
}

impl Endpoints {
    /// Derive all endpoints from the site root.
    pub fn from_base(base_url: &str) -> Result<Self, NnmClubError> {
        let invalid = |source| NnmClubError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        };

        let base = Url::parse(base_url).map_err(invalid)?;
        let forum = base.join("forum/").map_err(invalid)?;
        let login = forum.join("login.php").map_err(invalid)?;
        let search = forum.join("tracker.php").map_err(invalid)?;

        Ok(Self {
            forum,
            login,
            search,
        })
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        let forum = Url::parse("http://nnmclub.to/forum/").expect("valid default forum URL");
        Self {
            login: forum.join("login.php").expect("valid login path"),
            search: forum.join("tracker.php").expect("valid search path"),
            forum,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_from_base() {
        let endpoints = Endpoints::from_base("http://nnmclub.to/").unwrap();
        assert_eq!(endpoints.forum.as_str(), "http://nnmclub.to/forum/");
        assert_eq!(endpoints.login.as_str(), "http://nnmclub.to/forum/login.php");
        assert_eq!(endpoints.search.as_str(), "http://nnmclub.to/forum/tracker.php");
    }

    #[test]
    fn test_endpoints_from_base_without_trailing_slash() {
        let endpoints = Endpoints::from_base("https://mirror.example").unwrap();
        assert_eq!(endpoints.forum.as_str(), "https://mirror.example/forum/");
    }

    #[test]
    fn test_default_endpoints_match_default_base() {
        assert_eq!(
            Endpoints::default(),
            Endpoints::from_base("http://nnmclub.to/").unwrap()
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = Endpoints::from_base("not a url").unwrap_err();
        assert!(matches!(err, NnmClubError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let credentials = Credentials {
            username: "alice".to_string(),
            password: "hunter2".to_string(),
        };
        let debug = format!("{:?}", credentials);
        assert!(debug.contains("alice"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_invalid_credentials_message_carries_attempt() {
        let err = NnmClubError::InvalidCredentials {
            username: "alice".to_string(),
            password: "wrong".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid credentials: username=alice password=wrong"
        );
    }
}
