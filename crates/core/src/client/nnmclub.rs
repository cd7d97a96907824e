//! Forum client: login and search.

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::transport::{HttpTransport, Transport};

use super::pagination::SearchResults;
use super::{Credentials, Endpoints, NnmClubError};

/// How much of a failed login page goes into the warning.
const LOGIN_DUMP_CHARS: usize = 2000;

/// Value of the login form's submit button.
const LOGIN_BUTTON: &str = "Вход";

/// Client for the tracker.
///
/// Owns the transport (and with it the cookie session) for its whole life.
pub struct NnmClub<T: Transport = HttpTransport> {
    transport: T,
    endpoints: Endpoints,
    credentials: Option<Credentials>,
}

impl NnmClub<HttpTransport> {
    /// Build a client from configuration, logging in when credentials are set.
    pub fn from_config(config: &Config) -> Result<Self, NnmClubError> {
        let endpoints = Endpoints::from_base(&config.forum.base_url)?;
        let transport = HttpTransport::new(&config.forum)?;
        let mut client = Self::with_transport(transport, endpoints);

        if let Some(credentials) = &config.credentials {
            client.login(&credentials.username, &credentials.password)?;
        }

        Ok(client)
    }
}

impl<T: Transport> NnmClub<T> {
    /// Build a client on top of an existing transport.
    ///
    /// Use this to reuse a session that already carries cookies or proxies.
    pub fn with_transport(transport: T, endpoints: Endpoints) -> Self {
        Self {
            transport,
            endpoints,
            credentials: None,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Credentials of the last login attempt, successful or not.
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Log in. The forum greets a logged-in user by name, so a response that
    /// does not mention `username` means the credentials were rejected.
    pub fn login(&mut self, username: &str, password: &str) -> Result<(), NnmClubError> {
        self.credentials = Some(Credentials {
            username: username.to_string(),
            password: password.to_string(),
        });

        let form = [
            ("username", username),
            ("password", password),
            ("login", LOGIN_BUTTON),
        ];
        let body = self.transport.post_form(&self.endpoints.login, &form)?;

        if !body.contains(username) {
            let dump: String = body.chars().take(LOGIN_DUMP_CHARS).collect();
            warn!(username = %username, body = %dump, "Invalid credentials");
            return Err(NnmClubError::InvalidCredentials {
                username: username.to_string(),
                password: password.to_string(),
            });
        }

        info!(username = %username, "Logged in");
        Ok(())
    }

    /// Search the tracker.
    ///
    /// The query is submitted right away; the returned iterator parses that
    /// page and follows next-page links lazily, up to `max_pages` pages.
    /// `None` (or `Some(0)`) walks every page.
    pub fn search(
        &self,
        text: &str,
        max_pages: Option<u32>,
    ) -> Result<SearchResults<'_, T>, NnmClubError> {
        // shr: include the rating column, sht: include the thanks column
        let form = [("nm", text), ("shr", "1"), ("sht", "1")];

        debug!(query = %text, max_pages = ?max_pages, "Submitting search");
        let first_page = self.transport.post_form(&self.endpoints.search, &form)?;

        Ok(SearchResults::new(
            &self.transport,
            &self.endpoints.forum,
            text.to_string(),
            max_pages,
            first_page,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixtures, log_capture, Method, MockTransport};
    use crate::transport::TransportError;

    const LOGIN_URL: &str = "http://nnmclub.to/forum/login.php";
    const SEARCH_URL: &str = "http://nnmclub.to/forum/tracker.php";

    fn client() -> (NnmClub<MockTransport>, MockTransport) {
        let transport = MockTransport::new();
        let client = NnmClub::with_transport(transport.clone(), Endpoints::default());
        (client, transport)
    }

    #[test]
    fn test_login_success() {
        let (mut client, transport) = client();
        transport.on_post(LOGIN_URL, fixtures::login_page(Some("alice")));

        client.login("alice", "secret").unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].url, LOGIN_URL);
        assert!(requests[0]
            .form
            .contains(&("username".to_string(), "alice".to_string())));
        assert!(requests[0]
            .form
            .contains(&("password".to_string(), "secret".to_string())));
        assert!(requests[0]
            .form
            .contains(&("login".to_string(), "Вход".to_string())));
    }

    #[test]
    fn test_login_invalid_credentials() {
        let (mut client, transport) = client();
        transport.on_post(LOGIN_URL, fixtures::login_page(None));

        let err = client.login("alice", "wrong").unwrap_err();
        match err {
            NnmClubError::InvalidCredentials { username, password } => {
                assert_eq!(username, "alice");
                assert_eq!(password, "wrong");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_login_failure_warning_carries_body() {
        let (mut client, transport) = client();
        transport.on_post(LOGIN_URL, fixtures::login_page(None));

        let (result, logs) =
            log_capture::capture(tracing::Level::WARN, || client.login("alice", "wrong"));

        assert!(result.is_err());
        assert!(logs.contains("Invalid credentials"));
        assert!(logs.contains("username=alice"));
        assert!(logs.contains("неверный пароль"));
    }

    #[test]
    fn test_login_failure_warning_truncates_body() {
        let (mut client, transport) = client();
        let body = format!("{}TAIL", "x".repeat(LOGIN_DUMP_CHARS));
        transport.on_post(LOGIN_URL, body);

        let (_, logs) =
            log_capture::capture(tracing::Level::WARN, || client.login("alice", "wrong"));

        assert!(logs.contains(&"x".repeat(LOGIN_DUMP_CHARS)));
        assert!(!logs.contains("TAIL"));
    }

    #[test]
    fn test_login_overwrites_credentials() {
        let (mut client, transport) = client();
        transport.on_post(LOGIN_URL, fixtures::login_page(Some("alice")));

        client.login("alice", "secret").unwrap();
        let _ = client.login("bob", "other");

        let credentials = client.credentials().unwrap();
        assert_eq!(credentials.username, "bob");
        assert_eq!(credentials.password, "other");
    }

    #[test]
    fn test_login_transport_error_propagates() {
        let (mut client, transport) = client();
        transport.fail_next(TransportError::ConnectionFailed("refused".to_string()));

        let err = client.login("alice", "secret").unwrap_err();
        assert!(matches!(
            err,
            NnmClubError::Transport(TransportError::ConnectionFailed(_))
        ));
    }

    #[test]
    fn test_search_posts_query_with_column_flags() {
        let (client, transport) = client();
        transport.on_post(SEARCH_URL, fixtures::results_page(&[], None));

        let results = client.search("Iron Man", Some(1)).unwrap();
        drop(results);

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, SEARCH_URL);
        assert_eq!(
            requests[0].form,
            vec![
                ("nm".to_string(), "Iron Man".to_string()),
                ("shr".to_string(), "1".to_string()),
                ("sht".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_search_transport_error_is_immediate() {
        let (client, transport) = client();
        transport.fail_next(TransportError::Status {
            status: 502,
            url: SEARCH_URL.to_string(),
        });

        assert!(matches!(
            client.search("Iron Man", Some(1)),
            Err(NnmClubError::Transport(TransportError::Status { status: 502, .. }))
        ));
    }
}
