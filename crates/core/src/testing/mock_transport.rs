//! Mock transport for testing.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use url::Url;

use crate::transport::{Transport, TransportError};

/// HTTP method of a recorded request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

/// A recorded request for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    /// Form fields for POST requests, empty for GET.
    pub form: Vec<(String, String)>,
}

#[derive(Debug, Default)]
struct MockState {
    responses: HashMap<(Method, String), String>,
    requests: Vec<RecordedRequest>,
    failures: VecDeque<TransportError>,
}

/// Mock implementation of the Transport trait.
///
/// Serves canned bodies keyed by method and absolute URL, records every
/// request, and can be told to fail. Clones share state, so a test can keep
/// one handle while the client owns another. Unknown URLs answer HTTP 404.
///
/// # Example
///
/// ```rust,ignore
/// use nnmclub_core::testing::{fixtures, MockTransport};
///
/// let transport = MockTransport::new();
/// transport.on_post(
///     "http://nnmclub.to/forum/tracker.php",
///     fixtures::results_page(&[fixtures::FixtureRow::new(1)], None),
/// );
///
/// let client = NnmClub::with_transport(transport.clone(), Endpoints::default());
/// let records: Vec<_> = client.search("iron man", Some(1))?.collect();
///
/// assert_eq!(transport.requests().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Rc<RefCell<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer GET `url` with `body`.
    pub fn on_get(&self, url: &str, body: impl Into<String>) {
        self.state
            .borrow_mut()
            .responses
            .insert((Method::Get, url.to_string()), body.into());
    }

    /// Answer POST `url` with `body`.
    pub fn on_post(&self, url: &str, body: impl Into<String>) {
        self.state
            .borrow_mut()
            .responses
            .insert((Method::Post, url.to_string()), body.into());
    }

    /// Make the next request fail with `error`. Queued failures are used in order.
    pub fn fail_next(&self, error: TransportError) {
        self.state.borrow_mut().failures.push_back(error);
    }

    /// All requests made so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.borrow().requests.clone()
    }

    /// URLs fetched with GET, in order.
    pub fn get_urls(&self) -> Vec<String> {
        self.state
            .borrow()
            .requests
            .iter()
            .filter(|r| r.method == Method::Get)
            .map(|r| r.url.clone())
            .collect()
    }

    fn respond(
        &self,
        method: Method,
        url: &Url,
        form: &[(&str, &str)],
    ) -> Result<String, TransportError> {
        let mut state = self.state.borrow_mut();
        state.requests.push(RecordedRequest {
            method,
            url: url.to_string(),
            form: form
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });

        if let Some(error) = state.failures.pop_front() {
            return Err(error);
        }

        state
            .responses
            .get(&(method, url.to_string()))
            .cloned()
            .ok_or_else(|| TransportError::Status {
                status: 404,
                url: url.to_string(),
            })
    }
}

impl Transport for MockTransport {
    fn get(&self, url: &Url) -> Result<String, TransportError> {
        self.respond(Method::Get, url, &[])
    }

    fn post_form(&self, url: &Url, form: &[(&str, &str)]) -> Result<String, TransportError> {
        self.respond(Method::Post, url, form)
    }
}
