//! Testing utilities: a mock transport and HTML fixtures.
//!
//! Lets the client run end to end against canned forum pages.
//!
//! # Example
//!
//! ```rust,ignore
//! use nnmclub_core::testing::{fixtures, MockTransport};
//!
//! let transport = MockTransport::new();
//! transport.on_post(
//!     "http://nnmclub.to/forum/login.php",
//!     fixtures::login_page(Some("alice")),
//! );
//! ```

#[cfg(test)]
pub(crate) mod log_capture;
mod mock_transport;

pub mod fixtures;

pub use mock_transport::{Method, MockTransport, RecordedRequest};
