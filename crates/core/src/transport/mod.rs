//! HTTP transport abstraction.
//!
//! The client talks to the forum through the `Transport` trait so tests can
//! swap in canned pages. `HttpTransport` is the real, cookie-keeping
//! implementation on top of `reqwest::blocking`.

mod http;
mod types;

pub use http::HttpTransport;
pub use types::*;
