//! Tracker client.
//!
//! `NnmClub` logs in through a `Transport` and runs searches whose results
//! come back as a lazy, page-following `SearchResults` iterator.

mod nnmclub;
mod pagination;
mod types;

pub use nnmclub::NnmClub;
pub use pagination::SearchResults;
pub use types::*;
