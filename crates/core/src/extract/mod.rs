//! Extraction of search records from tracker result pages.
//!
//! A page's results table is read header-first: the header row decides which
//! column each cell belongs to, and a static rule table decides how each known
//! column becomes a record field. Bad cells and bad rows are logged and
//! skipped; only a missing table or a broken pagination block is an error.

pub mod columns;
mod rating;
mod table;
mod types;

pub use rating::parse_rating;
pub use table::*;
pub use types::*;
