//! Types for result-table extraction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One row of the tracker search results.
///
/// Every field is optional: a missing value means the column was not on the
/// page or its cell could not be parsed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchRecord {
    /// Topic title.
    pub topic: Option<String>,
    /// Absolute URL of the topic page.
    pub detail_url: Option<String>,
    /// Absolute URL of the .torrent download.
    pub download_url: Option<String>,
    /// Size in bytes.
    pub size: Option<u64>,
    pub seeders: Option<u32>,
    pub leechers: Option<u32>,
    /// When the torrent was registered.
    pub added: Option<DateTime<Utc>>,
    pub views: Option<u32>,
    pub messages: Option<u32>,
    /// Average rating, 0 to 5.
    pub rating: Option<f32>,
    /// How many people rated.
    pub rating_number: Option<u32>,
    /// How many people thanked the uploader.
    pub thanks: Option<u32>,
    /// Whether the topic carries the golden marker.
    pub golden: Option<bool>,
}

/// A column whose cell could not be turned into a value.
#[derive(Debug)]
pub struct FieldFailure {
    /// Header label of the column.
    pub column: String,
    pub error: CellError,
    /// Raw HTML of the cell, for diagnostics.
    pub cell_html: String,
}

/// Result of converting one row: the record plus whatever columns failed.
#[derive(Debug, Default)]
pub struct ConvertedRow {
    pub record: SearchRecord,
    pub failures: Vec<FieldFailure>,
}

/// Why a single cell could not be extracted.
#[derive(Debug, Error)]
pub enum CellError {
    #[error("Missing <{0}> element")]
    MissingElement(&'static str),

    #[error("Missing '{0}' attribute")]
    MissingAttribute(&'static str),

    #[error("Invalid integer '{text}': {source}")]
    InvalidNumber {
        text: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("Value {0} out of range")]
    OutOfRange(u64),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(i64),

    #[error("Invalid URL '{href}': {source}")]
    InvalidUrl {
        href: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Text '{0}' does not match the expected pattern")]
    NoMatch(String),

    #[error("Value kind does not fit field {0}")]
    KindMismatch(&'static str),
}

/// Why a whole row was skipped.
#[derive(Debug, Error)]
pub enum RowError {
    #[error("Row has no data cells")]
    NoDataCells,
}

/// Structural problems with a results page. These abort the search.
#[derive(Debug, Error)]
pub enum ParsingError {
    #[error("Table (forumline tablesorter) not found")]
    ResultsTableNotFound,

    #[error("No element follows the results table")]
    MissingPaginationTable,

    #[error("Pagination table has no second cell")]
    MissingPaginationCell,

    #[error("Pagination cell has no <span>")]
    MissingPaginationSpan,

    #[error("Next page link has no href")]
    MissingNextHref,

    #[error("Invalid next page URL '{href}': {source}")]
    InvalidNextUrl {
        href: String,
        #[source]
        source: url::ParseError,
    },
}
