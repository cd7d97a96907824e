//! Lazy walk over the pages of one search.

use std::collections::VecDeque;

use tracing::{debug, error};
use url::Url;

use crate::extract::{ParsingError, ResultsPage, SearchRecord};
use crate::transport::Transport;

use super::NnmClubError;

/// Where the cursor is between calls to `next`.
enum Cursor {
    /// A fetched page that has not been parsed yet.
    Fetched(String),
    /// Records of the current page still to hand out, then the way onward.
    Draining {
        records: VecDeque<SearchRecord>,
        next_page: Result<Option<Url>, ParsingError>,
    },
    Done,
}

/// Iterator over the records of a search, page by page.
///
/// Created by [`NnmClub::search`](super::NnmClub::search) with the first page
/// already fetched. Further pages are fetched only once the previous page's
/// records are used up. The first error ends the iteration.
///
/// Each page is parsed in full when iteration reaches it; its records are
/// then handed out one at a time.
pub struct SearchResults<'c, T: Transport> {
    transport: &'c T,
    forum_url: &'c Url,
    query: String,
    max_pages: Option<u32>,
    pages_parsed: u32,
    cursor: Cursor,
}

impl<T: Transport> std::fmt::Debug for SearchResults<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchResults")
            .field("query", &self.query)
            .field("max_pages", &self.max_pages)
            .field("pages_parsed", &self.pages_parsed)
            .field("done", &matches!(self.cursor, Cursor::Done))
            .finish()
    }
}

impl<'c, T: Transport> SearchResults<'c, T> {
    pub(super) fn new(
        transport: &'c T,
        forum_url: &'c Url,
        query: String,
        max_pages: Option<u32>,
        first_page: String,
    ) -> Self {
        Self {
            transport,
            forum_url,
            query,
            max_pages: max_pages.filter(|&n| n > 0),
            pages_parsed: 0,
            cursor: Cursor::Fetched(first_page),
        }
    }

    /// Pages parsed so far, including the one being drained.
    pub fn pages_parsed(&self) -> u32 {
        self.pages_parsed
    }

    fn limit_reached(&self) -> bool {
        self.max_pages
            .is_some_and(|max_pages| self.pages_parsed >= max_pages)
    }

    fn enter_page(&mut self, body: String) -> Result<(), NnmClubError> {
        self.pages_parsed += 1;
        debug!(page = self.pages_parsed, query = %self.query, "Parsing results page");

        let page = ResultsPage::parse(&body, self.forum_url).map_err(|e| {
            self.log_parsing_failure(&e, &body);
            e
        })?;

        if let Err(e) = &page.next_page {
            self.log_parsing_failure(e, &body);
        }

        debug!(
            page = self.pages_parsed,
            records = page.records.len(),
            "Results page parsed"
        );
        self.cursor = Cursor::Draining {
            records: page.records.into(),
            next_page: page.next_page,
        };
        Ok(())
    }

    fn log_parsing_failure(&self, e: &ParsingError, body: &str) {
        error!(
            page = self.pages_parsed,
            query = %self.query,
            error = %e,
            "Error while parsing results page"
        );
        debug!(body = %body, "Unparsable page");
    }
}

impl<T: Transport> Iterator for SearchResults<'_, T> {
    type Item = Result<SearchRecord, NnmClubError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match std::mem::replace(&mut self.cursor, Cursor::Done) {
                Cursor::Done => return None,
                Cursor::Fetched(body) => {
                    if let Err(e) = self.enter_page(body) {
                        return Some(Err(e));
                    }
                }
                Cursor::Draining {
                    mut records,
                    next_page,
                } => {
                    if let Some(record) = records.pop_front() {
                        self.cursor = Cursor::Draining { records, next_page };
                        return Some(Ok(record));
                    }

                    let url = match next_page {
                        Ok(Some(url)) => url,
                        Ok(None) => {
                            debug!(pages = self.pages_parsed, "No next page");
                            return None;
                        }
                        Err(e) => return Some(Err(e.into())),
                    };

                    if self.limit_reached() {
                        debug!(pages = self.pages_parsed, "Page limit reached");
                        return None;
                    }

                    debug!(url = %url, "Fetching next results page");
                    match self.transport.get(&url) {
                        Ok(body) => self.cursor = Cursor::Fetched(body),
                        Err(e) => return Some(Err(e.into())),
                    }
                }
            }
        }
    }
}

impl<T: Transport> std::iter::FusedIterator for SearchResults<'_, T> {}
