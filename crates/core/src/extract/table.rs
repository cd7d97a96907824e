//! Results table walking: headers, rows, records and the next-page link.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

use super::columns::{self, rule_for, text_of};
use super::rating::parse_rating;
use super::{ConvertedRow, FieldFailure, ParsingError, RowError, SearchRecord};

/// Text of the pagination link that leads to the next page.
pub const NEXT_PAGE_LABEL: &str = "След.";

static RESULTS_TABLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table.forumline.tablesorter").expect("valid selector"));
static HEADER_CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("th").expect("valid selector"));
static RESULT_ROW: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr.prow1, tr.prow2").expect("valid selector"));
static CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("valid selector"));
static SPAN: Lazy<Selector> = Lazy::new(|| Selector::parse("span").expect("valid selector"));
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a").expect("valid selector"));

/// Everything pulled out of one results page.
#[derive(Debug)]
pub struct ResultsPage {
    pub records: Vec<SearchRecord>,
    /// Where the next page lives, if anywhere.
    pub next_page: Result<Option<Url>, ParsingError>,
}

impl ResultsPage {
    /// Parse a full results page.
    ///
    /// Fails only when the results table is missing. A broken pagination block
    /// is reported through `next_page` so the rows already found stay usable.
    pub fn parse(body: &str, forum_url: &Url) -> Result<Self, ParsingError> {
        let document = Html::parse_document(body);
        let table = find_results_table(&document)?;
        let headers = table_headers(table);
        debug!(headers = ?headers, "Results table headers");

        let records = records(table, &headers, forum_url).collect();
        let next_page = next_page_url(table, forum_url);

        Ok(Self { records, next_page })
    }
}

/// Locate the results table in a document.
pub fn find_results_table(document: &Html) -> Result<ElementRef<'_>, ParsingError> {
    document
        .select(&RESULTS_TABLE)
        .next()
        .ok_or(ParsingError::ResultsTableNotFound)
}

/// Ordered, trimmed, non-empty header texts.
pub fn table_headers(table: ElementRef<'_>) -> Vec<String> {
    table
        .select(&HEADER_CELL)
        .map(|th| text_of(th).trim().to_string())
        .filter(|text| !text.is_empty())
        .collect()
}

/// Pair headers with the row's cells by position, skipping the leading
/// selection cell. Headers past the last cell stay unmapped.
pub fn row_map<'h, 'a>(
    headers: &'h [String],
    row: ElementRef<'a>,
) -> Vec<(&'h str, ElementRef<'a>)> {
    headers
        .iter()
        .map(String::as_str)
        .zip(cells(row).skip(1))
        .collect()
}

/// Build a record from a mapped row.
///
/// Column failures never fail the row; they come back in `failures`.
pub fn convert_row(
    mapped: &[(&str, ElementRef<'_>)],
    forum_url: &Url,
) -> Result<ConvertedRow, RowError> {
    if mapped.is_empty() {
        return Err(RowError::NoDataCells);
    }

    let mut converted = ConvertedRow::default();

    for &(header, cell) in mapped {
        let Some(rule) = rule_for(header) else {
            continue;
        };
        if let Err(error) = rule.apply(cell, forum_url, &mut converted.record) {
            converted.failures.push(FieldFailure {
                column: header.to_string(),
                error,
                cell_html: cell.html(),
            });
        }
    }

    if let Some(cell) = lookup(mapped, columns::RATING) {
        let (rating, rating_number) = parse_rating(&text_of(cell));
        converted.record.rating = rating;
        converted.record.rating_number = rating_number;
    }

    if let Some(cell) = lookup(mapped, columns::TOPIC) {
        match columns::topic_details(cell, forum_url) {
            Ok((detail_url, golden)) => {
                converted.record.detail_url = Some(detail_url);
                converted.record.golden = Some(golden);
            }
            Err(error) => converted.failures.push(FieldFailure {
                column: columns::TOPIC.to_string(),
                error,
                cell_html: cell.html(),
            }),
        }
    }

    if let Some(cell) = lookup(mapped, columns::REPLIES) {
        match columns::views_from_title(cell) {
            Ok(views) => converted.record.views = Some(views),
            Err(error) => converted.failures.push(FieldFailure {
                column: columns::REPLIES.to_string(),
                error,
                cell_html: cell.html(),
            }),
        }
    }

    Ok(converted)
}

/// Records for every result row of `table`, converted as they are pulled.
///
/// Column failures are logged and leave the field empty; rows that cannot be
/// converted at all are logged and skipped.
pub fn records<'a>(
    table: ElementRef<'a>,
    headers: &'a [String],
    forum_url: &'a Url,
) -> impl Iterator<Item = SearchRecord> + 'a {
    table.select(&RESULT_ROW).filter_map(move |row| {
        let mapped = row_map(headers, row);
        match convert_row(&mapped, forum_url) {
            Ok(converted) => {
                for failure in &converted.failures {
                    warn!(
                        header = %failure.column,
                        error = %failure.error,
                        cell = %failure.cell_html,
                        "Error while parsing column"
                    );
                }
                Some(converted.record)
            }
            Err(e) => {
                warn!(error = %e, "Error while parsing row");
                debug!(row = %row.html(), "Failed row");
                None
            }
        }
    })
}

/// Find the next-page URL in the pagination block that follows the table.
///
/// `Ok(None)` when the last pagination link is not the next-page link or
/// there are no links at all.
pub fn next_page_url(table: ElementRef<'_>, forum_url: &Url) -> Result<Option<Url>, ParsingError> {
    let pagination = table
        .next_siblings()
        .find_map(ElementRef::wrap)
        .ok_or(ParsingError::MissingPaginationTable)?;
    let cell = pagination
        .select(&CELL)
        .nth(1)
        .ok_or(ParsingError::MissingPaginationCell)?;
    let span = cell
        .select(&SPAN)
        .next()
        .ok_or(ParsingError::MissingPaginationSpan)?;

    let Some(last) = span.select(&LINK).last() else {
        return Ok(None);
    };
    if !text_of(last).contains(NEXT_PAGE_LABEL) {
        return Ok(None);
    }

    let href = last
        .value()
        .attr("href")
        .ok_or(ParsingError::MissingNextHref)?;
    forum_url
        .join(href)
        .map(Some)
        .map_err(|source| ParsingError::InvalidNextUrl {
            href: href.to_string(),
            source,
        })
}

/// Direct `<td>` children of a row.
fn cells<'a>(row: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "td")
}

fn lookup<'a>(mapped: &[(&str, ElementRef<'a>)], header: &str) -> Option<ElementRef<'a>> {
    mapped
        .iter()
        .find(|(label, _)| *label == header)
        .map(|&(_, cell)| cell)
}
