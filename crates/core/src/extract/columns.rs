//! Column rules: how each known header turns a cell into a record field.
//!
//! Labels missing from [`COLUMN_RULES`] are ignored. Three columns get extra
//! handling on top of the table (`Topic`, `R`, `Rt`), see `table::convert_row`.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex_lite::Regex;
use scraper::{ElementRef, Selector};
use url::Url;

use super::{CellError, SearchRecord};

pub const TOPIC: &str = "Topic";
pub const REPLIES: &str = "R";
pub const RATING: &str = "Rt";

/// Element inside the topic cell that marks a golden release.
pub const GOLDEN_MARKER: &str = "score";

/// Marker the forum puts in the thanks cell when nobody thanked.
const NO_THANKS_MARKER: char = '-';

static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a").expect("valid selector"));
static BOLD: Lazy<Selector> = Lazy::new(|| Selector::parse("b").expect("valid selector"));
static UNDERLINE: Lazy<Selector> = Lazy::new(|| Selector::parse("u").expect("valid selector"));
static GOLDEN: Lazy<Selector> =
    Lazy::new(|| Selector::parse(GOLDEN_MARKER).expect("valid selector"));

static LEADING_COUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+)").expect("leading count pattern is valid"));

/// Sub-element a strategy reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    A,
    B,
    U,
}

impl Tag {
    pub fn name(self) -> &'static str {
        match self {
            Tag::A => "a",
            Tag::B => "b",
            Tag::U => "u",
        }
    }

    fn selector(self) -> &'static Selector {
        match self {
            Tag::A => &*LINK,
            Tag::B => &*BOLD,
            Tag::U => &*UNDERLINE,
        }
    }
}

/// How to read a value out of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Text of the `<b>` inside the first link.
    LinkTitle,
    /// Integer text of the first `tag` descendant.
    IntOf(Tag),
    /// Integer text of the whole cell.
    CellInt,
    /// Epoch seconds in the first `tag` descendant.
    EpochOf(Tag),
    /// Cell integer, or 0 when the cell shows the no-value marker.
    ThanksCount,
    /// `href` of the first link, resolved against the forum URL.
    LinkHref,
}

/// A value produced by a strategy.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Count(u64),
    Timestamp(DateTime<Utc>),
}

/// Record field a column writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Topic,
    Size,
    Seeders,
    Leechers,
    Messages,
    Added,
    Thanks,
    DownloadUrl,
}

/// One known column.
#[derive(Debug, Clone, Copy)]
pub struct ColumnRule {
    pub label: &'static str,
    pub strategy: Strategy,
    pub field: Field,
}

pub static COLUMN_RULES: &[ColumnRule] = &[
    ColumnRule {
        label: TOPIC,
        strategy: Strategy::LinkTitle,
        field: Field::Topic,
    },
    ColumnRule {
        label: "Size",
        strategy: Strategy::IntOf(Tag::U),
        field: Field::Size,
    },
    ColumnRule {
        label: "S",
        strategy: Strategy::IntOf(Tag::B),
        field: Field::Seeders,
    },
    ColumnRule {
        label: "L",
        strategy: Strategy::IntOf(Tag::B),
        field: Field::Leechers,
    },
    ColumnRule {
        label: REPLIES,
        strategy: Strategy::CellInt,
        field: Field::Messages,
    },
    ColumnRule {
        label: "Added",
        strategy: Strategy::EpochOf(Tag::U),
        field: Field::Added,
    },
    ColumnRule {
        label: "Th",
        strategy: Strategy::ThanksCount,
        field: Field::Thanks,
    },
    ColumnRule {
        label: "DL",
        strategy: Strategy::LinkHref,
        field: Field::DownloadUrl,
    },
];

/// Look up the rule for a header label.
pub fn rule_for(label: &str) -> Option<&'static ColumnRule> {
    COLUMN_RULES.iter().find(|rule| rule.label == label)
}

impl ColumnRule {
    /// Extract this column's value from `cell` and store it in `record`.
    pub fn apply(
        &self,
        cell: ElementRef<'_>,
        forum_url: &Url,
        record: &mut SearchRecord,
    ) -> Result<(), CellError> {
        let value = self.strategy.extract(cell, forum_url)?;
        self.field.store(record, value)
    }
}

impl Strategy {
    pub fn extract(self, cell: ElementRef<'_>, forum_url: &Url) -> Result<Value, CellError> {
        match self {
            Strategy::LinkTitle => {
                let link = first(cell, Tag::A)?;
                let title = first(link, Tag::B)?;
                Ok(Value::Text(text_of(title)))
            }
            Strategy::IntOf(tag) => parse_count(&text_of(first(cell, tag)?)).map(Value::Count),
            Strategy::CellInt => parse_count(&text_of(cell)).map(Value::Count),
            Strategy::EpochOf(tag) => {
                let text = text_of(first(cell, tag)?);
                let secs = text
                    .trim()
                    .parse::<i64>()
                    .map_err(|source| CellError::InvalidNumber {
                        text: text.clone(),
                        source,
                    })?;
                DateTime::from_timestamp(secs, 0)
                    .map(Value::Timestamp)
                    .ok_or(CellError::InvalidTimestamp(secs))
            }
            Strategy::ThanksCount => {
                let text = text_of(cell);
                if text.contains(NO_THANKS_MARKER) {
                    Ok(Value::Count(0))
                } else {
                    parse_count(&text).map(Value::Count)
                }
            }
            Strategy::LinkHref => link_href(cell, forum_url).map(Value::Text),
        }
    }
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Field::Topic => "topic",
            Field::Size => "size",
            Field::Seeders => "seeders",
            Field::Leechers => "leechers",
            Field::Messages => "messages",
            Field::Added => "added",
            Field::Thanks => "thanks",
            Field::DownloadUrl => "download_url",
        }
    }

    pub fn store(self, record: &mut SearchRecord, value: Value) -> Result<(), CellError> {
        match (self, value) {
            (Field::Topic, Value::Text(text)) => record.topic = Some(text),
            (Field::DownloadUrl, Value::Text(url)) => record.download_url = Some(url),
            (Field::Size, Value::Count(n)) => record.size = Some(n),
            (Field::Seeders, Value::Count(n)) => record.seeders = Some(narrow(n)?),
            (Field::Leechers, Value::Count(n)) => record.leechers = Some(narrow(n)?),
            (Field::Messages, Value::Count(n)) => record.messages = Some(narrow(n)?),
            (Field::Thanks, Value::Count(n)) => record.thanks = Some(narrow(n)?),
            (Field::Added, Value::Timestamp(ts)) => record.added = Some(ts),
            (field, _) => return Err(CellError::KindMismatch(field.name())),
        }
        Ok(())
    }
}

/// Detail page URL and golden flag from the topic cell.
pub fn topic_details(cell: ElementRef<'_>, forum_url: &Url) -> Result<(String, bool), CellError> {
    let detail_url = link_href(cell, forum_url)?;
    let golden = cell.select(&GOLDEN).next().is_some();
    Ok((detail_url, golden))
}

/// View count from the leading integer of the cell's `title` attribute.
pub fn views_from_title(cell: ElementRef<'_>) -> Result<u32, CellError> {
    let title = cell
        .value()
        .attr("title")
        .ok_or(CellError::MissingAttribute("title"))?;
    let digits = LEADING_COUNT
        .captures(title)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| CellError::NoMatch(title.to_string()))?;
    narrow(parse_count(digits.as_str())?)
}

/// All text below `element`, concatenated.
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

fn first(element: ElementRef<'_>, tag: Tag) -> Result<ElementRef<'_>, CellError> {
    element
        .select(tag.selector())
        .next()
        .ok_or(CellError::MissingElement(tag.name()))
}

fn link_href(cell: ElementRef<'_>, forum_url: &Url) -> Result<String, CellError> {
    let href = first(cell, Tag::A)?
        .value()
        .attr("href")
        .ok_or(CellError::MissingAttribute("href"))?;
    forum_url
        .join(href)
        .map(String::from)
        .map_err(|source| CellError::InvalidUrl {
            href: href.to_string(),
            source,
        })
}

fn parse_count(text: &str) -> Result<u64, CellError> {
    text.trim()
        .parse::<u64>()
        .map_err(|source| CellError::InvalidNumber {
            text: text.to_string(),
            source,
        })
}

fn narrow(n: u64) -> Result<u32, CellError> {
    u32::try_from(n).map_err(|_| CellError::OutOfRange(n))
}
