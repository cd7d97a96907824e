//! Parsing of the `Rt` (rating) column.

use once_cell::sync::Lazy;
use regex_lite::Regex;

/// `<optional decimal> ... (<votes>)`, decimal separator `.` or `,`.
static RATING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)(?P<rating>\d+(?:[.,]\d+)?)?.*?\((?P<rating_number>\d+)\)")
        .expect("rating pattern is valid")
});

/// Parse the text of a rating cell into `(rating, rating_number)`.
///
/// No match gives `(None, None)`; a match without a leading number gives
/// `(None, Some(votes))`.
pub fn parse_rating(text: &str) -> (Option<f32>, Option<u32>) {
    let Some(caps) = RATING_RE.captures(text.trim()) else {
        return (None, None);
    };

    let rating = caps
        .name("rating")
        .and_then(|m| m.as_str().replace(',', ".").parse::<f32>().ok());
    let rating_number = caps
        .name("rating_number")
        .and_then(|m| m.as_str().parse::<u32>().ok());

    (rating, rating_number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_decimal_with_votes() {
        assert_eq!(parse_rating("4,5 votes (120)"), (Some(4.5), Some(120)));
    }

    #[test]
    fn test_dot_decimal_with_votes() {
        assert_eq!(parse_rating("3.75 (8)"), (Some(3.75), Some(8)));
    }

    #[test]
    fn test_integer_rating() {
        assert_eq!(parse_rating("5 (1)"), (Some(5.0), Some(1)));
    }

    #[test]
    fn test_votes_only() {
        assert_eq!(parse_rating("(45)"), (None, Some(45)));
    }

    #[test]
    fn test_no_rating() {
        assert_eq!(parse_rating("no rating"), (None, None));
        assert_eq!(parse_rating(""), (None, None));
        assert_eq!(parse_rating("4,5"), (None, None));
    }

    #[test]
    fn test_line_break_between_rating_and_votes() {
        assert_eq!(parse_rating("4,5\n(120)"), (Some(4.5), Some(120)));
        assert_eq!(parse_rating("3.0\n  votes:\n  (7)"), (Some(3.0), Some(7)));
    }

    #[test]
    fn test_surrounding_whitespace() {
        assert_eq!(parse_rating("\n  2,0 (3)\t"), (Some(2.0), Some(3)));
    }
}
