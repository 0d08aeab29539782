//! Identifier validation and text normalization
//!
//! Every site feeds its raw markup text through these helpers so the rest of
//! the engine only ever sees canonical values: a validated hyphenated ISBN,
//! a dd.mm.yyyy release date, and a franchise name stripped of volume and
//! edition noise.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Five hyphen-separated digit groups: EAN prefix, registration group,
/// publisher, title, check digit. Publisher and title widths vary, the
/// total is checked separately.
static ISBN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{3}-\d-\d{1,7}-\d{1,7}-\d$").expect("ISBN pattern is valid"));

/// Trailing qualifiers publishers append to a franchise name. The second
/// entry is the en-dash variant some pages use instead of " - Light Novel".
const FRANCHISE_QUALIFIERS: &[&str] = &[
    " - Light Novel",
    "– Light Novel",
    " 2in1",
    " (Einzelband)",
    " Diamond Edition",
    " - Perfect Edition",
    " - Collectors Edition",
    " Collectors Edition",
];

/// Validates that an identifier is a hyphenated 13-digit ISBN
///
/// Requires five digit groups shaped like 978-3-96358-096-3 with 13 digits
/// in total. Anything else is rejected, including unhyphenated digit runs
/// and the "N/A" placeholder some pages carry in the ISBN slot.
pub fn is_valid_isbn(isbn: &str) -> bool {
    ISBN_PATTERN.is_match(isbn) && isbn.chars().filter(char::is_ascii_digit).count() == 13
}

/// Parses a raw date against `input_format` and canonicalizes it to
/// dd.mm.yyyy
///
/// # Arguments
///
/// * `raw` - The date text as found in the markup (surrounding whitespace is
///   ignored)
/// * `input_format` - The strftime pattern the site uses, e.g. `%Y-%m-%d`
///
/// # Returns
///
/// * `Some(String)` - The date in dd.mm.yyyy form
/// * `None` - The text did not parse; never panics on malformed input
pub fn format_release_date(raw: &str, input_format: &str) -> Option<String> {
    NaiveDate::parse_from_str(raw.trim(), input_format)
        .ok()
        .map(|date| date.format("%d.%m.%Y").to_string())
}

/// Derives a franchise name from a full product title
///
/// Takes everything before the last comma (dropping the ", Band NN" volume
/// segment), then strips known trailing qualifiers, repeating until none
/// match, trimming after each strip.
///
/// # Returns
///
/// * `Some(String)` - The cleaned franchise name
/// * `None` - Nothing remained; comma-less titles always end up here since
///   there is no segment before the last comma to keep
pub fn clean_franchise_title(full_title: &str) -> Option<String> {
    let head = match full_title.rsplit_once(',') {
        Some((head, _)) => head.trim(),
        None => "",
    };

    let mut name = head.to_string();
    loop {
        let mut stripped = false;
        for qualifier in FRANCHISE_QUALIFIERS {
            if let Some(rest) = name.strip_suffix(qualifier) {
                name = rest.trim().to_string();
                stripped = true;
            }
        }
        if !stripped {
            break;
        }
    }

    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_isbn() {
        // Five-digit and four-digit publisher prefixes both occur
        assert!(is_valid_isbn("978-3-96358-096-3"));
        assert!(is_valid_isbn("978-3-7539-3206-4"));
    }

    #[test]
    fn test_invalid_isbn() {
        // No hyphens
        assert!(!is_valid_isbn("9783963580963"));
        // Wrong grouping
        assert!(!is_valid_isbn("97-83-96358-096-3"));
        // Too few digits
        assert!(!is_valid_isbn("978-3-96358-09-3"));
        // Too many digits
        assert!(!is_valid_isbn("978-3-96358-0961-3"));
        // Placeholder text
        assert!(!is_valid_isbn("N/A"));
        assert!(!is_valid_isbn(""));
        // Trailing garbage
        assert!(!is_valid_isbn("978-3-96358-096-3 "));
    }

    #[test]
    fn test_format_release_date_iso() {
        assert_eq!(
            format_release_date("2021-05-28", "%Y-%m-%d"),
            Some("28.05.2021".to_string())
        );
    }

    #[test]
    fn test_format_release_date_german_passthrough() {
        assert_eq!(
            format_release_date("17.03.2025", "%d.%m.%Y"),
            Some("17.03.2025".to_string())
        );
    }

    #[test]
    fn test_format_release_date_trims_whitespace() {
        assert_eq!(
            format_release_date("  2021-05-28 ", "%Y-%m-%d"),
            Some("28.05.2021".to_string())
        );
    }

    #[test]
    fn test_format_release_date_unparseable() {
        assert_eq!(format_release_date("not-a-date", "%Y-%m-%d"), None);
        assert_eq!(format_release_date("2021-13-99", "%Y-%m-%d"), None);
    }

    #[test]
    fn test_clean_franchise_en_dash_qualifier() {
        assert_eq!(
            clean_franchise_title("Gamers! – Light Novel, Band 01"),
            Some("Gamers!".to_string())
        );
    }

    #[test]
    fn test_clean_franchise_hyphen_qualifier() {
        assert_eq!(
            clean_franchise_title(
                "KONOSUBA! God's Blessing on This Wonderful World! - Light Novel, Band 06 "
            ),
            Some("KONOSUBA! God's Blessing on This Wonderful World!".to_string())
        );
    }

    #[test]
    fn test_clean_franchise_plain_title() {
        assert_eq!(
            clean_franchise_title("ShangriLaFrontier, Band 19"),
            Some("ShangriLaFrontier".to_string())
        );
    }

    #[test]
    fn test_clean_franchise_keeps_inner_commas() {
        assert_eq!(
            clean_franchise_title("Sing a Bit of Harmony, Complete Edition, Band 02"),
            Some("Sing a Bit of Harmony, Complete Edition".to_string())
        );
    }

    #[test]
    fn test_clean_franchise_stacked_qualifiers() {
        assert_eq!(
            clean_franchise_title("Overlord – Light Novel 2in1, Band 03"),
            Some("Overlord".to_string())
        );
    }

    #[test]
    fn test_clean_franchise_without_comma() {
        assert_eq!(clean_franchise_title("Einzelband ohne Komma"), None);
    }

    #[test]
    fn test_clean_franchise_empty_head() {
        assert_eq!(clean_franchise_title(", Band 01"), None);
    }
}
