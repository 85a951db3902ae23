use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

const OFFSET_FORMATS: &[&str] = &[
    "%a, %d %b %Y %H:%M:%S %z",
    "%d %b %Y %H:%M:%S %z",
    "%Y-%m-%d %H:%M:%S %z",
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y/%m/%d %H:%M:%S %z",
];

// No offset in the text, or a trailing UTC/GMT zone name: read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%d %b %Y %H:%M:%S",
    "%d %b %Y %H:%M",
    "%a %b %d %H:%M:%S %Y",
    "%d/%b/%y %I:%M %p",
    "%d/%b/%Y %I:%M %p",
    "%d/%b/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d %b %Y",
    "%a, %d %b %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%d/%b/%y",
    "%d/%b/%Y",
];

/// Parses the free-text dates found in tracker exports.
///
/// Accepts RFC 2822 (the export's own format), RFC 3339 and a handful of
/// common calendar layouts, with or without a trailing `UTC`/`GMT` zone
/// name. Returns `None` for anything else, including blank input.
pub fn parse_date(text: &str) -> Option<DateTime<FixedOffset>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc2822(text)
        .or_else(|_| DateTime::parse_from_rfc3339(text))
        .ok()
        .or_else(|| {
            OFFSET_FORMATS
                .iter()
                .find_map(|format| DateTime::parse_from_str(text, format).ok())
        })
        .or_else(|| {
            let text = strip_utc_zone(text).unwrap_or(text);
            NAIVE_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                .or_else(|| {
                    DATE_FORMATS
                        .iter()
                        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
                        .and_then(|date| date.and_hms_opt(0, 0, 0))
                })
                .map(as_utc)
        })
}

fn strip_utc_zone(text: &str) -> Option<&str> {
    let (rest, zone) = text.rsplit_once(' ')?;
    (zone.eq_ignore_ascii_case("UTC") || zone.eq_ignore_ascii_case("GMT"))
        .then(|| rest.trim_end())
}

fn as_utc(naive: NaiveDateTime) -> DateTime<FixedOffset> {
    DateTime::<FixedOffset>::from(Utc.from_utc_datetime(&naive))
}
