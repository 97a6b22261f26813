//! Date value parsing for the `created_at` namespace.
//!
//! Values are ISO-8601 prefixes. Missing trailing components are filled in
//! from the Unix epoch (`1970-01-01T00:00:00.000Z`), so a partial value
//! denotes the start of that period:
//!
//! - `2020` → `2020-01-01T00:00:00.000Z`
//! - `2020-05` → `2020-05-01T00:00:00.000Z`
//! - `2020-05-06T10` → `2020-05-06T10:00:00.000Z`

use chrono::DateTime;

const EPOCH_ISO: &str = "1970-01-01T00:00:00.000Z";

/// Pads a partial ISO-8601 value with the trailing part of the epoch string.
pub fn fill_date(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut filled = trimmed.to_string();
    if let Some(rest) = EPOCH_ISO.get(trimmed.len()..) {
        filled.push_str(rest);
    }
    filled
}

/// Parses a (possibly partial) date into Unix seconds.
///
/// Returns `None` when the padded value is not a valid RFC 3339 timestamp.
pub fn parse_date_seconds(raw: &str) -> Option<f64> {
    let filled = fill_date(raw);
    let parsed = DateTime::parse_from_rfc3339(&filled).ok()?;
    Some(parsed.timestamp_millis() as f64 / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_date_pads_partial_values() {
        assert_eq!(fill_date("2020"), "2020-01-01T00:00:00.000Z");
        assert_eq!(fill_date("2020-05"), "2020-05-01T00:00:00.000Z");
        assert_eq!(fill_date(" 2020-05-06 "), "2020-05-06T00:00:00.000Z");
        assert_eq!(fill_date("2020-05-06T10:11"), "2020-05-06T10:11:00.000Z");
    }

    #[test]
    fn fill_date_leaves_full_values_alone() {
        assert_eq!(
            fill_date("2021-02-03T04:05:06.007Z"),
            "2021-02-03T04:05:06.007Z"
        );
        assert_eq!(
            fill_date("2021-02-03T04:05:06+02:00"),
            "2021-02-03T04:05:06+02:00"
        );
    }

    #[test]
    fn parse_year_is_start_of_year() {
        assert_eq!(parse_date_seconds("2020"), Some(1_577_836_800.0));
    }

    #[test]
    fn parse_month_and_day() {
        assert_eq!(parse_date_seconds("2020-02"), Some(1_580_515_200.0));
        assert_eq!(parse_date_seconds("2020-02-29"), Some(1_582_934_400.0));
    }

    #[test]
    fn parse_keeps_milliseconds() {
        assert_eq!(
            parse_date_seconds("1970-01-01T00:00:01.500Z"),
            Some(1.5)
        );
    }

    #[test]
    fn invalid_dates_are_rejected() {
        assert_eq!(parse_date_seconds("not-a-date"), None);
        assert_eq!(parse_date_seconds("2020-13"), None);
        assert_eq!(parse_date_seconds("2020-02-30"), None);
        assert_eq!(parse_date_seconds(""), Some(0.0));
    }
}
