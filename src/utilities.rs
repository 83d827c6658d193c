use chrono::NaiveDateTime;

use crate::errors::*;

const ISO_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
const DISPLAY_DATE_FORMAT: &str = "%-d %B %Y";

pub fn format_iso_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format(ISO_TIMESTAMP_FORMAT).to_string()
}

/// Parses the service's timestamps, which arrive with or without a
/// fractional-seconds part.
pub fn parse_iso_timestamp(iso_timestamp: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(iso_timestamp, ISO_TIMESTAMP_FORMAT)
        .chain_err(|| format!("Invalid ISO timestamp string: {}", iso_timestamp))
}

pub fn format_display_date(timestamp: NaiveDateTime) -> String {
    timestamp.format(DISPLAY_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_timestamp_with_and_without_fraction() {
        assert!(parse_iso_timestamp("2025-05-18T09:32:14.123456").is_ok());
        assert!(parse_iso_timestamp("2025-05-18T09:32:14").is_ok());
        assert!(parse_iso_timestamp("18/05/2025").is_err());
    }
}
