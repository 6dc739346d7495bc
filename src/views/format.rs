use std::str::FromStr;

use chrono::{DateTime, Local};
use rust_decimal::{Decimal, RoundingStrategy};

/// Parse a decimal amount as the API writes it, plain or scientific.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Round half away from zero to `places` digits and pad with zeros.
/// Unparseable input is shown as-is.
pub fn format_amount(raw: &str, places: u32) -> String {
    match parse_amount(raw) {
        Some(value) => format_decimal(value, places),
        None => raw.to_string(),
    }
}

pub fn format_decimal(value: Decimal, places: u32) -> String {
    let rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", places as usize, rounded)
}

/// RFC 3339 timestamps in local time, anything else untouched.
pub fn format_timestamp(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|when| {
            when.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|_| raw.to_string())
}

/// Pad or cut `text` to exactly `width` characters.
pub fn fit(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let cut: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", cut)
    } else {
        format!("{:<width$}", text, width = width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount_rounds_and_pads() {
        assert_eq!(format_amount("950.25000000000000000000", 2), "950.25");
        assert_eq!(format_amount("1.005", 2), "1.01");
        assert_eq!(format_amount("-1.005", 2), "-1.01");
        assert_eq!(format_amount("7", 2), "7.00");
        assert_eq!(format_amount("0E-20", 2), "0.00");
        assert_eq!(format_amount("n/a", 2), "n/a");
    }

    #[test]
    fn test_format_amount_twenty_places() {
        assert_eq!(format_amount("12.5", 20), "12.50000000000000000000");
    }

    #[test]
    fn test_fit() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdefgh", 5), "abcd…");
    }

    #[test]
    fn test_format_timestamp_fallback() {
        assert_eq!(format_timestamp("yesterday"), "yesterday");
        let rendered = format_timestamp("2024-03-01T12:00:00.123456Z");
        assert_eq!(rendered.len(), "2024-03-01 12:00:00".len());
        assert!(rendered.starts_with("2024-0"));
    }
}
