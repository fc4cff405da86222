//! Locale normalisation for comma-decimal cells.
//!
//! Both functions are total: malformed text yields `None` (Missing) and the
//! caller decides what to do with the row.

use chrono::NaiveTime;

use super::model::Timestamp;

/// Parse a numeric cell that may use `,` as decimal separator.
///
/// Every comma is replaced by a period before parsing, so text that mixes
/// thousands separators with a decimal comma (`1,234,5`) is not recognised
/// and comes back as `None`. Empty cells and `NaN` are Missing too.
pub fn normalize_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let value: f64 = text.replace(',', ".").parse().ok()?;
    if value.is_nan() {
        None
    } else {
        Some(value)
    }
}

/// Parse a `HH:MM:SS[.,]ffffff` cell (24-hour, zero padded, fraction of any
/// length up to nanoseconds, fraction optional).
pub fn normalize_timestamp(text: &str) -> Option<Timestamp> {
    let text = text.trim().replace(',', ".");
    let bytes = text.as_bytes();
    if bytes.len() < 8 || bytes[2] != b':' || bytes[5] != b':' {
        return None;
    }

    let hour = two_digits(&bytes[0..2])?;
    let minute = two_digits(&bytes[3..5])?;
    let second = two_digits(&bytes[6..8])?;

    let nanos = match &bytes[8..] {
        [] => 0,
        [b'.', frac @ ..] if !frac.is_empty() && frac.len() <= 9 => {
            if !frac.iter().all(u8::is_ascii_digit) {
                return None;
            }
            // Right-pad to nine digits: ".5" is 500_000_000 ns.
            frac.iter()
                .chain(std::iter::repeat(&b'0'))
                .take(9)
                .fold(0u32, |acc, d| acc * 10 + u32::from(d - b'0'))
        }
        _ => return None,
    };

    NaiveTime::from_hms_nano_opt(hour, minute, second, nanos).map(Timestamp::new)
}

fn two_digits(pair: &[u8]) -> Option<u32> {
    match pair {
        [a, b] if a.is_ascii_digit() && b.is_ascii_digit() => {
            Some(u32::from(a - b'0') * 10 + u32::from(b - b'0'))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_comma_matches_period() {
        for text in ["1,5", "-0,25", "12,0", "3,14159", "0,001"] {
            let expected: f64 = text.replace(',', ".").parse().unwrap();
            assert_eq!(normalize_number(text), Some(expected), "{text}");
        }
    }

    #[test]
    fn plain_numbers_and_whitespace() {
        assert_eq!(normalize_number("10"), Some(10.0));
        assert_eq!(normalize_number(" 2.5 "), Some(2.5));
        assert_eq!(normalize_number("1e3"), Some(1000.0));
    }

    #[test]
    fn malformed_numbers_are_missing() {
        assert_eq!(normalize_number("abc"), None);
        assert_eq!(normalize_number(""), None);
        assert_eq!(normalize_number("NaN"), None);
        // thousands separator plus decimal comma is a known limitation
        assert_eq!(normalize_number("1,234,5"), None);
    }

    #[test]
    fn timestamps_with_comma_or_period() {
        let a = normalize_timestamp("20:42:27,123456").unwrap();
        let b = normalize_timestamp("20:42:27.123456").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "20:42:27.123456");

        let short = normalize_timestamp("00:00:01,5").unwrap();
        assert!((short.seconds() - 1.5).abs() < 1e-9);

        let whole = normalize_timestamp("00:00:01").unwrap();
        assert_eq!(whole.seconds(), 1.0);
    }

    #[test]
    fn bad_timestamps_are_missing() {
        for text in [
            "",
            "0:00:01",
            "24:00:00",
            "12:60:00",
            "12:00:00.",
            "12:00:00.12a",
            "12-00-00",
            "12:00:00.1234567890",
            "yesterday",
        ] {
            assert_eq!(normalize_timestamp(text), None, "{text}");
        }
    }
}
