// Utility functions
use chrono::NaiveDate;

/// Parses a `YYYY-MM-DD` date string, if possible.
pub fn parse_date(date_str: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").ok()
}

/// Keeps only ASCII digits, the way the amount field accepts input.
pub fn digits_only(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Groups an integer with thousands separators: `1234567` -> `1,234,567`.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Rounds to whole won and formats it; `None` renders as a dash.
pub fn format_won(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{}원", group_thousands(v.round() as i64)),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(10_836_810), "10,836,810");
        assert_eq!(group_thousands(-410_000), "-410,000");
    }

    #[test]
    fn formats_won_with_rounding() {
        assert_eq!(format_won(Some(836_809.99)), "836,810원");
        assert_eq!(format_won(None), "-");
    }

    #[test]
    fn parses_dates() {
        assert_eq!(parse_date("2024-08-31"), NaiveDate::from_ymd_opt(2024, 8, 31));
        assert_eq!(parse_date("soon"), None);
    }

    #[test]
    fn strips_non_digits() {
        assert_eq!(digits_only("10,000,000원"), "10000000");
        assert_eq!(digits_only("-5"), "5");
    }
}
