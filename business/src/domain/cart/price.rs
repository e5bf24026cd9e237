use once_cell::sync::Lazy;
use regex::Regex;

const LEADING_NUMBER_PATTERN: &str = r"^(?:\d+\.?\d*|\.\d+)";

static LEADING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(LEADING_NUMBER_PATTERN).expect("leading number pattern is valid"));

/// Reads the numeric amount out of a localized price label such as
/// `"₹1,299.50"`.
///
/// Every character other than an ASCII digit or `.` is dropped, then the
/// longest leading decimal number is taken (`"1.2.3"` reads as `1.2`).
/// Labels without any number are worth `0.0`.
pub fn parse_price(label: &str) -> f64 {
    let stripped: String = label
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    LEADING_NUMBER
        .find(&stripped)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}
