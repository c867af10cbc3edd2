//! Scalar Normalizers
//!
//! Pure text-to-value conversions used by the extraction cascades. All of
//! them are total: bad input yields `None` (or an empty string), never an
//! error.

mod tests;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static DIGIT_RUN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid regex"));
static FLOAT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+\.?\d*").expect("valid regex"));
static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// String values [`normalize_bool`] treats as true.
const TRUE_WORDS: &[&str] = &["true", "yes", "1", "on", "available", "in stock"];

/// Parse a displayed price into a number.
///
/// Strips everything except digits, commas and dots, then reads the comma as
/// a decimal separator. Thousands separators on this storefront are spaces or
/// non-breaking spaces, which the stripping removes.
///
/// # Examples
/// ```
/// use alkoteka_scraper::tools::parse::parse_price;
///
/// assert_eq!(parse_price("1 234,50 РУБ"), Some(1234.50));
/// assert_eq!(parse_price("от 999 ₽"), Some(999.0));
/// assert_eq!(parse_price("договорная"), None);
/// ```
pub fn parse_price(text: &str) -> Option<f64> {
    let cleaned = text
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect::<String>()
        .replace(',', ".");
    cleaned.parse().ok()
}

/// First contiguous digit run in the text, e.g. `"Year 2020 Volume 750"`
/// yields 2020 (the first run, not the largest or the last).
pub fn extract_number(text: &str) -> Option<i64> {
    DIGIT_RUN_REGEX.find(text).and_then(|m| m.as_str().parse().ok())
}

/// First floating-point-looking token (optional fractional part).
pub fn extract_float(text: &str) -> Option<f64> {
    FLOAT_REGEX.find(text).and_then(|m| m.as_str().parse().ok())
}

/// Trim and collapse internal whitespace runs to a single space.
///
/// # Examples
/// ```
/// use alkoteka_scraper::tools::parse::clean_title;
///
/// assert_eq!(clean_title("  Абсолют \n Стандарт  0.7л "), "Абсолют Стандарт 0.7л");
/// assert_eq!(clean_title(""), "");
/// ```
pub fn clean_title(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text.trim(), " ").to_string()
}

/// Read a loosely-typed value as a boolean: booleans pass through, numbers
/// use numeric truthiness, strings match a small allow-list, everything else
/// is false.
pub fn normalize_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => TRUE_WORDS.contains(&s.trim().to_lowercase().as_str()),
        _ => false,
    }
}

/// Discount percentage for an original/current price pair, truncated and
/// clamped to [0, 100]. `None` when either price is zero or the original is
/// not positive, since there is no meaningful discount to compute.
///
/// # Examples
/// ```
/// use alkoteka_scraper::tools::parse::calculate_discount;
///
/// assert_eq!(calculate_discount(1000.0, 750.0), Some(25));
/// assert_eq!(calculate_discount(1000.0, 1000.0), Some(0));
/// assert_eq!(calculate_discount(0.0, 750.0), None);
/// ```
pub fn calculate_discount(original: f64, current: f64) -> Option<i64> {
    if original <= 0.0 || current == 0.0 {
        return None;
    }
    let discount = (original - current) / original * 100.0;
    Some(discount.clamp(0.0, 100.0) as i64)
}
