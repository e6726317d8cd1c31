//! Value validators: fallible predicates over sample values.
//!
//! Predicates return `Result<bool, ValidatorError>`; the scorer maps any
//! `Err` to "did not match" so a misbehaving validator scores zero
//! instead of aborting the classification of a field.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

/// Error raised by a value predicate.
#[derive(Debug, Clone, Error)]
#[error("validator error: {0}")]
pub struct ValidatorError(pub String);

/// Result type for value predicates.
pub type ValidatorResult = Result<bool, ValidatorError>;

// =============================================================================
// LAZY STATIC PATTERNS
// =============================================================================
// Format regexes compiled once on first use.

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://\S+$").unwrap());

static IMAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\.(png|jpe?g|gif|webp|svg|bmp|ico)(\?\S*)?$|^data:image/)").unwrap()
});

static VIDEO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\.(mp4|webm|mov|avi|mkv|m3u8)(\?\S*)?$|youtube\.com|youtu\.be|vimeo\.com)")
        .unwrap()
});

static UUID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .unwrap()
});

static ISO_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}([T ]\d{2}:\d{2}(:\d{2})?(\.\d+)?(Z|[+-]\d{2}:?\d{2})?)?$")
        .unwrap()
});

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+?[0-9][0-9\-\.\s\(\)]{6,18}[0-9]$").unwrap()
});

static HANDLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.\-]{1,29}$").unwrap());

static COUNTRY_CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z]{2}$").unwrap());

static CURRENCY_CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{3}$").unwrap());

const STATUS_VOCABULARY: &[&str] = &[
    "active", "inactive", "pending", "enabled", "disabled", "draft", "published", "archived",
    "open", "closed", "approved", "rejected", "completed", "cancelled", "canceled", "failed",
    "shipped", "delivered", "processing", "paid", "unpaid", "new", "in_progress",
];

/// Extract a numeric value from a JSON number or numeric string.
fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Extract a string slice from a JSON string value.
fn string_value(value: &Value) -> Option<&str> {
    value.as_str().map(str::trim)
}

// =============================================================================
// PREDICATES
// =============================================================================

/// Value parses as an email address.
pub fn is_email(value: &Value) -> ValidatorResult {
    Ok(string_value(value).is_some_and(|s| EMAIL_RE.is_match(s)))
}

/// Value parses as an http(s) URL.
pub fn is_url(value: &Value) -> ValidatorResult {
    Ok(string_value(value).is_some_and(|s| URL_RE.is_match(s)))
}

/// Value references an image (extension or data URI).
pub fn is_image_reference(value: &Value) -> ValidatorResult {
    Ok(string_value(value).is_some_and(|s| IMAGE_RE.is_match(s)))
}

/// Value references a video (extension or hosting domain).
pub fn is_video_reference(value: &Value) -> ValidatorResult {
    Ok(string_value(value).is_some_and(|s| VIDEO_RE.is_match(s)))
}

/// Value is a canonical UUID.
pub fn is_uuid(value: &Value) -> ValidatorResult {
    Ok(string_value(value).is_some_and(|s| UUID_RE.is_match(s)))
}

/// Value is an ISO 8601 date or datetime string.
pub fn is_iso_date(value: &Value) -> ValidatorResult {
    Ok(string_value(value).is_some_and(|s| ISO_DATE_RE.is_match(s)))
}

/// Value looks like a telephone number.
pub fn is_phone_number(value: &Value) -> ValidatorResult {
    Ok(string_value(value).is_some_and(|s| PHONE_RE.is_match(s)))
}

/// Value is a short handle without whitespace.
pub fn is_handle(value: &Value) -> ValidatorResult {
    Ok(string_value(value).is_some_and(|s| HANDLE_RE.is_match(s)))
}

/// Value is a two-letter country code.
pub fn is_country_code(value: &Value) -> ValidatorResult {
    Ok(string_value(value).is_some_and(|s| COUNTRY_CODE_RE.is_match(s)))
}

/// Value is a three-letter uppercase currency code.
pub fn is_currency_code(value: &Value) -> ValidatorResult {
    Ok(string_value(value).is_some_and(|s| CURRENCY_CODE_RE.is_match(s)))
}

/// Value is a non-negative number (JSON number or numeric string).
pub fn is_non_negative_number(value: &Value) -> ValidatorResult {
    Ok(numeric_value(value).is_some_and(|n| n >= 0.0))
}

/// Value is a plausible monetary amount: non-negative with at most two
/// fractional digits.
pub fn is_monetary_amount(value: &Value) -> ValidatorResult {
    Ok(numeric_value(value).is_some_and(|n| n >= 0.0 && (n * 100.0).round() / 100.0 == n))
}

/// Value fits a bounded rating scale (0 to 5).
pub fn is_rating_value(value: &Value) -> ValidatorResult {
    Ok(numeric_value(value).is_some_and(|n| (0.0..=5.0).contains(&n)))
}

/// Value fits a percentage scale (0 to 100).
pub fn is_percentage_value(value: &Value) -> ValidatorResult {
    Ok(numeric_value(value).is_some_and(|n| (0.0..=100.0).contains(&n)))
}

/// Value is a non-negative whole number.
pub fn is_whole_count(value: &Value) -> ValidatorResult {
    Ok(numeric_value(value).is_some_and(|n| n >= 0.0 && n.fract() == 0.0))
}

/// Value is a known workflow status token.
pub fn is_status_token(value: &Value) -> ValidatorResult {
    Ok(string_value(value)
        .map(|s| s.to_lowercase().replace([' ', '-'], "_"))
        .is_some_and(|s| STATUS_VOCABULARY.contains(&s.as_str())))
}

/// Value is short display text: single line, bounded length.
pub fn is_short_text(value: &Value) -> ValidatorResult {
    Ok(string_value(value).is_some_and(|s| !s.is_empty() && s.len() <= 120 && !s.contains('\n')))
}

/// Value is longer free text.
pub fn is_long_text(value: &Value) -> ValidatorResult {
    Ok(string_value(value).is_some_and(|s| s.len() > 40 && s.contains(' ')))
}

/// Value is a street-address-like string: digits, letters, whitespace.
pub fn is_address_like(value: &Value) -> ValidatorResult {
    Ok(string_value(value).is_some_and(|s| {
        s.contains(' ')
            && s.chars().any(|c| c.is_ascii_digit())
            && s.chars().any(|c| c.is_alphabetic())
    }))
}

/// Value is an array of short strings.
pub fn is_string_array(value: &Value) -> ValidatorResult {
    Ok(match value {
        Value::Array(items) => {
            !items.is_empty()
                && items
                    .iter()
                    .all(|v| v.as_str().is_some_and(|s| !s.is_empty() && s.len() <= 64))
        }
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_email_predicate() {
        assert!(is_email(&json!("user@example.com")).unwrap());
        assert!(!is_email(&json!("not-an-email")).unwrap());
        assert!(!is_email(&json!(42)).unwrap());
    }

    #[test]
    fn test_monetary_amount() {
        assert!(is_monetary_amount(&json!(29.99)).unwrap());
        assert!(is_monetary_amount(&json!(0)).unwrap());
        assert!(is_monetary_amount(&json!("19.50")).unwrap());
        assert!(!is_monetary_amount(&json!(-3.0)).unwrap());
        assert!(!is_monetary_amount(&json!(1.999)).unwrap());
    }

    #[test]
    fn test_rating_bounds() {
        assert!(is_rating_value(&json!(4.5)).unwrap());
        assert!(is_rating_value(&json!(0)).unwrap());
        assert!(!is_rating_value(&json!(11)).unwrap());
    }

    #[test]
    fn test_iso_date_variants() {
        assert!(is_iso_date(&json!("2024-01-15")).unwrap());
        assert!(is_iso_date(&json!("2024-01-15T10:30:00Z")).unwrap());
        assert!(is_iso_date(&json!("2024-01-15 10:30:00")).unwrap());
        assert!(!is_iso_date(&json!("15/01/2024")).unwrap());
    }

    #[test]
    fn test_status_vocabulary_normalization() {
        assert!(is_status_token(&json!("active")).unwrap());
        assert!(is_status_token(&json!("In Progress")).unwrap());
        assert!(!is_status_token(&json!("lorem")).unwrap());
    }

    #[test]
    fn test_image_and_video_references() {
        assert!(is_image_reference(&json!("https://cdn.example.com/a.jpg")).unwrap());
        assert!(is_image_reference(&json!("data:image/png;base64,AAAA")).unwrap());
        assert!(!is_image_reference(&json!("https://example.com/page")).unwrap());
        assert!(is_video_reference(&json!("https://youtu.be/abc123")).unwrap());
    }

    #[test]
    fn test_string_array() {
        assert!(is_string_array(&json!(["red", "green"])).unwrap());
        assert!(!is_string_array(&json!([])).unwrap());
        assert!(!is_string_array(&json!([1, 2])).unwrap());
        assert!(!is_string_array(&json!("tags")).unwrap());
    }
}
