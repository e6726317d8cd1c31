//! The standard pattern catalog.
//!
//! Registry order is the tie-break for equal confidences, so more
//! specific categories are registered before looser ones.

use crate::field::FieldType;

use super::types::{CompositePattern, PatternKind, SemanticCategory, SemanticPattern};
use super::validators;

/// Immutable catalog of semantic pattern definitions.
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    patterns: Vec<PatternKind>,
}

impl PatternRegistry {
    /// Build the standard catalog.
    pub fn standard() -> Self {
        let mut patterns = Vec::new();
        patterns.extend(commerce_patterns().into_iter().map(PatternKind::Simple));
        patterns.extend(contact_patterns().into_iter().map(PatternKind::Simple));
        patterns.extend(media_patterns().into_iter().map(PatternKind::Simple));
        patterns.extend(content_patterns().into_iter().map(PatternKind::Simple));
        patterns.extend(metadata_patterns().into_iter().map(PatternKind::Simple));
        patterns.extend(composite_patterns().into_iter().map(PatternKind::Composite));
        Self { patterns }
    }

    /// Build a registry from an explicit pattern list.
    pub fn with_patterns(patterns: Vec<PatternKind>) -> Self {
        Self { patterns }
    }

    /// All registered patterns in registration order.
    pub fn patterns(&self) -> &[PatternKind] {
        &self.patterns
    }

    /// Simple (flat-field) patterns in registration order.
    pub fn simple(&self) -> impl Iterator<Item = &SemanticPattern> {
        self.patterns.iter().filter_map(|p| match p {
            PatternKind::Simple(s) => Some(s),
            PatternKind::Composite(_) => None,
        })
    }

    /// Composite (array-structural) patterns in registration order.
    pub fn composite(&self) -> impl Iterator<Item = &CompositePattern> {
        self.patterns.iter().filter_map(|p| match p {
            PatternKind::Simple(_) => None,
            PatternKind::Composite(c) => Some(c),
        })
    }
}

impl Default for PatternRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Commerce: price, currency, quantity, percentage, rating.
fn commerce_patterns() -> Vec<SemanticPattern> {
    vec![
        SemanticPattern::new(SemanticCategory::Price)
            .with_name(r"(?i)^(price|cost|amount|total|subtotal)$", 1.0)
            .with_name(r"(?i)(price|cost|amount|fee)", 0.7)
            .with_types(
                vec![FieldType::Number, FieldType::Integer, FieldType::String],
                0.6,
            )
            .with_validator("monetary_amount", validators::is_monetary_amount, 0.5)
            .with_validator("non_negative", validators::is_non_negative_number, 0.3),
        SemanticPattern::new(SemanticCategory::Currency)
            .with_name(r"(?i)^currency(_code)?$", 1.0)
            .with_types(vec![FieldType::String], 0.5)
            .with_validator("currency_code", validators::is_currency_code, 0.8),
        SemanticPattern::new(SemanticCategory::Rating)
            .with_name(r"(?i)^(rating|stars|score)$", 1.0)
            .with_name(r"(?i)(rating|stars)", 0.7)
            .with_types(vec![FieldType::Number, FieldType::Integer], 0.6)
            .with_validator("rating_range", validators::is_rating_value, 0.8),
        SemanticPattern::new(SemanticCategory::Quantity)
            .with_name(r"(?i)^(quantity|qty|count|stock|inventory)$", 1.0)
            .with_name(r"(?i)(quantity|count)", 0.6)
            .with_types(vec![FieldType::Integer, FieldType::Number], 0.6)
            .with_validator("whole_count", validators::is_whole_count, 0.6),
        SemanticPattern::new(SemanticCategory::Percentage)
            .with_name(r"(?i)^(percent|percentage|pct|discount)$", 1.0)
            .with_name(r"(?i)(percent|pct|_rate$|ratio)", 0.6)
            .with_types(vec![FieldType::Number, FieldType::Integer], 0.6)
            .with_validator("percentage_range", validators::is_percentage_value, 0.7),
    ]
}

/// Contact and identity: email, phone, address, country, username.
fn contact_patterns() -> Vec<SemanticPattern> {
    vec![
        SemanticPattern::new(SemanticCategory::Email)
            .with_name(r"(?i)^(email|e_mail|email_address)$", 1.0)
            .with_name(r"(?i)e[-_]?mail", 0.8)
            .with_types(vec![FieldType::String], 0.5)
            .with_validator("email_format", validators::is_email, 0.9)
            .with_format("email", 0.6),
        SemanticPattern::new(SemanticCategory::Phone)
            .with_name(r"(?i)^(phone|mobile|telephone|fax)(_?number)?$", 1.0)
            .with_name(r"(?i)(phone|mobile|tel)", 0.7)
            .with_types(vec![FieldType::String], 0.5)
            .with_validator("phone_format", validators::is_phone_number, 0.9),
        SemanticPattern::new(SemanticCategory::Address)
            .with_name(r"(?i)^(address|street|street_address)$", 1.0)
            .with_name(r"(?i)(address|street|city|zip|postal)", 0.6)
            .with_types(vec![FieldType::String], 0.5)
            .with_validator("address_like", validators::is_address_like, 0.6),
        SemanticPattern::new(SemanticCategory::Country)
            .with_name(r"(?i)^country(_code)?$", 1.0)
            .with_types(vec![FieldType::String], 0.5)
            .with_validator("country_code", validators::is_country_code, 0.6),
        SemanticPattern::new(SemanticCategory::Username)
            .with_name(r"(?i)^(username|user_name|handle|nickname|login)$", 1.0)
            .with_types(vec![FieldType::String], 0.5)
            .with_validator("handle_format", validators::is_handle, 0.6),
    ]
}

/// Media references: image, avatar, video, url.
fn media_patterns() -> Vec<SemanticPattern> {
    vec![
        SemanticPattern::new(SemanticCategory::Avatar)
            .with_name(r"(?i)^avatar(_?url)?$", 1.0)
            .with_name(r"(?i)(avatar|profile_(pic|image|photo))", 0.8)
            .with_types(vec![FieldType::String], 0.4)
            .with_validator("image_reference", validators::is_image_reference, 0.8),
        SemanticPattern::new(SemanticCategory::Image)
            .with_name(r"(?i)^(image|img|photo|picture|thumbnail|thumb)(_?url)?$", 1.0)
            .with_name(r"(?i)(image|img|photo|picture|thumb)", 0.7)
            .with_types(vec![FieldType::String], 0.4)
            .with_validator("image_reference", validators::is_image_reference, 0.9),
        SemanticPattern::new(SemanticCategory::Video)
            .with_name(r"(?i)^video(_?url)?$", 1.0)
            .with_name(r"(?i)(video|movie|clip)", 0.7)
            .with_types(vec![FieldType::String], 0.4)
            .with_validator("video_reference", validators::is_video_reference, 0.8),
        SemanticPattern::new(SemanticCategory::Url)
            .with_name(r"(?i)^(url|link|href|website|homepage)$", 1.0)
            .with_name(r"(?i)(url|link|href)", 0.7)
            .with_types(vec![FieldType::String], 0.4)
            .with_validator("url_format", validators::is_url, 0.9)
            .with_format("uri", 0.5),
    ]
}

/// Display content: title, description, status, tags.
fn content_patterns() -> Vec<SemanticPattern> {
    vec![
        SemanticPattern::new(SemanticCategory::Title)
            .with_name(r"(?i)^(title|name|headline|subject|label)$", 1.0)
            .with_name(r"(?i)(title|headline)", 0.7)
            .with_types(vec![FieldType::String], 0.5)
            .with_validator("short_text", validators::is_short_text, 0.5),
        SemanticPattern::new(SemanticCategory::Description)
            .with_name(r"(?i)^(description|summary|bio|about|body|content)$", 1.0)
            .with_name(r"(?i)(desc|summary|detail)", 0.6)
            .with_types(vec![FieldType::String], 0.5)
            .with_validator("long_text", validators::is_long_text, 0.5),
        SemanticPattern::new(SemanticCategory::Status)
            .with_name(r"(?i)^(status|state)$", 1.0)
            .with_name(r"(?i)(status|state|phase)", 0.6)
            .with_types(vec![FieldType::String], 0.5)
            .with_validator("status_vocabulary", validators::is_status_token, 0.7),
        SemanticPattern::new(SemanticCategory::Tags)
            .with_name(r"(?i)^(tags|labels|categories|keywords)$", 1.0)
            .with_name(r"(?i)(tags|keywords)", 0.7)
            .with_types(vec![FieldType::Array], 0.6)
            .with_validator("string_array", validators::is_string_array, 0.7),
    ]
}

/// Administrative metadata: dates, identifiers.
fn metadata_patterns() -> Vec<SemanticPattern> {
    vec![
        SemanticPattern::new(SemanticCategory::Date)
            .with_name(r"(?i)(^|_)(date|time|timestamp)(_|$)", 0.9)
            .with_name(r"(?i)_(at|on)$", 0.7)
            .with_types(
                vec![FieldType::String, FieldType::Number, FieldType::Integer],
                0.5,
            )
            .with_validator("iso_date", validators::is_iso_date, 0.9)
            .with_format("date", 0.5)
            .with_format("date-time", 0.5),
        SemanticPattern::new(SemanticCategory::Uuid)
            .with_name(r"(?i)^(id|uuid|guid)$", 0.9)
            .with_name(r"(?i)(uuid|guid)", 0.8)
            .with_name(r"(?i)_id$", 0.6)
            .with_types(vec![FieldType::String, FieldType::Integer], 0.5)
            .with_validator("uuid_format", validators::is_uuid, 0.9)
            .with_format("uuid", 0.5),
    ]
}

/// Structural shapes over array items.
fn composite_patterns() -> Vec<CompositePattern> {
    vec![
        CompositePattern::new(
            SemanticPattern::new(SemanticCategory::Reviews)
                .with_name(r"(?i)^reviews?$", 1.0)
                .with_name(r"(?i)(review|feedback|testimonial)", 0.7),
        )
        .with_item_field(r"(?i)(rating|stars?|score)", FieldType::Number)
        .with_item_field(r"(?i)(comment|text|review|body|content)", FieldType::String)
        .with_min_items(1),
        CompositePattern::new(
            SemanticPattern::new(SemanticCategory::Products)
                .with_name(r"(?i)^(products|items|listings|catalog)$", 1.0)
                .with_name(r"(?i)(product|listing)", 0.7),
        )
        .with_item_field(r"(?i)^(name|title)$", FieldType::String)
        .with_item_field(r"(?i)(price|cost|amount)", FieldType::Number)
        .with_min_items(1),
    ]
}
