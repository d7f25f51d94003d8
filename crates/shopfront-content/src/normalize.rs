//! Normalization from [`RawProductRecord`] to [`shopfront_core::CanonicalProduct`].
//!
//! Every scalar field is read from the first location that has its key:
//! `attributes.<field>` first, then the top-level `<field>`. A key found at the
//! first location wins even if its value turns out to be unusable; in that case
//! the field default applies and the top-level value is ignored. Image
//! resolution has its own candidate order, see [`crate::image`].

use serde_json::Value;
use shopfront_core::CanonicalProduct;

use crate::description::flatten_description;
use crate::image::resolve_image_url;
use crate::types::RawProductRecord;

/// Per-view defaults for fields the record does not provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductDefaults<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub size: &'a str,
    pub colour: &'a str,
    /// Absolute URL used when no image reference resolves.
    pub image_url: &'a str,
}

impl<'a> ProductDefaults<'a> {
    /// Defaults used by category listings.
    #[must_use]
    pub fn listing(placeholder_url: &'a str) -> Self {
        Self {
            title: "Product",
            ..Self::detail(placeholder_url)
        }
    }

    /// Defaults used by the product detail view.
    #[must_use]
    pub fn detail(placeholder_url: &'a str) -> Self {
        Self {
            title: "No title",
            description: "No description",
            size: "N/A",
            colour: "N/A",
            image_url: placeholder_url,
        }
    }
}

/// Normalizes a record with product-detail defaults.
#[must_use]
pub fn normalize(raw: &RawProductRecord, base_origin: &str, placeholder_url: &str) -> CanonicalProduct {
    normalize_with(raw, base_origin, &ProductDefaults::detail(placeholder_url))
}

/// Normalizes a record with caller-supplied defaults.
///
/// Never fails: every unreadable field falls back to its default.
#[must_use]
pub fn normalize_with(
    raw: &RawProductRecord,
    base_origin: &str,
    defaults: &ProductDefaults<'_>,
) -> CanonicalProduct {
    let title = lookup(raw, "title")
        .and_then(as_text)
        .unwrap_or_else(|| defaults.title.to_owned());

    let price = lookup(raw, "price").map_or(0.0, as_price);

    let description = lookup(raw, "description")
        .and_then(flatten_description)
        .unwrap_or_else(|| defaults.description.to_owned());

    let size = lookup(raw, "size")
        .and_then(as_label)
        .unwrap_or_else(|| defaults.size.to_owned());

    let colour = lookup(raw, "colour")
        .and_then(as_label)
        .unwrap_or_else(|| defaults.colour.to_owned());

    let available = lookup(raw, "available")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let image_url = resolve_image_url(raw, base_origin, defaults.image_url);

    CanonicalProduct {
        id: raw.id(),
        title,
        price,
        description,
        size,
        colour,
        available,
        image_url,
    }
}

/// Returns the value at the first location holding `key`.
fn lookup<'r>(raw: &'r RawProductRecord, key: &str) -> Option<&'r Value> {
    if let Some(value) = raw.attributes().and_then(|attrs| attrs.get(key)) {
        return Some(value);
    }
    raw.field(key)
}

fn as_text(value: &Value) -> Option<String> {
    value.as_str().map(str::to_owned)
}

/// Size and colour are free-form labels; numeric sizes such as `42` are
/// rendered as text.
fn as_label(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Numbers and numeric strings are accepted; negative, non-finite, and
/// unparseable prices become `0`.
fn as_price(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|p| p.is_finite() && *p >= 0.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
