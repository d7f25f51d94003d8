//! Filters applied to collection responses before anything is shown.

use serde_json::Value;
use shopfront_core::Category;

use crate::types::{record_id, RawProductRecord};

/// Keeps only records with a usable `id`. Records without one are dropped and
/// never reach normalization.
#[must_use]
pub fn valid_products(items: &[Value]) -> Vec<RawProductRecord> {
    let products: Vec<RawProductRecord> = items
        .iter()
        .cloned()
        .filter_map(RawProductRecord::from_value)
        .collect();

    let dropped = items.len() - products.len();
    if dropped > 0 {
        tracing::debug!(dropped, kept = products.len(), "dropped product records without id");
    }
    products
}

/// Keeps only categories with an `id` and a non-empty `name`.
///
/// `name` is read from `attributes.name` first, then the top-level `name`.
#[must_use]
pub fn valid_categories(items: &[Value]) -> Vec<Category> {
    items
        .iter()
        .filter_map(|item| {
            let id = record_id(item)?;
            let name = item
                .get("attributes")
                .and_then(|attrs| attrs.get("name"))
                .or_else(|| item.get("name"))
                .and_then(Value::as_str)
                .filter(|name| !name.trim().is_empty())?;
            Some(Category {
                id,
                name: name.to_owned(),
            })
        })
        .collect()
}
