//! Response types for the headless content API.
//!
//! ## Observed record shapes
//!
//! ### Flat shape
//! Newer API versions return scalar fields (`title`, `price`, `description`,
//! `size`, `colour`, `available`) directly on the record. `image` is either an
//! array of `{url}` objects or a nested `{data:{attributes:{url}}}` object.
//!
//! ### Enveloped shape
//! Older API versions nest the same fields one level down under `attributes`.
//! Media relations (`image`, `images`, `photo`) each look like
//! `{data:{attributes:{url, formats:{thumbnail,small,medium,large}}}}`, with
//! `images.data` being an array.
//!
//! ### `description`
//! Either a plain string or a rich-text block array
//! (`[{type:"paragraph", children:[{text}]}]`).
//!
//! ### Envelopes
//! Collections arrive as `{data:[...], meta:{...}}` and single records as
//! `{data:{...}}`. `data` may be `null` or missing when a record does not
//! exist, so both envelopes default it to `null` instead of failing.
//!
//! Because the record shape varies between API versions, records are kept as
//! untyped JSON and read through ordered extractors in
//! [`crate::normalize`] and [`crate::image`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `{data: [...]}` envelope returned by collection endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct CollectionEnvelope {
    #[serde(default)]
    pub data: Value,
}

impl CollectionEnvelope {
    /// The items of `data`, or an empty slice when `data` is not an array.
    #[must_use]
    pub fn items(&self) -> &[Value] {
        self.data.as_array().map_or(&[], Vec::as_slice)
    }
}

/// `{data: {...}}` envelope returned by single-record endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ItemEnvelope {
    #[serde(default)]
    pub data: Value,
}

/// Body of `GET`/`PUT /users/me/theme`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemePayload {
    pub theme: String,
}

/// A product record in whichever shape the content API sent it.
#[derive(Debug, Clone, PartialEq)]
pub struct RawProductRecord(Value);

impl RawProductRecord {
    /// Wraps a JSON value. Returns `None` when the value has no usable `id`,
    /// since id-less records are never listed or normalized.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        record_id(&value)?;
        Some(Self(value))
    }

    /// The record's numeric id.
    #[must_use]
    pub fn id(&self) -> i64 {
        // Construction guarantees an id.
        record_id(&self.0).unwrap_or_default()
    }

    /// The `attributes` object, when the record uses the enveloped shape.
    #[must_use]
    pub fn attributes(&self) -> Option<&Map<String, Value>> {
        self.0.get("attributes").and_then(Value::as_object)
    }

    /// Top-level field lookup.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

/// Reads `id` as an integer. Integral JSON numbers (including `7.0`) and
/// numeric strings are accepted; `0`, negatives, and anything else count as
/// absent.
pub(crate) fn record_id(value: &Value) -> Option<i64> {
    let id = match value.get("id")? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral_f64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }?;
    (id > 0).then_some(id)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn integral_f64(f: f64) -> Option<i64> {
    let in_range = f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64;
    (in_range && f.fract().abs() < f64::EPSILON).then_some(f as i64)
}
