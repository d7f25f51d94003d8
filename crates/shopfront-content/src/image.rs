//! Image URL resolution for product records.
//!
//! A record may carry its image in any of five places depending on the API
//! version and media field name. [`CANDIDATES`] lists them in priority order;
//! the first one holding a non-empty string wins, and the winner is turned
//! into an absolute URL by [`materialize_url`].

use serde_json::Value;

use crate::types::RawProductRecord;

type Extractor = fn(&RawProductRecord) -> Option<&Value>;

/// Candidate image locations, highest priority first.
const CANDIDATES: [(&str, Extractor); 5] = [
    ("image[0].url", image_array_first),
    ("image.data.attributes.url", image_object),
    ("attributes.image.data.attributes.url", attributes_image),
    ("attributes.images.data[0].attributes.url", attributes_images_first),
    ("attributes.photo.data.attributes.url", attributes_photo),
];

/// Resolves the record's image to an absolute URL, or returns `placeholder`
/// when no candidate holds a non-empty string.
#[must_use]
pub fn resolve_image_url(raw: &RawProductRecord, base_origin: &str, placeholder: &str) -> String {
    for (source, extract) in CANDIDATES {
        let Some(candidate) = extract(raw)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
        else {
            continue;
        };
        let url = materialize_url(candidate, base_origin);
        tracing::debug!(product_id = raw.id(), source, %url, "resolved product image");
        return url;
    }

    tracing::debug!(product_id = raw.id(), "no product image found, using placeholder");
    placeholder.to_owned()
}

/// Turns an image reference into an absolute URL.
///
/// - `/uploads/x.png` (root-relative) → `{base_origin}/uploads/x.png`
/// - `http...` (already absolute) → unchanged
/// - `x.png` (bare upload filename) → `{base_origin}/uploads/x.png`
#[must_use]
pub fn materialize_url(candidate: &str, base_origin: &str) -> String {
    let origin = base_origin.trim_end_matches('/');
    if candidate.starts_with('/') {
        format!("{origin}{candidate}")
    } else if candidate.starts_with("http") {
        candidate.to_owned()
    } else {
        format!("{origin}/uploads/{candidate}")
    }
}

/// `{data:{attributes:{url}}}` media relation, shared by several candidates.
fn media_url(relation: &Value) -> Option<&Value> {
    relation.get("data")?.get("attributes")?.get("url")
}

fn image_array_first(raw: &RawProductRecord) -> Option<&Value> {
    raw.field("image")?.as_array()?.first()?.get("url")
}

fn image_object(raw: &RawProductRecord) -> Option<&Value> {
    let image = raw.field("image")?;
    if !image.is_object() {
        return None;
    }
    media_url(image)
}

fn attributes_image(raw: &RawProductRecord) -> Option<&Value> {
    media_url(raw.attributes()?.get("image")?)
}

fn attributes_images_first(raw: &RawProductRecord) -> Option<&Value> {
    raw.attributes()?
        .get("images")?
        .get("data")?
        .as_array()?
        .first()?
        .get("attributes")?
        .get("url")
}

fn attributes_photo(raw: &RawProductRecord) -> Option<&Value> {
    media_url(raw.attributes()?.get("photo")?)
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;

    const ORIGIN: &str = "http://h:1337";
    const PLACEHOLDER: &str = "https://placeholder.example/none.png";

    fn record(value: Value) -> RawProductRecord {
        RawProductRecord::from_value(value).expect("fixture must carry an id")
    }

    fn media(url: &str) -> Value {
        json!({"data": {"attributes": {"url": url, "formats": {"thumbnail": {"url": "/uploads/thumb.png"}}}}})
    }

    // -----------------------------------------------------------------------
    // materialize_url
    // -----------------------------------------------------------------------

    #[test]
    fn root_relative_path_gets_origin_prefix() {
        assert_eq!(
            materialize_url("/uploads/x.png", ORIGIN),
            "http://h:1337/uploads/x.png"
        );
    }

    #[test]
    fn absolute_url_is_unchanged() {
        assert_eq!(materialize_url("http://cdn/y.png", ORIGIN), "http://cdn/y.png");
        assert_eq!(
            materialize_url("https://cdn.example.com/y.png", ORIGIN),
            "https://cdn.example.com/y.png"
        );
    }

    #[test]
    fn bare_filename_goes_under_uploads() {
        assert_eq!(materialize_url("z.png", ORIGIN), "http://h:1337/uploads/z.png");
    }

    #[test]
    fn origin_trailing_slash_is_ignored() {
        assert_eq!(
            materialize_url("/uploads/x.png", "http://h:1337/"),
            "http://h:1337/uploads/x.png"
        );
        assert_eq!(
            materialize_url("z.png", "http://h:1337/"),
            "http://h:1337/uploads/z.png"
        );
    }

    // -----------------------------------------------------------------------
    // candidate extraction
    // -----------------------------------------------------------------------

    #[test]
    fn flat_image_array_is_used() {
        let raw = record(json!({"id": 1, "image": [{"url": "/uploads/a.png"}, {"url": "/uploads/b.png"}]}));
        assert_eq!(
            resolve_image_url(&raw, ORIGIN, PLACEHOLDER),
            "http://h:1337/uploads/a.png"
        );
    }

    #[test]
    fn flat_image_object_is_used() {
        let raw = record(json!({"id": 1, "image": media("/uploads/obj.png")}));
        assert_eq!(
            resolve_image_url(&raw, ORIGIN, PLACEHOLDER),
            "http://h:1337/uploads/obj.png"
        );
    }

    #[test]
    fn top_level_array_beats_attributes_image() {
        let raw = record(json!({
            "id": 1,
            "image": [{"url": "/uploads/top.png"}],
            "attributes": {"image": media("/uploads/nested.png")}
        }));
        assert_eq!(
            resolve_image_url(&raw, ORIGIN, PLACEHOLDER),
            "http://h:1337/uploads/top.png"
        );
    }

    #[test]
    fn top_level_object_beats_attributes_image() {
        let raw = record(json!({
            "id": 1,
            "image": media("/uploads/top.png"),
            "attributes": {"image": media("/uploads/nested.png")}
        }));
        assert_eq!(
            resolve_image_url(&raw, ORIGIN, PLACEHOLDER),
            "http://h:1337/uploads/top.png"
        );
    }

    #[test]
    fn attributes_image_beats_images_and_photo() {
        let raw = record(json!({
            "id": 1,
            "attributes": {
                "image": media("/uploads/image.png"),
                "images": {"data": [{"attributes": {"url": "/uploads/images0.png"}}]},
                "photo": media("/uploads/photo.png")
            }
        }));
        assert_eq!(
            resolve_image_url(&raw, ORIGIN, PLACEHOLDER),
            "http://h:1337/uploads/image.png"
        );
    }

    #[test]
    fn attributes_images_array_first_element_is_used() {
        let raw = record(json!({
            "id": 1,
            "attributes": {
                "images": {"data": [
                    {"attributes": {"url": "https://cdn.example.com/first.jpg"}},
                    {"attributes": {"url": "https://cdn.example.com/second.jpg"}}
                ]},
                "photo": media("/uploads/photo.png")
            }
        }));
        assert_eq!(
            resolve_image_url(&raw, ORIGIN, PLACEHOLDER),
            "https://cdn.example.com/first.jpg"
        );
    }

    #[test]
    fn attributes_photo_is_last_resort() {
        let raw = record(json!({"id": 1, "attributes": {"photo": media("photo.png")}}));
        assert_eq!(
            resolve_image_url(&raw, ORIGIN, PLACEHOLDER),
            "http://h:1337/uploads/photo.png"
        );
    }

    #[test]
    fn empty_candidate_falls_through_to_next() {
        let raw = record(json!({
            "id": 1,
            "image": [{"url": ""}],
            "attributes": {"photo": media("/uploads/photo.png")}
        }));
        assert_eq!(
            resolve_image_url(&raw, ORIGIN, PLACEHOLDER),
            "http://h:1337/uploads/photo.png"
        );
    }

    #[test]
    fn non_string_url_is_treated_as_absent() {
        let raw = record(json!({
            "id": 1,
            "image": [{"url": 12}],
            "attributes": {"image": {"data": {"attributes": {"url": null}}}}
        }));
        assert_eq!(resolve_image_url(&raw, ORIGIN, PLACEHOLDER), PLACEHOLDER);
    }

    #[test]
    fn empty_images_array_falls_through() {
        let raw = record(json!({
            "id": 1,
            "image": [],
            "attributes": {"images": {"data": []}, "photo": media("/uploads/p.png")}
        }));
        assert_eq!(
            resolve_image_url(&raw, ORIGIN, PLACEHOLDER),
            "http://h:1337/uploads/p.png"
        );
    }

    #[test]
    fn null_media_relation_yields_placeholder() {
        let raw = record(json!({"id": 1, "attributes": {"image": {"data": null}}}));
        assert_eq!(resolve_image_url(&raw, ORIGIN, PLACEHOLDER), PLACEHOLDER);
    }

    #[test]
    fn record_without_any_image_returns_exact_placeholder() {
        let raw = record(json!({"id": 1, "title": "Plain", "attributes": {"title": "Plain"}}));
        assert_eq!(resolve_image_url(&raw, ORIGIN, PLACEHOLDER), PLACEHOLDER);
    }

    #[test]
    fn formats_are_not_candidates() {
        let raw = record(json!({
            "id": 1,
            "attributes": {"image": {"data": {"attributes": {"formats": {"small": {"url": "/uploads/small.png"}}}}}}
        }));
        assert_eq!(resolve_image_url(&raw, ORIGIN, PLACEHOLDER), PLACEHOLDER);
    }
}
