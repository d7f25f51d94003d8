use super::products::parse_product_id;
use super::*;

fn client() -> ContentClient {
    ContentClient::new("http://localhost:1337/", 5, "shopfront-test/0.1").unwrap()
}

#[test]
fn new_strips_trailing_slash_from_origin() {
    assert_eq!(client().base_origin(), "http://localhost:1337");
}

#[test]
fn new_rejects_relative_origin() {
    let err = ContentClient::new("localhost", 5, "ua").unwrap_err();
    assert!(
        matches!(err, ContentError::InvalidBaseUrl { .. }),
        "expected InvalidBaseUrl, got: {err:?}"
    );
}

#[test]
fn content_url_uses_api_prefix() {
    let url = client().content_url("/categories", &[("populate", "*")]).unwrap();
    assert_eq!(url.as_str(), "http://localhost:1337/api/categories?populate=*");
}

#[test]
fn content_url_encodes_filter_brackets() {
    let url = client()
        .content_url(
            "/products",
            &[("filters[category][id][$eq]", "4"), ("populate", "*")],
        )
        .unwrap();
    assert_eq!(
        url.as_str(),
        "http://localhost:1337/api/products?filters%5Bcategory%5D%5Bid%5D%5B%24eq%5D=4&populate=*"
    );
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert_eq!(pairs[0], ("filters[category][id][$eq]".to_owned(), "4".to_owned()));
}

#[test]
fn with_api_prefix_normalizes_slashes() {
    let c = client().with_api_prefix("v2/");
    let url = c.content_url("/products", &[]).unwrap();
    assert_eq!(url.as_str(), "http://localhost:1337/v2/products");

    let bare = client().with_api_prefix("");
    let url = bare.content_url("/products", &[]).unwrap();
    assert_eq!(url.as_str(), "http://localhost:1337/products");
}

#[test]
fn root_url_ignores_api_prefix() {
    let url = client().root_url("/users/me/theme").unwrap();
    assert_eq!(url.as_str(), "http://localhost:1337/users/me/theme");
}

#[test]
fn parse_product_id_coerces_route_string() {
    assert_eq!(parse_product_id("12").unwrap(), 12);
    assert_eq!(parse_product_id(" 7 ").unwrap(), 7);
}

#[test]
fn parse_product_id_rejects_non_numeric() {
    for raw in ["abc", "", "-3", "0", "1.5"] {
        let err = parse_product_id(raw).unwrap_err();
        assert!(
            matches!(err, ContentError::InvalidProductId { .. }),
            "expected InvalidProductId for {raw:?}, got: {err:?}"
        );
    }
}
