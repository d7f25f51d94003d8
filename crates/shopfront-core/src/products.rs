use serde::{Deserialize, Serialize};

/// A product flattened out of whichever record shape the content API sent,
/// with every field populated.
///
/// Values are derived fresh on every fetch and never persisted. To change a
/// field, re-normalize the source record instead of mutating this value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalProduct {
    pub id: i64,
    pub title: String,
    /// Always `>= 0`.
    pub price: f64,
    /// Plain text; rich-text block descriptions are flattened to one
    /// paragraph per line.
    pub description: String,
    pub size: String,
    pub colour: String,
    pub available: bool,
    /// Absolute, fetchable URL. Falls back to a placeholder image.
    pub image_url: String,
}

impl CanonicalProduct {
    /// Price formatted for display, e.g. `"$12.50"`.
    #[must_use]
    pub fn display_price(&self) -> String {
        format!("${:.2}", self.price)
    }
}

/// A product category from `GET /categories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_product(price: f64) -> CanonicalProduct {
        CanonicalProduct {
            id: 7,
            title: "Canvas Tote".to_string(),
            price,
            description: "Sturdy bag".to_string(),
            size: "M".to_string(),
            colour: "Navy".to_string(),
            available: true,
            image_url: "http://localhost:1337/uploads/tote.png".to_string(),
        }
    }

    #[test]
    fn display_price_uses_two_decimals() {
        assert_eq!(make_product(12.5).display_price(), "$12.50");
        assert_eq!(make_product(0.0).display_price(), "$0.00");
    }

    #[test]
    fn serializes_image_url_in_camel_case() {
        let json = serde_json::to_value(make_product(3.0)).expect("serialize");
        assert_eq!(
            json["imageUrl"].as_str(),
            Some("http://localhost:1337/uploads/tote.png")
        );
        assert!(json.get("image_url").is_none());
    }
}
