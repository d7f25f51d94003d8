//! Category and product routes for `ContentClient`.

use reqwest::Method;
use shopfront_core::Category;

use crate::error::ContentError;
use crate::listing::{valid_categories, valid_products};
use crate::types::{CollectionEnvelope, ItemEnvelope, RawProductRecord};

use super::ContentClient;

const POPULATE_ALL: (&str, &str) = ("populate", "*");

impl ContentClient {
    /// `GET /categories?populate=*`, keeping categories with an id and name.
    ///
    /// # Errors
    ///
    /// Propagates transport, status, and decoding errors.
    pub async fn fetch_categories(&self) -> Result<Vec<Category>, ContentError> {
        let url = self.content_url("/categories", &[POPULATE_ALL])?;
        let envelope: CollectionEnvelope = self
            .execute(Method::GET, url, None, None, "categories")
            .await?;
        Ok(valid_categories(envelope.items()))
    }

    /// `GET /products?filters[category][id][$eq]={id}&populate=*`, keeping
    /// records with an id.
    ///
    /// # Errors
    ///
    /// Propagates transport, status, and decoding errors.
    pub async fn fetch_products_by_category(
        &self,
        category_id: i64,
    ) -> Result<Vec<RawProductRecord>, ContentError> {
        let category_id = category_id.to_string();
        let url = self.content_url(
            "/products",
            &[
                ("filters[category][id][$eq]", category_id.as_str()),
                POPULATE_ALL,
            ],
        )?;
        let envelope: CollectionEnvelope = self
            .execute(Method::GET, url, None, None, "products by category")
            .await?;
        let products = valid_products(envelope.items());
        tracing::debug!(%category_id, count = products.len(), "fetched category products");
        Ok(products)
    }

    /// `GET /products?populate=*`, keeping records with an id.
    ///
    /// # Errors
    ///
    /// Propagates transport, status, and decoding errors.
    pub async fn fetch_all_products(&self) -> Result<Vec<RawProductRecord>, ContentError> {
        let url = self.content_url("/products", &[POPULATE_ALL])?;
        let envelope: CollectionEnvelope = self
            .execute(Method::GET, url, None, None, "product listing")
            .await?;
        Ok(valid_products(envelope.items()))
    }

    /// `GET /products/{id}?populate=*`.
    ///
    /// Returns `Ok(None)` when the envelope's `data` is empty, missing, or
    /// has no id.
    ///
    /// # Errors
    ///
    /// Propagates transport, status (including [`ContentError::NotFound`]),
    /// and decoding errors.
    pub async fn fetch_product(&self, id: i64) -> Result<Option<RawProductRecord>, ContentError> {
        let url = self.content_url(&format!("/products/{id}"), &[POPULATE_ALL])?;
        let envelope: ItemEnvelope = self
            .execute(Method::GET, url, None, None, "product")
            .await?;
        Ok(RawProductRecord::from_value(envelope.data))
    }

    /// Looks up a product by its route id, falling back once to scanning
    /// the full product listing.
    ///
    /// The direct lookup is trusted whenever it returns a record. When it
    /// returns an empty payload, a 404, or any other error, the listing is
    /// fetched and searched for a record with the same id.
    ///
    /// # Errors
    ///
    /// - [`ContentError::InvalidProductId`]: `raw_id` is not a positive integer.
    /// - [`ContentError::ProductNotFound`]: neither lookup has the id and the
    ///   direct lookup answered with an empty payload or 404.
    /// - The direct lookup's error when it failed some other way and the
    ///   listing does not have the id either.
    /// - The listing's own error when the fallback request fails.
    pub async fn find_product(&self, raw_id: &str) -> Result<RawProductRecord, ContentError> {
        let id = parse_product_id(raw_id)?;

        let direct_error = match self.fetch_product(id).await {
            Ok(Some(record)) => return Ok(record),
            Ok(None) => {
                tracing::debug!(id, "direct product lookup returned no data, scanning listing");
                None
            }
            Err(ContentError::NotFound { .. }) => {
                tracing::debug!(id, "direct product lookup returned 404, scanning listing");
                None
            }
            Err(err) => {
                tracing::warn!(id, error = %err, "direct product lookup failed, scanning listing");
                Some(err)
            }
        };

        let listing = self.fetch_all_products().await?;
        if let Some(record) = listing.into_iter().find(|record| record.id() == id) {
            tracing::info!(id, "product found via listing fallback");
            return Ok(record);
        }

        Err(direct_error.unwrap_or(ContentError::ProductNotFound { id }))
    }
}

/// Coerces a route parameter such as `"12"` to a product id.
pub(super) fn parse_product_id(raw: &str) -> Result<i64, ContentError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ContentError::InvalidProductId {
            raw: raw.to_owned(),
        })
}
