//! Catalog command handlers: categories, category listings, product detail.

use shopfront_content::{normalize, normalize_with, ContentClient, ContentError, ProductDefaults};
use shopfront_core::{CanonicalProduct, Category, ClientConfig};

pub(crate) async fn run_categories(client: &ContentClient) -> anyhow::Result<()> {
    let categories = client.fetch_categories().await?;
    if categories.is_empty() {
        println!("No categories found.");
        return Ok(());
    }
    for category in &categories {
        println!("{}", format_category(category));
    }
    Ok(())
}

/// Lists a category's products with listing defaults.
pub(crate) async fn run_products(
    client: &ContentClient,
    config: &ClientConfig,
    category_id: i64,
) -> anyhow::Result<()> {
    let records = client.fetch_products_by_category(category_id).await?;
    if records.is_empty() {
        println!("No products found in category {category_id}.");
        return Ok(());
    }

    let defaults = ProductDefaults::listing(&config.listing_placeholder_url);
    for record in &records {
        let product = normalize_with(record, client.base_origin(), &defaults);
        println!("{}", format_product_line(&product));
    }
    tracing::debug!(category_id, count = records.len(), "listed products");
    Ok(())
}

/// Shows one product with detail defaults.
///
/// # Errors
///
/// A product missing from both the direct lookup and the listing is an error,
/// so the process exits non-zero.
pub(crate) async fn run_product(
    client: &ContentClient,
    config: &ClientConfig,
    raw_id: &str,
) -> anyhow::Result<()> {
    let record = match client.find_product(raw_id).await {
        Ok(record) => record,
        Err(ContentError::ProductNotFound { id }) => {
            anyhow::bail!("Product not found: no product with id {id}")
        }
        Err(e) => return Err(e.into()),
    };

    let product = normalize(
        &record,
        client.base_origin(),
        &config.detail_placeholder_url,
    );
    println!("{}", format_product_detail(&product));
    Ok(())
}

fn format_category(category: &Category) -> String {
    format!("{:>5}  {}", category.id, category.name)
}

fn format_product_line(product: &CanonicalProduct) -> String {
    format!(
        "{:>5}  {:<32}  {:>10}  {}",
        product.id,
        product.title,
        product.display_price(),
        product.image_url
    )
}

fn format_product_detail(product: &CanonicalProduct) -> String {
    let availability = if product.available {
        "In stock"
    } else {
        "Out of stock"
    };
    format!(
        "{title}\n\
         Price:        {price}\n\
         Size:         {size}\n\
         Colour:       {colour}\n\
         Availability: {availability}\n\
         Image:        {image}\n\
         \n\
         {description}",
        title = product.title,
        price = product.display_price(),
        size = product.size,
        colour = product.colour,
        image = product.image_url,
        description = product.description,
    )
}
