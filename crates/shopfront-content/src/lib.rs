pub mod client;
pub mod description;
pub mod error;
pub mod image;
pub mod listing;
pub mod normalize;
pub mod types;

mod retry;

pub use client::ContentClient;
pub use error::ContentError;
pub use image::{materialize_url, resolve_image_url};
pub use listing::{valid_categories, valid_products};
pub use normalize::{normalize, normalize_with, ProductDefaults};
pub use types::RawProductRecord;
