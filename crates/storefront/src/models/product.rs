//! Product records.

use serde::{Deserialize, Serialize};

use sunglasses_core::{BrandId, Price, ProductId};

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Brand this product belongs to.
    pub brand_id: BrandId,
    /// Display name.
    pub name: String,
    /// Marketing description.
    pub description: String,
    /// Unit price in dollars.
    pub price: Price,
    /// Product photos, first one is the primary image.
    #[serde(default)]
    pub image_urls: Vec<String>,
}

impl Product {
    /// Whether the name or description contains `needle`.
    ///
    /// `needle` must already be lowercased; both fields are lowercased here
    /// before the substring check.
    #[must_use]
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}
