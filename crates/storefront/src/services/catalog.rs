//! Catalog service: brands, products by brand, product search.

use thiserror::Error;

use sunglasses_core::BrandId;

use crate::models::{Brand, Product};
use crate::store::Store;

/// Errors from catalog lookups. Every variant is a "not found".
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// The brand table is empty.
    #[error("no brands")]
    NoBrands,

    /// No brand has this ID.
    #[error("brand {0} not found")]
    BrandNotFound(String),

    /// The brand exists but has no products.
    #[error("brand {0} has no products")]
    BrandHasNoProducts(BrandId),

    /// A non-empty search matched nothing.
    #[error("no products match {0:?}")]
    NoMatchingProducts(String),
}

/// Read-only catalog queries.
pub struct CatalogService<'a> {
    store: &'a Store,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// All brands.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NoBrands` if there are none.
    pub fn list_brands(&self) -> Result<Vec<Brand>, CatalogError> {
        let brands = self.store.brands();
        if brands.is_empty() {
            return Err(CatalogError::NoBrands);
        }
        Ok(brands.to_vec())
    }

    /// All products of one brand, in catalog order.
    ///
    /// `brand_id` is the raw path segment; anything that is not a known
    /// brand ID is reported as not found.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::BrandNotFound` if no brand has this ID, or
    /// `CatalogError::BrandHasNoProducts` if it has no products.
    pub fn list_products_by_brand(&self, brand_id: &str) -> Result<Vec<Product>, CatalogError> {
        let brand = brand_id
            .parse::<BrandId>()
            .ok()
            .and_then(|id| self.store.brand(id))
            .ok_or_else(|| CatalogError::BrandNotFound(brand_id.to_string()))?;

        let products: Vec<Product> = self
            .store
            .products()
            .iter()
            .filter(|p| p.brand_id == brand.id)
            .cloned()
            .collect();

        if products.is_empty() {
            return Err(CatalogError::BrandHasNoProducts(brand.id));
        }
        Ok(products)
    }

    /// Case-insensitive substring search over product names and descriptions.
    ///
    /// An absent or empty query returns the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NoMatchingProducts` if a non-empty query
    /// matches nothing.
    pub fn search_products(&self, query: Option<&str>) -> Result<Vec<Product>, CatalogError> {
        let Some(query) = query.filter(|q| !q.is_empty()) else {
            return Ok(self.store.products().to_vec());
        };

        let needle = query.to_lowercase();
        let products: Vec<Product> = self
            .store
            .products()
            .iter()
            .filter(|p| p.matches_lowercase(&needle))
            .cloned()
            .collect();

        if products.is_empty() {
            return Err(CatalogError::NoMatchingProducts(query.to_string()));
        }
        Ok(products)
    }
}
