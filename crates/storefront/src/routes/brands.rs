//! Brand route handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};
use tracing::instrument;

use crate::error::Result;
use crate::models::{Brand, Product};
use crate::services::CatalogService;
use crate::state::AppState;

/// List all brands.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Brand>>> {
    let store = state.read_store().await;
    let brands = CatalogService::new(&store).list_brands()?;
    Ok(Json(brands))
}

/// List one brand's products.
#[instrument(skip_all)]
pub async fn products(
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<Product>>> {
    let Path(brand_id) = path?;
    let store = state.read_store().await;
    let products = CatalogService::new(&store).list_products_by_brand(&brand_id)?;
    Ok(Json(products))
}
