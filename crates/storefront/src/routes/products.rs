//! Product search handler.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::models::Product;
use crate::services::CatalogService;
use crate::state::AppState;

/// Search query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    /// Free text matched against names and descriptions.
    pub query: Option<String>,
}

/// Search products; an absent or empty query lists the whole catalog.
#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    search: std::result::Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<Product>>> {
    let Query(search) = search?;
    let store = state.read_store().await;
    let products = CatalogService::new(&store).search_products(search.query.as_deref())?;
    tracing::debug!(count = products.len(), "Product search");
    Ok(Json(products))
}
