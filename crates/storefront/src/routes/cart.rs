//! Cart route handlers.
//!
//! Every handler takes [`RequireUser`] first, so a request without a valid
//! token is rejected before its other parameters are looked at. Cart reads
//! and writes both go through the store's write lock; each request is one
//! read-modify-write.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::RequireUser;
use crate::models::CartItem;
use crate::services::CartService;
use crate::state::AppState;

/// Query parameters for adding an item.
#[derive(Debug, Default, Deserialize)]
pub struct AddQuery {
    #[serde(rename = "productId")]
    pub product_id: Option<String>,
}

/// Query parameters for changing a quantity.
#[derive(Debug, Default, Deserialize)]
pub struct QuantityQuery {
    pub quantity: Option<String>,
}

/// Show the user's cart.
#[instrument(skip_all, fields(user = %user.username))]
pub async fn show(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<CartItem>>> {
    let mut store = state.write_store().await;
    let cart = CartService::new(&mut store).get_cart(user.id)?;
    Ok(Json(cart))
}

/// Add one unit of `productId` to the cart.
#[instrument(skip_all, fields(user = %user.username))]
pub async fn add(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    query: std::result::Result<Query<AddQuery>, QueryRejection>,
) -> Result<Json<Vec<CartItem>>> {
    let Query(query) = query?;
    let product_id = query.product_id.unwrap_or_default();
    let mut store = state.write_store().await;
    let cart = CartService::new(&mut store).add_item(user.id, &product_id)?;
    Ok(Json(cart))
}

/// Remove a product's line from the cart.
#[instrument(skip_all, fields(user = %user.username))]
pub async fn remove(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<CartItem>>> {
    let Path(product_id) = path?;
    let mut store = state.write_store().await;
    let cart = CartService::new(&mut store).remove_item(user.id, &product_id)?;
    Ok(Json(cart))
}

/// Set the quantity of a product already in the cart.
#[instrument(skip_all, fields(user = %user.username))]
pub async fn update(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    path: std::result::Result<Path<String>, PathRejection>,
    query: std::result::Result<Query<QuantityQuery>, QueryRejection>,
) -> Result<Json<Vec<CartItem>>> {
    let Path(product_id) = path?;
    let Query(query) = query?;
    let mut store = state.write_store().await;
    let cart = CartService::new(&mut store).update_quantity(
        user.id,
        &product_id,
        query.quantity.as_deref(),
    )?;
    Ok(Json(cart))
}
