//! Data set inspection commands.

use std::path::Path;

use sunglasses_storefront::Store;
use sunglasses_storefront::services::CatalogService;
use sunglasses_storefront::store::StoreError;

/// Load a data set from `dir`, or the bundled one when `None`.
async fn load(dir: Option<&Path>) -> Result<Store, StoreError> {
    match dir {
        Some(dir) => {
            tracing::info!("Loading data set from {}", dir.display());
            Store::load_dir(dir).await
        }
        None => {
            tracing::info!("Loading bundled data set");
            Store::bundled()
        }
    }
}

/// Validate a data set and log its row counts.
///
/// # Errors
///
/// Returns the first `StoreError` found while loading.
pub async fn check(dir: Option<&Path>) -> Result<(), StoreError> {
    let summary = load(dir).await?.summary();

    tracing::info!(
        "Data set OK: {} brands, {} products, {} users, {} cart lines",
        summary.brands,
        summary.products,
        summary.users,
        summary.cart_items
    );
    Ok(())
}

/// Print every brand with its products.
///
/// # Errors
///
/// Returns the first `StoreError` found while loading.
#[allow(clippy::print_stdout)]
pub async fn brands(dir: Option<&Path>) -> Result<(), StoreError> {
    let store = load(dir).await?;
    let catalog = CatalogService::new(&store);

    for brand in store.brands() {
        let products = catalog
            .list_products_by_brand(&brand.id.to_string())
            .unwrap_or_default();

        println!("{} {} ({} products)", brand.id, brand.name, products.len());
        for product in products {
            println!("    {:>3}  {:<40} {}", product.id, product.name, product.price);
        }
    }
    Ok(())
}
