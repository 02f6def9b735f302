//! Cart service.
//!
//! Every operation acts on one user's cart and returns the cart as it stands
//! afterwards. Product IDs arrive as raw strings from the URL; a string that
//! does not parse as an ID can never match anything, so it is reported the
//! same way as an unknown ID.

use thiserror::Error;

use sunglasses_core::{ProductId, Quantity, QuantityError, UserId};

use crate::models::{CartItem, User};
use crate::store::Store;

/// Errors from cart operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// The acting user no longer exists.
    #[error("user {0} not found")]
    UnknownUser(UserId),

    /// No product has this ID.
    #[error("product {0:?} not found")]
    ProductNotFound(String),

    /// The cart has no line for this product.
    #[error("product {0:?} is not in the cart")]
    ItemNotFound(String),

    /// The requested quantity is not a positive whole number.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(#[from] QuantityError),
}

/// Cart operations for a single store.
pub struct CartService<'a> {
    store: &'a mut Store,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(store: &'a mut Store) -> Self {
        Self { store }
    }

    /// The user's cart, unfiltered.
    ///
    /// # Errors
    ///
    /// Returns `CartError::UnknownUser` if the user does not exist.
    pub fn get_cart(&self, user_id: UserId) -> Result<Vec<CartItem>, CartError> {
        self.store
            .user(user_id)
            .map(|user| user.cart.clone())
            .ok_or(CartError::UnknownUser(user_id))
    }

    /// Add one of a product to the cart.
    ///
    /// Bumps the existing line's quantity if the product is already in the
    /// cart, otherwise appends a line with quantity 1.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ProductNotFound` if no product has this ID.
    pub fn add_item(
        &mut self,
        user_id: UserId,
        product_id: &str,
    ) -> Result<Vec<CartItem>, CartError> {
        let product = parse_product_id(product_id)
            .filter(|id| self.store.product(*id).is_some())
            .ok_or_else(|| CartError::ProductNotFound(product_id.to_string()))?;

        let user = self.user_mut(user_id)?;
        match user.cart.iter_mut().find(|item| item.product_id == product) {
            Some(item) => item.quantity = item.quantity.increment(),
            None => user.cart.push(CartItem::single(product)),
        }

        tracing::debug!(user = %user.username, product = %product, "Added item to cart");
        Ok(user.cart.clone())
    }

    /// Remove a product's line from the cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ItemNotFound` if the cart has no line for it.
    pub fn remove_item(
        &mut self,
        user_id: UserId,
        product_id: &str,
    ) -> Result<Vec<CartItem>, CartError> {
        let user = self.user_mut(user_id)?;
        let position = parse_product_id(product_id)
            .and_then(|id| user.cart.iter().position(|item| item.product_id == id))
            .ok_or_else(|| CartError::ItemNotFound(product_id.to_string()))?;

        let removed = user.cart.remove(position);
        tracing::debug!(
            user = %user.username,
            product = %removed.product_id,
            "Removed item from cart"
        );
        Ok(user.cart.clone())
    }

    /// Set the quantity of a product already in the cart.
    ///
    /// The line is looked up before the quantity is validated, so an unknown
    /// line is reported even when the quantity is also bad.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ItemNotFound` if the cart has no line for it, or
    /// `CartError::InvalidQuantity` if `quantity` is absent, below 1 or
    /// fractional.
    pub fn update_quantity(
        &mut self,
        user_id: UserId,
        product_id: &str,
        quantity: Option<&str>,
    ) -> Result<Vec<CartItem>, CartError> {
        let user = self.user_mut(user_id)?;
        let item = parse_product_id(product_id)
            .and_then(|id| user.cart.iter_mut().find(|item| item.product_id == id))
            .ok_or_else(|| CartError::ItemNotFound(product_id.to_string()))?;

        let quantity = Quantity::parse(quantity.unwrap_or_default())?;
        item.quantity = quantity;

        tracing::debug!(user = %user.username, %quantity, "Updated cart quantity");
        Ok(user.cart.clone())
    }

    fn user_mut(&mut self, user_id: UserId) -> Result<&mut User, CartError> {
        self.store
            .user_mut(user_id)
            .ok_or(CartError::UnknownUser(user_id))
    }
}

fn parse_product_id(raw: &str) -> Option<ProductId> {
    raw.parse().ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::fixtures;

    /// `yellowleopard753`, empty cart.
    const SUSANNA: UserId = UserId::new(1);
    /// `lazywolf342`, cart holds products 3 and 4.
    const SALVADOR: UserId = UserId::new(2);

    fn line(product: i32, quantity: u32) -> CartItem {
        CartItem {
            product_id: ProductId::new(product),
            quantity: Quantity::new(quantity).unwrap(),
        }
    }

    #[test]
    fn test_get_cart() {
        let mut store = fixtures::store();
        let cart = CartService::new(&mut store);
        assert!(cart.get_cart(SUSANNA).unwrap().is_empty());
        assert_eq!(cart.get_cart(SALVADOR).unwrap(), vec![line(3, 1), line(4, 2)]);
        assert_eq!(
            cart.get_cart(UserId::new(99)),
            Err(CartError::UnknownUser(UserId::new(99)))
        );
    }

    #[test]
    fn test_add_item_then_increment() {
        let mut store = fixtures::store();
        let mut cart = CartService::new(&mut store);

        assert_eq!(cart.add_item(SUSANNA, "1").unwrap(), vec![line(1, 1)]);
        assert_eq!(cart.add_item(SUSANNA, "1").unwrap(), vec![line(1, 2)]);
        assert_eq!(
            cart.add_item(SUSANNA, "5").unwrap(),
            vec![line(1, 2), line(5, 1)]
        );
    }

    #[test]
    fn test_add_item_persists_in_store() {
        let mut store = fixtures::store();
        CartService::new(&mut store).add_item(SUSANNA, "2").unwrap();
        assert_eq!(store.user(SUSANNA).unwrap().cart, vec![line(2, 1)]);
    }

    #[test]
    fn test_add_unknown_product() {
        let mut store = fixtures::store();
        let mut cart = CartService::new(&mut store);
        assert_eq!(
            cart.add_item(SUSANNA, "12"),
            Err(CartError::ProductNotFound("12".to_string()))
        );
        assert_eq!(
            cart.add_item(SUSANNA, "abc"),
            Err(CartError::ProductNotFound("abc".to_string()))
        );
        assert!(cart.get_cart(SUSANNA).unwrap().is_empty());
    }

    #[test]
    fn test_remove_item() {
        let mut store = fixtures::store();
        let mut cart = CartService::new(&mut store);
        assert_eq!(cart.remove_item(SALVADOR, "3").unwrap(), vec![line(4, 2)]);
    }

    #[test]
    fn test_remove_item_not_in_cart() {
        let mut store = fixtures::store();
        let mut cart = CartService::new(&mut store);
        assert_eq!(
            cart.remove_item(SALVADOR, "5"),
            Err(CartError::ItemNotFound("5".to_string()))
        );
        assert_eq!(cart.get_cart(SALVADOR).unwrap().len(), 2);
    }

    #[test]
    fn test_update_quantity() {
        let mut store = fixtures::store();
        let mut cart = CartService::new(&mut store);
        assert_eq!(
            cart.update_quantity(SALVADOR, "4", Some("3")).unwrap(),
            vec![line(3, 1), line(4, 3)]
        );
    }

    #[test]
    fn test_update_quantity_rejects_bad_values() {
        let mut store = fixtures::store();
        let mut cart = CartService::new(&mut store);

        for bad in ["0", "1.5", "-1", "lots", ""] {
            assert!(
                matches!(
                    cart.update_quantity(SALVADOR, "4", Some(bad)),
                    Err(CartError::InvalidQuantity(_))
                ),
                "quantity {bad:?} should be rejected"
            );
        }
        assert!(matches!(
            cart.update_quantity(SALVADOR, "4", None),
            Err(CartError::InvalidQuantity(QuantityError::Missing))
        ));
        assert_eq!(cart.get_cart(SALVADOR).unwrap(), vec![line(3, 1), line(4, 2)]);
    }

    #[test]
    fn test_update_quantity_checks_item_first() {
        let mut store = fixtures::store();
        let mut cart = CartService::new(&mut store);
        assert_eq!(
            cart.update_quantity(SALVADOR, "5", Some("3")),
            Err(CartError::ItemNotFound("5".to_string()))
        );
        assert_eq!(
            cart.update_quantity(SALVADOR, "5", Some("0")),
            Err(CartError::ItemNotFound("5".to_string()))
        );
    }

    #[test]
    fn test_carts_are_per_user() {
        let mut store = fixtures::store();
        let mut cart = CartService::new(&mut store);
        cart.add_item(SUSANNA, "4").unwrap();
        assert_eq!(cart.get_cart(SALVADOR).unwrap(), vec![line(3, 1), line(4, 2)]);
    }
}
