//! Cart lines.

use serde::{Deserialize, Serialize};

use sunglasses_core::{ProductId, Quantity, id};

/// One line of a user's cart.
///
/// A cart holds at most one line per product; adding the same product again
/// bumps `quantity` instead of appending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// The product, written as a string (`"productId": "1"`).
    #[serde(with = "id::as_string")]
    pub product_id: ProductId,
    /// How many of the product.
    pub quantity: Quantity,
}

impl CartItem {
    /// A fresh line holding a single item.
    #[must_use]
    pub const fn single(product_id: ProductId) -> Self {
        Self {
            product_id,
            quantity: Quantity::ONE,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_wire_format() {
        let item = CartItem::single(ProductId::new(1));
        assert_eq!(
            serde_json::to_value(item).unwrap(),
            json!({ "productId": "1", "quantity": 1 })
        );
    }

    #[test]
    fn test_rejects_zero_quantity() {
        let result: Result<CartItem, _> =
            serde_json::from_value(json!({ "productId": "1", "quantity": 0 }));
        assert!(result.is_err());
    }
}
