//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Login and access-token resolution
//! - `catalog` - Brand listing, brand-scoped product listing, product search
//! - `cart` - Read/add/remove/update on a user's cart
//!
//! Services borrow the [`Store`](crate::store::Store) for the duration of one
//! operation. Read-only services take `&Store`; the cart service takes
//! `&mut Store`, so every cart operation is a single read-modify-write under
//! the caller's write lock.

pub mod auth;
pub mod cart;
pub mod catalog;

pub use auth::{AuthError, AuthService, PendingLogin};
pub use cart::{CartError, CartService};
pub use catalog::{CatalogError, CatalogService};
