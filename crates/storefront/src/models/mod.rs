//! Domain models for the storefront.
//!
//! Catalog records ([`Brand`], [`Product`]) serialize exactly as the API
//! returns them. [`User`] is an in-memory domain type built from the raw
//! file records in [`crate::store::records`]; it never leaves the process.

pub mod brand;
pub mod cart;
pub mod product;
pub mod user;

pub use brand::Brand;
pub use cart::CartItem;
pub use product::Product;
pub use user::{CurrentUser, PersonName, User};
