//! In-memory data store.
//!
//! # Data Set
//!
//! A data set is three JSON documents:
//!
//! - `brands.json` - `[{ "id": 1, "name": "Oakley" }, ...]`
//! - `products.json` - `[{ "id": 1, "brandId": 1, "name": ..., "price": 150 }, ...]`
//! - `users.json` - randomuser-style records with `login`, `accessToken`, `cart`
//!
//! They are read once at startup, either from `SUNGLASSES_DATA_DIR` or from
//! the copy bundled into the binary, validated, and converted into domain
//! types. Afterwards only cart operations mutate the store.
//!
//! # Load-time conversion
//!
//! - Plaintext passwords are hashed with Argon2id; the plaintext is dropped.
//! - Users without an `accessToken` are issued a random one.
//! - Users get a `UserId` from their position in the file (1-based).

pub mod records;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use secrecy::SecretString;
use thiserror::Error;

use sunglasses_core::{AccessToken, BrandId, ProductId, UserId};

use crate::models::{Brand, Product, User};
use crate::services::auth::{hash_password, issue_token, validate_password_hash};
use records::UserRecord;

/// File name of the brand table.
pub const BRANDS_FILE: &str = "brands.json";
/// File name of the product table.
pub const PRODUCTS_FILE: &str = "products.json";
/// File name of the user table.
pub const USERS_FILE: &str = "users.json";

const BUNDLED_BRANDS: &str = include_str!("../../data/brands.json");
const BUNDLED_PRODUCTS: &str = include_str!("../../data/products.json");
const BUNDLED_USERS: &str = include_str!("../../data/users.json");

/// Errors that can occur while loading a data set.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A data file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// A data file is not valid JSON for its table.
    #[error("failed to parse {file}: {source}")]
    Parse {
        /// File name.
        file: &'static str,
        /// Underlying error.
        source: serde_json::Error,
    },

    /// Two brands share an ID.
    #[error("duplicate brand id {0}")]
    DuplicateBrand(BrandId),

    /// Two products share an ID.
    #[error("duplicate product id {0}")]
    DuplicateProduct(ProductId),

    /// A product references a brand that does not exist.
    #[error("product {product} references unknown brand {brand}")]
    UnknownBrand {
        /// Offending product.
        product: ProductId,
        /// Missing brand.
        brand: BrandId,
    },

    /// A product has a negative price.
    #[error("product {0} has a negative price")]
    NegativePrice(ProductId),

    /// A username is empty.
    #[error("user #{0} has an empty username")]
    EmptyUsername(usize),

    /// Two users share a username.
    #[error("duplicate username {0:?}")]
    DuplicateUsername(String),

    /// Two users share an email address.
    #[error("duplicate email {0:?}")]
    DuplicateEmail(String),

    /// Two users share an access token.
    #[error("user {0:?} reuses another user's access token")]
    DuplicateToken(String),

    /// A user has neither a password nor a password hash.
    #[error("user {0:?} has no password")]
    MissingPassword(String),

    /// A stored password hash is not a valid PHC string.
    #[error("user {0:?} has an invalid password hash")]
    InvalidPasswordHash(String),

    /// Hashing a plaintext password failed.
    #[error("failed to hash password for user {0:?}")]
    PasswordHash(String),

    /// A cart lists the same product twice.
    #[error("cart of {username:?} lists product {product} more than once")]
    DuplicateCartItem {
        /// Cart owner.
        username: String,
        /// Repeated product.
        product: ProductId,
    },

    /// A cart references a product that does not exist.
    #[error("cart of {username:?} references unknown product {product}")]
    UnknownCartProduct {
        /// Cart owner.
        username: String,
        /// Missing product.
        product: ProductId,
    },

    /// More users than fit in a `UserId`.
    #[error("too many users")]
    TooManyUsers,
}

/// Row counts of a loaded store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreSummary {
    /// Number of brands.
    pub brands: usize,
    /// Number of products.
    pub products: usize,
    /// Number of users.
    pub users: usize,
    /// Cart lines across all users.
    pub cart_items: usize,
}

/// The brand, product and user tables.
///
/// Owned by [`crate::state::AppState`] behind a lock and handed to services
/// by reference.
#[derive(Debug, Clone, Default)]
pub struct Store {
    brands: Vec<Brand>,
    products: Vec<Product>,
    users: Vec<User>,
}

impl Store {
    /// Build a store from already-validated domain values.
    ///
    /// No cross-table validation is performed; use [`Self::from_records`]
    /// for untrusted input.
    #[must_use]
    pub const fn new(brands: Vec<Brand>, products: Vec<Product>, users: Vec<User>) -> Self {
        Self {
            brands,
            products,
            users,
        }
    }

    /// Load the data set compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the bundled files fail validation.
    pub fn bundled() -> Result<Self, StoreError> {
        Self::from_json(BUNDLED_BRANDS, BUNDLED_PRODUCTS, BUNDLED_USERS)
    }

    /// Load a data set from a directory holding the three JSON files.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if a file cannot be read, or any validation
    /// error from [`Self::from_json`].
    pub async fn load_dir(dir: &Path) -> Result<Self, StoreError> {
        let brands = read_file(&dir.join(BRANDS_FILE)).await?;
        let products = read_file(&dir.join(PRODUCTS_FILE)).await?;
        let users = read_file(&dir.join(USERS_FILE)).await?;
        Self::from_json(&brands, &products, &users)
    }

    /// Parse and validate the three JSON documents.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Parse` for malformed JSON, or any validation error
    /// from [`Self::from_records`].
    pub fn from_json(brands: &str, products: &str, users: &str) -> Result<Self, StoreError> {
        let brands: Vec<Brand> = parse(BRANDS_FILE, brands)?;
        let products: Vec<Product> = parse(PRODUCTS_FILE, products)?;
        let users: Vec<UserRecord> = parse(USERS_FILE, users)?;
        Self::from_records(brands, products, users)
    }

    /// Validate raw tables and convert user records into domain users.
    ///
    /// # Errors
    ///
    /// Returns the first `StoreError` found: duplicate IDs, dangling brand or
    /// product references, duplicate usernames/emails/tokens, duplicate cart
    /// lines, or missing/invalid credentials.
    pub fn from_records(
        brands: Vec<Brand>,
        products: Vec<Product>,
        records: Vec<UserRecord>,
    ) -> Result<Self, StoreError> {
        let mut brand_ids = HashSet::with_capacity(brands.len());
        for brand in &brands {
            if !brand_ids.insert(brand.id) {
                return Err(StoreError::DuplicateBrand(brand.id));
            }
        }

        let mut product_ids = HashSet::with_capacity(products.len());
        for product in &products {
            if !product_ids.insert(product.id) {
                return Err(StoreError::DuplicateProduct(product.id));
            }
            if !brand_ids.contains(&product.brand_id) {
                return Err(StoreError::UnknownBrand {
                    product: product.id,
                    brand: product.brand_id,
                });
            }
            if product.price.is_negative() {
                return Err(StoreError::NegativePrice(product.id));
            }
        }

        // Pre-assigned tokens are reserved up front so issued ones never collide.
        let mut tokens: HashSet<AccessToken> = HashSet::new();
        for record in &records {
            let Some(token) = &record.access_token else {
                continue;
            };
            if !tokens.insert(token.clone()) {
                return Err(StoreError::DuplicateToken(record.login.username.clone()));
            }
        }

        let mut usernames = HashSet::with_capacity(records.len());
        let mut emails = HashSet::with_capacity(records.len());
        let mut users = Vec::with_capacity(records.len());

        for (index, record) in records.into_iter().enumerate() {
            let username = record.login.username;
            if username.is_empty() {
                return Err(StoreError::EmptyUsername(index));
            }
            if !usernames.insert(username.clone()) {
                return Err(StoreError::DuplicateUsername(username));
            }
            if !emails.insert(record.email.as_str().to_ascii_lowercase()) {
                return Err(StoreError::DuplicateEmail(record.email.into()));
            }

            let mut in_cart = HashSet::with_capacity(record.cart.len());
            for item in &record.cart {
                if !product_ids.contains(&item.product_id) {
                    return Err(StoreError::UnknownCartProduct {
                        username,
                        product: item.product_id,
                    });
                }
                if !in_cart.insert(item.product_id) {
                    return Err(StoreError::DuplicateCartItem {
                        username,
                        product: item.product_id,
                    });
                }
            }

            let password_hash = match (record.login.password_hash, record.login.password) {
                (Some(hash), _) => {
                    validate_password_hash(&hash)
                        .map_err(|_| StoreError::InvalidPasswordHash(username.clone()))?;
                    hash
                }
                (None, Some(plaintext)) => hash_password(&SecretString::from(plaintext))
                    .map_err(|_| StoreError::PasswordHash(username.clone()))?,
                (None, None) => return Err(StoreError::MissingPassword(username)),
            };

            let access_token = match record.access_token {
                Some(token) => token,
                None => {
                    let mut token = issue_token();
                    while tokens.contains(&token) {
                        token = issue_token();
                    }
                    tokens.insert(token.clone());
                    tracing::debug!(username = %username, "Issued access token");
                    token
                }
            };

            let id = index
                .checked_add(1)
                .and_then(|n| i32::try_from(n).ok())
                .map(UserId::new)
                .ok_or(StoreError::TooManyUsers)?;

            users.push(User {
                id,
                username,
                email: record.email,
                name: record.name,
                password_hash,
                access_token,
                cart: record.cart,
            });
        }

        Ok(Self::new(brands, products, users))
    }

    /// All brands in file order.
    #[must_use]
    pub fn brands(&self) -> &[Brand] {
        &self.brands
    }

    /// All products in file order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// All users in file order.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Look up a brand by ID.
    #[must_use]
    pub fn brand(&self, id: BrandId) -> Option<&Brand> {
        self.brands.iter().find(|b| b.id == id)
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Look up a user by ID.
    #[must_use]
    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Look up a user by ID for modification.
    pub fn user_mut(&mut self, id: UserId) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.id == id)
    }

    /// Row counts, for logs and tooling.
    #[must_use]
    pub fn summary(&self) -> StoreSummary {
        StoreSummary {
            brands: self.brands.len(),
            products: self.products.len(),
            users: self.users.len(),
            cart_items: self.users.iter().map(|u| u.cart.len()).sum(),
        }
    }
}

fn parse<T: serde::de::DeserializeOwned>(file: &'static str, json: &str) -> Result<T, StoreError> {
    serde_json::from_str(json).map_err(|source| StoreError::Parse { file, source })
}

async fn read_file(path: &Path) -> Result<String, StoreError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Shared fixtures for unit tests.
///
/// Hashing the bundled passwords is slow in debug builds, so the bundled
/// store is built once and cloned.
#[cfg(test)]
pub(crate) mod fixtures {
    use std::sync::LazyLock;

    use super::Store;

    static BUNDLED: LazyLock<Store> = LazyLock::new(|| match Store::bundled() {
        Ok(store) => store,
        Err(e) => panic!("bundled data set is invalid: {e}"),
    });

    /// A fresh copy of the bundled data set.
    pub fn store() -> Store {
        BUNDLED.clone()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    const PASSWORD_HASH: &str =
        "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHQ$RdescudvJCsgt3ub+b+dWRWJTmaaJObG";

    fn brands_json() -> String {
        json!([{ "id": 1, "name": "Oakley" }, { "id": 2, "name": "Ray Ban" }]).to_string()
    }

    fn products_json() -> String {
        json!([
            { "id": 1, "brandId": 1, "name": "Superglasses", "description": "Best", "price": 150 },
            { "id": 2, "brandId": 2, "name": "Glasses", "description": "Normal", "price": 100 }
        ])
        .to_string()
    }

    fn user_json(username: &str, email: &str) -> serde_json::Value {
        json!({
            "name": { "first": "a", "last": "b" },
            "email": email,
            "login": {
                "username": username,
                "passwordHash": PASSWORD_HASH
            },
            "cart": []
        })
    }

    #[test]
    fn test_bundled_data_set() {
        let store = fixtures::store();
        let summary = store.summary();
        assert_eq!(summary.brands, 5);
        assert_eq!(summary.products, 11);
        assert_eq!(summary.users, 3);
        assert_eq!(summary.cart_items, 2);
    }

    #[test]
    fn test_bundled_passwords_are_hashed() {
        let store = fixtures::store();
        for user in store.users() {
            assert!(user.password_hash.starts_with("$argon2"));
        }
    }

    #[test]
    fn test_missing_tokens_are_issued() {
        let store = fixtures::store();
        let natalia = store
            .users()
            .iter()
            .find(|u| u.username == "whitekoala649")
            .unwrap();
        assert_eq!(natalia.access_token.as_str().len(), AccessToken::LENGTH);

        let unique: HashSet<_> = store.users().iter().map(|u| &u.access_token).collect();
        assert_eq!(unique.len(), store.users().len());
    }

    #[test]
    fn test_user_ids_follow_file_order() {
        let store = fixtures::store();
        let ids: Vec<i32> = store.users().iter().map(|u| u.id.as_i32()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(store.user(UserId::new(2)).unwrap().username, "lazywolf342");
    }

    #[test]
    fn test_lookup_by_id() {
        let store = fixtures::store();
        assert_eq!(store.brand(BrandId::new(2)).unwrap().name, "Ray Ban");
        assert_eq!(store.product(ProductId::new(6)).unwrap().name, "glas");
        assert!(store.product(ProductId::new(12)).is_none());
    }

    #[test]
    fn test_malformed_json() {
        let result = Store::from_json("not json", &products_json(), "[]");
        assert!(matches!(
            result,
            Err(StoreError::Parse {
                file: BRANDS_FILE,
                ..
            })
        ));
    }

    #[test]
    fn test_duplicate_brand() {
        let brands = json!([{ "id": 1, "name": "A" }, { "id": 1, "name": "B" }]).to_string();
        let result = Store::from_json(&brands, "[]", "[]");
        assert!(matches!(result, Err(StoreError::DuplicateBrand(id)) if id == BrandId::new(1)));
    }

    #[test]
    fn test_dangling_brand_reference() {
        let products = json!([
            { "id": 1, "brandId": 9, "name": "X", "description": "Y", "price": 1 }
        ])
        .to_string();
        let result = Store::from_json(&brands_json(), &products, "[]");
        assert!(matches!(result, Err(StoreError::UnknownBrand { .. })));
    }

    #[test]
    fn test_negative_price() {
        let products = json!([
            { "id": 1, "brandId": 1, "name": "X", "description": "Y", "price": -5 }
        ])
        .to_string();
        let result = Store::from_json(&brands_json(), &products, "[]");
        assert!(matches!(result, Err(StoreError::NegativePrice(_))));
    }

    #[test]
    fn test_duplicate_username() {
        let users = json!([user_json("same", "a@x.io"), user_json("same", "b@x.io")]).to_string();
        let result = Store::from_json(&brands_json(), &products_json(), &users);
        assert!(matches!(result, Err(StoreError::DuplicateUsername(name)) if name == "same"));
    }

    #[test]
    fn test_duplicate_email_ignores_case() {
        let users = json!([user_json("a", "a@x.io"), user_json("b", "A@X.io")]).to_string();
        let result = Store::from_json(&brands_json(), &products_json(), &users);
        assert!(matches!(result, Err(StoreError::DuplicateEmail(_))));
    }

    #[test]
    fn test_duplicate_token() {
        let mut first = user_json("a", "a@x.io");
        let mut second = user_json("b", "b@x.io");
        first["accessToken"] = json!("kjKQZ2QHG1eFCfmT");
        second["accessToken"] = json!("kjKQZ2QHG1eFCfmT");
        let users = json!([first, second]).to_string();
        let result = Store::from_json(&brands_json(), &products_json(), &users);
        assert!(matches!(result, Err(StoreError::DuplicateToken(_))));
    }

    #[test]
    fn test_malformed_token_is_a_parse_error() {
        let mut user = user_json("a", "a@x.io");
        user["accessToken"] = json!("short");
        let users = json!([user]).to_string();
        let result = Store::from_json(&brands_json(), &products_json(), &users);
        assert!(matches!(result, Err(StoreError::Parse { file: USERS_FILE, .. })));
    }

    #[test]
    fn test_cart_validation() {
        let mut user = user_json("a", "a@x.io");
        user["cart"] = json!([{ "productId": "7", "quantity": 1 }]);
        let users = json!([user]).to_string();
        let result = Store::from_json(&brands_json(), &products_json(), &users);
        assert!(matches!(result, Err(StoreError::UnknownCartProduct { .. })));

        let mut user = user_json("a", "a@x.io");
        user["cart"] = json!([
            { "productId": "1", "quantity": 1 },
            { "productId": "1", "quantity": 2 }
        ]);
        let users = json!([user]).to_string();
        let result = Store::from_json(&brands_json(), &products_json(), &users);
        assert!(matches!(result, Err(StoreError::DuplicateCartItem { .. })));
    }

    #[test]
    fn test_missing_password() {
        let mut user = user_json("a", "a@x.io");
        user["login"] = json!({ "username": "a" });
        let users = json!([user]).to_string();
        let result = Store::from_json(&brands_json(), &products_json(), &users);
        assert!(matches!(result, Err(StoreError::MissingPassword(_))));
    }

    #[test]
    fn test_invalid_password_hash() {
        let mut user = user_json("a", "a@x.io");
        user["login"]["passwordHash"] = json!("not-a-phc-string");
        let users = json!([user]).to_string();
        let result = Store::from_json(&brands_json(), &products_json(), &users);
        assert!(matches!(result, Err(StoreError::InvalidPasswordHash(_))));
    }

    #[tokio::test]
    async fn test_load_dir_missing_files() {
        let result = Store::load_dir(Path::new("/definitely/not/here")).await;
        assert!(matches!(result, Err(StoreError::Io { .. })));
    }

    #[tokio::test]
    async fn test_load_dir_bundled_copy() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let store = Store::load_dir(&dir).await.unwrap();
        assert_eq!(store.summary().products, 11);
    }
}
