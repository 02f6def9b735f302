//! Integration tests for the Sunglasses storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p sunglasses-integration-tests
//! ```
//!
//! Each test starts the real router on an ephemeral port with its own copy
//! of the bundled data set, so cart changes never leak between tests.
//!
//! # Test Categories
//!
//! - `catalog` - Brands, brand products, product search
//! - `auth` - Login
//! - `cart` - Cart reads and writes, token enforcement

use std::net::SocketAddr;
use std::sync::LazyLock;

use reqwest::{Client, Response};
use serde_json::Value;
use sunglasses_storefront::config::StorefrontConfig;
use sunglasses_storefront::{AppState, Store, app};

/// Username of the fixture user with an empty cart.
pub const SUSANNA_USERNAME: &str = "yellowleopard753";
/// Password of [`SUSANNA_USERNAME`].
pub const SUSANNA_PASSWORD: &str = "jonjon";
/// Pre-assigned token of [`SUSANNA_USERNAME`].
pub const SUSANNA_TOKEN: &str = "kjKQZ2QHG1eFCfmT";

/// Email of the fixture user whose cart holds products 3 and 4.
pub const SALVADOR_EMAIL: &str = "salvador.jordan@example.com";
/// Password of [`SALVADOR_EMAIL`].
pub const SALVADOR_PASSWORD: &str = "tucker";
/// Pre-assigned token of [`SALVADOR_EMAIL`].
pub const SALVADOR_TOKEN: &str = "hEoJFuix38uedAf0";

/// Bundled data set, hashed once per test binary.
static FIXTURE: LazyLock<Store> = LazyLock::new(|| match Store::bundled() {
    Ok(store) => store,
    Err(e) => panic!("bundled data set is invalid: {e}"),
});

/// A running storefront and a client pointed at it.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl TestContext {
    /// Start a storefront on `127.0.0.1:0` serving a fresh fixture store.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn new() -> Self {
        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .unwrap_or_else(|e| panic!("failed to bind test listener: {e}"));
        let addr = listener
            .local_addr()
            .unwrap_or_else(|e| panic!("failed to read listener address: {e}"));

        let state = AppState::new(StorefrontConfig::default(), FIXTURE.clone());
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app(state)).await {
                panic!("test server failed: {e}");
            }
        });

        Self {
            client: Client::new(),
            base_url: format!("http://{addr}"),
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `GET path`.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .unwrap_or_else(|e| panic!("GET {path} failed: {e}"))
    }

    /// `POST path` without a body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn post(&self, path: &str) -> Response {
        self.client
            .post(self.url(path))
            .send()
            .await
            .unwrap_or_else(|e| panic!("POST {path} failed: {e}"))
    }

    /// `DELETE path`.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn delete(&self, path: &str) -> Response {
        self.client
            .delete(self.url(path))
            .send()
            .await
            .unwrap_or_else(|e| panic!("DELETE {path} failed: {e}"))
    }

    /// `POST /api/login` with a JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn login(&self, body: &Value) -> Response {
        self.client
            .post(self.url("/api/login"))
            .json(body)
            .send()
            .await
            .unwrap_or_else(|e| panic!("POST /api/login failed: {e}"))
    }
}

/// Read a response body as JSON.
///
/// # Panics
///
/// Panics if the body is not JSON.
pub async fn json(response: Response) -> Value {
    response
        .json()
        .await
        .unwrap_or_else(|e| panic!("response body is not JSON: {e}"))
}
