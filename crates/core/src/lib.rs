//! Sunglasses Core - Shared types library.
//!
//! This crate provides the value types used across the Sunglasses components:
//! - `storefront` - The catalog/cart HTTP API
//! - `cli` - Command-line tools for inspecting and migrating data sets
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no HTTP,
//! no storage. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, emails, quantities and tokens

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
