//! Brand records.

use serde::{Deserialize, Serialize};

use sunglasses_core::BrandId;

/// A sunglasses brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    /// Unique brand ID.
    pub id: BrandId,
    /// Display name.
    pub name: String,
}
