//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `i32` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]` (a JSON number)
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `Ord`
/// - Conversion methods: `new()`, `as_i32()`
/// - `From<i32>`, `Into<i32>` and `FromStr` implementations
///
/// # Example
///
/// ```rust
/// # use sunglasses_core::define_id;
/// define_id!(BrandId);
/// define_id!(ProductId);
///
/// let brand_id = BrandId::new(1);
/// let product_id: ProductId = "1".parse().unwrap();
///
/// // These are different types, so this won't compile:
/// // let _: BrandId = product_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Create a new ID from an i32 value.
            #[must_use]
            pub const fn new(id: i32) -> Self {
                Self(id)
            }

            /// Get the underlying i32 value.
            #[must_use]
            pub const fn as_i32(&self) -> i32 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.parse::<i32>().map(Self)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(BrandId);
define_id!(ProductId);
define_id!(UserId);

/// Serde adapter that writes an ID as a JSON string instead of a number.
///
/// Cart entries reference products by string (`{"productId": "1"}`) while the
/// catalog itself uses numbers, so fields that need the string form opt in with
/// `#[serde(with = "sunglasses_core::id::as_string")]`.
pub mod as_string {
    use core::fmt::Display;
    use core::str::FromStr;

    use serde::{Deserialize, Deserializer, Serializer, de};

    /// Serialize any `Display` value as a string.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        serializer.collect_str(value)
    }

    /// Deserialize a string and parse it with `FromStr`.
    ///
    /// # Errors
    ///
    /// Fails if the input is not a string or does not parse.
    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Line {
        #[serde(with = "as_string")]
        id: ProductId,
    }

    #[test]
    fn test_id_serializes_as_number() {
        let json = serde_json::to_string(&BrandId::new(3)).unwrap();
        assert_eq!(json, "3");
    }

    #[test]
    fn test_id_from_str() {
        assert_eq!("12".parse::<ProductId>().unwrap(), ProductId::new(12));
        assert!("twelve".parse::<ProductId>().is_err());
        assert!("".parse::<ProductId>().is_err());
        assert!("1.5".parse::<ProductId>().is_err());
    }

    #[test]
    fn test_as_string_adapter() {
        let line = Line {
            id: ProductId::new(7),
        };
        let json = serde_json::to_string(&line).unwrap();
        assert_eq!(json, r#"{"id":"7"}"#);

        let parsed: Line = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, line);
    }

    #[test]
    fn test_as_string_adapter_rejects_garbage() {
        let result: Result<Line, _> = serde_json::from_str(r#"{"id":"abc"}"#);
        assert!(result.is_err());

        let result: Result<Line, _> = serde_json::from_str(r#"{"id":7}"#);
        assert!(result.is_err());
    }
}
