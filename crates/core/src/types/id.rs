//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.

/// Macro to define a type-safe, string-backed ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>` and `Into<String>` implementations
/// - `Borrow<str>`, so maps keyed by the ID can be queried with a `&str`
///
/// # Example
///
/// ```rust
/// # use roastery_core::define_id;
/// define_id!(RoasterId);
/// define_id!(BatchId);
///
/// let roaster_id = RoasterId::new("roaster-1");
/// let batch_id = BatchId::new("roaster-1");
///
/// // These are different types, so this won't compile:
/// // let _: RoasterId = batch_id;
/// # assert_eq!(roaster_id.as_str(), batch_id.as_str());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            Default,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the underlying string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl ::std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(SellerId);
define_id!(TeamMemberId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn test_serializes_as_plain_string() {
        let id = SellerId::new("seller-001");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"seller-001\"");

        let parsed: SellerId = serde_json::from_str("\"seller-001\"").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_map_lookup_by_str() {
        let mut map = BTreeMap::new();
        map.insert(SellerId::new("seller-002"), 2);
        assert_eq!(map.get("seller-002"), Some(&2));
        assert_eq!(map.get("seller-003"), None);
    }

    #[test]
    fn test_ordering_follows_string_ordering() {
        let mut ids = vec![
            SellerId::new("seller-010"),
            SellerId::new("seller-002"),
            SellerId::new("new-seller-42"),
        ];
        ids.sort();
        let ordered: Vec<&str> = ids.iter().map(SellerId::as_str).collect();
        assert_eq!(ordered, ["new-seller-42", "seller-002", "seller-010"]);
    }

    #[test]
    fn test_display() {
        assert_eq!(TeamMemberId::from("tm-1").to_string(), "tm-1");
    }
}
