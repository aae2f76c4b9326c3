//! `into_map` turns structs into ordered maps of their fields, keyed by field name with each
//! value rendered as a string.
//!
//! The usual way in is the [`IntoMap`] derive:
//!
//! ```rust
//! use into_map::IntoMap;
//!
//! #[derive(IntoMap)]
//! struct User {
//!     id: u32,
//!     #[into_map(rename = "full_name")]
//!     name: String,
//!     #[into_map(ignore)]
//!     password: String,
//! }
//!
//! let user = User { id: 7, name: "Ada Lovelace".to_string(), password: "hunter2".to_string() };
//! let map = user.into_map();
//! assert_eq!(map["id"], "7");
//! assert_eq!(map["full_name"], "Ada Lovelace");
//! assert!(!map.contains_key("password"));
//! ```
//!
//! For types that can't carry the derive (or whose shape is only known at run time), the
//! [`schema`] module applies the same `ignore` and `rename` rules to a
//! [`StructSchema`][schema::StructSchema] built by hand.
//!
//! # Ordering
//!
//! Entries are always produced in field declaration order. [`IntoMap::into_map`] collects
//! them into a [`BTreeMap`], so iterating the map yields keys in sorted order; use
//! [`IntoMap::into_entries`] when declaration order matters.
//!
//! See the crate-level documentation of [`into_map_derive`] for all the supported field
//! options.
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::missing_crate_level_docs)]
#![deny(missing_docs)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod schema;
mod test_util;

use alloc::{collections::BTreeMap, string::String, vec::Vec};
use core::fmt;

pub use into_map_derive::IntoMap;

/// Paths used by the code `#[derive(IntoMap)]` generates. Not public API.
#[doc(hidden)]
pub mod __private {
    pub use alloc::collections::BTreeMap;
    pub use alloc::string::{String, ToString};
    pub use alloc::vec::Vec;
}

/// A common error type for all errors that could occur in `into_map`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Tried to plan a map for a type that isn't a struct with named fields.
    #[error("`{name}` is {shape}, but only structs with named fields can be turned into a map")]
    UnsupportedShape {
        /// The name of the type.
        name: String,
        /// What the type actually is.
        shape: ShapeKind,
    },
    /// No value was supplied for a field that belongs in the map.
    #[error("no value was supplied for field `{field}` of `{name}`")]
    MissingValue {
        /// The name of the type.
        name: String,
        /// The field missing a value.
        field: String,
    },
    /// Two fields that belong in the map would be stored under the same key.
    #[error("fields `{first}` and `{second}` of `{name}` both map to key `{key}`")]
    DuplicateKey {
        /// The name of the type.
        name: String,
        /// The key both fields map to.
        key: String,
        /// The field declared first.
        first: String,
        /// The field declared second.
        second: String,
    },
}

/// The kinds of type a [`StructSchema`][schema::StructSchema] can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// A struct with named fields.
    Named,
    /// A struct with unnamed fields, e.g. `struct Pair(u32, u32)`.
    Tuple,
    /// A struct with no fields at all, e.g. `struct Marker;`.
    Unit,
    /// An enum.
    Enum,
    /// A union.
    Union,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named => write!(f, "a struct"),
            Self::Tuple => write!(f, "a tuple struct"),
            Self::Unit => write!(f, "a unit struct"),
            Self::Enum => write!(f, "an enum"),
            Self::Union => write!(f, "a union"),
        }
    }
}

/// A type that can be turned into a map from field names to field values.
///
/// Usually implemented with `#[derive(IntoMap)]`; see the crate-level docs.
pub trait IntoMap {
    /// Returns every included field as a `(key, value)` pair, in declaration order.
    fn into_entries(&self) -> Vec<(String, String)>;

    /// Returns every included field in a map from key to value.
    ///
    /// The map iterates in key order, not declaration order.
    fn into_map(&self) -> BTreeMap<String, String> {
        self.into_entries().into_iter().collect()
    }
}

impl<T: IntoMap + ?Sized> IntoMap for &T {
    #[inline]
    fn into_entries(&self) -> Vec<(String, String)> {
        T::into_entries(*self)
    }

    #[inline]
    fn into_map(&self) -> BTreeMap<String, String> {
        T::into_map(*self)
    }
}

impl<T: IntoMap + ?Sized> IntoMap for alloc::boxed::Box<T> {
    #[inline]
    fn into_entries(&self) -> Vec<(String, String)> {
        T::into_entries(self)
    }

    #[inline]
    fn into_map(&self) -> BTreeMap<String, String> {
        T::into_map(self)
    }
}
