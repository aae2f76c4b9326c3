//! Procedural macros for `into_map`.
//!
//! `#[derive(IntoMap)]` implements `into_map::IntoMap` for a struct with named fields. The
//! generated `into_map` builds a `BTreeMap<String, String>` with one entry per field, keyed
//! by the field's name and holding the field's value rendered with `ToString`:
//!
//! ```rust,ignore
//! #[derive(IntoMap)]
//! pub struct User {
//!     pub id: u32,
//!     #[into_map(rename = "full_name")]
//!     pub name: String,
//!     #[into_map(ignore)]
//!     pub password: String,
//! }
//! ```
//!
//! This would generate (roughly):
//!
//! ```rust,ignore
//! impl ::into_map::IntoMap for User {
//!     fn into_map(&self) -> BTreeMap<String, String> {
//!         let mut map = BTreeMap::new();
//!         map.insert(String::from("id"), ToString::to_string(&self.id));
//!         map.insert(String::from("full_name"), ToString::to_string(&self.name));
//!         map
//!     }
//!
//!     fn into_entries(&self) -> Vec<(String, String)> {
//!         // same entries, in declaration order
//!     }
//! }
//! ```
//!
//! Field options all live under the `into_map` attribute:
//! - `#[into_map(ignore)]` leaves the field out of the map entirely.
//! - `#[into_map(rename = "key")]` stores the field under `key` instead of its own name. If a
//! field has more than one, the first one is used. Renaming a field onto a key another included
//! field already uses is a compile error.
//!
//! Options can be combined in one attribute (`#[into_map(rename = "key", ignore)]`), in which
//! case `ignore` wins. Anything else under `into_map` that isn't one of these two forms is
//! ignored rather than reported, item by item: in `#[into_map(ignore, rename = key)]` the
//! unquoted `rename` is dropped and the field is still ignored.
//!
//! Two included fields may not end up with the same key, and only structs with named fields
//! are supported: tuple structs, unit structs, enums and unions are rejected with a compile
//! error pointing at the type name.
//!
//! Field types that mention a generic type parameter get a `ToString` bound on the impl.

#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::missing_crate_level_docs)]
#![deny(missing_docs)]

mod expand;
mod util;

extern crate proc_macro;

use syn::{DeriveInput, parse_macro_input};

/// Derives `into_map::IntoMap` for a struct with named fields.
///
/// See the crate-level documentation for the supported `#[into_map(...)]` options.
#[proc_macro_derive(IntoMap, attributes(into_map))]
pub fn derive_into_map(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand::generate(&input) {
        Ok(result) => result.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
