//! Building maps from a schema described at run time.
//!
//! `#[derive(IntoMap)]` reads field names and `#[into_map(...)]` attributes straight from the
//! struct definition. When that isn't available, the same information can be written down as
//! a [`StructSchema`]: a type name plus one [`FieldDescriptor`] per field, each carrying its
//! [`Annotation`]s.
//!
//! [`StructSchema::plan`] applies the `ignore` and `rename` rules and returns a [`Plan`], which
//! then turns any source of rendered field values ([`FieldValues`]) into entries or a map.
//!
//! ```rust
//! use into_map::schema::{Annotation, FieldDescriptor, StructSchema};
//!
//! let schema = StructSchema::named("User", vec![
//!     FieldDescriptor::new("id"),
//!     FieldDescriptor::new("secret").with(Annotation::ignore()),
//!     FieldDescriptor::new("name").annotated("into_map", "rename = \"full_name\""),
//! ]);
//!
//! let plan = schema.plan().unwrap();
//! let map = plan.to_map(&[("id", "1"), ("secret", "hunter2"), ("name", "Ada")]).unwrap();
//! assert_eq!(map.len(), 2);
//! assert_eq!(map["id"], "1");
//! assert_eq!(map["full_name"], "Ada");
//! ```

use alloc::{
    collections::BTreeMap,
    string::{String, ToString},
    vec::Vec,
};
use log::{debug, trace};

use crate::{Error, ShapeKind};

/// The attribute namespace the `ignore` and `rename` options live under.
pub const NAMESPACE: &str = "into_map";

const IGNORE: &str = "ignore";
const RENAME: &str = "rename";

/// What an [`Annotation`] says.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnnotationKind {
    /// A bare word, like `ignore`.
    Marker(String),
    /// An assignment of a string, like `rename = "full_name"`.
    Assign {
        /// The left-hand identifier.
        key: String,
        /// The unquoted right-hand string.
        value: String,
    },
    /// Anything that isn't one of the above. Kept as written and otherwise ignored.
    Other(String),
}

/// A single option attached to a field, scoped under a namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Annotation {
    /// The namespace the option was written under, e.g. `into_map` for `#[into_map(ignore)]`.
    pub namespace: String,
    /// The option itself.
    pub kind: AnnotationKind,
}

impl Annotation {
    /// Creates an annotation under `namespace`.
    pub fn new(namespace: impl Into<String>, kind: AnnotationKind) -> Self {
        Self {
            namespace: namespace.into(),
            kind,
        }
    }

    /// `#[into_map(ignore)]`
    pub fn ignore() -> Self {
        Self::new(NAMESPACE, AnnotationKind::Marker(IGNORE.to_string()))
    }

    /// `#[into_map(rename = "...")]`
    ///
    /// [`StructSchema::plan`] fails with [`Error::DuplicateKey`] if the new key is already used
    /// by another included field.
    pub fn rename(to: impl Into<String>) -> Self {
        Self::new(NAMESPACE, AnnotationKind::Assign {
            key: RENAME.to_string(),
            value: to.into(),
        })
    }

    /// Parses the contents of an attribute list, e.g. `rename = "full_name", ignore`, into one
    /// annotation per comma-separated item.
    ///
    /// Parsing never fails: items that aren't a bare identifier or an `identifier = "string"`
    /// assignment come back as [`AnnotationKind::Other`]. Empty items are dropped.
    pub fn parse(namespace: &str, content: &str) -> Vec<Self> {
        split_items(content)
            .into_iter()
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| Self::new(namespace, parse_item(item)))
            .collect()
    }

    fn in_namespace(&self) -> bool {
        self.namespace == NAMESPACE
    }

    /// Whether this is the `ignore` marker under the `into_map` namespace.
    pub fn is_ignore(&self) -> bool {
        self.in_namespace() && matches!(&self.kind, AnnotationKind::Marker(name) if name == IGNORE)
    }

    /// The new key if this is a `rename = "..."` under the `into_map` namespace.
    pub fn rename_target(&self) -> Option<&str> {
        if !self.in_namespace() {
            return None;
        }
        match &self.kind {
            AnnotationKind::Assign { key, value } if key == RENAME => Some(value.as_str()),
            _ => None,
        }
    }
}

/// Splits on commas that aren't inside a string literal.
fn split_items(content: &str) -> Vec<&str> {
    let mut items = Vec::new();
    let mut start = 0;
    let mut in_string = false;
    let mut escaped = false;
    for (i, c) in content.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
        } else {
            match c {
                '"' => in_string = true,
                ',' => {
                    items.push(&content[start..i]);
                    start = i + 1;
                }
                _ => {}
            }
        }
    }
    items.push(&content[start..]);
    items
}

fn is_ident(s: &str) -> bool {
    let s = s.strip_prefix("r#").unwrap_or(s);
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_alphanumeric())
}

/// Unquotes a complete `"..."` literal, handling `\"` and `\\`.
fn parse_string(s: &str) -> Option<String> {
    let inner = s.strip_prefix('"')?.strip_suffix('"')?;
    let mut result = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next()? {
                'n' => result.push('\n'),
                't' => result.push('\t'),
                c @ ('\\' | '"' | '\'') => result.push(c),
                _ => return None,
            },
            '"' => return None,
            c => result.push(c),
        }
    }
    Some(result)
}

fn parse_item(item: &str) -> AnnotationKind {
    if is_ident(item) {
        return AnnotationKind::Marker(item.to_string());
    }
    if let Some((key, value)) = item.split_once('=') {
        let key = key.trim();
        if is_ident(key) {
            if let Some(value) = parse_string(value.trim()) {
                return AnnotationKind::Assign {
                    key: key.to_string(),
                    value,
                };
            }
        }
    }
    AnnotationKind::Other(item.to_string())
}

/// A field's name and the annotations attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    /// The field name. This is also its key unless renamed.
    pub name: String,
    /// Every annotation on the field, in the order they were written.
    pub annotations: Vec<Annotation>,
}

impl FieldDescriptor {
    /// Creates a descriptor for a field with no annotations.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotations: Vec::new(),
        }
    }

    /// Adds an annotation.
    pub fn with(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// Adds the annotations parsed from `content` (see [`Annotation::parse`]).
    pub fn annotated(mut self, namespace: &str, content: &str) -> Self {
        self.annotations.extend(Annotation::parse(namespace, content));
        self
    }

    /// Whether any annotation marks this field as ignored.
    pub fn is_ignored(&self) -> bool {
        self.annotations.iter().any(Annotation::is_ignore)
    }

    /// The key this field is stored under: the first rename, or the field's own name.
    pub fn key(&self) -> &str {
        self.annotations
            .iter()
            .find_map(Annotation::rename_target)
            .unwrap_or(self.name.as_str())
    }
}

/// The shape of a described type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Shape {
    /// A struct with named fields, in declaration order.
    Named(Vec<FieldDescriptor>),
    /// A struct with the given number of unnamed fields.
    Tuple(usize),
    /// A struct with no fields.
    Unit,
    /// An enum.
    Enum,
    /// A union.
    Union,
}

impl Shape {
    /// The kind of type this shape describes.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Named(_) => ShapeKind::Named,
            Self::Tuple(_) => ShapeKind::Tuple,
            Self::Unit => ShapeKind::Unit,
            Self::Enum => ShapeKind::Enum,
            Self::Union => ShapeKind::Union,
        }
    }
}

/// A description of a type to be turned into a map.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructSchema {
    /// The type name, used in errors.
    pub name: String,
    /// The type's shape.
    pub shape: Shape,
}

impl StructSchema {
    /// Creates a schema of any shape.
    pub fn new(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            shape,
        }
    }

    /// Creates a schema for a struct with named fields.
    pub fn named(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self::new(name, Shape::Named(fields))
    }

    /// Works out which fields go in the map and under which keys.
    ///
    /// Fails if the schema isn't a struct with named fields, or if two included fields end up
    /// with the same key.
    pub fn plan(&self) -> Result<Plan, Error> {
        let fields = match &self.shape {
            Shape::Named(fields) => fields,
            shape => {
                return Err(Error::UnsupportedShape {
                    name: self.name.clone(),
                    shape: shape.kind(),
                })
            }
        };

        let mut planned: Vec<PlannedField> = Vec::with_capacity(fields.len());
        for field in fields {
            if field.is_ignored() {
                debug!("skipping ignored field `{}` of `{}`", field.name, self.name);
                continue;
            }

            let key = field.key();
            if let Some(first) = planned.iter().find(|p| p.key == key) {
                return Err(Error::DuplicateKey {
                    name: self.name.clone(),
                    key: key.to_string(),
                    first: first.field.clone(),
                    second: field.name.clone(),
                });
            }

            trace!("field `{}` of `{}` maps to key `{}`", field.name, self.name, key);
            planned.push(PlannedField {
                field: field.name.clone(),
                key: key.to_string(),
            });
        }

        Ok(Plan {
            name: self.name.clone(),
            fields: planned,
        })
    }
}

/// A field that made it into a [`Plan`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlannedField {
    /// The field name, used to look up its value.
    pub field: String,
    /// The key the value is stored under.
    pub key: String,
}

/// The included fields of a [`StructSchema`] and their keys, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Plan {
    name: String,
    fields: Vec<PlannedField>,
}

impl Plan {
    /// The name of the planned type.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The included fields, in declaration order.
    pub fn fields(&self) -> &[PlannedField] {
        &self.fields
    }

    /// The output keys, in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.key.as_str())
    }

    /// The number of entries the map will have.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the map will be empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Looks up every included field in `values` and returns `(key, value)` pairs in
    /// declaration order.
    ///
    /// Values for fields that aren't in the plan are never looked up.
    pub fn to_entries<V: FieldValues + ?Sized>(&self, values: &V) -> Result<Vec<(String, String)>, Error> {
        self.fields
            .iter()
            .map(|planned| {
                values
                    .value(&planned.field)
                    .map(|value| (planned.key.clone(), value))
                    .ok_or_else(|| Error::MissingValue {
                        name: self.name.clone(),
                        field: planned.field.clone(),
                    })
            })
            .collect()
    }

    /// Like [`to_entries`][Plan::to_entries], but collected into a map.
    pub fn to_map<V: FieldValues + ?Sized>(&self, values: &V) -> Result<BTreeMap<String, String>, Error> {
        Ok(self.to_entries(values)?.into_iter().collect())
    }
}

/// A source of rendered field values, looked up by field name.
pub trait FieldValues {
    /// Returns the value of `field`, or `None` if there isn't one.
    fn value(&self, field: &str) -> Option<String>;
}

impl<V: ToString> FieldValues for BTreeMap<String, V> {
    fn value(&self, field: &str) -> Option<String> {
        self.get(field).map(ToString::to_string)
    }
}

#[cfg(feature = "std")]
impl<V: ToString, S: std::hash::BuildHasher> FieldValues for std::collections::HashMap<String, V, S> {
    fn value(&self, field: &str) -> Option<String> {
        self.get(field).map(ToString::to_string)
    }
}

impl<K: AsRef<str>, V: ToString> FieldValues for [(K, V)] {
    fn value(&self, field: &str) -> Option<String> {
        self.iter()
            .find(|(name, _)| name.as_ref() == field)
            .map(|(_, value)| value.to_string())
    }
}

impl<K: AsRef<str>, V: ToString, const N: usize> FieldValues for [(K, V); N] {
    fn value(&self, field: &str) -> Option<String> {
        self[..].value(field)
    }
}

impl<K: AsRef<str>, V: ToString> FieldValues for Vec<(K, V)> {
    fn value(&self, field: &str) -> Option<String> {
        self[..].value(field)
    }
}

/// Field values computed by a closure. See [`from_fn`].
#[derive(Debug, Clone, Copy)]
pub struct FromFn<F>(F);

/// Looks field values up by calling `f` with the field name.
pub fn from_fn<F: Fn(&str) -> Option<String>>(f: F) -> FromFn<F> {
    FromFn(f)
}

impl<F: Fn(&str) -> Option<String>> FieldValues for FromFn<F> {
    fn value(&self, field: &str) -> Option<String> {
        (self.0)(field)
    }
}
