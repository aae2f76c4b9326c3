use std::collections::HashMap;
use proc_macro2::{Delimiter, TokenStream, TokenTree};
use quote::ToTokens;
use syn::{ext::IdentExt, Attribute, Data, DeriveInput, Error, Field, Fields, Generics, Ident, Lit, LitStr, Meta, NestedMeta, Type};

/// The attribute namespace all field options live under: `#[into_map(...)]`.
pub const NAMESPACE: &str = "into_map";

/// A field that ends up in the generated map, along with the key it is stored under.
pub struct FieldPlan<'a> {
    pub field: &'a Field,
    pub ident: &'a Ident,
    pub key: String,
}

/// Returns the items of every `#[into_map(...)]` list on a field, in declaration order.
///
/// Each comma-separated item is parsed on its own, so an item that isn't a meta item only
/// drops itself. Attributes that aren't a parenthesized list are skipped entirely.
fn namespace_items(attrs: &[Attribute]) -> Vec<NestedMeta> {
    attrs.iter()
        .filter(|a| a.path.is_ident(NAMESPACE))
        .filter_map(|a| list_contents(&a.tokens))
        .flat_map(split_items)
        .filter_map(|item| syn::parse2::<NestedMeta>(item).ok())
        .collect()
}

fn list_contents(tokens: &TokenStream) -> Option<TokenStream> {
    let mut trees = tokens.clone().into_iter();
    match (trees.next(), trees.next()) {
        (Some(TokenTree::Group(group)), None) if group.delimiter() == Delimiter::Parenthesis => {
            Some(group.stream())
        }
        _ => None,
    }
}

/// Splits on commas that aren't nested inside a group.
fn split_items(tokens: TokenStream) -> Vec<TokenStream> {
    let mut items = Vec::new();
    let mut current = Vec::new();
    for tree in tokens {
        match tree {
            TokenTree::Punct(ref punct) if punct.as_char() == ',' => {
                items.push(current.drain(..).collect());
            }
            tree => current.push(tree),
        }
    }
    if !current.is_empty() {
        items.push(current.into_iter().collect());
    }
    items
}

pub fn is_ignored(attrs: &[Attribute]) -> bool {
    namespace_items(attrs).iter().any(|item| {
        matches!(item, NestedMeta::Meta(Meta::Path(path)) if path.is_ident("ignore"))
    })
}

/// The first `rename = "..."` found on a field. Non-string values don't count.
pub fn rename(attrs: &[Attribute]) -> Option<LitStr> {
    namespace_items(attrs).into_iter().find_map(|item| match item {
        NestedMeta::Meta(Meta::NameValue(name_value)) if name_value.path.is_ident("rename") => {
            match name_value.lit {
                Lit::Str(lit) => Some(lit),
                _ => None,
            }
        }
        _ => None,
    })
}

fn shape_name(data: &Data) -> &'static str {
    match data {
        Data::Struct(data) => match data.fields {
            Fields::Named(_) => "a struct",
            Fields::Unnamed(_) => "a tuple struct",
            Fields::Unit => "a unit struct",
        },
        Data::Enum(_) => "an enum",
        Data::Union(_) => "a union",
    }
}

pub fn collect_fields(input: &DeriveInput) -> Result<Vec<FieldPlan<'_>>, Error> {
    let fields = match input.data {
        Data::Struct(ref data) => match data.fields {
            Fields::Named(ref fields) => &fields.named,
            _ => return Err(unsupported(input)),
        },
        _ => return Err(unsupported(input)),
    };

    let mut seen = HashMap::new();
    let mut plans = Vec::new();
    for field in fields.iter() {
        if is_ignored(&field.attrs) {
            continue;
        }

        let ident = field.ident.as_ref()
            .ok_or_else(|| Error::new_spanned(field, "expected a named field"))?;
        let (key, key_span) = match rename(&field.attrs) {
            Some(lit) => (lit.value(), lit.span()),
            None => (ident.unraw().to_string(), ident.span()),
        };

        if let Some(previous) = seen.insert(key.clone(), ident) {
            return Err(Error::new(
                key_span,
                format!("map key `{}` is already used by field `{}`", key, previous),
            ));
        }

        plans.push(FieldPlan { field, ident, key });
    }

    Ok(plans)
}

fn unsupported(input: &DeriveInput) -> Error {
    Error::new_spanned(
        &input.ident,
        format!(
            "IntoMap can only be derived for structs with named fields, but `{}` is {}",
            input.ident,
            shape_name(&input.data),
        ),
    )
}

/// Whether `ty` refers to any of the type parameters declared in `generics`.
pub fn mentions_type_param(ty: &Type, generics: &Generics) -> bool {
    let params = generics.type_params().map(|p| &p.ident).collect::<Vec<_>>();
    if params.is_empty() {
        return false;
    }
    contains_ident(ty.to_token_stream(), &params)
}

fn contains_ident(tokens: TokenStream, idents: &[&Ident]) -> bool {
    tokens.into_iter().any(|tree| match tree {
        TokenTree::Ident(ident) => idents.iter().any(|i| **i == ident),
        TokenTree::Group(group) => contains_ident(group.stream(), idents),
        _ => false,
    })
}
