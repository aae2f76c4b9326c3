use crate::util::*;
use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::{parse_quote, DeriveInput, Error};

pub fn generate(input: &DeriveInput) -> Result<TokenStream, Error> {
    let name = &input.ident;
    let fields = collect_fields(input)?;

    let mut generics = input.generics.clone();
    let where_clause = generics.make_where_clause();
    for plan in fields.iter() {
        let ty = &plan.field.ty;
        if mentions_type_param(ty, &input.generics) {
            where_clause.predicates.push(parse_quote! {
                #ty: ::into_map::__private::ToString
            });
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let capacity = fields.len();

    let inserts = fields.iter().map(|plan| {
        let ident = plan.ident;
        let key = &plan.key;
        quote_spanned! { ident.span() =>
            map.insert(
                ::into_map::__private::String::from(#key),
                ::into_map::__private::ToString::to_string(&self.#ident),
            );
        }
    });

    let pushes = fields.iter().map(|plan| {
        let ident = plan.ident;
        let key = &plan.key;
        quote_spanned! { ident.span() =>
            entries.push((
                ::into_map::__private::String::from(#key),
                ::into_map::__private::ToString::to_string(&self.#ident),
            ));
        }
    });

    Ok(quote! {
        impl #impl_generics ::into_map::IntoMap for #name #ty_generics #where_clause {
            fn into_map(&self) -> ::into_map::__private::BTreeMap<
                ::into_map::__private::String,
                ::into_map::__private::String,
            > {
                #[allow(unused_mut)]
                let mut map = ::into_map::__private::BTreeMap::new();
                #(#inserts)*
                map
            }

            fn into_entries(&self) -> ::into_map::__private::Vec<(
                ::into_map::__private::String,
                ::into_map::__private::String,
            )> {
                #[allow(unused_mut)]
                let mut entries = ::into_map::__private::Vec::with_capacity(#capacity);
                #(#pushes)*
                entries
            }
        }
    })
}
