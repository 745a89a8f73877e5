//! Implementation of the `#[derive(Record)]` macro.
//!
//! Generates one accessor function per exposed field, the `Record` impl
//! that assembles them into a schema, and field name constants.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{
    spanned::Spanned, Data, DeriveInput, Error, Fields, GenericArgument, PathArguments, Result,
    Type,
};

use super::attrs::{parse_record_attrs, FieldKind};

/// Main implementation of the Record derive macro.
pub fn record_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let record_name = struct_name.to_string();

    if !input.generics.params.is_empty() {
        return Err(Error::new(
            input.generics.span(),
            "Record cannot be derived for generic structs",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Record can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Record can only be derived for structs",
            ))
        }
    };

    let mut id_field = None;
    let mut accessors: Vec<TokenStream> = Vec::new();
    let mut descriptors: Vec<TokenStream> = Vec::new();
    let mut field_constants: Vec<TokenStream> = Vec::new();

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let attrs = parse_record_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }

        if attrs.id {
            if id_field.is_some() {
                return Err(Error::new(field.span(), "duplicate #[record(id)] field"));
            }
            id_field = Some(field_name);
        }

        let Some(kind) = attrs.kind else {
            if attrs.has_roles() {
                return Err(Error::new(
                    field.span(),
                    "search, filter, sort and range need a field kind: text, number or date",
                ));
            }
            continue;
        };

        if attrs.range && kind != FieldKind::Number {
            return Err(Error::new(attrs.span, "range requires a number field"));
        }
        if attrs.filter && kind != FieldKind::Text {
            return Err(Error::new(attrs.span, "filter requires a text field"));
        }

        let query_name = attrs.rename.unwrap_or_else(|| field_name.to_string());
        let const_name = format_ident!("{}", to_screaming_snake_case(&query_name));
        let accessor = format_ident!("__record_{}", field_name);

        field_constants.push(quote! {
            /// Field name for filter and sort configuration.
            pub const #const_name: &'static str = #query_name;
        });

        let optional = option_inner(&field.ty).is_some();
        let read = value_expr(kind, optional, quote! { record.#field_name });
        accessors.push(quote! {
            fn #accessor(record: &#struct_name) -> ::backoffice_query::Value<'_> {
                #read
            }
        });

        let kind_path = match kind {
            FieldKind::Text => quote! { ::backoffice_query::FieldKind::Text },
            FieldKind::Number => quote! { ::backoffice_query::FieldKind::Number },
            FieldKind::Date => quote! { ::backoffice_query::FieldKind::Date },
        };
        let mut descriptor = quote! {
            ::backoffice_query::FieldDef::new(#query_name, #kind_path, #accessor)
        };
        if attrs.search {
            descriptor = quote! { #descriptor.searchable() };
        }
        if attrs.filter {
            descriptor = quote! { #descriptor.filterable() };
        }
        if attrs.sort {
            descriptor = quote! { #descriptor.sortable() };
        }
        if attrs.range {
            descriptor = quote! { #descriptor.range() };
        }
        descriptors.push(descriptor);
    }

    let id_field = id_field.ok_or_else(|| {
        Error::new(
            input.span(),
            "Record needs exactly one field marked #[record(id)]",
        )
    })?;

    let expanded = quote! {
        impl #struct_name {
            #(#field_constants)*
        }

        impl ::backoffice_query::Record for #struct_name {
            fn schema() -> ::backoffice_query::Schema<Self> {
                #(#accessors)*

                ::backoffice_query::Schema::new(
                    #record_name,
                    ::std::vec![#(#descriptors),*],
                )
            }

            fn id(&self) -> &str {
                ::core::convert::AsRef::<str>::as_ref(&self.#id_field)
            }
        }
    };

    Ok(expanded)
}

/// Builds the expression reading one field of `record` as a `Value`.
fn value_expr(kind: FieldKind, optional: bool, place: TokenStream) -> TokenStream {
    let present = |v: TokenStream| match kind {
        FieldKind::Text => quote! {
            ::backoffice_query::Value::String(::core::convert::AsRef::<str>::as_ref(#v))
        },
        FieldKind::Number => quote! {
            ::backoffice_query::Value::Number(::backoffice_query::Number::from(*#v))
        },
        FieldKind::Date => quote! {
            ::backoffice_query::Value::Timestamp(::backoffice_query::ToTimestamp::to_timestamp(#v))
        },
    };

    if optional {
        let some = present(quote! { value });
        quote! {
            match &#place {
                ::core::option::Option::Some(value) => #some,
                ::core::option::Option::None => ::backoffice_query::Value::None,
            }
        }
    } else {
        present(quote! { &#place })
    }
}

/// Returns the `T` of an `Option<T>` field type.
fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let segment = path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}

/// Convert a string to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' || c == '-' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = true;
        }
    }

    result
}
