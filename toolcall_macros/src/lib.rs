//! Procedural macros for **toolcall**
#![forbid(unsafe_code)]

use proc_macro::TokenStream;
use proc_macro_crate::{FoundCrate, crate_name};
use proc_macro_error::{abort, proc_macro_error};
use quote::quote;
use syn::{
    Attribute, Data, DeriveInput, Expr, ExprLit, Fields, FieldsNamed, Lit, Meta, Type, TypePath,
    parse_macro_input,
};

/// Derives `toolcall_core::ToolSchema` for a struct with named fields.
///
/// Every non-`Option` field is listed as required. A field's `///` doc
/// comment becomes its `description`.
#[proc_macro_error]
#[proc_macro_derive(ToolSchema)]
pub fn derive_tool_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match &input.data {
        Data::Struct(data_struct) => match &data_struct.fields {
            Fields::Named(fields) => generate_struct_schema(&input, fields),
            Fields::Unit => generate_struct_schema(&input, &syn::parse_quote!({})),
            Fields::Unnamed(fields) => {
                abort!(fields, "Tool arguments must use named fields")
            }
        },
        Data::Enum(_) => {
            abort!(input.ident, "Enum schemas are not supported");
        }
        Data::Union(_) => {
            abort!(input.ident, "Union schemas are not supported");
        }
    }
}

fn generate_struct_schema(input: &DeriveInput, fields: &FieldsNamed) -> TokenStream {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let crate_path = get_crate_path();

    let mut required_fields = Vec::new();
    let mut inserts = Vec::new();

    for field in &fields.named {
        let Some(field_ident) = field.ident.as_ref() else {
            abort!(field, "Tool arguments must use named fields");
        };
        let field_name = field_ident.to_string();
        let field_type = &field.ty;

        if !is_option_type(field_type) {
            required_fields.push(field_name.clone());
        }

        let describe = docs(&field.attrs).map(|doc| {
            quote! {
                if let Some(obj) = field_schema.as_object_mut() {
                    obj.insert(
                        "description".to_string(),
                        ::serde_json::Value::String(#doc.to_string()),
                    );
                }
            }
        });

        inserts.push(quote! {
            {
                #[allow(unused_mut)]
                let mut field_schema = <#field_type as #crate_path::ToolSchema>::schema();
                #describe
                properties.insert(#field_name.to_string(), field_schema);
            }
        });
    }

    TokenStream::from(quote! {
        impl #impl_generics #crate_path::ToolSchema for #name #ty_generics #where_clause {
            fn schema() -> ::serde_json::Value {
                static SCHEMA: #crate_path::once_cell::sync::Lazy<::serde_json::Value> = #crate_path::once_cell::sync::Lazy::new(|| {
                    #[allow(unused_mut)]
                    let mut properties = ::serde_json::Map::new();
                    #(#inserts)*

                    ::serde_json::json!({
                        "type": "object",
                        "properties": properties,
                        "required": [#(#required_fields),*]
                    })
                });
                SCHEMA.clone()
            }
        }
    })
}

fn get_crate_path() -> proc_macro2::TokenStream {
    match crate_name("toolcall_core") {
        Ok(FoundCrate::Itself) => quote!(crate),
        Ok(FoundCrate::Name(name)) => {
            let ident = proc_macro2::Ident::new(&name, proc_macro2::Span::call_site());
            quote!(#ident)
        }
        Err(_) => quote!(::toolcall_core),
    }
}

/// Gather `///` doc-comments into a single line, `None` when there are none.
fn docs(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter_map(|a| match &a.meta {
            Meta::NameValue(nv) if a.path().is_ident("doc") => {
                if let Expr::Lit(ExprLit {
                    lit: Lit::Str(s), ..
                }) = &nv.value
                {
                    Some(s.value().trim().to_owned())
                } else {
                    None
                }
            }
            _ => None,
        })
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join(" "))
    }
}

fn is_option_type(ty: &Type) -> bool {
    let Type::Path(TypePath { qself: None, path }) = ty else {
        return false;
    };

    let Some(last) = path.segments.last() else {
        return false;
    };
    if last.ident != "Option" {
        return false;
    }

    match path
        .segments
        .iter()
        .map(|s| &s.ident)
        .collect::<Vec<_>>()
        .as_slice()
    {
        [ident] if *ident == "Option" => true,

        // `std::option::Option` or `core::option::Option`
        [first, second, ident]
            if (*first == "std" || *first == "core")
                && *second == "option"
                && *ident == "Option" =>
        {
            true
        }

        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::{Type, parse_quote};

    #[test]
    fn test_is_option_type_detection() {
        let simple_option: Type = parse_quote!(Option<String>);
        assert!(is_option_type(&simple_option));

        let std_option: Type = parse_quote!(std::option::Option<String>);
        assert!(is_option_type(&std_option));

        let core_option: Type = parse_quote!(core::option::Option<f64>);
        assert!(is_option_type(&core_option));

        let string_type: Type = parse_quote!(String);
        assert!(!is_option_type(&string_type));

        let fake_option: Type = parse_quote!(my_mod::Option<i32>);
        assert!(!is_option_type(&fake_option));
    }

    #[test]
    fn test_docs_are_joined_into_one_line() {
        let field: syn::Field = parse_quote! {
            /// The id of a
            /// crypto currency
            crypto: String
        };
        assert_eq!(
            docs(&field.attrs).as_deref(),
            Some("The id of a crypto currency")
        );
    }

    #[test]
    fn test_undocumented_field_has_no_description() {
        let field: syn::Field = parse_quote! {
            #[serde(default)]
            currency: String
        };
        assert_eq!(docs(&field.attrs), None);
    }
}
