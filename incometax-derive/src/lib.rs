use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Lit, Meta, Type};

/// Derive macro that describes the persisted fields of a rate table record.
///
/// For each field, extracts:
/// - Field name (respects #[serde(rename = "...")])
/// - Required (true if not Option<T>, or if marked #[field_schema(required)])
/// - Description (from doc comments)
///
/// Generates a `field_schema() -> &'static [SchemaField]` method.
#[proc_macro_derive(FieldSchema, attributes(serde, field_schema))]
pub fn derive_field_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return syn::Error::new_spanned(name, "FieldSchema only supports named fields")
                    .to_compile_error()
                    .into()
            }
        },
        _ => {
            return syn::Error::new_spanned(name, "FieldSchema only supports structs")
                .to_compile_error()
                .into()
        }
    };

    let field_entries = fields.iter().filter_map(|field| {
        let ident = field.ident.as_ref()?;
        let json_name = get_serde_rename(&field.attrs).unwrap_or_else(|| ident.to_string());
        let required = has_required_marker(&field.attrs) || !is_option_type(&field.ty);
        let description = get_doc_comment(&field.attrs);

        Some(quote! {
            SchemaField {
                name: #json_name,
                required: #required,
                description: #description,
            }
        })
    });

    let expanded = quote! {
        impl #name {
            pub fn field_schema() -> &'static [SchemaField] {
                static SCHEMA: &[SchemaField] = &[
                    #(#field_entries),*
                ];
                SCHEMA
            }
        }
    };

    TokenStream::from(expanded)
}

fn get_serde_rename(attrs: &[syn::Attribute]) -> Option<String> {
    for attr in attrs {
        if !attr.path().is_ident("serde") {
            continue;
        }

        if let Meta::List(meta_list) = &attr.meta {
            let tokens = meta_list.tokens.to_string();
            // `rename_all` lives on the container, so only an exact `rename` counts here
            for (start, _) in tokens.match_indices("rename") {
                let rest = &tokens[start + "rename".len()..];
                let Some(after_eq) = rest.trim_start().strip_prefix('=') else {
                    continue;
                };
                if let Some(stripped) = after_eq.trim().strip_prefix('"') {
                    if let Some(end_quote) = stripped.find('"') {
                        return Some(stripped[..end_quote].to_string());
                    }
                }
            }
        }
    }
    None
}

fn has_required_marker(attrs: &[syn::Attribute]) -> bool {
    attrs.iter().any(|attr| {
        if !attr.path().is_ident("field_schema") {
            return false;
        }
        let mut required = false;
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("required") {
                required = true;
            }
            Ok(())
        });
        required
    })
}

fn get_doc_comment(attrs: &[syn::Attribute]) -> String {
    attrs
        .iter()
        .filter_map(|attr| {
            if !attr.path().is_ident("doc") {
                return None;
            }
            if let Meta::NameValue(meta) = &attr.meta {
                if let syn::Expr::Lit(expr_lit) = &meta.value {
                    if let Lit::Str(lit_str) = &expr_lit.lit {
                        return Some(lit_str.value().trim().to_string());
                    }
                }
            }
            None
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_option_type(ty: &Type) -> bool {
    if let Type::Path(type_path) = ty {
        if let Some(segment) = type_path.path.segments.last() {
            return segment.ident == "Option";
        }
    }
    false
}
