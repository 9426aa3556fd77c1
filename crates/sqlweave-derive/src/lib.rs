//! Derive macros for sqlweave table and value-holder definitions.
//!
//! `#[derive(Table)]` names a table and its columns, `#[derive(ValueHolder)]`
//! turns a struct instance into `(column, value)` pairs for bulk SET, INSERT
//! rows and WHERE equality.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::punctuated::Punctuated;
use syn::token::Comma;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Expr, Field, Fields, Ident, Lit, Meta};

/// Derives `sqlweave_core::Table` for a struct.
///
/// # Attributes
///
/// - `#[table(name = "table_name")]` - Specifies the SQL table name (optional,
///   defaults to snake_case of struct name)
///
/// # Field Attributes
///
/// - `#[column(primary_key)]` - Marks the field as primary key
/// - `#[column(name = "column_name")]` - Specifies the SQL column name
///   (optional, defaults to field name)
/// - `#[column(skip)]` - Leaves the field out of the table
///
/// # Generated Items
///
/// For a struct `User`, this macro generates the `Table` impl and a
/// `UserColumns` module holding one `&str` constant per column (`ID`,
/// `NAME`, ...).
#[proc_macro_derive(Table, attributes(table, column))]
pub fn derive_table(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive_table_impl(&input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Derives `sqlweave_core::ValueHolder` for a struct.
///
/// Every field not marked `#[column(skip)]` becomes one `(column, value)` pair,
/// in declaration order. Field types must implement `Clone` and
/// `sqlweave_core::ToSqlValue`.
#[proc_macro_derive(ValueHolder, attributes(column))]
pub fn derive_value_holder(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive_value_holder_impl(&input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

struct ColumnInfo {
    field_name: Ident,
    column_name: String,
    is_primary_key: bool,
}

fn named_fields(input: &DeriveInput) -> syn::Result<&Punctuated<Field, Comma>> {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Ok(&fields.named),
            _ => Err(syn::Error::new_spanned(
                input,
                "derive only supports structs with named fields",
            )),
        },
        _ => Err(syn::Error::new_spanned(input, "derive only supports structs")),
    }
}

fn columns(input: &DeriveInput) -> syn::Result<Vec<ColumnInfo>> {
    let mut infos = Vec::new();
    for field in named_fields(input)? {
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let attrs = parse_column_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        infos.push(ColumnInfo {
            field_name: field_name.clone(),
            column_name: attrs.name.unwrap_or_else(|| field_name.to_string()),
            is_primary_key: attrs.primary_key,
        });
    }
    Ok(infos)
}

fn derive_table_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let table_name = get_table_name(&input.attrs, struct_name)?;
    let infos = columns(input)?;

    let all_column_names: Vec<&str> = infos.iter().map(|c| c.column_name.as_str()).collect();

    let primary_key = match infos.iter().find(|c| c.is_primary_key) {
        Some(pk) => {
            let pk = &pk.column_name;
            quote! { Some(#pk) }
        }
        None => quote! { None },
    };

    let columns_mod_name = format_ident!("{}Columns", struct_name);
    let column_consts: Vec<TokenStream2> = infos
        .iter()
        .map(|info| {
            let const_name = format_ident!("{}", info.field_name.to_string().to_uppercase());
            let column_name = &info.column_name;
            quote! {
                pub const #const_name: &str = #column_name;
            }
        })
        .collect();

    Ok(quote! {
        /// Column names of the table.
        #[allow(non_snake_case, dead_code)]
        pub mod #columns_mod_name {
            #(#column_consts)*
        }

        impl ::sqlweave_core::schema::Table for #struct_name {
            const NAME: &'static str = #table_name;
            const COLUMNS: &'static [&'static str] = &[#(#all_column_names),*];
            const PRIMARY_KEY: Option<&'static str> = #primary_key;
        }
    })
}

fn derive_value_holder_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let pairs: Vec<TokenStream2> = columns(input)?
        .iter()
        .map(|info| {
            let field_name = &info.field_name;
            let column_name = &info.column_name;
            quote! {
                (
                    ::std::string::String::from(#column_name),
                    ::sqlweave_core::ToSqlValue::to_sql_value(
                        ::core::clone::Clone::clone(&self.#field_name),
                    ),
                )
            }
        })
        .collect();

    Ok(quote! {
        impl #impl_generics ::sqlweave_core::schema::ValueHolder for #struct_name #ty_generics #where_clause {
            fn values(&self) -> ::std::vec::Vec<(::std::string::String, ::sqlweave_core::SqlValue)> {
                ::std::vec![#(#pairs),*]
            }
        }
    })
}

#[derive(Default)]
struct ColumnAttrs {
    name: Option<String>,
    primary_key: bool,
    skip: bool,
}

fn string_value(meta: &syn::meta::ParseNestedMeta<'_>) -> syn::Result<Option<String>> {
    let value: Expr = meta.value()?.parse()?;
    if let Expr::Lit(lit) = value {
        if let Lit::Str(s) = lit.lit {
            return Ok(Some(s.value()));
        }
    }
    Ok(None)
}

fn get_table_name(attrs: &[Attribute], struct_name: &Ident) -> syn::Result<String> {
    for attr in attrs {
        if attr.path().is_ident("table") {
            let mut table_name = None;
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    table_name = string_value(&meta)?;
                }
                Ok(())
            })?;
            if let Some(name) = table_name {
                return Ok(name);
            }
        }
    }
    // Default to snake_case of struct name
    Ok(to_snake_case(&struct_name.to_string()))
}

fn parse_column_attrs(attrs: &[Attribute]) -> syn::Result<ColumnAttrs> {
    let mut result = ColumnAttrs::default();

    for attr in attrs {
        if attr.path().is_ident("column") {
            // Handle empty attribute like #[column]
            if matches!(attr.meta, Meta::Path(_)) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("primary_key") {
                    result.primary_key = true;
                } else if meta.path.is_ident("skip") {
                    result.skip = true;
                } else if meta.path.is_ident("name") {
                    result.name = string_value(&meta)?;
                } else {
                    return Err(meta.error("unknown column attribute"));
                }
                Ok(())
            })?;
        }
    }

    Ok(result)
}

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("InvoiceLine"), "invoice_line");
        assert_eq!(to_snake_case("User"), "user");
    }

    #[test]
    fn test_column_attrs() {
        let input: DeriveInput = syn::parse_quote! {
            struct Row {
                #[column(primary_key, name = "row_id")]
                id: i64,
                #[column(skip)]
                cache: String,
                label: String,
            }
        };
        let infos = columns(&input).unwrap();
        assert_eq!(infos.len(), 2);
        assert_eq!(infos[0].column_name, "row_id");
        assert!(infos[0].is_primary_key);
        assert_eq!(infos[1].column_name, "label");
    }

    #[test]
    fn test_rejects_tuple_struct() {
        let input: DeriveInput = syn::parse_quote! { struct Pair(i32, i32); };
        assert!(columns(&input).is_err());
    }
}
