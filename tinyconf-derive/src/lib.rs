//! Derive macro implementation for tinyconf

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Type};

mod attrs;

use attrs::{ContainerAttrs, FieldAttrs, Kind};

/// Returns the inner type if `ty` is `Option<T>`
fn option_inner_type(ty: &Type) -> Option<&Type> {
    generic_inner_type(ty, "Option")
}

fn generic_inner_type<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    if let Type::Path(type_path) = ty {
        if let Some(seg) = type_path.path.segments.last() {
            if seg.ident != wrapper {
                return None;
            }
            if let syn::PathArguments::AngleBracketed(args) = &seg.arguments {
                if let Some(syn::GenericArgument::Type(inner)) = args.args.first() {
                    return Some(inner);
                }
            }
        }
    }
    None
}

fn last_ident(ty: &Type) -> Option<String> {
    if let Type::Path(type_path) = ty {
        return type_path.path.segments.last().map(|seg| seg.ident.to_string());
    }
    None
}

/// Field kind implied by a Rust type
fn infer_kind(ty: &Type) -> Option<Kind> {
    let kind = match last_ident(ty)?.as_str() {
        "String" => Kind::Plain,
        "i8" | "i16" | "i32" | "i64" | "isize" | "u8" | "u16" | "u32" | "u64" | "usize" => {
            Kind::Integer
        }
        "f32" | "f64" => Kind::Float,
        "bool" => Kind::Boolean,
        "Vec" => Kind::List,
        _ => return None,
    };
    Some(kind)
}

/// Parse a function path given as a string attribute
fn parse_path(path: &str, what: &str, field: &syn::Field) -> syn::Result<TokenStream2> {
    path.parse::<TokenStream2>()
        .map_err(|_| syn::Error::new_spanned(field, format!("invalid {what} path \"{path}\"")))
}

/// `Config` derive macro
///
/// Implements `tinyconf::Config` for a struct with named fields: every field
/// becomes a `tinyconf::Field` of the schema, and the resolved values are
/// converted back into the field types.
///
/// # Supported Attributes
///
/// **Struct-level**:
/// - `#[conf(section = "NAME")]`: Section for every field without its own
///
/// **Field-level**:
/// - `#[conf(name = "key")]`: Source key (defaults to the field name)
/// - `#[conf(strict)]`: Missing key is an error
/// - `#[conf(default)]`: Use `Default::default()` if the key is missing
/// - `#[conf(default = value)]`: Use an explicit default if the key is missing
/// - `#[conf(section = "NAME")]`: INI section the field is read from
/// - `#[conf(max_length = 64)]`: Raw value length limit
/// - `#[conf(kind = "integer")]`: Override the kind inferred from the type
/// - `#[conf(delimiter = ";")]`, `#[conf(remove_blank)]`,
///   `#[conf(filter = "func")]`, `#[conf(map = "func")]`: List options
/// - `#[conf(comparators = ["on", "yes"])]`: Boolean truthy tokens
/// - `#[conf(deserializer = "func")]`: Read as a string, convert with `func`
///
/// Fields that are neither `Option<T>` nor carry a default are strict.
/// A default that does not fit the field's value (e.g. `u64::MAX`, which
/// exceeds `i64`) makes `schema()` fail with `SchemaError::InvalidDefault`.
#[proc_macro_derive(Config, attributes(conf))]
pub fn derive_config(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let container = ContainerAttrs::from_attrs(&input.attrs)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Config only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(input, "Config only supports structs"));
        }
    };

    let mut declarations = Vec::new();
    let mut initializers = Vec::new();
    // section name -> member attribute names, in order of first use
    let mut sections: Vec<(String, Vec<String>)> = Vec::new();

    for field in fields {
        let Some(field_ident) = field.ident.as_ref() else {
            continue;
        };
        let attr_name = field_ident.to_string().trim_start_matches("r#").to_string();
        let field_type = &field.ty;
        let attrs = FieldAttrs::from_field(field)?;

        let option_inner = option_inner_type(field_type);
        let is_option = option_inner.is_some();
        let value_type = option_inner.unwrap_or(field_type);

        if is_option && attrs.default.is_some() {
            return Err(syn::Error::new_spanned(
                field_ident,
                "Option<T> fields cannot have default attribute (they default to None automatically)",
            ));
        }

        let kind = match (&attrs.deserializer, attrs.kind) {
            (Some(_), Some(kind)) if kind != Kind::Plain => {
                return Err(syn::Error::new_spanned(
                    field_ident,
                    "deserializer fields are read as plain strings and cannot set kind",
                ));
            }
            (Some(_), _) => Kind::Plain,
            (None, Some(kind)) => kind,
            (None, None) => infer_kind(value_type).unwrap_or(Kind::Plain),
        };

        if attrs.deserializer.is_some() && attrs.default.is_some() {
            return Err(syn::Error::new_spanned(
                field_ident,
                "default value is not supported with deserializer attribute",
            ));
        }
        if kind != Kind::List && attrs.has_list_options() {
            return Err(syn::Error::new_spanned(
                field_ident,
                "delimiter, remove_blank, filter and map are only supported on list fields",
            ));
        }
        if kind != Kind::Boolean && attrs.comparators.is_some() {
            return Err(syn::Error::new_spanned(
                field_ident,
                "comparators are only supported on boolean fields",
            ));
        }

        let constructor = match kind {
            Kind::Plain => quote! { ::tinyconf::Field::plain() },
            Kind::Integer => quote! { ::tinyconf::Field::integer() },
            Kind::Float => quote! { ::tinyconf::Field::float() },
            Kind::Boolean => match &attrs.comparators {
                Some(comparators) => quote! {
                    ::tinyconf::Field::new(::tinyconf::FieldKind::Boolean(
                        ::tinyconf::BooleanOptions::new([#(#comparators),*])
                    ))
                },
                None => quote! { ::tinyconf::Field::boolean() },
            },
            Kind::List => {
                let mut options = quote! { ::tinyconf::ListOptions::new() };
                if let Some(delimiter) = &attrs.delimiter {
                    options.extend(quote! { .delimiter(#delimiter) });
                }
                if attrs.remove_blank {
                    options.extend(quote! { .remove_blank(true) });
                }
                if let Some(filter) = &attrs.filter {
                    let filter = parse_path(filter, "filter", field)?;
                    options.extend(quote! { .filter(#filter) });
                }
                match &attrs.map {
                    Some(map) => {
                        let map = parse_path(map, "map", field)?;
                        options.extend(quote! { .map(#map) });
                    }
                    None => {
                        // Items of non-string element types are parsed with FromStr
                        if let Some(elem) = generic_inner_type(value_type, "Vec") {
                            if last_ident(elem).as_deref() != Some("String") {
                                options.extend(quote! { .map(str::parse::<#elem>) });
                            }
                        }
                    }
                }
                quote! {
                    ::tinyconf::Field::new(::tinyconf::FieldKind::List(#options))
                }
            }
        };

        let mut declaration = constructor;
        if let Some(name) = &attrs.name {
            declaration.extend(quote! { .name(#name) });
        }
        let strict = attrs.strict || (!is_option && attrs.default.is_none());
        declaration.extend(quote! { .strict(#strict) });
        // Defaults go through TryFrom so wide integers are rejected instead of wrapped
        let default_value = match &attrs.default {
            Some(Some(default_value)) => Some(default_value.clone()),
            Some(None) if kind == Kind::List => Some(quote! {
                ::tinyconf::Value::List(::std::vec::Vec::new())
            }),
            Some(None) => Some(quote! {
                <#value_type as ::core::default::Default>::default()
            }),
            None => None,
        };
        if let Some(default_value) = default_value {
            declaration.extend(quote! {
                .default(
                    <::tinyconf::Value as ::core::convert::TryFrom<_>>::try_from(#default_value)
                        .map_err(|e| ::tinyconf::SchemaError::invalid_default(#attr_name, e))?
                )
            });
        }
        if let Some(max_length) = &attrs.max_length {
            declaration.extend(quote! { .max_length(#max_length) });
        }
        declarations.push(quote! { .field(#attr_name, #declaration) });

        if let Some(section) = attrs.section.as_ref().or(container.section.as_ref()) {
            match sections.iter_mut().find(|(name, _)| name == section) {
                Some((_, members)) => members.push(attr_name.clone()),
                None => sections.push((section.clone(), vec![attr_name.clone()])),
            }
        }

        let initializer = match &attrs.deserializer {
            None => quote! {
                #field_ident: resolved.take::<#field_type>(#attr_name)?
            },
            Some(func_path) => {
                let func = parse_path(func_path, "deserializer", field)?;
                if is_option {
                    quote! {
                        #field_ident: match resolved.take::<::core::option::Option<::std::string::String>>(#attr_name)? {
                            Some(__raw) => Some(#func(&__raw).map_err(|e| ::tinyconf::Error::deserialize_error::<#value_type>(#attr_name, e))?),
                            None => None,
                        }
                    }
                } else {
                    quote! {
                        #field_ident: {
                            let __raw = resolved.take::<::std::string::String>(#attr_name)?;
                            #func(&__raw).map_err(|e| ::tinyconf::Error::deserialize_error::<#field_type>(#attr_name, e))?
                        }
                    }
                }
            }
        };
        initializers.push(initializer);
    }

    let section_declarations = sections.iter().map(|(name, members)| {
        quote! { .section(#name, ::tinyconf::Section::new([#(#members),*])) }
    });

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::tinyconf::Config for #struct_name #ty_generics #where_clause {
            fn schema() -> ::core::result::Result<::tinyconf::Schema, ::tinyconf::Error> {
                let schema = ::tinyconf::Schema::builder()
                    #(#declarations)*
                    #(#section_declarations)*
                    .build()?;
                Ok(schema)
            }

            #[allow(unused_mut, unused_variables)]
            fn from_resolved(
                mut resolved: ::tinyconf::Resolved,
            ) -> ::core::result::Result<Self, ::tinyconf::Error> {
                Ok(Self {
                    #(#initializers),*
                })
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn expand_err(input: DeriveInput) -> String {
        expand(&input).unwrap_err().to_string()
    }

    #[test]
    fn test_expand_accepts_valid_struct() {
        let input: DeriveInput = parse_quote! {
            #[conf(section = "server")]
            struct Server {
                pub host: String,
                #[conf(default = 8080)]
                pub port: u16,
                #[conf(default)]
                pub ports: Vec<u64>,
                pub debug: Option<bool>,
            }
        };

        let tokens = expand(&input).unwrap().to_string();
        assert!(tokens.contains("Field :: integer ()"));
        assert!(tokens.contains("Value :: List"));
        assert!(tokens.contains("Section :: new"));
    }

    #[test]
    fn test_option_with_default_is_rejected() {
        let err = expand_err(parse_quote! {
            struct Settings {
                #[conf(default = "fallback".to_string())]
                pub fallback: Option<String>,
            }
        });
        assert!(err.contains("Option<T> fields cannot have default attribute"));
    }

    #[test]
    fn test_option_with_default_trait_is_rejected() {
        let err = expand_err(parse_quote! {
            struct Settings {
                #[conf(default)]
                pub fallback: Option<String>,
            }
        });
        assert!(err.contains("Option<T> fields cannot have default attribute"));
    }

    #[test]
    fn test_deserializer_with_default_is_rejected() {
        let err = expand_err(parse_quote! {
            struct Settings {
                #[conf(deserializer = "parse_list", default)]
                pub items: Vec<String>,
            }
        });
        assert_eq!(err, "default value is not supported with deserializer attribute");
    }

    #[test]
    fn test_deserializer_with_kind_is_rejected() {
        let err = expand_err(parse_quote! {
            struct Settings {
                #[conf(deserializer = "parse_secs", kind = "integer")]
                pub timeout: u64,
            }
        });
        assert!(err.contains("cannot set kind"));
    }

    #[test]
    fn test_deserializer_with_plain_kind_is_accepted() {
        let input: DeriveInput = parse_quote! {
            struct Settings {
                #[conf(deserializer = "parse_secs", kind = "plain")]
                pub timeout: u64,
            }
        };
        assert!(expand(&input).is_ok());
    }

    #[test]
    fn test_list_options_on_scalar_are_rejected() {
        let err = expand_err(parse_quote! {
            struct Settings {
                #[conf(delimiter = ";")]
                pub name: String,
            }
        });
        assert!(err.contains("only supported on list fields"));

        let err = expand_err(parse_quote! {
            struct Settings {
                #[conf(remove_blank)]
                pub port: u16,
            }
        });
        assert!(err.contains("only supported on list fields"));
    }

    #[test]
    fn test_comparators_on_non_boolean_are_rejected() {
        let err = expand_err(parse_quote! {
            struct Settings {
                #[conf(comparators = ["on"])]
                pub mode: String,
            }
        });
        assert_eq!(err, "comparators are only supported on boolean fields");
    }

    #[test]
    fn test_tuple_struct_is_rejected() {
        let err = expand_err(parse_quote! {
            struct Settings(String);
        });
        assert_eq!(err, "Config only supports structs with named fields");
    }
}
