//! Attribute parsing for `#[conf(...)]` annotations.
//!
//! This module extracts and validates configuration attributes from the struct
//! and its fields during macro expansion.

use syn::{Attribute, Expr, ExprArray, Field, Lit, LitInt, LitStr};

/// Field kinds understood by `tinyconf::Field`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Plain,
    Integer,
    Float,
    Boolean,
    List,
}

impl Kind {
    fn parse(lit: &LitStr) -> syn::Result<Self> {
        match lit.value().as_str() {
            "plain" => Ok(Kind::Plain),
            "integer" => Ok(Kind::Integer),
            "float" => Ok(Kind::Float),
            "boolean" => Ok(Kind::Boolean),
            "list" => Ok(Kind::List),
            other => Err(syn::Error::new_spanned(
                lit,
                format!(
                    "unknown kind \"{other}\", expected one of \"plain\", \"integer\", \"float\", \"boolean\", \"list\""
                ),
            )),
        }
    }
}

/// Parsed `#[conf(...)]` attributes from the struct itself.
#[derive(Debug, Default)]
pub struct ContainerAttrs {
    /// Section every field without its own `section` is read from.
    pub section: Option<String>,
}

impl ContainerAttrs {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("conf") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("section") {
                    let lit: LitStr = meta.value()?.parse()?;
                    out.section = Some(lit.value());
                    return Ok(());
                }

                Err(meta.error("unsupported struct-level conf attribute"))
            })?;
        }

        Ok(out)
    }
}

/// Parsed `#[conf(...)]` attributes from a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Source key override. If `None`, the field name is used.
    pub name: Option<String>,

    /// Absence of the key is an error.
    pub strict: bool,

    /// Default value strategy:
    /// - `None`: no default
    /// - `Some(None)`: Use `Default::default()`
    /// - `Some(Some(tokens))`: Use explicit token stream as default value
    pub default: Option<Option<proc_macro2::TokenStream>>,

    /// Section the field is read from in section-aware mode.
    pub section: Option<String>,

    pub max_length: Option<LitInt>,

    /// Explicit kind, overriding the one inferred from the field type.
    pub kind: Option<Kind>,

    pub delimiter: Option<String>,

    pub remove_blank: bool,

    /// Path of a `fn(&str) -> bool` selecting list items.
    pub filter: Option<String>,

    /// Path of a `fn(&str) -> Result<V, E>` converting list items.
    pub map: Option<String>,

    /// Truthy tokens of a boolean field.
    pub comparators: Option<Vec<String>>,

    /// Custom deserializer function path (e.g., `"serde_json::from_str"`).
    ///
    /// The field is read as a plain string and handed to this function.
    pub deserializer: Option<String>,
}

impl FieldAttrs {
    /// Extract and parse `#[conf(...)]` attributes from a struct field.
    ///
    /// Attributes other than `conf` are left for other macros.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in &field.attrs {
            if !attr.path().is_ident("conf") {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                // name = "..."
                if meta.path.is_ident("name") {
                    let lit: LitStr = meta.value()?.parse()?;
                    attrs.name = Some(lit.value());
                    return Ok(());
                }

                if meta.path.is_ident("strict") {
                    attrs.strict = true;
                    return Ok(());
                }

                // default or default = value
                if meta.path.is_ident("default") {
                    if meta.input.peek(syn::Token![=]) {
                        let value = meta.value()?;
                        let expr: Expr = value.parse()?;
                        attrs.default = Some(Some(quote::quote!(#expr)));
                    } else {
                        attrs.default = Some(None);
                    }
                    return Ok(());
                }

                if meta.path.is_ident("section") {
                    let lit: LitStr = meta.value()?.parse()?;
                    attrs.section = Some(lit.value());
                    return Ok(());
                }

                if meta.path.is_ident("max_length") {
                    let lit: LitInt = meta.value()?.parse()?;
                    lit.base10_parse::<usize>()?;
                    attrs.max_length = Some(lit);
                    return Ok(());
                }

                if meta.path.is_ident("kind") {
                    let lit: LitStr = meta.value()?.parse()?;
                    attrs.kind = Some(Kind::parse(&lit)?);
                    return Ok(());
                }

                if meta.path.is_ident("delimiter") {
                    let lit: LitStr = meta.value()?.parse()?;
                    if lit.value().is_empty() {
                        return Err(syn::Error::new_spanned(lit, "delimiter must not be empty"));
                    }
                    attrs.delimiter = Some(lit.value());
                    return Ok(());
                }

                if meta.path.is_ident("remove_blank") {
                    attrs.remove_blank = true;
                    return Ok(());
                }

                if meta.path.is_ident("filter") {
                    let lit: LitStr = meta.value()?.parse()?;
                    attrs.filter = Some(lit.value());
                    return Ok(());
                }

                if meta.path.is_ident("map") {
                    let lit: LitStr = meta.value()?.parse()?;
                    attrs.map = Some(lit.value());
                    return Ok(());
                }

                // comparators = ["on", "yes"]
                if meta.path.is_ident("comparators") {
                    let array: ExprArray = meta.value()?.parse()?;
                    let mut tokens = Vec::with_capacity(array.elems.len());
                    for elem in &array.elems {
                        match elem {
                            Expr::Lit(expr) => match &expr.lit {
                                Lit::Str(s) => tokens.push(s.value()),
                                _ => {
                                    return Err(syn::Error::new_spanned(
                                        elem,
                                        "comparators must be string literals",
                                    ))
                                }
                            },
                            _ => {
                                return Err(syn::Error::new_spanned(
                                    elem,
                                    "comparators must be string literals",
                                ))
                            }
                        }
                    }
                    attrs.comparators = Some(tokens);
                    return Ok(());
                }

                // deserializer = "function::path"
                if meta.path.is_ident("deserializer") {
                    let lit: LitStr = meta.value()?.parse()?;
                    attrs.deserializer = Some(lit.value());
                    return Ok(());
                }

                Err(meta.error("unsupported conf attribute"))
            })?;
        }

        Ok(attrs)
    }

    /// Whether any list-only option was given.
    pub fn has_list_options(&self) -> bool {
        self.delimiter.is_some() || self.remove_blank || self.filter.is_some() || self.map.is_some()
    }
}
