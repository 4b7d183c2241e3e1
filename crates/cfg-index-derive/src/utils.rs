//! Miscellaneous utils.

use syn::{
    Attribute, GenericArgument, LitStr, PathArguments, Token, Type, TypePath, meta::ParseNestedMeta,
};

/// Naming-related `serde` attributes of a container or a field.
///
/// Other `serde` attributes are skipped. Malformed attributes are ignored here and reported by the `serde` derives.
#[derive(Debug, Default)]
pub(crate) struct SerdeNames {
    pub(crate) rename: Option<String>,
    pub(crate) rename_all: Option<String>,
}

impl SerdeNames {
    pub(crate) fn new(attrs: &[Attribute]) -> Self {
        let mut this = Self::default();
        let serde_attrs = attrs.iter().filter(|attr| attr.path().is_ident("serde"));
        for attr in serde_attrs {
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    if let Some(name) = Self::parse_name(&meta)? {
                        this.rename = Some(name);
                    }
                } else if meta.path.is_ident("rename_all") {
                    if let Some(rule) = Self::parse_name(&meta)? {
                        this.rename_all = Some(rule);
                    }
                } else {
                    skip_meta(&meta)?;
                }
                Ok(())
            });
        }
        this
    }

    /// Parses either `name = "value"`, or `name(serialize = "..", deserialize = "value")`.
    /// Templates are populated via deserialization, so only the `deserialize` name is relevant.
    fn parse_name(meta: &ParseNestedMeta<'_>) -> syn::Result<Option<String>> {
        if meta.input.peek(Token![=]) {
            let name: LitStr = meta.value()?.parse()?;
            return Ok(Some(name.value()));
        }

        let mut name = None;
        meta.parse_nested_meta(|nested| {
            if nested.path.is_ident("deserialize") {
                let value: LitStr = nested.value()?.parse()?;
                name = Some(value.value());
            } else {
                skip_meta(&nested)?;
            }
            Ok(())
        })?;
        Ok(name)
    }
}

fn skip_meta(meta: &ParseNestedMeta<'_>) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<syn::Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let _content;
        syn::parenthesized!(_content in meta.input);
    }
    Ok(())
}

fn pascal_case(field: &str) -> String {
    let mut pascal = String::with_capacity(field.len());
    let mut capitalize = true;
    for ch in field.chars() {
        if ch == '_' {
            capitalize = true;
        } else if capitalize {
            pascal.push(ch.to_ascii_uppercase());
            capitalize = false;
        } else {
            pascal.push(ch);
        }
    }
    pascal
}

/// Applies a `serde(rename_all = ..)` rule to a snake_case field name. Returns `None` for unknown rules.
pub(crate) fn rename_field(rule: &str, field: &str) -> Option<String> {
    Some(match rule {
        "lowercase" | "snake_case" => field.to_owned(),
        "UPPERCASE" | "SCREAMING_SNAKE_CASE" => field.to_ascii_uppercase(),
        "PascalCase" => pascal_case(field),
        "camelCase" => {
            let pascal = pascal_case(field);
            let mut chars = pascal.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_ascii_lowercase().to_string() + chars.as_str()
            })
        }
        "kebab-case" => field.replace('_', "-"),
        "SCREAMING-KEBAB-CASE" => field.to_ascii_uppercase().replace('_', "-"),
        _ => return None,
    })
}

/// Returns the type wrapped in `Option<_>`, if any.
pub(crate) fn unwrap_option(ty: &Type) -> Option<&Type> {
    let Type::Path(TypePath { path, qself: None }) = ty else {
        return None;
    };
    let segment = path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(angle_bracketed) = &segment.arguments else {
        return None;
    };
    if angle_bracketed.args.len() != 1 {
        return None;
    }
    match &angle_bracketed.args[0] {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    }
}

/// Checks whether the type is `String` (possibly qualified, e.g. `std::string::String`).
pub(crate) fn is_string(ty: &Type) -> bool {
    let Type::Path(TypePath { path, qself: None }) = ty else {
        return false;
    };
    path.segments.last().is_some_and(|segment| {
        segment.ident == "String" && matches!(segment.arguments, PathArguments::None)
    })
}

/// Checks whether the type can be resolved from an env variable, i.e., is `String` or `Option<String>`.
pub(crate) fn is_env_compatible(ty: &Type) -> bool {
    is_string(ty) || unwrap_option(ty).is_some_and(is_string)
}
