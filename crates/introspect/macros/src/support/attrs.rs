use syn::{
    Attribute, Ident, Lit, Meta, Result, Token,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
};

use crate::support::diag;

/// Name of the helper attribute shared by the derive and the impl attribute.
pub const ATTR: &str = "introspect";

/// Parsed attribute arguments container.
#[derive(Debug, Clone, Default)]
pub struct AttrArgs {
    pub items: Vec<AttrItem>,
}

/// A single attribute item.
#[derive(Debug, Clone)]
pub enum AttrItem {
    /// A flag like `hidden` or `skip`
    Flag(Ident),
    /// Key-value pair like `rename = "value"`
    KeyValue { key: Ident, value: Lit },
}

impl AttrItem {
    fn key(&self) -> &Ident {
        match self {
            Self::Flag(key) | Self::KeyValue { key, .. } => key,
        }
    }
}

impl AttrArgs {
    /// Find a key-value pair by key name.
    pub fn get_value(&self, key: &str) -> Option<&Lit> {
        self.items.iter().find_map(|item| match item {
            AttrItem::KeyValue { key: k, value } if k == key => Some(value),
            _ => None,
        })
    }

    /// Get a string value by key, rejecting non-string literals.
    pub fn get_string(&self, key: &str) -> Result<Option<String>> {
        match self.get_value(key) {
            None => Ok(None),
            Some(Lit::Str(s)) => Ok(Some(s.value())),
            Some(other) => Err(diag::error_spanned(
                other,
                format!("expected a string literal for `{key}`"),
            )),
        }
    }

    /// Check if a flag is present.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.items
            .iter()
            .any(|item| matches!(item, AttrItem::Flag(f) if f == flag))
    }

    /// Find the ident of a flag, for diagnostics that point at it.
    pub fn flag(&self, flag: &str) -> Option<&Ident> {
        self.items.iter().find_map(|item| match item {
            AttrItem::Flag(f) if f == flag => Some(f),
            _ => None,
        })
    }

    /// Reject every item whose key is not in `allowed`.
    ///
    /// `context` names the declaration kind in the diagnostic, e.g. "a field".
    pub fn ensure_known(&self, allowed: &[&str], context: &str) -> Result<()> {
        for item in &self.items {
            let key = item.key();
            if key == "hidden" && !allowed.contains(&"hidden") {
                return Err(diag::misplaced_marker(key, context));
            }
            if allowed.is_empty() {
                return Err(diag::error_spanned(
                    key,
                    format!("{context} takes no #[{ATTR}] arguments"),
                ));
            }
            if !allowed.iter().any(|a| key == a) {
                return Err(diag::error_spanned(
                    key,
                    format!(
                        "unknown #[{ATTR}] argument `{key}` on {context}; expected one of: {}",
                        allowed.join(", ")
                    ),
                ));
            }
            let expects_value = !is_flag(key);
            match (item, expects_value) {
                (AttrItem::Flag(_), true) => {
                    return Err(diag::error_spanned(
                        key,
                        format!("`{key}` expects a value: `{key} = \"...\"`"),
                    ));
                }
                (AttrItem::KeyValue { .. }, false) => {
                    return Err(diag::error_spanned(
                        key,
                        format!("`{key}` is a flag and takes no value"),
                    ));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

fn is_flag(key: &Ident) -> bool {
    key == "hidden" || key == "skip"
}

/// Parse attribute like `#[introspect(...)]` (the whole Attribute, not only args).
pub fn parse_attr(attr: &Attribute, expected: &str) -> Result<Option<AttrArgs>> {
    if !attr.path().is_ident(expected) {
        return Ok(None);
    }

    match &attr.meta {
        Meta::Path(_) => Ok(Some(AttrArgs::default())),
        Meta::List(list) => {
            let args = syn::parse2::<AttrArgsParser>(list.tokens.clone())?;
            Ok(Some(args.0))
        }
        Meta::NameValue(nv) => Err(diag::error_spanned(
            nv,
            format!("#[{expected}] must be #[{expected}(...)] or #[{expected}] (not name-value)"),
        )),
    }
}

/// Parse all attributes of a given type and merge them.
///
/// Repeated attributes accumulate, so `#[introspect(hidden)]` written twice
/// reads the same as written once.
pub fn parse_attrs(attrs: &[Attribute], name: &str) -> Result<AttrArgs> {
    let mut result = AttrArgs::default();

    for attr in attrs {
        if let Some(args) = parse_attr(attr, name)? {
            result.items.extend(args.items);
        }
    }

    Ok(result)
}

/// Parse the argument list of an attribute macro invocation.
pub fn parse_args(tokens: proc_macro2::TokenStream) -> Result<AttrArgs> {
    syn::parse2::<AttrArgsParser>(tokens).map(|parsed| parsed.0)
}

struct AttrArgsParser(AttrArgs);

impl Parse for AttrArgsParser {
    fn parse(input: ParseStream) -> Result<Self> {
        let items = if input.is_empty() {
            vec![]
        } else {
            Punctuated::<AttrItemParser, Token![,]>::parse_terminated(input)?
                .into_iter()
                .map(|x| x.0)
                .collect()
        };
        Ok(Self(AttrArgs { items }))
    }
}

struct AttrItemParser(AttrItem);

impl Parse for AttrItemParser {
    fn parse(input: ParseStream) -> Result<Self> {
        let key: Ident = input.parse()?;

        if input.peek(Token![=]) {
            input.parse::<Token![=]>()?;
            let value: Lit = input.parse()?;
            return Ok(Self(AttrItem::KeyValue { key, value }));
        }

        Ok(Self(AttrItem::Flag(key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;

    #[test]
    fn test_parse_simple_attr() {
        let args = parse_args(quote!(rename = "value", hidden)).unwrap();

        assert_eq!(args.items.len(), 2);
        assert_eq!(args.get_string("rename").unwrap().as_deref(), Some("value"));
        assert!(args.has_flag("hidden"));
        assert!(!args.has_flag("skip"));
    }

    #[test]
    fn test_repeated_flag_is_idempotent() {
        let attrs: Vec<Attribute> = vec![
            syn::parse_quote!(#[introspect(hidden)]),
            syn::parse_quote!(#[introspect(hidden)]),
        ];
        let args = parse_attrs(&attrs, ATTR).unwrap();

        assert!(args.has_flag("hidden"));
        assert!(args.ensure_known(&["hidden", "skip"], "a field").is_ok());
    }

    #[test]
    fn test_unrelated_attributes_are_ignored() {
        let attrs: Vec<Attribute> = vec![
            syn::parse_quote!(#[serde(rename = "x")]),
            syn::parse_quote!(#[doc = "docs"]),
        ];
        let args = parse_attrs(&attrs, ATTR).unwrap();

        assert!(args.items.is_empty());
    }

    #[test]
    fn test_hidden_rejected_where_not_allowed() {
        let args = parse_args(quote!(hidden)).unwrap();
        let err = args.ensure_known(&["name", "description"], "a type declaration").unwrap_err();

        assert!(err.to_string().contains("applies to fields and methods"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let args = parse_args(quote!(invisible)).unwrap();
        let err = args.ensure_known(&["hidden"], "a field").unwrap_err();

        assert!(err.to_string().contains("unknown #[introspect] argument `invisible`"));
    }

    #[test]
    fn test_flag_with_value_rejected() {
        let args = parse_args(quote!(hidden = "yes")).unwrap();
        let err = args.ensure_known(&["hidden"], "a field").unwrap_err();

        assert!(err.to_string().contains("takes no value"));
    }

    #[test]
    fn test_name_value_form_rejected() {
        let attr: Attribute = syn::parse_quote!(#[introspect = "hidden"]);
        assert!(parse_attr(&attr, ATTR).is_err());
    }

    #[test]
    fn test_non_string_value_rejected() {
        let args = parse_args(quote!(rename = 5)).unwrap();
        assert!(args.get_string("rename").is_err());
    }
}
