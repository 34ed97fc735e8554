use quote::ToTokens;
use syn::spanned::Spanned;
use syn::{Attribute, Data, DeriveInput, Field, Fields, GenericArgument, PathArguments, Type};

/// Collect doc comments (`/// ...`) into a single string.
pub fn doc_string(attrs: &[Attribute]) -> Option<String> {
    let mut out = Vec::new();
    for attr in attrs {
        if let syn::Meta::NameValue(nv) = &attr.meta
            && nv.path.is_ident("doc")
            && let syn::Expr::Lit(expr_lit) = &nv.value
            && let syn::Lit::Str(s) = &expr_lit.lit
        {
            let line = s.value().trim().to_string();
            if !line.is_empty() {
                out.push(line);
            }
        }
    }
    if out.is_empty() {
        None
    } else {
        Some(out.join("\n"))
    }
}

/// Ensure input is a struct with named fields (or a unit struct) and return them.
pub fn require_struct_fields(input: &DeriveInput) -> syn::Result<Vec<&Field>> {
    let fields = match &input.data {
        Data::Struct(s) => &s.fields,
        _ => {
            return Err(syn::Error::new(
                input.ident.span(),
                "#[derive(Introspect)] can only be used on structs",
            ));
        }
    };

    match fields {
        Fields::Named(named) => Ok(named.named.iter().collect()),
        Fields::Unit => Ok(Vec::new()),
        Fields::Unnamed(_) => Err(syn::Error::new(
            fields.span(),
            "#[derive(Introspect)] requires a struct with named fields (e.g. `struct X { ... }`)",
        )),
    }
}

/// Render a type the way it is shown to expression authors.
///
/// Paths collapse to their last segment (`std::sync::Arc<T>` becomes
/// `Arc<T>`) and lifetimes are dropped.
pub fn render_type(ty: &Type) -> String {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => {
            let Some(segment) = type_path.path.segments.last() else {
                return compact_tokens(ty);
            };
            let mut out = segment.ident.to_string();
            if let PathArguments::AngleBracketed(args) = &segment.arguments {
                let rendered: Vec<String> = args
                    .args
                    .iter()
                    .filter_map(|arg| match arg {
                        GenericArgument::Type(inner) => Some(render_type(inner)),
                        GenericArgument::Lifetime(_) => None,
                        other => Some(compact_tokens(other)),
                    })
                    .collect();
                if !rendered.is_empty() {
                    out.push('<');
                    out.push_str(&rendered.join(", "));
                    out.push('>');
                }
            }
            out
        }
        Type::Reference(reference) => format!("&{}", render_type(&reference.elem)),
        Type::Slice(slice) => format!("[{}]", render_type(&slice.elem)),
        Type::Paren(paren) => render_type(&paren.elem),
        Type::Group(group) => render_type(&group.elem),
        Type::Tuple(tuple) => {
            let items: Vec<String> = tuple.elems.iter().map(render_type).collect();
            format!("({})", items.join(", "))
        }
        other => compact_tokens(other),
    }
}

fn compact_tokens<T: ToTokens>(tokens: &T) -> String {
    tokens.to_token_stream().to_string().replace(' ', "")
}
