use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{FnArg, ImplItem, ImplItemFn, ItemImpl, Pat, ReturnType, Type, Visibility, parse_macro_input};

use crate::introspect::optional_str;
use crate::support::{attrs, diag, utils};

const METHOD_KEYS: &[&str] = &["hidden", "skip", "rename", "description"];

pub fn attribute(args: TokenStream, item: TokenStream) -> TokenStream {
    let item = parse_macro_input!(item as ItemImpl);

    match expand(args.into(), item) {
        Ok(ts) => ts.into(),
        Err(e) => diag::to_compile_error(e),
    }
}

struct MethodDef {
    name: String,
    return_type: String,
    description: Option<String>,
    parameters: Vec<(String, String)>,
    hidden: bool,
}

pub(crate) fn expand(args: TokenStream2, mut item: ItemImpl) -> syn::Result<TokenStream2> {
    let args = attrs::parse_args(args)?;
    args.ensure_known(&[], "an impl block")?;

    if let Some((_, path, _)) = &item.trait_ {
        return Err(diag::error_spanned(
            path,
            "#[introspect_methods] must be placed on an inherent impl block, not a trait impl",
        ));
    }
    if !item.generics.params.is_empty() {
        return Err(diag::error_spanned(
            &item.generics,
            "#[introspect_methods] cannot register methods of a generic impl block",
        ));
    }

    let mut methods = Vec::new();
    for impl_item in &mut item.items {
        if let ImplItem::Fn(method) = impl_item
            && let Some(def) = method_def(method)?
        {
            methods.push(def);
        }
    }

    if methods.is_empty() {
        return Ok(quote!(#item));
    }

    let self_ty = &item.self_ty;
    let mut param_statics = Vec::new();
    let mut method_exprs = Vec::new();
    for (index, method) in methods.iter().enumerate() {
        let params_ident = format_ident!("__INTROSPECT_PARAMS_{}", index);
        let params = method.parameters.iter().map(|(name, ty)| {
            quote!(::nebula_introspect::ParameterDescriptor::new(#name, #ty))
        });
        let count = method.parameters.len();
        param_statics.push(quote! {
            static #params_ident: [::nebula_introspect::ParameterDescriptor; #count] = [#(#params),*];
        });

        let MethodDef {
            name,
            return_type,
            description,
            hidden,
            ..
        } = method;
        let description = optional_str(description.clone());
        method_exprs.push(quote! {
            ::nebula_introspect::MemberDescriptor::method(
                #name,
                #return_type,
                #description,
                &#params_ident,
                #hidden,
            )
        });
    }
    let method_count = method_exprs.len();

    Ok(quote! {
        #item

        const _: () = {
            #(#param_statics)*

            static __INTROSPECT_METHODS: [::nebula_introspect::MemberDescriptor; #method_count] = [
                #(#method_exprs),*
            ];

            ::nebula_introspect::__private::inventory::submit! {
                ::nebula_introspect::MethodRegistration::new(
                    <#self_ty as ::nebula_introspect::Introspect>::TYPE_NAME,
                    &__INTROSPECT_METHODS,
                )
            }
        };
    })
}

/// Read and strip `#[introspect(...)]` from a method, returning its
/// descriptor when the method belongs on the expression surface.
fn method_def(method: &mut ImplItemFn) -> syn::Result<Option<MethodDef>> {
    let args = attrs::parse_attrs(&method.attrs, attrs::ATTR)?;
    let annotated = method.attrs.iter().any(|a| a.path().is_ident(attrs::ATTR));
    method.attrs.retain(|a| !a.path().is_ident(attrs::ATTR));

    args.ensure_known(METHOD_KEYS, "a method")?;

    if args.has_flag("skip") {
        if let Some(hidden) = args.flag("hidden") {
            return Err(diag::hidden_with_skip(hidden, "method"));
        }
        return Ok(None);
    }

    if !takes_shared_self(method) {
        if let Some(hidden) = args.flag("hidden") {
            return Err(diag::error_spanned(
                hidden,
                "the `hidden` marker applies only to methods taking `&self`",
            ));
        }
        if annotated {
            return Err(diag::error_spanned(
                &method.sig.ident,
                "#[introspect] on a method requires a `&self` receiver",
            ));
        }
        return Ok(None);
    }

    if !annotated && !matches!(method.vis, Visibility::Public(_)) {
        return Ok(None);
    }

    let parameters = method
        .sig
        .inputs
        .iter()
        .filter_map(|arg| match arg {
            FnArg::Typed(pat_type) => Some(pat_type),
            FnArg::Receiver(_) => None,
        })
        .enumerate()
        .map(|(index, pat_type)| {
            let name = match pat_type.pat.as_ref() {
                Pat::Ident(pat) => pat.ident.unraw().to_string(),
                _ => format!("arg{index}"),
            };
            (name, utils::render_type(&pat_type.ty))
        })
        .collect();

    let return_type = match &method.sig.output {
        ReturnType::Default => "()".to_string(),
        ReturnType::Type(_, ty) => utils::render_type(ty),
    };

    Ok(Some(MethodDef {
        name: args
            .get_string("rename")?
            .unwrap_or_else(|| method.sig.ident.unraw().to_string()),
        return_type,
        description: args
            .get_string("description")?
            .or_else(|| utils::doc_string(&method.attrs)),
        parameters,
        hidden: args.has_flag("hidden"),
    }))
}

fn takes_shared_self(method: &ImplItemFn) -> bool {
    match method.sig.receiver() {
        Some(receiver) => match receiver.ty.as_ref() {
            Type::Reference(reference) => reference.mutability.is_none(),
            _ => false,
        },
        None => false,
    }
}
