use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{DeriveInput, Field, parse_macro_input};

use crate::support::{attrs, diag, utils};

const CONTAINER_KEYS: &[&str] = &["name", "description"];
const FIELD_KEYS: &[&str] = &["hidden", "skip", "rename", "type_name", "description"];

pub fn derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(ts) => ts.into(),
        Err(e) => diag::to_compile_error(e),
    }
}

pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let container = attrs::parse_attrs(&input.attrs, attrs::ATTR)?;
    container.ensure_known(CONTAINER_KEYS, "a type declaration")?;

    let fields = utils::require_struct_fields(input)?;

    let type_name = container
        .get_string("name")?
        .unwrap_or_else(|| struct_name.unraw().to_string());
    let description = optional_str(
        container
            .get_string("description")?
            .or_else(|| utils::doc_string(&input.attrs)),
    );

    let mut field_defs = Vec::with_capacity(fields.len());
    for field in fields {
        if let Some(def) = field_descriptor(field)? {
            field_defs.push(def);
        }
    }

    // Generic types cannot be named in a link-time registration; they are
    // registered explicitly through `TypeRegistry::register::<T>()`.
    let registration = if input.generics.params.is_empty() {
        quote! {
            ::nebula_introspect::__private::inventory::submit! {
                ::nebula_introspect::TypeRegistration::of::<#struct_name>()
            }
        }
    } else {
        quote! {}
    };

    Ok(quote! {
        impl #impl_generics ::nebula_introspect::Introspect for #struct_name #ty_generics #where_clause {
            const TYPE_NAME: &'static str = #type_name;
            const DESCRIPTION: ::core::option::Option<&'static str> = #description;
            const FIELDS: &'static [::nebula_introspect::MemberDescriptor] = &[
                #(#field_defs),*
            ];
        }

        #registration
    })
}

fn field_descriptor(field: &Field) -> syn::Result<Option<TokenStream2>> {
    let args = attrs::parse_attrs(&field.attrs, attrs::ATTR)?;
    args.ensure_known(FIELD_KEYS, "a field")?;

    if args.has_flag("skip") {
        if let Some(hidden) = args.flag("hidden") {
            return Err(diag::hidden_with_skip(hidden, "field"));
        }
        return Ok(None);
    }

    let Some(ident) = field.ident.as_ref() else {
        return Err(diag::error_spanned(field, "expected a named field"));
    };

    let name = args
        .get_string("rename")?
        .unwrap_or_else(|| ident.unraw().to_string());
    let type_name = args
        .get_string("type_name")?
        .unwrap_or_else(|| utils::render_type(&field.ty));
    let description = optional_str(
        args.get_string("description")?
            .or_else(|| utils::doc_string(&field.attrs)),
    );
    let hidden = args.has_flag("hidden");

    Ok(Some(quote! {
        ::nebula_introspect::MemberDescriptor::field(#name, #type_name, #description, #hidden)
    }))
}

pub(crate) fn optional_str(value: Option<String>) -> TokenStream2 {
    match value {
        Some(value) => quote!(::core::option::Option::Some(#value)),
        None => quote!(::core::option::Option::None),
    }
}
