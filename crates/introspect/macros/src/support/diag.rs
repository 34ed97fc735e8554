use proc_macro::TokenStream;
use quote::ToTokens;

/// Render a `syn::Error` as `compile_error!` tokens.
pub fn to_compile_error(err: syn::Error) -> TokenStream {
    err.to_compile_error().into()
}

/// Error pointing at `tokens`.
pub fn error_spanned<T: ToTokens>(tokens: &T, msg: impl Into<String>) -> syn::Error {
    syn::Error::new_spanned(tokens, msg.into())
}

/// `hidden` written on a declaration it cannot apply to, e.g. "a type declaration".
pub fn misplaced_marker<T: ToTokens>(marker: &T, declaration: &str) -> syn::Error {
    error_spanned(
        marker,
        format!("the `hidden` marker applies to fields and methods, not to {declaration}"),
    )
}

/// `hidden` combined with `skip` on a field or method.
pub fn hidden_with_skip<T: ToTokens>(marker: &T, member: &str) -> syn::Error {
    error_spanned(
        marker,
        format!("`hidden` and `skip` are mutually exclusive: a skipped {member} is never registered"),
    )
}
