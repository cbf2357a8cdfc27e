use proc_macro2::{Span, TokenStream};
use quote::{quote, ToTokens};
use syn::{
    meta::ParseNestedMeta, parse::Parse, spanned::Spanned, Error, Expr, ExprLit, Lit, Meta, Path,
    Visibility,
};

/// Helper for determining if a field is visible outside of its module.
/// Private fields are never turned into flags.
pub fn visibility_is_exported(vis: &Visibility) -> bool {
    !matches!(vis, Visibility::Inherited)
}

/// Helper for reading a required value, which comes after a key, during `.parse_nested_meta`
pub fn parse_required_value<T: Parse>(meta: ParseNestedMeta<'_>) -> Result<T, Error> {
    let t: T = meta.value()?.parse()?;
    Ok(t)
}

/// An internal version of Spanned with a blanket implementation, this lets us put it on our custom types more easily.
pub trait GetSpan {
    fn get_span(&self) -> Span;
}

impl<T: Spanned> GetSpan for T {
    fn get_span(&self) -> Span {
        self.span()
    }
}

/// Helper for setting a parameter that should only be set once, during `.parse_nested_meta`
pub fn set_once<T: GetSpan>(
    context: &Path,
    param: &mut Option<T>,
    val: Option<T>,
) -> Result<(), Error> {
    if let Some(param) = param.as_ref() {
        let name = context
            .get_ident()
            .map(ToString::to_string)
            .unwrap_or_else(|| context.to_token_stream().to_string());
        let mut error = Error::new(context.span(), format!("{name} cannot be specified twice"));
        error.combine(Error::new(param.get_span(), "Earlier specified here"));
        return Err(error);
    }
    *param = val;
    Ok(())
}

/// Helper for appending a doc string attribute to the description string, if it is a doc string attribute.
// Based on code here: https://github.com/cyqsimon/documented/blob/e9a465c9e1666839ea08efbe9ce54480d7ee769f/documented-derive/src/lib.rs#L411
pub fn maybe_append_doc_string(
    description: &mut Option<String>,
    attr_meta: &Meta,
) -> Result<(), Error> {
    let doc_expr = match attr_meta {
        Meta::NameValue(ref name_value) if name_value.path.is_ident("doc") => &name_value.value,
        _ => return Ok(()),
    };

    let lit = match doc_expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) => s.value(),
        other => {
            return Err(Error::new(
                other.span(),
                "Doc comment is not a string literal",
            ))
        }
    };

    // Split by any newlines pre-existing in the string.
    // Trim any whitespace around those. Then add the newlines back.
    // Terminate with one newline
    let mut trimmed = lit
        .split('\n')
        .map(|line| line.trim())
        .fold(String::new(), |s, line| s + line + "\n");
    // Pop the extra newline
    trimmed.pop();

    if let Some(desc) = description.as_mut() {
        desc.push('\n');
        desc.push_str(&trimmed);
    } else {
        *description = Some(trimmed);
    }
    Ok(())
}

/// Helper for turning values Option<String> (or Option<LitStr>) into Option<&'static str> in code generated by quote! macro
pub fn quote_opt<T: ToTokens>(src: &Option<T>) -> TokenStream {
    if let Some(string) = src.as_ref() {
        quote! { ::core::option::Option::Some(#string) }
    } else {
        quote! { ::core::option::Option::None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_visibility_is_exported() {
        assert!(visibility_is_exported(&parse_quote!(pub)));
        assert!(visibility_is_exported(&parse_quote!(pub(crate))));
        assert!(!visibility_is_exported(&Visibility::Inherited));
    }

    #[test]
    fn test_maybe_append_doc_string() {
        let mut desc = None;
        maybe_append_doc_string(&mut desc, &parse_quote!(doc = " Listen address ")).unwrap();
        assert_eq!(desc.as_deref(), Some("Listen address"));
        maybe_append_doc_string(&mut desc, &parse_quote!(doc = " to bind")).unwrap();
        assert_eq!(desc.as_deref(), Some("Listen address\nto bind"));
        maybe_append_doc_string(&mut desc, &parse_quote!(allow(unused))).unwrap();
        assert_eq!(desc.as_deref(), Some("Listen address\nto bind"));
    }
}
