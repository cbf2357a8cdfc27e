use crate::util::*;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, Error, LitStr};

/// The contents of every `#[tag(...)]` attribute on one field.
///
/// `key = "value"` pairs are kept verbatim and in order, the walker interprets them at runtime
/// according to its options (so the flag/env/desc keys can be renamed). The bare word `embedded`
/// marks the field as the analog of an anonymous struct field.
#[derive(Default)]
pub struct TagItem {
    pub tags: Vec<(String, LitStr)>,
    pub embedded: bool,
}

impl TagItem {
    pub fn parse_attr(&mut self, attr: &Attribute) -> Result<(), Error> {
        attr.parse_nested_meta(|meta| {
            let path = meta.path.clone();
            if path.is_ident("embedded") && !meta.input.peek(syn::Token![=]) {
                if self.embedded {
                    return Err(meta.error("embedded cannot be specified twice"));
                }
                self.embedded = true;
                return Ok(());
            }

            let key = path
                .get_ident()
                .map(ToString::to_string)
                .ok_or_else(|| meta.error("tag keys must be plain identifiers"))?;

            let mut existing = self
                .tags
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.clone());
            let value = parse_required_value::<LitStr>(meta)?;
            set_once(&path, &mut existing, Some(value.clone()))?;

            self.tags.push((key, value));
            Ok(())
        })
    }

    /// Generate the body of a `&[(&str, &str)]` slice literal
    pub fn quote_tags(&self) -> TokenStream {
        let pairs = self.tags.iter().map(|(key, value)| {
            quote! { (#key, #value) }
        });
        quote! { #(#pairs),* }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_parse_tags_in_order() {
        let attr: Attribute = parse_quote!(#[tag(flag = "name_two t,hidden", env = "-")]);
        let mut item = TagItem::default();
        item.parse_attr(&attr).unwrap();

        let keys: Vec<_> = item.tags.iter().map(|(k, v)| (k.clone(), v.value())).collect();
        assert_eq!(
            keys,
            vec![
                ("flag".to_owned(), "name_two t,hidden".to_owned()),
                ("env".to_owned(), "-".to_owned())
            ]
        );
        assert!(!item.embedded);
    }

    #[test]
    fn test_parse_embedded() {
        let attr: Attribute = parse_quote!(#[tag(embedded, desc = "inner")]);
        let mut item = TagItem::default();
        item.parse_attr(&attr).unwrap();
        assert!(item.embedded);
        assert_eq!(item.tags.len(), 1);
    }

    #[test]
    fn test_duplicate_key_is_rejected() {
        let attr: Attribute = parse_quote!(#[tag(env = "A", env = "B")]);
        let mut item = TagItem::default();
        assert!(item.parse_attr(&attr).is_err());
    }

    #[test]
    fn test_unknown_bare_word_is_rejected() {
        let attr: Attribute = parse_quote!(#[tag(hidden)]);
        let mut item = TagItem::default();
        assert!(item.parse_attr(&attr).is_err());
    }
}
