use crate::util::*;

use proc_macro2::{Span, TokenStream};
use quote::{quote, ToTokens};
use syn::{spanned::Spanned, Error, Field, Ident, Type};

mod tag_item;
use tag_item::TagItem;

/// How the generated walk treats a field
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldKind {
    /// Handed to the walker, or reported as unsupported if its type doesn't implement `Field`
    Walk,
    /// Private field, only reported to the walker as skipped
    Unexported,
}

/// #[tag(...)] options listed on a field of a struct which has `#[derive(Flags)]`
pub struct FieldItem {
    field_name: Ident,
    field_type: Type,
    kind: FieldKind,
    tags: TagItem,
    doc_string: Option<String>,
}

impl FieldItem {
    pub fn new(field: &Field) -> Result<Self, Error> {
        let field_name = field
            .ident
            .clone()
            .ok_or_else(|| Error::new(field.span(), "missing identifier"))?;
        let field_type = field.ty.clone();

        let kind = if visibility_is_exported(&field.vis) {
            FieldKind::Walk
        } else {
            FieldKind::Unexported
        };

        let mut doc_string = None;
        let mut tags = TagItem::default();
        for attr in &field.attrs {
            maybe_append_doc_string(&mut doc_string, &attr.meta)?;
            if attr.path().is_ident("tag") {
                tags.parse_attr(attr)?;
            }
        }

        Ok(Self {
            field_name,
            field_type,
            kind,
            tags,
            doc_string,
        })
    }

    /// Get the field name
    pub fn get_field_name(&self) -> &Ident {
        &self.field_name
    }

    /// True if the generated walk needs a mutable binding to this field
    pub fn is_walked(&self) -> bool {
        self.kind == FieldKind::Walk
    }

    /// Generate a `structflags::FieldInfo` expression describing this field
    fn gen_field_info(&self) -> TokenStream {
        let name = self.field_name.to_string();
        let type_name = compact_type_name(&self.field_type);
        let tags = self.tags.quote_tags();
        let doc = quote_opt(&self.doc_string);
        let embedded = self.tags.embedded;

        quote! {
            ::structflags::FieldInfo {
                name: #name,
                type_name: #type_name,
                tags: &[#tags],
                doc: #doc,
                embedded: #embedded,
            }
        }
    }

    /// Generate the statement which reports this field to the walker.
    ///
    /// Walked fields must already be bound (as `&mut`) to a local named after the field.
    /// The statement may use `?` to return an error from the walk.
    pub fn gen_walk(&self, walker_ident: &Ident) -> TokenStream {
        let field_info_ident = Ident::new("__FIELD_INFO__", Span::call_site());
        let field_info = self.gen_field_info();
        let field_name = &self.field_name;

        let call = match self.kind {
            // Types without a `Field` impl resolve to the fallback trait and are skipped
            FieldKind::Walk => quote! {
                #[allow(unused_imports)]
                use ::structflags::__private::{DispatchField as _, DispatchUnsupported as _};
                (&mut ::structflags::__private::Dispatch::new(#field_name))
                    .__dispatch(#walker_ident, &#field_info_ident)?;
            },
            FieldKind::Unexported => quote! {
                #walker_ident.skip(&#field_info_ident, ::structflags::SkipReason::Unexported);
            },
        };

        quote! {
            {
                static #field_info_ident: ::structflags::FieldInfo = #field_info;
                #call
            }
        }
    }
}

/// Render a type the way a person would write it, e.g. `Option<Vec<String>>` rather than
/// `Option < Vec < String > >`
fn compact_type_name(ty: &Type) -> String {
    let spaced = ty.to_token_stream().to_string();
    let chars: Vec<char> = spaced.chars().collect();
    let mut result = String::with_capacity(spaced.len());
    for (idx, c) in chars.iter().enumerate() {
        if *c == ' ' {
            let prev = idx.checked_sub(1).and_then(|i| chars.get(i));
            let next = chars.get(idx + 1);
            let keep = matches!((prev, next), (Some(p), Some(n)) if is_word_char(*p) && is_word_char(*n));
            if !keep {
                continue;
            }
        }
        result.push(*c);
    }
    result
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '\''
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_compact_type_name() {
        assert_eq!(compact_type_name(&parse_quote!(String)), "String");
        assert_eq!(
            compact_type_name(&parse_quote!(Option<Vec<String>>)),
            "Option<Vec<String>>"
        );
        assert_eq!(
            compact_type_name(&parse_quote!(std::collections::HashMap<String, i64>)),
            "std::collections::HashMap<String,i64>"
        );
        assert_eq!(compact_type_name(&parse_quote!(&'static mut str)), "&'static mut str");
    }

    #[test]
    fn test_field_kind() {
        let field: Field = parse_quote! {
            #[tag(flag = "name t,hidden")]
            pub name: String
        };
        let item = FieldItem::new(&field).unwrap();
        assert_eq!(item.kind, FieldKind::Walk);
        assert!(item.is_walked());

        let field: Field = parse_quote! { name: String };
        assert_eq!(FieldItem::new(&field).unwrap().kind, FieldKind::Unexported);

        let field: Field = parse_quote! { pub callback: fn(u32) };
        assert_eq!(FieldItem::new(&field).unwrap().kind, FieldKind::Walk);
    }
}
