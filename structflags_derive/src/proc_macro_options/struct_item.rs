use syn::{spanned::Spanned, Attribute, Error, Ident};

/// Options listed on a struct which has `#[derive(Flags)]`
///
/// Tags only make sense on fields, so for now this just records the identifier and rejects
/// misplaced `#[tag(...)]` attributes.
pub struct StructItem {
    struct_ident: Ident,
}

impl StructItem {
    /// Parse options out of attributes on a struct
    pub fn new(ident: &Ident, attrs: &[Attribute]) -> Result<Self, syn::Error> {
        for attr in attrs {
            if attr.path().is_ident("tag") {
                return Err(Error::new(
                    attr.span(),
                    "#[tag(...)] belongs on fields, not on the struct itself",
                ));
            }
        }

        Ok(Self {
            struct_ident: ident.clone(),
        })
    }

    pub fn get_ident(&self) -> &Ident {
        &self.struct_ident
    }
}
