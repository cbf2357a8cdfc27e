use crate::{parse_struct, Error, Field, Flag, Options, Walker};

#[cfg(feature = "clap")]
use crate::FlagsBuilder;

/// A struct whose fields can be turned into flags.
///
/// Put `#[derive(Flags)]` on a struct with named fields, and use `#[tag(...)]` attributes on the
/// fields to control naming:
///
/// ```
/// use structflags::Flags;
///
/// #[derive(Default, Flags)]
/// struct Config {
///     /// Address to listen on
///     #[tag(flag = "listen l", env = "~LISTEN_ADDR")]
///     pub listen: String,
///     #[tag(desc = "Worker threads")]
///     pub workers: usize,
/// }
///
/// let mut config = Config::default();
/// let flags = config.parse_flags(Default::default()).unwrap();
/// assert_eq!(flags[0].name, "listen");
/// assert_eq!(flags[1].env_name.as_deref(), Some("WORKERS"));
/// ```
///
/// Only public fields become flags. Fields whose type implements `Flags` are walked in turn,
/// with their flag names prefixed by the name of the field.
pub trait Flags {
    /// Report every field of the struct to the walker, in declaration order
    fn walk<'a>(&'a mut self, walker: &mut Walker<'a>) -> Result<(), Error>;

    /// Name of the struct, used as the config name when validating
    fn struct_name(&self) -> &'static str;

    /// Derive the flags of this struct. See [`parse_struct`].
    fn parse_flags(&mut self, options: Options) -> Result<Vec<Flag<'_>>, Error>
    where
        Self: Field + Sized,
    {
        parse_struct(self, options)
    }

    /// Parse args and env into this struct using clap, through the builder API
    #[cfg(feature = "clap")]
    fn flags_builder(&mut self) -> FlagsBuilder<'_, Self>
    where
        Self: Field + Sized,
    {
        FlagsBuilder::new(self)
    }
}
