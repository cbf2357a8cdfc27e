//! Field metadata recorded by `#[derive(Flags)]`, and the directive grammars read out of it.
//!
//! The naming directive (tag key `flag` by default) looks like `[~]NAME[ SHORT][,hidden][,deprecated]`,
//! or `-` to leave the field out. The env directive (tag key `env` by default) is `-`, empty, or
//! `[~]VALUE`.

/// Static description of one struct field, generated by `#[derive(Flags)]`
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldInfo {
    /// The field identifier
    pub name: &'static str,
    /// The field type, as written in the struct declaration
    pub type_name: &'static str,
    /// `key = "value"` pairs from `#[tag(...)]` attributes, in order
    pub tags: &'static [(&'static str, &'static str)],
    /// The doc comment on the field, if any
    pub doc: Option<&'static str>,
    /// True if the field was marked `#[tag(embedded)]`
    pub embedded: bool,
}

impl FieldInfo {
    /// Look up a tag by key. If a key repeats, the first value wins.
    pub fn tag(&self, key: &str) -> Option<&'static str> {
        self.tags
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| *value)
    }
}

/// A parsed naming directive
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FlagDirective<'s> {
    /// Explicit flag name, if one was given
    pub name: Option<&'s str>,
    /// Short alias
    pub short: Option<&'s str>,
    /// The name was given as `~NAME`, so no prefix is applied
    pub ignore_prefix: bool,
    /// `hidden` option
    pub hidden: bool,
    /// `deprecated` option
    pub deprecated: bool,
}

impl<'s> FlagDirective<'s> {
    /// Parse a naming directive. Returns `None` when the directive is `-`, meaning no flag at all.
    pub fn parse(src: &'s str) -> Option<Self> {
        let mut tokens = src.split(',');
        let head = tokens.next().unwrap_or_default();
        if head == "-" {
            return None;
        }

        let mut directive = Self::default();
        for option in tokens {
            match option {
                "hidden" => directive.hidden = true,
                "deprecated" => directive.deprecated = true,
                _ => {}
            }
        }

        if head.is_empty() {
            return Some(directive);
        }

        let mut words = head.split(' ');
        let mut name = words.next().unwrap_or_default();
        directive.short = words.next().filter(|short| !short.is_empty());

        if let Some(stripped) = name.strip_prefix('~') {
            name = stripped;
            directive.ignore_prefix = true;
        }
        directive.name = Some(name).filter(|name| !name.is_empty());

        Some(directive)
    }
}

/// A parsed environment directive
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EnvDirective<'s> {
    /// `-`: the flag is not read from the environment
    Suppressed,
    /// Empty or absent: derive the name from the flag name
    Derived,
    /// `~NAME`: used as is, no prefixes
    Verbatim(&'s str),
    /// `NAME`: appended to the env form of the active flag prefix
    Suffix(&'s str),
}

impl<'s> EnvDirective<'s> {
    /// Parse an env directive. Only the part before the first comma is significant.
    pub fn parse(src: &'s str) -> Self {
        let head = src.split(',').next().unwrap_or_default();
        match head {
            "-" => Self::Suppressed,
            "" => Self::Derived,
            _ => match head.strip_prefix('~') {
                Some(verbatim) => Self::Verbatim(verbatim),
                None => Self::Suffix(head),
            },
        }
    }
}
