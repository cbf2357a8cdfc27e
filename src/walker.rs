use crate::{
    converters::{field_to_flag, flag_to_env},
    tag::{EnvDirective, FlagDirective},
    Bound, Error, Field, FieldInfo, FieldOrigin, Flag, Options, ValidateValue, Value,
};
use tracing::trace;

/// Why the walker passed over a field without looking at its value
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SkipReason {
    /// The field is private
    Unexported,
    /// The field's type can't be a flag, e.g. a function pointer
    Unsupported,
}

/// Collects flags while `Flags::walk` reports the fields of a struct.
///
/// Each nesting level gets its own walker with its own copy of the options, whose prefix was
/// extended by the parent.
pub struct Walker<'a> {
    options: Options,
    config: &'static str,
    flags: Vec<Flag<'a>>,
}

impl<'a> Walker<'a> {
    pub(crate) fn new(options: Options, config: &'static str) -> Self {
        Self {
            options,
            config,
            flags: Vec::new(),
        }
    }

    pub(crate) fn into_flags(self) -> Vec<Flag<'a>> {
        self.flags
    }

    /// Report a field. It becomes a flag, or is walked as a nested struct, or is skipped.
    pub fn field(
        &mut self,
        info: &'static FieldInfo,
        field: &'a mut (dyn Field + 'a),
    ) -> Result<(), Error> {
        let Some(directive) = self.directive(info) else {
            return Ok(());
        };
        let opts = &self.options;

        let mut name = directive
            .name
            .map(str::to_owned)
            .unwrap_or_else(|| field_to_flag(info.name, &opts.flag_divider));
        if !directive.ignore_prefix {
            name.insert_str(0, &opts.prefix);
        }
        let env_name = self.env_name(&name, info);
        let usage = info
            .tag(&opts.desc_tag)
            .or(info.doc)
            .unwrap_or_default()
            .to_owned();

        match field.bind() {
            Bound::Value(value) => {
                let value = self.wrap_validator(info, &name, value);
                let def_value = value.render();
                trace!(
                    flag = %name,
                    env = ?env_name,
                    type_name = %value.type_name(),
                    default = %def_value,
                    "derived flag"
                );
                self.flags.push(Flag {
                    name,
                    short: directive.short.map(str::to_owned),
                    env_name,
                    usage,
                    def_value,
                    hidden: directive.hidden,
                    deprecated: directive.deprecated,
                    value,
                });
            }
            Bound::Struct(nested) => {
                let prefix = if info.embedded && opts.flatten {
                    opts.prefix.clone()
                } else {
                    name + &opts.flag_divider
                };
                trace!(
                    field = info.name,
                    nested = nested.struct_name(),
                    prefix = %prefix,
                    "walking nested struct"
                );
                let mut child = Walker::new(opts.clone().prefix(prefix), self.config);
                nested.walk(&mut child)?;
                self.flags.append(&mut child.flags);
            }
            Bound::Unsupported => self.skip(info, SkipReason::Unsupported),
        }
        Ok(())
    }

    /// Report a field whose type can't be a flag. It is skipped.
    #[doc(hidden)]
    pub fn unsupported(&self, info: &'static FieldInfo) {
        if self.directive(info).is_some() {
            self.skip(info, SkipReason::Unsupported);
        }
    }

    /// Report a field which is never turned into a flag
    #[doc(hidden)]
    pub fn skip(&self, info: &'static FieldInfo, reason: SkipReason) {
        trace!(
            field = info.name,
            type_name = info.type_name,
            ?reason,
            "skipping field"
        );
    }

    // None if the field is suppressed with `-`
    fn directive(&self, info: &'static FieldInfo) -> Option<FlagDirective<'static>> {
        let Some(src) = info.tag(&self.options.flag_tag) else {
            return Some(FlagDirective::default());
        };
        let directive = FlagDirective::parse(src);
        if directive.is_none() {
            trace!(field = info.name, "skipping field: naming directive is `-`");
        }
        directive
    }

    fn env_name(&self, flag_name: &str, info: &FieldInfo) -> Option<String> {
        let opts = &self.options;
        let directive = info
            .tag(&opts.env_tag)
            .map(EnvDirective::parse)
            .unwrap_or(EnvDirective::Derived);

        let (mut env, ignore_env_prefix) = match directive {
            EnvDirective::Suppressed => return None,
            EnvDirective::Derived => (
                flag_to_env(flag_name, &opts.flag_divider, &opts.env_divider),
                false,
            ),
            EnvDirective::Verbatim(name) => (name.to_owned(), true),
            EnvDirective::Suffix(name) => (
                flag_to_env(&opts.prefix, &opts.flag_divider, &opts.env_divider) + name,
                false,
            ),
        };
        if env.is_empty() {
            return None;
        }
        if !ignore_env_prefix {
            env.insert_str(0, &opts.env_prefix);
        }
        Some(env)
    }

    fn wrap_validator(
        &self,
        info: &'static FieldInfo,
        flag_name: &str,
        value: Box<dyn Value + 'a>,
    ) -> Box<dyn Value + 'a> {
        let Some(validator) = self.options.validator.clone() else {
            return value;
        };
        let origin = FieldOrigin {
            field: info,
            flag_name: flag_name.to_owned(),
            config: self.config,
        };
        Box::new(ValidateValue::new(value, move |raw| validator(raw, &origin)))
    }
}

/// Hands a field to [`Walker::field`] if its type implements [`Field`], and to
/// [`Walker::unsupported`] otherwise.
///
/// Generated code calls `(&mut Dispatch::new(field)).__dispatch(walker, info)` with both dispatch
/// traits in scope. Method resolution prefers [`DispatchField`], which only applies to `Field`
/// types, and falls back to [`DispatchUnsupported`] through one more autoref.
#[doc(hidden)]
pub struct Dispatch<'a, T: ?Sized>(Option<&'a mut T>);

impl<'a, T: ?Sized> Dispatch<'a, T> {
    /// Wrap a field borrowed from the struct being walked
    pub fn new(field: &'a mut T) -> Self {
        Self(Some(field))
    }
}

#[doc(hidden)]
pub trait DispatchField<'a> {
    /// Report the wrapped field to the walker
    fn __dispatch(
        &mut self,
        walker: &mut Walker<'a>,
        info: &'static FieldInfo,
    ) -> Result<(), Error>;
}

impl<'a, T: Field + 'a> DispatchField<'a> for Dispatch<'a, T> {
    fn __dispatch(
        &mut self,
        walker: &mut Walker<'a>,
        info: &'static FieldInfo,
    ) -> Result<(), Error> {
        match self.0.take() {
            Some(field) => walker.field(info, field),
            None => Ok(()),
        }
    }
}

#[doc(hidden)]
pub trait DispatchUnsupported<'a> {
    /// Report the wrapped field to the walker
    fn __dispatch(
        &mut self,
        walker: &mut Walker<'a>,
        info: &'static FieldInfo,
    ) -> Result<(), Error>;
}

impl<'a, T: ?Sized> DispatchUnsupported<'a> for &mut Dispatch<'a, T> {
    fn __dispatch(
        &mut self,
        walker: &mut Walker<'a>,
        info: &'static FieldInfo,
    ) -> Result<(), Error> {
        walker.unsupported(info);
        Ok(())
    }
}

/// Something a walk can start from: `&mut T`, or `Option<&mut T>` which may be absent.
pub trait Target<'a> {
    /// The root field, and its type name for error messages
    fn into_root(self) -> Result<(&'a mut (dyn Field + 'a), &'static str), Error>;
}

impl<'a, F: Field + 'a> Target<'a> for &'a mut F {
    fn into_root(self) -> Result<(&'a mut (dyn Field + 'a), &'static str), Error> {
        Ok((self, std::any::type_name::<F>()))
    }
}

impl<'a, F: Field + 'a> Target<'a> for Option<&'a mut F> {
    fn into_root(self) -> Result<(&'a mut (dyn Field + 'a), &'static str), Error> {
        self.ok_or(Error::NilObject)?.into_root()
    }
}

/// Derive the flags of a config struct.
///
/// The returned flags borrow the struct: setting a flag's value sets the field it came from.
/// Absent `Option` fields along the way are filled with defaults, so that they have somewhere to
/// store values.
///
/// Fails with [`Error::NilObject`] if `cfg` is `None`, and [`Error::NotStruct`] if it is a plain
/// value rather than a struct.
pub fn parse_struct<'a, T: Target<'a>>(cfg: T, options: Options) -> Result<Vec<Flag<'a>>, Error> {
    let (root, type_name) = cfg.into_root()?;
    match root.bind() {
        Bound::Struct(config) => {
            let mut walker = Walker::new(options, config.struct_name());
            config.walk(&mut walker)?;
            Ok(walker.into_flags())
        }
        Bound::Value(_) | Bound::Unsupported => Err(Error::NotStruct(type_name)),
    }
}
