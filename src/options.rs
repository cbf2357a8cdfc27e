use crate::FieldInfo;
use std::{fmt, sync::Arc};

/// Where a value being validated is going: the field, the flag derived from it, and the struct
/// the walk started from.
#[derive(Clone, Debug)]
pub struct FieldOrigin {
    /// The field the flag was derived from
    pub field: &'static FieldInfo,
    /// The full flag name, prefixes included
    pub flag_name: String,
    /// Type name of the root config struct
    pub config: &'static str,
}

/// A validation function, see [`Options::validator`].
///
/// It gets the raw input and the origin of the flag, and returns a message when the input is
/// rejected.
pub type ValidateFn = Arc<dyn Fn(&str, &FieldOrigin) -> Result<(), String> + Send + Sync>;

/// Knobs for deriving flags from a struct.
///
/// ```
/// let options = structflags::Options::default()
///     .env_prefix("APP_")
///     .flag_divider(".");
/// ```
#[derive(Clone)]
pub struct Options {
    pub(crate) desc_tag: String,
    pub(crate) flag_tag: String,
    pub(crate) env_tag: String,
    pub(crate) prefix: String,
    pub(crate) env_prefix: String,
    pub(crate) flag_divider: String,
    pub(crate) env_divider: String,
    pub(crate) validator: Option<ValidateFn>,
    pub(crate) flatten: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            desc_tag: "desc".into(),
            flag_tag: "flag".into(),
            env_tag: "env".into(),
            prefix: String::new(),
            env_prefix: String::new(),
            flag_divider: "-".into(),
            env_divider: "_".into(),
            validator: None,
            flatten: true,
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("desc_tag", &self.desc_tag)
            .field("flag_tag", &self.flag_tag)
            .field("env_tag", &self.env_tag)
            .field("prefix", &self.prefix)
            .field("env_prefix", &self.env_prefix)
            .field("flag_divider", &self.flag_divider)
            .field("env_divider", &self.env_divider)
            .field("validator", &self.validator.as_ref().map(|_| "<fn>"))
            .field("flatten", &self.flatten)
            .finish()
    }
}

impl Options {
    /// Tag key holding flag descriptions. Default `desc`.
    pub fn desc_tag(mut self, val: impl Into<String>) -> Self {
        self.desc_tag = val.into();
        self
    }

    /// Tag key holding the naming directive. Default `flag`.
    pub fn flag_tag(mut self, val: impl Into<String>) -> Self {
        self.flag_tag = val.into();
        self
    }

    /// Tag key holding the env directive. Default `env`.
    pub fn env_tag(mut self, val: impl Into<String>) -> Self {
        self.env_tag = val.into();
        self
    }

    /// Prefix for every flag name, unless the name is marked with `~`
    pub fn prefix(mut self, val: impl Into<String>) -> Self {
        self.prefix = val.into();
        self
    }

    /// Prefix for every env var name, unless the env directive is marked with `~`
    pub fn env_prefix(mut self, val: impl Into<String>) -> Self {
        self.env_prefix = val.into();
        self
    }

    /// Divider between words of flag names. Default `-`.
    pub fn flag_divider(mut self, val: impl Into<String>) -> Self {
        self.flag_divider = val.into();
        self
    }

    /// Divider between words of env var names. Default `_`.
    pub fn env_divider(mut self, val: impl Into<String>) -> Self {
        self.env_divider = val.into();
        self
    }

    /// Check every value before it is set
    pub fn validator(
        mut self,
        val: impl Fn(&str, &FieldOrigin) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        self.validator = Some(Arc::new(val));
        self
    }

    /// Whether fields of `#[tag(embedded)]` structs are promoted without a name prefix.
    /// Default `true`.
    pub fn flatten(mut self, val: bool) -> Self {
        self.flatten = val;
        self
    }
}
