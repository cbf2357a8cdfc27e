use std::fmt;
use thiserror::Error;

/// An error which occurs while deriving flags from a struct, or while applying parsed args and
/// env to the derived flags.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The root object passed to a walk was absent
    #[error("object cannot be nil")]
    NilObject,

    /// The root object passed to a walk is a value rather than a struct
    #[error("object must be a pointer to struct or interface, found {0}")]
    NotStruct(&'static str),

    /// Two derived flags claim the same switch
    #[error("flag switch `{0}` is defined more than once")]
    DuplicateFlag(String),

    /// One or more values supplied for flags could not be set
    #[error("{}", DisplayInvalidValues(.0))]
    InvalidValues(Vec<InvalidValue>),

    /// An env var bound to a flag was present, but not valid UTF-8
    #[error("env var `{name}` (for `--{flag}`) is not valid UTF-8")]
    InvalidUtf8Env {
        /// Env var name
        name: String,
        /// Flag the env var is bound to
        flag: String,
    },

    /// Error produced by clap itself (help, version, unknown argument, ...)
    #[cfg(feature = "clap")]
    #[error(transparent)]
    Clap(#[from] clap::Error),
}

/// A value which was rejected by `Value::set` during parsing
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InvalidValue {
    /// The flag the value was meant for
    pub flag: String,
    /// Where the value came from
    pub origin: ValueOrigin,
    /// The rejected input
    pub value: String,
    /// Why it was rejected
    pub error: ValueError,
}

/// Where a value handed to a flag came from
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ValueOrigin {
    /// Command line arguments
    Args,
    /// The named env var
    Env(String),
}

impl fmt::Display for InvalidValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.origin {
            ValueOrigin::Args => write!(f, "when parsing '--{}' value", self.flag)?,
            ValueOrigin::Env(name) => write!(f, "when parsing env '{name}' value")?,
        }
        write!(f, " '{}': {}", self.value, self.error)
    }
}

// Display helper for the aggregated variant
struct DisplayInvalidValues<'a>(&'a [InvalidValue]);

impl fmt::Display for DisplayInvalidValues<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let [single] = self.0 {
            return write!(f, "Invalid value\n  {single}");
        }
        write!(f, "Invalid values")?;
        for invalid in self.0 {
            write!(f, "\n  {invalid}")?;
        }
        Ok(())
    }
}

/// An error returned by `Value::set`. The value is left unchanged when this happens.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum ValueError {
    /// The input could not be parsed as the value's kind
    #[error("parsing {input:?} as {kind}: {reason}")]
    Parse {
        /// Type tag of the value
        kind: &'static str,
        /// The rejected input
        input: String,
        /// What went wrong
        reason: String,
    },

    /// A validation function rejected the input
    #[error("{0}")]
    Validation(String),

    /// The value is a validation wrapper with nothing inside
    #[error("value is not bound to any storage")]
    Unbound,
}

impl ValueError {
    pub(crate) fn parse(kind: &'static str, input: &str, reason: impl fmt::Display) -> Self {
        Self::Parse {
            kind,
            input: input.to_owned(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(feature = "clap")]
impl Error {
    /// Convert to a clap error, so that it can be printed the way clap prints errors
    pub fn into_clap_error(self) -> clap::Error {
        use clap::error::ErrorKind;

        let kind = match self {
            Self::Clap(err) => return err,
            Self::InvalidValues(_) => ErrorKind::InvalidValue,
            Self::InvalidUtf8Env { .. } => ErrorKind::InvalidUtf8,
            Self::DuplicateFlag(_) => ErrorKind::ArgumentConflict,
            // Internal errors, the struct itself is not usable
            Self::NilObject | Self::NotStruct(_) => ErrorKind::UnknownArgument,
        };
        clap::Error::raw(kind, format!("{self}\n"))
    }

    /// Print formatted error text to stderr or stdout as appropriate (as clap does)
    pub fn print(self) -> Result<(), std::io::Error> {
        self.into_clap_error().print()
    }

    /// Exit the program, printing an error message to stderr or stdout as appropriate (as clap
    /// does)
    pub fn exit(self) -> ! {
        self.into_clap_error().exit()
    }
}
