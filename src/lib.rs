//! Derive a flat list of named, typed, documented flags from a config struct.
//!
//! Put `#[derive(Flags)]` on a struct, and every public field becomes a [`Flag`]: a name derived
//! from the field name, an optional short alias, an env var name, a description, a rendered
//! default, and a [`Value`] which writes through to the field. Nested structs are walked with
//! their field name as a prefix.
//!
//! ```
//! use std::time::Duration;
//! use structflags::{Flags, Options};
//!
//! #[derive(Default, Flags)]
//! struct Http {
//!     #[tag(desc = "Address to listen on")]
//!     pub addr: String,
//!     pub read_timeout: Duration,
//! }
//!
//! #[derive(Default, Flags)]
//! struct Config {
//!     pub http: Http,
//!     #[tag(flag = "verbose v")]
//!     pub verbose: bool,
//! }
//!
//! let mut config = Config::default();
//! let mut flags = config.parse_flags(Options::default().env_prefix("APP_")).unwrap();
//! let names: Vec<_> = flags.iter().map(|f| f.name.as_str()).collect();
//! assert_eq!(names, ["http-addr", "http-read-timeout", "verbose"]);
//! assert_eq!(flags[1].env_name.as_deref(), Some("APP_HTTP_READ_TIMEOUT"));
//!
//! flags[1].value.set("1m 30s").unwrap();
//! drop(flags);
//! assert_eq!(config.http.read_timeout, Duration::from_secs(90));
//! ```
//!
//! With the `clap` feature (on by default), [`Flags::flags_builder`] parses args and env into the
//! struct directly.
#![deny(unsafe_code)]
#![deny(missing_docs)]

// The derive refers to `::structflags`, including in this crate's own tests
extern crate self as structflags;

pub mod camelcase;
pub mod converters;
mod error;
mod flag;
mod options;
mod str_to_bool;
pub mod tag;
mod traits;
mod validate;
pub mod validator;
mod value;
mod values;
mod walker;

#[cfg(feature = "clap")]
mod builder;
#[cfg(feature = "clap")]
mod context;
#[cfg(feature = "clap")]
mod parse_env;
#[cfg(feature = "clap")]
mod parser;

pub use error::{Error, InvalidValue, ValueError, ValueOrigin};
pub use flag::{Flag, ParseType};
pub use options::{FieldOrigin, Options, ValidateFn};
pub use str_to_bool::str_to_bool;
pub use tag::FieldInfo;
pub use traits::Flags;
pub use validate::ValidateValue;
pub use value::{Bound, Field, Value};
pub use values::{Counter, MapStorage, MapValue, RegexpValue, SliceValue};
pub use walker::{parse_struct, Target, Walker};

#[cfg(feature = "clap")]
pub use builder::FlagsBuilder;
#[cfg(feature = "clap")]
pub use parse_env::{parse_env, ParsedEnv};
#[cfg(feature = "clap")]
pub use parser::{Parser, ParserConfig};

// Used by generated code
#[doc(hidden)]
pub use walker::SkipReason;
#[doc(hidden)]
pub mod __private {
    pub use crate::value::{Absent, AbsentDefault, AbsentNone};
    pub use crate::walker::{Dispatch, DispatchField, DispatchUnsupported};
}

pub use structflags_derive::Flags;
