use crate::{parse_env, parse_struct, Error, Field, Options, ParsedEnv, Parser, ParserConfig};
use std::{ffi::OsString, path::Path};

/// A builder which collects flag value sources for a parse into a config struct.
///
/// Use any of [`FlagsBuilder::args`], [`FlagsBuilder::env`] to set sources, and
/// [`FlagsBuilder::options`], [`FlagsBuilder::about`], [`FlagsBuilder::name`] to adjust the
/// derived flags and the generated help. Then call one of [`FlagsBuilder::parse`] or
/// [`FlagsBuilder::try_parse`].
///
/// If `args` is not called, the default source is `std::env::args_os`.
/// If `env` is not called, the default source is `std::env::vars_os`.
///
/// Fields which receive no value from args or env keep the value they had before the parse.
pub struct FlagsBuilder<'a, S>
where
    S: Field,
{
    target: &'a mut S,
    options: Options,
    about: Option<String>,
    name: Option<String>,
    no_help_flag: bool,
    collected_env: ParsedEnv,
    inited_env: bool,
    collected_args: Vec<OsString>,
    inited_args: bool,
}

impl<'a, S> FlagsBuilder<'a, S>
where
    S: Field,
{
    /// Start a parse into `target`
    pub fn new(target: &'a mut S) -> Self {
        Self {
            target,
            options: Options::default(),
            about: None,
            name: None,
            no_help_flag: false,
            collected_env: Default::default(),
            inited_env: false,
            collected_args: Default::default(),
            inited_args: false,
        }
    }

    /// Set the CLI args used in this parse. The first one is the program name.
    pub fn args<T>(mut self, args: impl IntoIterator<Item = T>) -> Self
    where
        T: Into<OsString>,
    {
        assert!(!self.inited_args, "Cannot set args twice");
        self.collected_args = args.into_iter().map(Into::into).collect();
        self.inited_args = true;
        self
    }

    /// Set the env vars used in this parse
    pub fn env<K, V>(mut self, env: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<OsString>,
        V: Into<OsString>,
    {
        assert!(!self.inited_env, "Cannot set env twice");
        self.collected_env = parse_env(env);
        self.inited_env = true;
        self
    }

    /// Set the options used to derive flags
    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Set the about text shown at the top of help
    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    /// Set the program name shown in help. Defaults to the file name of the first arg.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Don't generate `--help` and `-h`, leaving them free for flags
    pub fn no_help_flag(mut self) -> Self {
        self.no_help_flag = true;
        self
    }

    /// Parse based on supplied sources (or falling back to defaults), and exiting the program
    /// with errors logged to stderr if parsing fails.
    pub fn parse(self) {
        if let Err(err) = self.try_parse() {
            err.exit()
        }
    }

    /// Try to parse based on supplied sources (or falling back to defaults), returning an error
    /// if parsing fails.
    ///
    /// Values which were accepted are kept even if others were rejected.
    pub fn try_parse(self) -> Result<(), Error> {
        let (target, options, parser_config, parsed_env, args) = self.into_parts();

        let flags = parse_struct(target, options)?;
        let mut parser = Parser::new(parser_config, flags, &parsed_env)?;
        parser.parse(args, &parsed_env)
    }

    // Split self up, after setting defaults from std::env::* and such if anything was not inited
    fn into_parts(mut self) -> (&'a mut S, Options, ParserConfig, ParsedEnv, Vec<OsString>) {
        if !self.inited_args {
            self = self.args(std::env::args_os());
        }
        if !self.inited_env {
            self = self.env(std::env::vars_os());
        }

        let name = self.name.unwrap_or_else(|| {
            self.collected_args
                .first()
                .and_then(|arg0| Path::new(arg0).file_name())
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default()
        });
        let parser_config = ParserConfig {
            about: self.about,
            name,
            no_help_flag: self.no_help_flag,
        };

        (
            self.target,
            self.options,
            parser_config,
            self.collected_env,
            self.collected_args,
        )
    }
}
