use crate::{context::FlagContext, Error, Flag, ParseType, ParsedEnv};
use clap::{Arg, ArgAction, Command};
use std::{collections::HashSet, ffi::OsString};

/// Top-level parser config
#[derive(Clone, Debug, Default)]
pub struct ParserConfig {
    /// An optional top-level about string
    pub about: Option<String>,
    /// A name that should be used for the binary
    pub name: String,
    /// True if help flags should not be automatically generated
    pub no_help_flag: bool,
}

/// A parser which hands the values found in args and env to a list of derived flags.
///
/// clap only parses the command line here. Env handling, and setting the values, happen
/// afterwards through each flag's [`Value`](crate::Value).
pub struct Parser<'a> {
    flags: Vec<Flag<'a>>,
    command: Command,
}

impl<'a> Parser<'a> {
    /// Build a clap command for the flags.
    /// The env is only used to show current env values in help text.
    pub fn new(
        parser_config: ParserConfig,
        flags: Vec<Flag<'a>>,
        env: &ParsedEnv,
    ) -> Result<Self, Error> {
        let mut command = Command::new(parser_config.name.clone());
        if let Some(about) = parser_config.about.as_ref() {
            command = command.about(about.clone());
        }
        if parser_config.no_help_flag {
            command = command.disable_help_flag(true);
        }

        // Every switch may only be claimed once. clap would panic on a conflict.
        let mut taken = HashSet::<String>::new();
        if !parser_config.no_help_flag {
            taken.insert("--help".into());
            taken.insert("-h".into());
        }

        let mut args = Vec::<Arg>::with_capacity(flags.len());
        for flag in flags.iter() {
            for switch in Self::switches(flag) {
                if !taken.insert(switch.clone()) {
                    return Err(Error::DuplicateFlag(switch));
                }
            }
            args.push(Self::make_arg(env, flag));
        }
        command = command.args(args);
        command.build();

        Ok(Self { flags, command })
    }

    // The switches a flag claims, like `--name` and `-n`
    fn switches(flag: &Flag<'_>) -> Vec<String> {
        let mut switches = vec![format!("--{}", flag.name)];
        match flag.short.as_deref() {
            Some(short) if short.chars().count() == 1 => switches.push(format!("-{short}")),
            Some(short) => switches.push(format!("--{short}")),
            None => {}
        }
        switches
    }

    fn make_arg(env: &ParsedEnv, flag: &Flag<'_>) -> Arg {
        let mut arg = Arg::new(flag.name.clone())
            .long(flag.name.clone())
            .required(false)
            .hide(flag.hidden);

        // One char shorts are real short forms, anything longer is an alias of the long form
        if let Some(short) = flag.short.as_deref() {
            let mut chars = short.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => arg = arg.short(c),
                _ => arg = arg.visible_alias(short.to_owned()),
            }
        }

        // Help text is the usage, then env, default and deprecation notes
        let mut help_text = flag.usage.clone();
        if let Some(env_name) = flag.env_name.as_deref() {
            let cur_val = env.get_lossy_or_default(env_name);
            help_text += &format!("\n[env {env_name}={cur_val}]");
        }
        if !flag.def_value.is_empty() {
            help_text += &format!("\n[default: {}]", flag.def_value);
        }
        if flag.deprecated {
            help_text += "\n[deprecated]";
        }
        let help_text = help_text.trim_start_matches('\n').to_owned();
        if !help_text.is_empty() {
            arg = arg.help(help_text);
        }

        let type_name = flag.value.type_name();
        let numeric = ["int", "uint", "float"]
            .iter()
            .any(|prefix| type_name.starts_with(prefix));

        match flag.parse_type() {
            ParseType::Count => arg.action(ArgAction::Count),
            // `--flag` means true, `--flag=false` is also accepted
            ParseType::Switch => arg
                .action(ArgAction::Set)
                .num_args(0..=1)
                .require_equals(true)
                .default_missing_value("true")
                .value_name(type_name),
            ParseType::Parameter => arg
                .action(ArgAction::Set)
                .allow_negative_numbers(numeric)
                .value_name(type_name),
            ParseType::Repeat => arg
                .action(ArgAction::Append)
                .allow_negative_numbers(numeric)
                .value_name(type_name),
        }
    }

    /// Get command associated to this parser
    pub fn get_command(&self) -> &Command {
        &self.command
    }

    /// The flags this parser feeds
    pub fn flags(&self) -> &[Flag<'a>] {
        &self.flags
    }

    /// Parse from raw os args (or something that looks like std::env::args_os but could be test
    /// data), and set every flag which received a value from args or env.
    ///
    /// All rejected values are reported together.
    pub fn parse<T>(
        &mut self,
        args_os: impl IntoIterator<Item = T>,
        env: &ParsedEnv,
    ) -> Result<(), Error>
    where
        T: Into<OsString> + Clone,
    {
        let matches = self.command.clone().try_get_matches_from(args_os)?;
        let context = FlagContext::new(&matches, env);

        let mut errors = Vec::new();
        for flag in self.flags.iter_mut() {
            context.apply(flag, &mut errors)?;
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidValues(errors))
        }
    }

    /// Help as clap renders it, used by tests
    #[doc(hidden)]
    pub fn render_clap_help(&self) -> String {
        let mut command = self.command.clone();
        command.set_bin_name(".");
        command.render_help().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_env, Counter, Options, Flags};
    use assert_matches::assert_matches;

    #[derive(Default, Flags)]
    struct Cfg {
        #[tag(flag = "name n", desc = "Who to greet")]
        pub name: String,
        #[tag(flag = "verbose v")]
        pub verbose: Counter,
        pub dry_run: bool,
        #[tag(env = "~RETRIES")]
        pub retries: i32,
        pub tags: Vec<String>,
    }

    fn config() -> ParserConfig {
        ParserConfig {
            name: "test".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_args_shadow_env() {
        let mut cfg = Cfg::default();
        let env = parse_env([("NAME", "from-env"), ("RETRIES", "4"), ("DRY_RUN", "yes")]);
        {
            let flags = cfg.parse_flags(Options::default()).unwrap();
            let mut parser = Parser::new(config(), flags, &env).unwrap();
            parser
                .parse(
                    ["test", "-n", "from-args", "-vvv", "--tags", "a,b", "--tags=c", "--retries", "-2"],
                    &env,
                )
                .unwrap();
        }
        assert_eq!(cfg.name, "from-args");
        assert_eq!(cfg.verbose, Counter(3));
        assert!(cfg.dry_run);
        assert_eq!(cfg.retries, -2);
        assert_eq!(cfg.tags, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_switch_with_explicit_value() {
        let mut cfg = Cfg {
            dry_run: true,
            ..Default::default()
        };
        let env = ParsedEnv::default();
        {
            let flags = cfg.parse_flags(Options::default()).unwrap();
            let mut parser = Parser::new(config(), flags, &env).unwrap();
            parser.parse(["test", "--dry-run=false"], &env).unwrap();
        }
        assert!(!cfg.dry_run);
    }

    #[test]
    fn test_errors_are_aggregated() {
        let mut cfg = Cfg::default();
        let env = parse_env([("RETRIES", "many")]);
        let flags = cfg.parse_flags(Options::default()).unwrap();
        let mut parser = Parser::new(config(), flags, &env).unwrap();
        let err = parser.parse(["test", "-v", "--dry-run=maybe"], &env).unwrap_err();
        assert_matches!(&err, Error::InvalidValues(errs) if errs.len() == 2);
    }

    #[test]
    fn test_duplicate_switch() {
        #[derive(Default, Flags)]
        struct Dup {
            #[tag(flag = "one x")]
            pub a: String,
            #[tag(flag = "two x")]
            pub b: String,
        }
        let mut dup = Dup::default();
        let flags = dup.parse_flags(Options::default()).unwrap();
        let result = Parser::new(config(), flags, &ParsedEnv::default());
        assert_matches!(result.err(), Some(Error::DuplicateFlag(switch)) if switch == "-x");
    }

    #[test]
    fn test_help_text() {
        let mut cfg = Cfg::default();
        let env = parse_env([("RETRIES", "7")]);
        let flags = cfg.parse_flags(Options::default()).unwrap();
        let parser = Parser::new(config(), flags, &env).unwrap();
        let help = parser.render_clap_help();
        assert!(help.contains("Who to greet"), "{help}");
        assert!(help.contains("[env RETRIES=7]"), "{help}");
        assert!(help.contains("[env NAME=]"), "{help}");
        assert!(help.contains("[default: 0]"), "{help}");
    }
}
