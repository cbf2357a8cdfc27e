use crate::Value;
use std::fmt;

/// How a flag consumes its occurrences on the command line.
///
/// This is decided entirely by the flag's value, see [`Value::is_bool_flag`] and
/// [`Value::is_cumulative`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum ParseType {
    /// A switch with no argument, which is either present or absent
    Switch,
    /// A switch with no argument, which counts its occurrences
    Count,
    /// A switch with one argument, the last occurrence wins
    Parameter,
    /// A switch with one argument, which may appear many times
    Repeat,
}

impl fmt::Display for ParseType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Switch => write!(f, "Switch"),
            Self::Count => write!(f, "Count"),
            Self::Parameter => write!(f, "Parameter"),
            Self::Repeat => write!(f, "Repeat"),
        }
    }
}

/// One flag derived from one field of a config struct.
///
/// `value` writes through to the field the flag was derived from, so setting it is how a parser
/// fills in the config.
pub struct Flag<'a> {
    /// Flag name, with any prefixes applied
    pub name: String,
    /// Short alias, if any
    pub short: Option<String>,
    /// Env var the flag may be read from, if any
    pub env_name: Option<String>,
    /// Description
    pub usage: String,
    /// The value of the field when the flag was derived, rendered
    pub def_value: String,
    /// Leave the flag out of help text
    pub hidden: bool,
    /// Warn when the flag is used
    pub deprecated: bool,
    /// The field itself
    pub value: Box<dyn Value + 'a>,
}

impl Flag<'_> {
    /// Parse type implied by the value
    pub fn parse_type(&self) -> ParseType {
        match (self.value.is_bool_flag(), self.value.is_cumulative()) {
            (true, true) => ParseType::Count,
            (true, false) => ParseType::Switch,
            (false, true) => ParseType::Repeat,
            (false, false) => ParseType::Parameter,
        }
    }

    // Desired output is like:
    //  -x, --xyz <int64>
    //          This is the description.
    //          [env: XYZ]
    //          [default: 123]
    /// Print a help entry for this flag
    pub fn print(&self, stream: &mut impl fmt::Write) -> fmt::Result {
        // One-char shorts line up in their own column, longer ones go after the name
        let (short_col, long_short) = match self.short.as_deref() {
            Some(short) if short.chars().count() == 1 => (Some(short), None),
            other => (None, other),
        };
        match short_col {
            Some(short) => write!(stream, "  -{short}, ")?,
            None => write!(stream, "      ")?,
        }
        write!(stream, "--{}", self.name)?;
        if let Some(short) = long_short {
            write!(stream, ", --{short}")?;
        }
        if matches!(self.parse_type(), ParseType::Parameter | ParseType::Repeat) {
            write!(stream, " <{}>", self.value.type_name())?;
        }
        writeln!(stream)?;
        if !self.usage.is_empty() {
            writeln!(stream, "          {}", self.usage.replace('\n', "\n          "))?;
        }
        if let Some(name) = self.env_name.as_deref() {
            writeln!(stream, "          [env: {name}]")?;
        }
        if !self.def_value.is_empty() {
            writeln!(stream, "          [default: {}]", self.def_value)?;
        }
        if self.deprecated {
            writeln!(stream, "          [deprecated]")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Flag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flag")
            .field("name", &self.name)
            .field("short", &self.short)
            .field("env_name", &self.env_name)
            .field("usage", &self.usage)
            .field("def_value", &self.def_value)
            .field("hidden", &self.hidden)
            .field("deprecated", &self.deprecated)
            .field("value", &self.value.render())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Counter;

    fn flag<'a>(name: &str, value: Box<dyn Value + 'a>) -> Flag<'a> {
        let def_value = value.render();
        Flag {
            name: name.into(),
            short: None,
            env_name: None,
            usage: String::new(),
            def_value,
            hidden: false,
            deprecated: false,
            value,
        }
    }

    #[test]
    fn test_parse_type() {
        let mut b = false;
        let mut c = Counter::default();
        let mut s = String::new();
        let mut list: Vec<u8> = vec![];
        assert_eq!(flag("b", Box::new(&mut b)).parse_type(), ParseType::Switch);
        assert_eq!(flag("c", Box::new(&mut c)).parse_type(), ParseType::Count);
        assert_eq!(flag("s", Box::new(&mut s)).parse_type(), ParseType::Parameter);
        assert_eq!(
            flag("l", Box::new(crate::SliceValue::new(&mut list))).parse_type(),
            ParseType::Repeat
        );
    }

    #[test]
    fn test_print() {
        let mut port = 8080u16;
        let mut f = flag("listen-port", Box::new(&mut port));
        f.short = Some("p".into());
        f.env_name = Some("LISTEN_PORT".into());
        f.usage = "Port to listen on".into();
        f.deprecated = true;

        let mut buf = String::new();
        f.print(&mut buf).unwrap();
        assert_eq!(
            buf,
            "  -p, --listen-port <uint16>
          Port to listen on
          [env: LISTEN_PORT]
          [default: 8080]
          [deprecated]
"
        );

        let mut verbose = false;
        let mut f = flag("verbose", Box::new(&mut verbose));
        f.short = Some("vv".into());
        let mut buf = String::new();
        f.print(&mut buf).unwrap();
        assert_eq!(buf, "      --verbose, --vv\n          [default: false]\n");
    }
}
