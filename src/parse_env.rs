use std::borrow::Cow;
use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};

/// A snapshot of the environment, or of test data standing in for it
#[derive(Clone, Debug, Default)]
pub struct ParsedEnv {
    map: BTreeMap<String, OsString>,
}

impl ParsedEnv {
    /// Get the raw value. Callers decide what to do if it is not valid UTF-8.
    pub fn get(&self, name: &str) -> Option<&OsStr> {
        self.map.get(name).map(OsString::as_os_str)
    }

    /// Get the value as a lossy string, or "" if it's not present.
    /// This is for help text, where a best effort is good enough.
    pub fn get_lossy_or_default(&self, name: &str) -> Cow<'_, str> {
        self.get(name)
            .map(OsStr::to_string_lossy)
            .unwrap_or_default()
    }
}

/// Collect something that looks like `std::env::vars_os` into a searchable container.
///
/// Keys which are not valid UTF-8 are dropped, since no flag can name them. Values are kept as
/// they are, and only checked when a flag reads them.
pub fn parse_env<K, V>(env_vars_os: impl IntoIterator<Item = (K, V)>) -> ParsedEnv
where
    K: Into<OsString>,
    V: Into<OsString>,
{
    ParsedEnv {
        map: env_vars_os
            .into_iter()
            .filter_map(|(key, val)| Some((key.into().into_string().ok()?, val.into())))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env() {
        let env = parse_env([("NAME", "value"), ("EMPTY", "")]);
        assert_eq!(env.get("NAME"), Some(OsStr::new("value")));
        assert_eq!(env.get("EMPTY"), Some(OsStr::new("")));
        assert_eq!(env.get("MISSING"), None);
        assert_eq!(env.get_lossy_or_default("MISSING"), "");
        assert_eq!(env.get_lossy_or_default("NAME"), "value");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8() {
        use std::os::unix::ffi::OsStringExt;

        let bad = OsString::from_vec(vec![0x66, 0x6f, 0x80]);
        let env = parse_env([(bad.clone(), OsString::from("x")), (OsString::from("B"), bad)]);
        assert_eq!(env.map.len(), 1);
        assert!(env.get("B").unwrap().to_str().is_none());
        assert_eq!(env.get_lossy_or_default("B"), "fo\u{FFFD}");
    }
}
