use crate::{Error, Flag, InvalidValue, ParseType, ParsedEnv, ValueOrigin};
use clap::{parser::ValueSource, ArgMatches};
use tracing::{debug, warn};

// Everything needed to decide which raw strings a flag receives: clap's view of the CLI args,
// and the env. Args shadow env. A flag with neither keeps the value its field had when it was
// derived.
pub(crate) struct FlagContext<'a> {
    matches: &'a ArgMatches,
    env: &'a ParsedEnv,
}

impl<'a> FlagContext<'a> {
    pub(crate) fn new(matches: &'a ArgMatches, env: &'a ParsedEnv) -> Self {
        Self { matches, env }
    }

    // Raw strings given for this flag on the command line, one per value, or None if it did not
    // appear. A counted switch produces one empty string per occurrence.
    fn args_values(&self, flag: &Flag<'_>) -> Option<Vec<String>> {
        let id = flag.name.as_str();
        if self.matches.value_source(id) != Some(ValueSource::CommandLine) {
            return None;
        }
        let values = match flag.parse_type() {
            ParseType::Count => vec![String::new(); usize::from(self.matches.get_count(id))],
            ParseType::Switch | ParseType::Parameter | ParseType::Repeat => self
                .matches
                .get_many::<String>(id)
                .map(|vals| vals.cloned().collect())
                .unwrap_or_default(),
        };
        Some(values)
    }

    // The env var bound to this flag, and its value, if it is set
    fn env_value(&self, flag: &Flag<'_>) -> Result<Option<(String, &'a str)>, Error> {
        let Some(name) = flag.env_name.as_deref() else {
            return Ok(None);
        };
        let Some(val) = self.env.get(name) else {
            return Ok(None);
        };
        let val = val.to_str().ok_or_else(|| Error::InvalidUtf8Env {
            name: name.to_owned(),
            flag: flag.name.clone(),
        })?;
        Ok(Some((name.to_owned(), val)))
    }

    /// Feed this flag the values it received, if any.
    ///
    /// Values which the flag rejects are pushed to `errors`. Only a malformed env var is an
    /// immediate error.
    pub(crate) fn apply(
        &self,
        flag: &mut Flag<'_>,
        errors: &mut Vec<InvalidValue>,
    ) -> Result<(), Error> {
        let (origin, values) = if let Some(values) = self.args_values(flag) {
            (ValueOrigin::Args, values)
        } else if let Some((name, val)) = self.env_value(flag)? {
            debug!(flag = %flag.name, env = %name, "applying env var");
            (ValueOrigin::Env(name), vec![val.to_owned()])
        } else {
            return Ok(());
        };

        if flag.deprecated {
            warn!(flag = %flag.name, "flag is deprecated");
        }

        let rejected = values
            .into_iter()
            .find_map(|value| flag.value.set(&value).err().map(|error| (value, error)));
        if let Some((value, error)) = rejected {
            errors.push(InvalidValue {
                flag: flag.name.clone(),
                origin,
                value,
                error,
            });
        }
        Ok(())
    }
}
