use crate::{Bound, Field, Value, ValueError};
use regex::Regex;

/// A compiled pattern, stored in an `Option<Regex>` field
pub struct RegexpValue<'a> {
    target: &'a mut Option<Regex>,
}

impl<'a> RegexpValue<'a> {
    /// Wrap the storage
    pub fn new(target: &'a mut Option<Regex>) -> Self {
        Self { target }
    }
}

impl Value for RegexpValue<'_> {
    fn set(&mut self, raw: &str) -> Result<(), ValueError> {
        let compiled = Regex::new(raw).map_err(|err| ValueError::parse("regexp", raw, err))?;
        *self.target = Some(compiled);
        Ok(())
    }
    fn render(&self) -> String {
        self.target
            .as_ref()
            .map(|re| re.as_str().to_owned())
            .unwrap_or_default()
    }
    fn type_name(&self) -> String {
        "regexp".into()
    }
}

impl Field for Option<Regex> {
    fn bind(&mut self) -> Bound<'_> {
        if self.is_none() {
            tracing::debug!("materializing absent regexp field with the empty pattern");
            *self = Regex::new("").ok();
        }
        Bound::Value(Box::new(RegexpValue::new(self)))
    }
}
