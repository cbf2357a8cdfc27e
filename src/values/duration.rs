use crate::{Value, ValueError};
use std::time::Duration;

impl Value for Duration {
    fn set(&mut self, raw: &str) -> Result<(), ValueError> {
        *self = humantime::parse_duration(raw).map_err(|err| ValueError::parse("duration", raw, err))?;
        Ok(())
    }
    fn render(&self) -> String {
        humantime::format_duration(*self).to_string()
    }
    fn type_name(&self) -> String {
        "duration".into()
    }
}
