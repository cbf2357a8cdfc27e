use crate::{Value, ValueError};

/// Wraps a value so that every `set` is checked by a validation function first.
///
/// A rejected input never reaches the inner value. Everything else is passed through.
pub struct ValidateValue<'a> {
    value: Option<Box<dyn Value + 'a>>,
    validate: Option<Box<dyn Fn(&str) -> Result<(), String> + 'a>>,
}

impl<'a> ValidateValue<'a> {
    /// Wrap `value`, checking input with `validate`
    pub fn new(
        value: Box<dyn Value + 'a>,
        validate: impl Fn(&str) -> Result<(), String> + 'a,
    ) -> Self {
        Self {
            value: Some(value),
            validate: Some(Box::new(validate)),
        }
    }

    /// A wrapper with nothing inside, which renders as an empty string
    pub fn empty() -> Self {
        Self {
            value: None,
            validate: None,
        }
    }

    /// Replace the validation function, or remove it
    pub fn set_validate(&mut self, validate: Option<Box<dyn Fn(&str) -> Result<(), String> + 'a>>) {
        self.validate = validate;
    }
}

impl Value for ValidateValue<'_> {
    fn set(&mut self, raw: &str) -> Result<(), ValueError> {
        if let Some(validate) = self.validate.as_ref() {
            validate(raw).map_err(ValueError::Validation)?;
        }
        match self.value.as_mut() {
            Some(value) => value.set(raw),
            None => Err(ValueError::Unbound),
        }
    }

    fn render(&self) -> String {
        self.value
            .as_ref()
            .map(|value| value.render())
            .unwrap_or_default()
    }

    fn type_name(&self) -> String {
        self.value
            .as_ref()
            .map(|value| value.type_name())
            .unwrap_or_default()
    }

    fn is_bool_flag(&self) -> bool {
        self.value.as_ref().is_some_and(|value| value.is_bool_flag())
    }

    fn is_cumulative(&self) -> bool {
        self.value.as_ref().is_some_and(|value| value.is_cumulative())
    }
}
