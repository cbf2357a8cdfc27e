use super::escape::{escape, split_unescaped, unescape};
use crate::{Bound, Field, Value, ValueError};

/// A list flag backed by a `Vec<T>`.
///
/// Each occurrence takes a comma separated list, optionally in brackets (`[a,b]`). The first
/// occurrence replaces the default contents, later ones append. A backslash escapes the next
/// char, so `a\,b` is one element.
pub struct SliceValue<'a, T> {
    target: &'a mut Vec<T>,
    changed: bool,
}

impl<'a, T> SliceValue<'a, T> {
    /// Wrap the storage
    pub fn new(target: &'a mut Vec<T>) -> Self {
        Self {
            target,
            changed: false,
        }
    }
}

fn elem_type_name<T: Value + Default>() -> String {
    T::default().type_name()
}

impl<T: Value + Default> Value for SliceValue<'_, T> {
    fn set(&mut self, raw: &str) -> Result<(), ValueError> {
        let inner = raw
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .unwrap_or(raw);

        let mut parsed = Vec::new();
        if !inner.is_empty() {
            for piece in split_unescaped(inner, ',') {
                let piece = unescape(piece);
                let mut elem = T::default();
                elem.set(&piece).map_err(|err| match err {
                    ValueError::Parse { reason, .. } => ValueError::Parse {
                        kind: "slice",
                        input: raw.to_owned(),
                        reason: format!("element {piece:?}: {reason}"),
                    },
                    other => other,
                })?;
                parsed.push(elem);
            }
        }

        if self.changed {
            self.target.extend(parsed);
        } else {
            *self.target = parsed;
            self.changed = true;
        }
        Ok(())
    }

    fn render(&self) -> String {
        let items: Vec<String> = self
            .target
            .iter()
            .map(|item| escape(&item.render(), &[',']))
            .collect();
        format!("[{}]", items.join(","))
    }

    fn type_name(&self) -> String {
        elem_type_name::<T>() + "Slice"
    }

    fn is_cumulative(&self) -> bool {
        true
    }
}

impl<T: Value + Default> Field for Vec<T> {
    fn bind(&mut self) -> Bound<'_> {
        Bound::Value(Box::new(SliceValue::new(self)))
    }
}
