use crate::{Value, ValueError};

/// A flag which counts how many times it was given, like `-vvv`.
///
/// An empty value (or `-1`) adds one, any other number replaces the count.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Counter(pub i64);

impl Counter {
    fn increment(&mut self, raw: &str) -> Result<(), ValueError> {
        self.0 = self
            .0
            .checked_add(1)
            .ok_or_else(|| ValueError::parse("count", raw, "count is at its maximum"))?;
        Ok(())
    }
}

impl Value for Counter {
    fn set(&mut self, raw: &str) -> Result<(), ValueError> {
        if raw.is_empty() {
            return self.increment(raw);
        }
        let count: i64 = raw.parse().map_err(|err| ValueError::parse("count", raw, err))?;
        if count == -1 {
            self.increment(raw)
        } else {
            self.0 = count;
            Ok(())
        }
    }
    fn render(&self) -> String {
        self.0.to_string()
    }
    fn type_name(&self) -> String {
        "count".into()
    }
    fn is_bool_flag(&self) -> bool {
        true
    }
    fn is_cumulative(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_counter_set() {
        let mut counter = Counter::default();
        assert_eq!(counter.render(), "0");
        assert_eq!(counter.type_name(), "count");
        assert!(counter.is_bool_flag());
        assert!(counter.is_cumulative());

        counter.set("").unwrap();
        assert_eq!(counter, Counter(1));

        counter.set("10").unwrap();
        assert_eq!(counter.render(), "10");

        counter.set("-1").unwrap();
        assert_eq!(counter.render(), "11");

        assert_matches!(counter.set("b"), Err(ValueError::Parse { kind: "count", .. }));
        assert_eq!(counter, Counter(11));
    }

    #[test]
    fn test_counter_at_max() {
        let mut counter = Counter(i64::MAX);
        assert_matches!(counter.set(""), Err(ValueError::Parse { kind: "count", .. }));
        assert_matches!(counter.set("-1"), Err(ValueError::Parse { kind: "count", .. }));
        assert_eq!(counter, Counter(i64::MAX));

        counter.set("0").unwrap();
        counter.set("").unwrap();
        assert_eq!(counter, Counter(1));
    }
}
