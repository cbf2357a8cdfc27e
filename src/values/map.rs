use super::escape::{escape, split_once_unescaped, split_unescaped, unescape};
use crate::{Bound, Field, Value, ValueError};
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

/// Map types which can back a [`MapValue`]
pub trait MapStorage {
    /// Key type
    type Key: Value + Default;
    /// Value type
    type Val: Value + Default;

    /// Insert or overwrite one entry
    fn insert_entry(&mut self, key: Self::Key, val: Self::Val);

    /// All entries, ordered by key
    fn sorted_entries(&self) -> Vec<(&Self::Key, &Self::Val)>;
}

impl<K, V> MapStorage for HashMap<K, V>
where
    K: Value + Default + Ord + Hash,
    V: Value + Default,
{
    type Key = K;
    type Val = V;

    fn insert_entry(&mut self, key: K, val: V) {
        self.insert(key, val);
    }

    fn sorted_entries(&self) -> Vec<(&K, &V)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl<K, V> MapStorage for BTreeMap<K, V>
where
    K: Value + Default + Ord,
    V: Value + Default,
{
    type Key = K;
    type Val = V;

    fn insert_entry(&mut self, key: K, val: V) {
        self.insert(key, val);
    }

    fn sorted_entries(&self) -> Vec<(&K, &V)> {
        self.iter().collect()
    }
}

/// A map flag, set with `key:value` pairs.
///
/// An occurrence holds comma separated pairs (`a:1,b:2`), or the rendered form `map[a:1 b:2]`.
/// Entries are inserted, so repeated occurrences accumulate.
///
/// A backslash escapes the next char, so keys and values may contain separators:
/// `map[greeting:hello\ world]`.
pub struct MapValue<'a, M> {
    target: &'a mut M,
}

impl<'a, M: MapStorage> MapValue<'a, M> {
    /// Wrap the storage
    pub fn new(target: &'a mut M) -> Self {
        Self { target }
    }

    fn parse_pair(raw: &str, pair: &str) -> Result<(M::Key, M::Val), ValueError> {
        let (raw_key, raw_val) = split_once_unescaped(pair, ':').ok_or_else(|| {
            ValueError::parse("map", raw, "invalid map flag syntax, use key1:val1")
        })?;
        let mut key = M::Key::default();
        key.set(&unescape(raw_key))?;
        let mut val = M::Val::default();
        val.set(&unescape(raw_val))?;
        Ok((key, val))
    }
}

fn capitalize(src: &str) -> String {
    let mut chars = src.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl<M: MapStorage> Value for MapValue<'_, M> {
    fn set(&mut self, raw: &str) -> Result<(), ValueError> {
        let pairs: Vec<&str> = match raw.strip_prefix("map[").and_then(|rest| rest.strip_suffix(']')) {
            Some(inner) => split_unescaped(inner, ' '),
            None => split_unescaped(raw, ','),
        };
        let pairs = pairs.into_iter().filter(|pair| !pair.is_empty());

        let entries = pairs
            .map(|pair| Self::parse_pair(raw, pair))
            .collect::<Result<Vec<_>, _>>()?;
        for (key, val) in entries {
            self.target.insert_entry(key, val);
        }
        Ok(())
    }

    fn render(&self) -> String {
        let entries = self.target.sorted_entries();
        if entries.is_empty() {
            return String::new();
        }
        let pairs: Vec<String> = entries
            .into_iter()
            .map(|(key, val)| {
                format!(
                    "{}:{}",
                    escape(&key.render(), &[':', ' ', ',']),
                    escape(&val.render(), &[' ', ','])
                )
            })
            .collect();
        format!("map[{}]", pairs.join(" "))
    }

    fn type_name(&self) -> String {
        let key = M::Key::default().type_name();
        let val = M::Val::default().type_name();
        format!("{key}{}Map", capitalize(&val))
    }

    fn is_cumulative(&self) -> bool {
        true
    }
}

impl<K, V> Field for HashMap<K, V>
where
    K: Value + Default + Ord + Hash,
    V: Value + Default,
{
    fn bind(&mut self) -> Bound<'_> {
        Bound::Value(Box::new(MapValue::new(self)))
    }
}

impl<K, V> Field for BTreeMap<K, V>
where
    K: Value + Default + Ord,
    V: Value + Default,
{
    fn bind(&mut self) -> Bound<'_> {
        Bound::Value(Box::new(MapValue::new(self)))
    }
}
