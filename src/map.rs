//! The hybrid list/record container.
//!
//! A [`Table`] is an insertion-ordered map from string keys to [`Value`]s.
//! Entries whose keys run `"0"`, `"1"`, `"2"`, ... from the front of the table
//! are its *elements* and are written without keys; everything after that
//! prefix is a *property* and is written as `key = value`.
//!
//! The table keeps a cached count of its element prefix, updated as entries
//! are added, so classifying a member never rescans the map.
//!
//! ## Examples
//!
//! ```rust
//! use serde_ckt::{Table, Value};
//!
//! let mut table = Table::new();
//! table.push("first");
//! table.push("second");
//! table.insert("color", "blue");
//!
//! assert_eq!(table.element_count(), 2);
//! assert_eq!(table.element(1).and_then(Value::as_str), Some("second"));
//! assert_eq!(table.get("color").and_then(Value::as_str), Some("blue"));
//! ```

use indexmap::IndexMap;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::literal::{is_element_key, RESERVED_KEY};
use crate::Value;

/// An ordered table of string keys to values.
///
/// Assigning an existing key replaces its value but keeps its position.
/// The key `__proto__` is never stored.
///
/// Equality is order-sensitive: two tables are equal only when they hold the
/// same entries in the same order.
///
/// # Examples
///
/// ```rust
/// use serde_ckt::{Table, Value};
///
/// let mut table = Table::new();
/// table.insert("x", 13);
/// table.insert("y", 0);
/// table.insert("x", 16);
///
/// let keys: Vec<_> = table.keys().collect();
/// assert_eq!(keys, vec!["x", "y"]);
/// assert_eq!(table.get("x"), Some(&Value::from(16)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Table {
    entries: IndexMap<String, Value>,
    elements: usize,
}

impl Table {
    /// Creates an empty `Table`.
    #[must_use]
    pub fn new() -> Self {
        Table::default()
    }

    /// Creates an empty `Table` with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Table {
            entries: IndexMap::with_capacity(capacity),
            elements: 0,
        }
    }

    /// Inserts a value under `key`, returning the value it replaced.
    ///
    /// A replaced key stays where it was. Inserting `__proto__` does nothing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ckt::{Table, Value};
    ///
    /// let mut table = Table::new();
    /// assert!(table.insert("key", 42).is_none());
    /// assert_eq!(table.insert("key", 43), Some(Value::from(42)));
    /// assert!(table.insert("__proto__", 1).is_none());
    /// assert!(!table.contains_key("__proto__"));
    /// ```
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        if key == RESERVED_KEY {
            return None;
        }
        let extends = self.elements == self.entries.len() && is_element_key(&key, self.elements);
        let previous = self.entries.insert(key, value.into());
        if extends {
            self.elements += 1;
        }
        previous
    }

    /// Appends a value under the next element key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_ckt::Table;
    ///
    /// let mut table = Table::new();
    /// table.push("a");
    /// table.push("b");
    /// assert_eq!(table.keys().collect::<Vec<_>>(), vec!["0", "1"]);
    /// assert!(table.is_list());
    /// ```
    pub fn push(&mut self, value: impl Into<Value>) {
        let key = self.elements.to_string();
        self.insert(key, value);
    }

    /// Removes `key`, shifting later entries forward.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let removed = self.entries.shift_remove(key);
        if removed.is_some() {
            self.elements = self
                .entries
                .keys()
                .enumerate()
                .take_while(|(position, key)| is_element_key(key, *position))
                .count();
        }
        removed
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    /// Returns the entry at `position` in table order.
    #[must_use]
    pub fn get_index(&self, position: usize) -> Option<(&str, &Value)> {
        self.entries
            .get_index(position)
            .map(|(key, value)| (key.as_str(), value))
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the element at `index`, if it lies inside the element prefix.
    #[must_use]
    pub fn element(&self, index: usize) -> Option<&Value> {
        if index < self.elements {
            self.entries.get_index(index).map(|(_, value)| value)
        } else {
            None
        }
    }

    /// Number of entries in the leading `"0"`, `"1"`, ... run.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements
    }

    /// Iterates the element prefix.
    pub fn elements(&self) -> impl Iterator<Item = &Value> + '_ {
        self.entries.values().take(self.elements)
    }

    /// Iterates everything after the element prefix, in insertion order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.entries
            .iter()
            .skip(self.elements)
            .map(|(key, value)| (key.as_str(), value))
    }

    /// `true` when every entry is an element.
    #[must_use]
    pub fn is_list(&self) -> bool {
        self.elements == self.entries.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over the keys, in table order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Returns an iterator over the values, in table order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.entries.values()
    }

    pub fn values_mut(&mut self) -> indexmap::map::ValuesMut<'_, String, Value> {
        self.entries.values_mut()
    }

    /// Returns an iterator over the entries, in table order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    pub fn into_values(self) -> indexmap::map::IntoValues<String, Value> {
        self.entries.into_values()
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.entries.iter().eq(other.entries.iter())
    }
}

impl IntoIterator for Table {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Table {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        let mut table = Table::new();
        table.extend(iter);
        table
    }
}

impl FromIterator<Value> for Table {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        let mut table = Table::new();
        for value in iter {
            table.push(value);
        }
        table
    }
}

impl<K: Into<String>> Extend<(K, Value)> for Table {
    fn extend<T: IntoIterator<Item = (K, Value)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_list() {
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for value in self.values() {
                seq.serialize_element(value)?;
            }
            seq.end()
        } else {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (key, value) in self.iter() {
                map.serialize_entry(key, value)?;
            }
            map.end()
        }
    }
}

impl<'de> Deserialize<'de> for Table {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Table(table) => Ok(table),
            other => Err(serde::de::Error::custom(format!(
                "expected a table, found {}",
                other.kind()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_prefix_tracks_inserts() {
        let mut table = Table::new();
        table.insert("0", "a");
        table.insert("1", "b");
        assert_eq!(table.element_count(), 2);

        table.insert("3", "d");
        assert_eq!(table.element_count(), 2);
        assert_eq!(table.properties().map(|(k, _)| k).collect::<Vec<_>>(), vec!["3"]);

        table.insert("2", "c");
        assert_eq!(table.element_count(), 2);
        assert!(!table.is_list());
    }

    #[test]
    fn test_non_canonical_keys_are_properties() {
        let mut table = Table::new();
        table.insert("00", 1);
        table.insert("+0", 2);
        assert_eq!(table.element_count(), 0);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut table = Table::new();
        table.insert("a", 1);
        table.insert("b", 2);
        table.insert("a", 3);
        let entries: Vec<_> = table.iter().map(|(k, v)| (k.as_str(), v.clone())).collect();
        assert_eq!(entries, vec![("a", Value::from(3)), ("b", Value::from(2))]);
    }

    #[test]
    fn test_remove_recounts_prefix() {
        let mut table: Table = vec![Value::from(1), Value::from(2), Value::from(3)]
            .into_iter()
            .collect();
        assert_eq!(table.element_count(), 3);
        table.remove("0");
        assert_eq!(table.element_count(), 0);
        assert_eq!(table.remove("missing"), None);
    }

    #[test]
    fn test_method_names_are_plain_keys() {
        let mut table = Table::new();
        for key in ["len", "insert", "hasOwnProperty", "constructor"] {
            table.insert(key, key);
        }
        assert_eq!(table.len(), 4);
        assert_eq!(table.get("hasOwnProperty").and_then(Value::as_str), Some("hasOwnProperty"));
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let ab: Table = vec![("a", Value::from(1)), ("b", Value::from(2))].into_iter().collect();
        let ba: Table = vec![("b", Value::from(2)), ("a", Value::from(1))].into_iter().collect();
        assert_ne!(ab, ba);
        assert_eq!(ab, ab.clone());
    }

    #[test]
    fn test_element_lookup_stays_in_prefix() {
        let mut table = Table::new();
        table.push("zero");
        table.insert("name", "x");
        table.insert("1", "late");
        assert_eq!(table.element(0).and_then(Value::as_str), Some("zero"));
        assert_eq!(table.element(1), None);
        assert_eq!(table.get("1").and_then(Value::as_str), Some("late"));
        assert_eq!(table.get_index(1).map(|(k, _)| k), Some("name"));
    }
}
