//! Variable sets and collections.
//!
//! A [`VariableSet`] is one concrete assignment of values to placeholder
//! names: one CSV data row, or one manual `--set key=value` invocation.
//! Keys are unique and case-sensitive; insertion order is preserved so that
//! output (CSV export, history records) lists values in a stable order.
//!
//! A [`VariableCollection`] is a named, ordered group of variable sets tied
//! to one template, created by importing a CSV document. Its content is
//! immutable after import except by full replacement.

use serde_json::Value;

/// One assignment of values to variable names.
///
/// Backed by an ordered list of pairs rather than a hash map: sets are small
/// (one per CSV row) and callers depend on stable iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableSet {
    entries: Vec<(String, String)>,
}

impl VariableSet {
    /// Create an empty variable set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from key-value pairs, later duplicates overwriting earlier.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut set = Self::new();
        for (k, v) in pairs {
            set.insert(k.into(), v.into());
        }
        set
    }

    /// Insert a value, replacing any existing value for the same name.
    ///
    /// Replacement keeps the name's original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Look up the value for a variable name (case-sensitive).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the set contains the given name, regardless of value.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Serialize the set as a JSON object for durable records.
    pub fn to_json(&self) -> Value {
        let mut map = serde_json::Map::new();
        for (name, value) in &self.entries {
            map.insert(name.clone(), Value::String(value.clone()));
        }
        Value::Object(map)
    }
}

/// A named, ordered group of variable sets for one template.
#[derive(Debug, Clone)]
pub struct VariableCollection {
    /// Collection identifier (file stem in the library).
    pub id: String,

    /// The template this collection supplies rows for.
    pub template: String,

    /// Optional human-readable description.
    pub description: Option<String>,

    /// The rows, in import order.
    pub sets: Vec<VariableSet>,
}

impl VariableCollection {
    /// Number of variable sets in the collection.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Whether the collection has no rows.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut set = VariableSet::new();
        set.insert("name", "John");
        set.insert("age", "30");

        assert_eq!(set.get("name"), Some("John"));
        assert_eq!(set.get("age"), Some("30"));
        assert_eq!(set.get("missing"), None);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut set = VariableSet::from_pairs([("a", "1"), ("b", "2")]);
        set.insert("a", "updated");

        assert_eq!(set.get("a"), Some("updated"));
        // Position is retained after replacement.
        let names: Vec<&str> = set.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let set = VariableSet::from_pairs([("Name", "John")]);
        assert_eq!(set.get("Name"), Some("John"));
        assert_eq!(set.get("name"), None);
    }

    #[test]
    fn contains_ignores_value() {
        let set = VariableSet::from_pairs([("empty", "")]);
        assert!(set.contains("empty"));
        assert!(!set.contains("missing"));
    }

    #[test]
    fn iteration_preserves_insertion_order() {
        let set = VariableSet::from_pairs([("z", "1"), ("a", "2"), ("m", "3")]);
        let names: Vec<&str> = set.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }

    #[test]
    fn to_json_produces_string_object() {
        let set = VariableSet::from_pairs([("name", "John"), ("age", "30")]);
        let json = set.to_json();

        assert_eq!(json["name"], "John");
        assert_eq!(json["age"], "30");
        assert_eq!(json.as_object().unwrap().len(), 2);
    }

    #[test]
    fn empty_collection() {
        let collection = VariableCollection {
            id: "empty".to_string(),
            template: "greeting".to_string(),
            description: None,
            sets: Vec::new(),
        };
        assert!(collection.is_empty());
        assert_eq!(collection.len(), 0);
    }
}
