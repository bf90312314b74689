//! Flat field sets
//!
//! Create and update requests arrive as flat JSON objects mapping a field name
//! to a number, string, boolean or null. `FieldSet` wraps that map and gives the
//! validators the three notions of "has a value" they need:
//!
//! - **present**: the key exists and is not `null` (used for update checks and merging)
//! - **filled**: present and not an empty or blank string (used for requiredness)
//! - **set**: filled and not `0` or `false` (used to decide whether a capability
//!   group was supplied at all)
//! - **typed access**: `number`, `text`, `boolean` return `None` on absence *or* on a
//!   type mismatch, so type errors are reported by the caller, not here

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use super::errors::ValidationError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSet(Map<String, Value>);

impl FieldSet {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Accept a request body; anything other than a JSON object is rejected
    pub fn from_value(value: Value) -> Result<Self, ValidationError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(ValidationError::wrong_type(
                "Request body must be a JSON object",
            )),
        }
    }

    /// Raw value, `None` when the key is missing or explicitly null
    pub fn get(&self, name: &str) -> Option<&Value> {
        match self.0.get(name) {
            Some(Value::Null) | None => None,
            Some(value) => Some(value),
        }
    }

    pub fn is_present(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn is_filled(&self, name: &str) -> bool {
        match self.get(name) {
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(_) => true,
            None => false,
        }
    }

    pub fn is_set(&self, name: &str) -> bool {
        match self.get(name) {
            Some(Value::Number(n)) => n.as_f64() != Some(0.0),
            Some(Value::Bool(b)) => *b,
            Some(_) => self.is_filled(name),
            None => false,
        }
    }

    pub fn any_set(&self, names: &[&str]) -> bool {
        names.iter().any(|name| self.is_set(name))
    }

    pub fn any_present(&self, names: &[&str]) -> bool {
        names.iter().any(|name| self.is_present(name))
    }

    pub fn all_filled(&self, names: &[&str]) -> bool {
        names.iter().all(|name| self.is_filled(name))
    }

    pub fn is_number(&self, name: &str) -> bool {
        matches!(self.get(name), Some(Value::Number(_)))
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }

    /// The number as supplied, so integers stay integers
    pub fn raw_number(&self, name: &str) -> Option<&Number> {
        match self.get(name) {
            Some(Value::Number(n)) => Some(n),
            _ => None,
        }
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.0.remove(name)
    }

    /// Set `name` only when the caller did not supply a value for it
    pub fn set_default(&mut self, name: &str, value: impl Into<Value>) {
        if !self.is_present(name) {
            self.0.insert(name.to_string(), value.into());
        }
    }

    /// COALESCE-merge: every present value in `self` replaces the one in `base`;
    /// nulls and missing keys leave `base` untouched
    pub fn merged_over(&self, base: &FieldSet) -> FieldSet {
        let mut merged = base.clone();
        for (name, value) in self.0.iter() {
            if !value.is_null() {
                merged.0.insert(name.clone(), value.clone());
            }
        }
        merged
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for FieldSet {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> FieldSet {
        FieldSet::from_value(value).unwrap()
    }

    #[test]
    fn test_rejects_non_object_body() {
        let err = FieldSet::from_value(json!([1, 2, 3])).unwrap_err();
        assert_eq!(err.message(), "Request body must be a JSON object");
    }

    #[test]
    fn test_presence_and_fill() {
        let f = fields(json!({"a": null, "b": "", "c": "  ", "d": 0, "e": false, "f": "x"}));
        assert!(!f.is_present("a"));
        assert!(!f.is_present("missing"));
        assert!(f.is_present("b"));
        assert!(!f.is_filled("b"));
        assert!(!f.is_filled("c"));
        assert!(f.is_filled("d"));
        assert!(f.is_filled("e"));
        assert!(f.is_filled("f"));
    }

    #[test]
    fn test_zero_and_false_are_filled_but_not_set() {
        let f = fields(json!({"n": 0, "m": 0.0, "t": true, "f": false, "s": " ", "x": 2}));
        assert!(f.is_filled("n") && !f.is_set("n"));
        assert!(!f.is_set("m"));
        assert!(f.is_set("t"));
        assert!(f.is_filled("f") && !f.is_set("f"));
        assert!(!f.is_set("s"));
        assert!(f.any_set(&["n", "f", "x"]));
        assert!(!f.any_set(&["n", "f", "s", "missing"]));
    }

    #[test]
    fn test_raw_number_keeps_integers() {
        let f = fields(json!({"health": 100, "rate": 0.5, "name": "x"}));
        assert_eq!(f.raw_number("health"), Some(&Number::from(100)));
        assert_eq!(f.raw_number("health").and_then(Number::as_u64), Some(100));
        assert_eq!(f.raw_number("rate").and_then(Number::as_f64), Some(0.5));
        assert_eq!(f.raw_number("name"), None);
    }

    #[test]
    fn test_typed_access_does_not_coerce() {
        let f = fields(json!({"n": "5", "m": 5, "b": "true"}));
        assert_eq!(f.number("n"), None);
        assert_eq!(f.number("m"), Some(5.0));
        assert!(!f.is_number("n"));
        assert_eq!(f.boolean("b"), None);
    }

    #[test]
    fn test_merge_keeps_base_for_nulls() {
        let base = fields(json!({"health": 100, "name": "Goblin"}));
        let patch = fields(json!({"health": 80, "name": null}));
        let merged = patch.merged_over(&base);
        assert_eq!(merged.number("health"), Some(80.0));
        assert_eq!(merged.text("name"), Some("Goblin"));
    }

    #[test]
    fn test_set_default_respects_supplied_values() {
        let mut f = fields(json!({"is_admin": true, "blacklisted": null}));
        f.set_default("is_admin", false);
        f.set_default("blacklisted", false);
        assert_eq!(f.boolean("is_admin"), Some(true));
        assert_eq!(f.boolean("blacklisted"), Some(false));
    }
}
