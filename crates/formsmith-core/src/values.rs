//! Run-time values entered into a form preview.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// One field's current value.
///
/// Single-choice and free-text controls hold `Text`; checkbox groups and
/// multi-selects hold `List`; a lone checkbox holds `Bool`; sliders may hold
/// `Number`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl FormValue {
    /// Text rendering with the same rules a browser applies when a value is
    /// concatenated into a string: lists join with `,`, booleans become
    /// `true`/`false`, integral numbers drop the fraction.
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::List(items) => items.join(","),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => format_number(*n),
        }
    }

    /// Returns `true` if the value is falsy (`""`, `false`, `0`, NaN).
    /// Lists are never falsy.
    pub fn is_falsy(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::List(_) => false,
            Self::Bool(b) => !b,
            Self::Number(n) => *n == 0.0 || n.is_nan(),
        }
    }
}

impl From<&str> for FormValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for FormValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for FormValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for FormValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<Vec<String>> for FormValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<Vec<&str>> for FormValue {
    fn from(items: Vec<&str>) -> Self {
        Self::List(items.into_iter().map(str::to_owned).collect())
    }
}

/// Formats a number the way a browser's `String(n)` would for the ranges
/// forms deal with.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_owned()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_owned()
    } else if n == 0.0 {
        "0".to_owned()
    } else {
        format!("{}", n)
    }
}

/// Map from field id to current value. Ordered so that anything derived from
/// it is stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FormValues(BTreeMap<String, FormValue>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for a field, or `None` if nothing was entered.
    pub fn get(&self, field_id: &str) -> Option<&FormValue> {
        self.0.get(field_id)
    }

    pub fn set(&mut self, field_id: impl Into<String>, value: impl Into<FormValue>) {
        self.0.insert(field_id.into(), value.into());
    }

    pub fn remove(&mut self, field_id: &str) -> Option<FormValue> {
        self.0.remove(field_id)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FormValue)> {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<FormValue>> FromIterator<(K, V)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// `null` entries are dropped: an explicit null means "not entered".
impl<'de> Deserialize<'de> for FormValues {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Option<FormValue>>::deserialize(deserializer)?;
        Ok(Self(
            raw.into_iter()
                .filter_map(|(k, v)| v.map(|v| (k, v)))
                .collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserialize_mixed_shapes() {
        let json = r#"{"a": "x", "b": ["1", "2"], "c": true, "d": 3.5, "e": null}"#;
        let values: FormValues = serde_json::from_str(json).unwrap();
        assert_eq!(values.len(), 4);
        assert_eq!(values.get("a"), Some(&FormValue::Text("x".into())));
        assert_eq!(values.get("b"), Some(&FormValue::from(vec!["1", "2"])));
        assert_eq!(values.get("c"), Some(&FormValue::Bool(true)));
        assert_eq!(values.get("d"), Some(&FormValue::Number(3.5)));
        assert!(values.get("e").is_none());
    }

    #[test]
    fn to_text_matches_browser_coercion() {
        assert_eq!(FormValue::from(vec!["a", "b"]).to_text(), "a,b");
        assert_eq!(FormValue::Bool(false).to_text(), "false");
        assert_eq!(FormValue::Number(5.0).to_text(), "5");
        assert_eq!(FormValue::Number(2.5).to_text(), "2.5");
        assert_eq!(FormValue::Number(-0.0).to_text(), "0");
    }

    #[test]
    fn falsy_values() {
        assert!(FormValue::from("").is_falsy());
        assert!(FormValue::Bool(false).is_falsy());
        assert!(FormValue::Number(0.0).is_falsy());
        assert!(FormValue::Number(f64::NAN).is_falsy());
        assert!(!FormValue::List(vec![]).is_falsy());
        assert!(!FormValue::from("0").is_falsy());
    }

    #[test]
    fn collect_from_pairs() {
        let values: FormValues = [("country", "us"), ("city", "NYC")].into_iter().collect();
        assert_eq!(values.len(), 2);
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"{"city":"NYC","country":"us"}"#);
    }
}
