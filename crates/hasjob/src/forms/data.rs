use std::collections::BTreeMap;

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Submitted form fields: each name maps to every value posted under it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    fields: BTreeMap<String, Vec<String>>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut data = Self::new();
        for (name, value) in pairs {
            data.append(name, value);
        }
        data
    }

    /// Add one more value under `name`, keeping earlier ones.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields
            .entry(name.into())
            .or_default()
            .push(value.into());
    }

    /// Builder form of [`FormData::append`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.append(name, value);
        self
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        self.fields.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn first(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn all(&self, name: &str) -> &[String] {
        self.fields.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields posted under `prefix-`, with the prefix removed.
    pub fn nested(&self, prefix: &str) -> FormData {
        let prefix = format!("{prefix}-");
        let fields = self
            .fields
            .iter()
            .filter_map(|(name, values)| {
                name.strip_prefix(&prefix)
                    .map(|rest| (rest.to_string(), values.clone()))
            })
            .collect();
        FormData { fields }
    }
}

impl<K, V> FromIterator<(K, V)> for FormData
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::from_pairs(iter)
    }
}

fn scalar_to_string(value: Value) -> Result<Option<String>, String> {
    match value {
        Value::Null => Ok(None),
        Value::String(text) => Ok(Some(text)),
        Value::Bool(flag) => Ok(Some(flag.to_string())),
        Value::Number(number) => Ok(Some(number.to_string())),
        Value::Array(_) | Value::Object(_) => Err("nested values are not supported".to_string()),
    }
}

/// Accepts a JSON object whose values are scalars or arrays of scalars.
/// `null` entries are treated as not submitted.
impl<'de> Deserialize<'de> for FormData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        let mut data = FormData::new();

        for (name, value) in raw {
            let values = match value {
                Value::Array(items) => items,
                other => vec![other],
            };
            for item in values {
                let converted = scalar_to_string(item)
                    .map_err(|reason| de::Error::custom(format!("field '{name}': {reason}")))?;
                if let Some(text) = converted {
                    data.append(name.clone(), text);
                }
            }
        }

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_every_value_in_submission_order() {
        let data = FormData::from_pairs([("geonameids", "12"), ("geonameids", "34")]);
        assert_eq!(data.all("geonameids"), ["12", "34"]);
        assert_eq!(data.first("geonameids"), Some("12"));
        assert!(data.all("boards").is_empty());
    }

    #[test]
    fn nested_strips_the_prefix() {
        let data = FormData::new()
            .with("title", "Hiring drive")
            .with("content-subject", "Hello")
            .with("contents", "ignored");
        let nested = data.nested("content");
        assert_eq!(nested.first("subject"), Some("Hello"));
        assert!(!nested.contains("title"));
        assert!(!nested.contains("s"));
    }

    #[test]
    fn deserializes_json_objects() {
        let data: FormData = serde_json::from_value(json!({
            "title": "Launch",
            "priority": 3,
            "public": true,
            "boards": [1, 2],
            "icon": null,
        }))
        .expect("valid form json");

        assert_eq!(data.first("priority"), Some("3"));
        assert_eq!(data.first("public"), Some("true"));
        assert_eq!(data.all("boards"), ["1", "2"]);
        assert!(!data.contains("icon"));
    }

    #[test]
    fn rejects_nested_objects() {
        let result: Result<FormData, _> = serde_json::from_value(json!({ "content": { "a": 1 } }));
        assert!(result.is_err());
    }
}
