use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Field name to the human readable messages raised for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Fold a sub-form's errors in as `prefix-field`.
    pub fn merge_nested(&mut self, prefix: &str, nested: FieldErrors) {
        for (field, messages) in nested.0 {
            self.0
                .entry(format!("{prefix}-{field}"))
                .or_default()
                .extend(messages);
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulates_messages_per_field() {
        let mut errors = FieldErrors::new();
        errors.add("link", "250 characters maximum");
        errors.add("link", "The URL “x” is not valid");
        errors.add("seq", "This is required");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("link").len(), 2);
        assert_eq!(
            errors.to_string(),
            "link: 250 characters maximum; link: The URL “x” is not valid; seq: This is required"
        );
    }

    #[test]
    fn nested_errors_are_prefixed() {
        let mut content = FieldErrors::new();
        content.add("banner_location", "Not a valid choice");

        let mut errors = FieldErrors::new();
        errors.merge_nested("content", content);

        assert!(errors.contains("content-banner_location"));
        assert!(!errors.contains("banner_location"));
    }
}
