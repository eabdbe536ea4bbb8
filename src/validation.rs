//! Field-level validation errors shared by the form validators.

use std::collections::BTreeMap;

/// Validation messages keyed by the name of the form field that failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field`. The first message recorded for a field is kept.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::FieldErrors;

    #[test]
    fn keeps_first_message_per_field() {
        let mut errors = FieldErrors::new();

        errors.add("oc", "first");
        errors.add("oc", "second");

        assert_eq!(errors.get("oc"), Some("first"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn missing_field_has_no_message() {
        let errors = FieldErrors::new();

        assert!(errors.is_empty());
        assert_eq!(errors.get("phone"), None);
    }
}
