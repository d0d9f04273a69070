//! Declarative field validation for form-shaped input.
//!
//! A [`FormValidator`] holds the current values of a form, the error message
//! of every failing field and the set of fields the user has touched. Rules
//! are fixed at construction. Validation never fails as an operation: every
//! outcome is either a message for the field or no message.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

/// Custom check returning an error message for invalid values.
pub type CustomValidator = Box<dyn Fn(&FieldValue) -> Option<String> + Send + Sync>;

pub type FieldErrors = BTreeMap<String, String>;

/// A loosely typed form value. The variant decides which rule checks apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Empty text, zero, `false` and [`FieldValue::Empty`] all count as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Empty => true,
            FieldValue::Bool(b) => !b,
            FieldValue::Number(n) => *n == 0.0 || n.is_nan(),
            FieldValue::Text(s) => s.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Empty, Into::into)
    }
}

impl From<&serde_json::Value> for FieldValue {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => FieldValue::Empty,
            serde_json::Value::Bool(b) => FieldValue::Bool(*b),
            serde_json::Value::Number(n) => n.as_f64().map_or(FieldValue::Empty, FieldValue::Number),
            serde_json::Value::String(s) => FieldValue::Text(s.clone()),
            // Arrays and objects have no rule branch; treat them as opaque text.
            other => FieldValue::Text(other.to_string()),
        }
    }
}

/// Constraints for one field. All checks are optional.
#[derive(Default)]
pub struct ValidationRule {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<Regex>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub custom: Option<CustomValidator>,
}

impl ValidationRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, len: usize) -> Self {
        self.min_length = Some(len);
        self
    }

    pub fn max_length(mut self, len: usize) -> Self {
        self.max_length = Some(len);
        self
    }

    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn custom<F>(mut self, check: F) -> Self
    where
        F: Fn(&FieldValue) -> Option<String> + Send + Sync + 'static,
    {
        self.custom = Some(Box::new(check));
        self
    }

    /// Runs every applicable check and returns the first message produced.
    pub fn check(&self, value: &FieldValue) -> Option<String> {
        if self.required && value.is_empty() {
            return Some("This field is required".to_string());
        }

        if value.is_empty() {
            return None;
        }

        if let FieldValue::Text(text) = value {
            let len = text.chars().count();
            if let Some(min) = self.min_length.filter(|&min| min > 0) {
                if len < min {
                    return Some(format!("Must be at least {} characters", min));
                }
            }
            if let Some(max) = self.max_length.filter(|&max| max > 0) {
                if len > max {
                    return Some(format!("Must be at most {} characters", max));
                }
            }
            if let Some(pattern) = &self.pattern {
                if !pattern.is_match(text) {
                    return Some("Invalid format".to_string());
                }
            }
        }

        if let FieldValue::Number(n) = value {
            if let Some(min) = self.min {
                if *n < min {
                    return Some(format!("Must be greater than or equal to {}", min));
                }
            }
            if let Some(max) = self.max {
                if *n > max {
                    return Some(format!("Must be less than or equal to {}", max));
                }
            }
        }

        self.custom.as_ref().and_then(|custom| custom(value))
    }
}

impl fmt::Debug for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRule")
            .field("required", &self.required)
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("pattern", &self.pattern.as_ref().map(Regex::as_str))
            .field("min", &self.min)
            .field("max", &self.max)
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

/// Rule set keyed by field name.
#[derive(Debug, Default)]
pub struct ValidationRules(HashMap<String, ValidationRule>);

impl ValidationRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, rule: ValidationRule) -> Self {
        self.0.insert(name.into(), rule);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ValidationRule> {
        self.0.get(name)
    }

    /// Validates a set of values without keeping any state.
    pub fn validate(&self, values: &BTreeMap<String, FieldValue>) -> FieldErrors {
        let empty = FieldValue::Empty;
        self.0
            .iter()
            .filter_map(|(name, rule)| {
                let value = values.get(name).unwrap_or(&empty);
                rule.check(value).map(|message| (name.clone(), message))
            })
            .collect()
    }
}

/// Stateful form: values, errors, touched fields.
#[derive(Debug)]
pub struct FormValidator {
    initial_values: BTreeMap<String, FieldValue>,
    values: BTreeMap<String, FieldValue>,
    errors: FieldErrors,
    touched: BTreeSet<String>,
    rules: ValidationRules,
}

impl FormValidator {
    pub fn new(initial_values: BTreeMap<String, FieldValue>, rules: ValidationRules) -> Self {
        Self {
            values: initial_values.clone(),
            initial_values,
            errors: FieldErrors::new(),
            touched: BTreeSet::new(),
            rules,
        }
    }

    /// Builds a form from the top-level members of a JSON object.
    /// Non-object input yields an empty form.
    pub fn from_json(value: &serde_json::Value, rules: ValidationRules) -> Self {
        let values = value
            .as_object()
            .map(|obj| {
                obj.iter()
                    .map(|(k, v)| (k.clone(), FieldValue::from(v)))
                    .collect()
            })
            .unwrap_or_default();
        Self::new(values, rules)
    }

    /// Checks `value` against the rule for `name`. Fields without a rule never fail.
    pub fn validate_field(&self, name: &str, value: &FieldValue) -> Option<String> {
        self.rules.get(name).and_then(|rule| rule.check(value))
    }

    /// Stores a value, re-validating it if the field has been touched.
    pub fn set_value(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        let name = name.into();
        let value = value.into();

        if self.touched.contains(&name) {
            let error = self.validate_field(&name, &value);
            self.store_error(&name, error);
        }

        self.values.insert(name, value);
    }

    /// Marks a field touched and validates its current value.
    pub fn set_touched(&mut self, name: impl Into<String>) {
        let name = name.into();
        let error = self.validate_field(&name, self.value(&name));
        self.store_error(&name, error);
        self.touched.insert(name);
    }

    /// Validates every ruled field, replacing all errors. Returns true when none fail.
    pub fn validate_all(&mut self) -> bool {
        self.errors = self.rules.validate(&self.values);
        self.errors.is_empty()
    }

    /// Restores initial values, merging `overrides` on top when given, and
    /// clears errors and touched flags.
    pub fn reset(&mut self, overrides: Option<BTreeMap<String, FieldValue>>) {
        let mut values = self.initial_values.clone();
        if let Some(overrides) = overrides {
            values.extend(overrides);
        }
        self.values = values;
        self.errors.clear();
        self.touched.clear();
    }

    pub fn value(&self, name: &str) -> &FieldValue {
        const EMPTY: &FieldValue = &FieldValue::Empty;
        self.values.get(name).unwrap_or(EMPTY)
    }

    pub fn values(&self) -> &BTreeMap<String, FieldValue> {
        &self.values
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }

    pub fn is_touched(&self, name: &str) -> bool {
        self.touched.contains(name)
    }

    pub fn touched(&self) -> &BTreeSet<String> {
        &self.touched
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn store_error(&mut self, name: &str, error: Option<String>) {
        match error {
            Some(message) => {
                self.errors.insert(name.to_string(), message);
            }
            None => {
                self.errors.remove(name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_values_map_to_variants() {
        let form = FormValidator::from_json(
            &serde_json::json!({"name": "Ana", "age": 30, "active": true, "note": null}),
            ValidationRules::new(),
        );
        assert_eq!(form.value("name"), &FieldValue::Text("Ana".into()));
        assert_eq!(form.value("age"), &FieldValue::Number(30.0));
        assert_eq!(form.value("active"), &FieldValue::Bool(true));
        assert_eq!(form.value("note"), &FieldValue::Empty);
        assert_eq!(form.value("missing"), &FieldValue::Empty);
    }

    #[test]
    fn test_zero_counts_as_empty() {
        let rule = ValidationRule::new().required();
        assert!(rule.check(&FieldValue::Number(0.0)).is_some());
        assert!(ValidationRule::new().min(5.0).check(&FieldValue::Number(0.0)).is_none());
    }

    #[test]
    fn test_rule_debug_does_not_expose_closure() {
        let rule = ValidationRule::new().custom(|_| None);
        assert!(format!("{:?}", rule).contains("custom: true"));
    }
}
