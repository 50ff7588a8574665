/// Input collection for the prediction form.
///
/// Edits are parsed permissively: anything that is not a number becomes 0
/// and is never reported back to the user. Untouched fields stay absent
/// from the state until submission, where the payload builder fills them in.

use std::collections::BTreeMap;

use crate::features::FeatureSet;
use crate::model::Payload;

/// Values the user has entered so far, keyed by feature name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    values: BTreeMap<String, f64>,
}

/// Everything needed to draw one labelled numeric input.
#[derive(Debug, Clone, PartialEq)]
pub struct InputField {
    pub name: String,
    pub label: String,
    pub placeholder: String,
    pub value: String,
}

/// Parses a raw field value, coercing unparseable input to 0.
pub fn parse_field_value(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) if !value.is_nan() => value,
        _ => 0.0,
    }
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one edit, leaving every other field untouched.
    pub fn apply_edit(&mut self, name: &str, raw: &str) {
        self.values.insert(name.to_string(), parse_field_value(raw));
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Text shown in the input box. A stored zero shows as blank, the same
    /// as a field that was never touched.
    pub fn display_value(&self, name: &str) -> String {
        match self.get(name) {
            Some(value) if value != 0.0 => value.to_string(),
            _ => String::new(),
        }
    }

    /// Builds the request body: every feature present, untouched ones as 0.
    pub fn payload(&self, features: &FeatureSet) -> Payload {
        features
            .names()
            .iter()
            .map(|name| (name.clone(), self.get(name).unwrap_or(0.0)))
            .collect()
    }

    pub fn input_fields(&self, features: &FeatureSet) -> Vec<InputField> {
        features
            .names()
            .iter()
            .map(|name| InputField {
                name: name.clone(),
                label: format!("{}:", name),
                placeholder: format!("Enter {} value", name),
                value: self.display_value(name),
            })
            .collect()
    }
}
