//! Prompt templating.
//!
//! A template contains `{{key}}` placeholders. The customer data mapping is
//! assembled per call from the use case defaults, the operator's overrides
//! and the ad-hoc custom parameters, in that order.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Ad-hoc key/value pair added by the operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomParam {
    pub key: String,
    pub value: String,
}

impl CustomParam {
    /// Key and value are kept verbatim; only empty strings are rejected
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Option<Self> {
        let key = key.into();
        let value = value.into();
        if key.is_empty() || value.is_empty() {
            return None;
        }
        Some(Self { key, value })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

/// Operator-entered overrides for the well-known customer fields, plus any
/// other field the operator edited on the form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerOverrides {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub gender: Option<Gender>,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

/// Flat key → string mapping used to fill a prompt template
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CustomerData(BTreeMap<String, String>);

impl CustomerData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render use case defaults to their string form
    pub fn from_defaults(defaults: &BTreeMap<String, Value>) -> Self {
        Self(
            defaults
                .iter()
                .map(|(k, v)| (k.clone(), value_to_string(v)))
                .collect(),
        )
    }

    /// Defaults ⊕ overrides ⊕ custom params; later layers replace earlier keys
    pub fn assemble(
        defaults: &BTreeMap<String, Value>,
        overrides: &CustomerOverrides,
        custom_params: &[CustomParam],
    ) -> Self {
        let mut data = Self::from_defaults(defaults);
        for (key, value) in &overrides.fields {
            data.insert(key, value);
        }
        if let Some(name) = &overrides.name {
            data.insert("name", name);
        }
        if let Some(phone) = &overrides.phone_number {
            data.insert("phone_number", phone);
        }
        if let Some(gender) = overrides.gender {
            data.insert("gender", gender.as_str());
        }
        data.apply_custom_params(custom_params);
        data
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Apply in insertion order so a repeated key keeps its last value
    pub fn apply_custom_params(&mut self, params: &[CustomParam]) {
        for param in params {
            self.insert(param.key.clone(), param.value.clone());
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CustomerData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// String form of a JSON scalar: strings verbatim, `null` empty, everything
/// else as JSON text
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Replace every `{{key}}` whose key is in `data` with its value.
///
/// Single left-to-right scan: substituted text is never rescanned and
/// unknown placeholders are copied through unchanged. Keys may themselves
/// contain braces; when several keys match at one offset the longest wins.
pub fn format_prompt(template: &str, data: &CustomerData) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        output.push_str(&rest[..start]);
        let candidate = &rest[start..];

        match match_key(&candidate[OPEN.len()..], data) {
            Some((value, key_len)) => {
                output.push_str(value);
                rest = &candidate[OPEN.len() + key_len + CLOSE.len()..];
            }
            None => {
                // Step past one brace so "{{{key}}}" still matches at the next offset
                output.push('{');
                rest = &candidate[1..];
            }
        }
    }

    output.push_str(rest);
    output
}

/// Longest key in `data` that `text` starts with, immediately followed by `}}`
fn match_key<'a>(text: &str, data: &'a CustomerData) -> Option<(&'a str, usize)> {
    data.iter()
        .filter(|(key, _)| {
            text.strip_prefix(*key)
                .map_or(false, |tail| tail.starts_with(CLOSE))
        })
        .max_by_key(|(key, _)| key.len())
        .map(|(key, value)| (value, key.len()))
}

/// Placeholder keys referenced by a template, in first-seen order
pub fn placeholders(template: &str) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        let after = &rest[start + OPEN.len()..];
        match after.find(CLOSE) {
            Some(end) => {
                let key = &after[..end];
                if !key.is_empty() && !key.contains(OPEN) && !keys.iter().any(|k| k == key) {
                    keys.push(key.to_string());
                }
                rest = &after[end + CLOSE.len()..];
            }
            None => break,
        }
    }

    keys
}
