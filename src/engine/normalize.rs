//! Input normalization: loosely typed symptom answers to strict booleans.
//!
//! Clients send answers as JSON booleans, a handful of yes/no spellings, or
//! `null`. Only the literal spellings below are accepted; there is no trimming
//! and no general case folding, so `"yEs"` or `" yes"` are rejected.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::{DiagnosisError, Result};

const TRUE_WORDS: &[&str] = &["yes", "YES", "Yes", "true", "True"];
const FALSE_WORDS: &[&str] = &["no", "NO", "No", "null", "false", "False"];

/// A raw answer for one symptom field, before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawValue<'a> {
    Bool(bool),
    Str(&'a str),
    Null,
}

impl<'a> RawValue<'a> {
    /// Borrow a JSON value as a raw answer. Numbers, arrays and objects are not answers.
    pub fn from_json(value: &'a Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(RawValue::Bool(*b)),
            Value::String(s) => Some(RawValue::Str(s.as_str())),
            Value::Null => Some(RawValue::Null),
            Value::Number(_) | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Apply the spelling policy. `None` means the value is ambiguous.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RawValue::Bool(b) => Some(*b),
            RawValue::Null => Some(false),
            RawValue::Str(s) if TRUE_WORDS.contains(s) => Some(true),
            RawValue::Str(s) if FALSE_WORDS.contains(s) => Some(false),
            RawValue::Str(_) => None,
        }
    }
}

/// Strict field -> bool answers for exactly one engine's required fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedInput {
    values: BTreeMap<&'static str, bool>,
}

impl NormalizedInput {
    /// Answer for `field`; `None` if the field is not part of this input's engine.
    pub fn get(&self, field: &str) -> Option<bool> {
        self.values.get(field).copied()
    }

    /// True when `field` was answered positively. Unknown fields read as false.
    pub fn is_set(&self, field: &str) -> bool {
        self.get(field).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Reject the input unless every required key is present. Reports all absent keys.
pub fn check_required(required: &[&'static str], input: &Map<String, Value>) -> Result<()> {
    let missing: Vec<String> = required
        .iter()
        .filter(|field| !input.contains_key(**field))
        .map(|field| field.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DiagnosisError::MissingFields { fields: missing })
    }
}

/// Coerce one field's JSON value to a strict boolean.
pub fn normalize_value(field: &str, value: &Value) -> Result<bool> {
    RawValue::from_json(value)
        .and_then(|raw| raw.as_bool())
        .ok_or_else(|| DiagnosisError::InvalidFieldValue {
            field: field.to_string(),
        })
}

/// Presence check, then per-field coercion in required-field order.
///
/// Keys outside `required` are ignored and never copied into the result.
pub fn normalize(required: &[&'static str], input: &Map<String, Value>) -> Result<NormalizedInput> {
    check_required(required, input)?;

    let mut values = BTreeMap::new();
    for field in required {
        let value = input
            .get(*field)
            .ok_or_else(|| DiagnosisError::MissingFields {
                fields: vec![field.to_string()],
            })?;
        values.insert(*field, normalize_value(field, value)?);
    }
    Ok(NormalizedInput { values })
}
