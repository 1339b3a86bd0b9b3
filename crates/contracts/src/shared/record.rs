//! Record-in-progress: the schema-shaped value map a create form edits and submits.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;

use super::metadata::{FieldMetadata, ValueKind};

/// Format produced by `<input type="datetime-local">`
pub const DATETIME_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Value of a single form field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
    Reference(String),
}

impl FieldValue {
    /// Null, whitespace-only text or an empty reference
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) | Self::Reference(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Whether the value's variant is acceptable for the field kind.
    /// `Null` matches every kind; presence is checked separately.
    pub fn matches_kind(&self, kind: ValueKind) -> bool {
        matches!(
            (self, kind),
            (Self::Null, _)
                | (Self::Text(_), ValueKind::Text)
                | (Self::Number(_), ValueKind::Number)
                | (Self::Bool(_), ValueKind::Boolean)
                | (Self::DateTime(_), ValueKind::DateTime)
                | (Self::Reference(_), ValueKind::Reference)
        )
    }

    /// Convert a raw input string into a value of the requested kind.
    ///
    /// Unparseable input is kept as `Text` so the validator can report it
    /// instead of the typed value silently disappearing.
    pub fn from_input(kind: ValueKind, raw: &str) -> Self {
        match kind {
            ValueKind::Text => Self::Text(raw.to_string()),
            _ if raw.trim().is_empty() => Self::Null,
            ValueKind::Number => raw
                .trim()
                .parse::<f64>()
                .map(Self::Number)
                .unwrap_or_else(|_| Self::Text(raw.to_string())),
            ValueKind::DateTime => parse_datetime(raw)
                .map(Self::DateTime)
                .unwrap_or_else(|| Self::Text(raw.to_string())),
            ValueKind::Boolean => match raw.trim() {
                "true" | "on" => Self::Bool(true),
                "false" | "off" => Self::Bool(false),
                _ => Self::Text(raw.to_string()),
            },
            ValueKind::Reference => Self::Reference(raw.trim().to_string()),
        }
    }

    /// Render the value for an input control
    pub fn to_input(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Text(s) | Self::Reference(s) => s.clone(),
            Self::Number(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::DateTime(dt) => dt.format(DATETIME_INPUT_FORMAT).to_string(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Self::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<&str> {
        match self {
            Self::Reference(id) => Some(id),
            _ => None,
        }
    }
}

fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, DATETIME_INPUT_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

/// Field name → value map covering every field of one entity schema
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Record {
    values: BTreeMap<String, FieldValue>,
}

impl Record {
    /// Seed an entry for every schema field: `Null` unless an override is given.
    /// Overrides for names outside the schema are dropped.
    pub fn from_defaults<'a, I>(fields: &[FieldMetadata], overrides: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, FieldValue)>,
    {
        let mut values: BTreeMap<String, FieldValue> = fields
            .iter()
            .map(|f| (f.name.to_string(), FieldValue::Null))
            .collect();

        for (name, value) in overrides {
            if let Some(slot) = values.get_mut(name) {
                *slot = value;
            }
        }

        Self { values }
    }

    /// Every schema field set to `Null`
    pub fn from_schema(fields: &[FieldMetadata]) -> Self {
        Self::from_defaults(fields, std::iter::empty())
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Replace the value of an existing field. Returns `false` for unknown names.
    pub fn set(&mut self, name: &str, value: FieldValue) -> bool {
        match self.values.get_mut(name) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Whether the record has an entry for every schema field
    pub fn covers(&self, fields: &[FieldMetadata]) -> bool {
        fields.iter().all(|f| self.values.contains_key(f.name))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Field-level validation messages in schema order.
/// Rebuilt wholesale on each validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldErrors {
    entries: Vec<(String, String)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        let message = message.into();
        match self.entries.iter_mut().find(|(name, _)| name == field) {
            Some(entry) => entry.1 = message,
            None => self.entries.push((field.to_string(), message)),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, message)| (name.as_str(), message.as_str()))
    }
}
