//! Validation rules for metadata fields

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Mutex;

use super::field_type::ValueKind;
use super::types::FieldMetadata;
use crate::shared::record::{FieldErrors, FieldValue, Record};

/// Message used for every missing required value
pub const REQUIRED_MESSAGE: &str = "required";

/// Field patterns compiled so far, keyed by source
static PATTERNS: Lazy<Mutex<HashMap<&'static str, Regex>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Compile `pattern` on first use and reuse it afterwards
fn compiled_pattern(pattern: &'static str) -> Result<Regex, regex::Error> {
    let mut patterns = PATTERNS.lock().unwrap_or_else(|e| e.into_inner());
    if let Some(re) = patterns.get(pattern) {
        return Ok(re.clone());
    }
    let re = Regex::new(pattern)?;
    patterns.insert(pattern, re.clone());
    Ok(re)
}

/// Validation rules for a field
/// Copy trait for efficient passing
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ValidationRules {
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<&'static str>,
    pub custom_error: Option<&'static str>,
}

impl ValidationRules {
    /// Create empty validation rules (all optional, no constraints)
    pub const fn none() -> Self {
        Self {
            required: false,
            min: None,
            max: None,
            min_length: None,
            max_length: None,
            pattern: None,
            custom_error: None,
        }
    }

    /// Create validation rules for required field
    pub const fn required() -> Self {
        Self {
            required: true,
            min: None,
            max: None,
            min_length: None,
            max_length: None,
            pattern: None,
            custom_error: None,
        }
    }

    /// Check if field is required
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Validate a non-blank string value against length and pattern rules
    pub fn validate_string(&self, value: &str, field_label: &str) -> Result<(), String> {
        let length = value.chars().count();

        if let Some(min) = self.min_length {
            if length < min {
                return Err(self.message_or(format!(
                    "{} must be at least {} characters",
                    field_label, min
                )));
            }
        }

        if let Some(max) = self.max_length {
            if length > max {
                return Err(self.message_or(format!(
                    "{} must be at most {} characters",
                    field_label, max
                )));
            }
        }

        if let Some(pattern) = self.pattern {
            match compiled_pattern(pattern) {
                Ok(re) if re.is_match(value) => {}
                Ok(_) => {
                    return Err(self.message_or(format!("{} has an invalid format", field_label)))
                }
                Err(e) => {
                    log::warn!("invalid pattern for {}: {}", field_label, e);
                    return Err(format!("{} cannot be checked", field_label));
                }
            }
        }

        Ok(())
    }

    /// Validate a numeric value against min/max rules
    pub fn validate_number(&self, value: f64, field_label: &str) -> Result<(), String> {
        if !value.is_finite() {
            return Err(format!("{} must be a number", field_label));
        }

        if let Some(min) = self.min {
            if value < min {
                return Err(self.message_or(format!("{} must be at least {}", field_label, min)));
            }
        }

        if let Some(max) = self.max {
            if value > max {
                return Err(self.message_or(format!("{} must be at most {}", field_label, max)));
            }
        }

        Ok(())
    }

    /// Validate one value of the given kind: presence, type, then domain constraints
    pub fn validate_value(
        &self,
        kind: ValueKind,
        value: &FieldValue,
        field_label: &str,
    ) -> Result<(), String> {
        if value.is_blank() {
            return if self.required {
                Err(REQUIRED_MESSAGE.to_string())
            } else {
                Ok(())
            };
        }

        if !value.matches_kind(kind) {
            return Err(format!("must be a {}", kind.as_str()));
        }

        match value {
            FieldValue::Text(s) => self.validate_string(s, field_label),
            FieldValue::Number(n) => self.validate_number(*n, field_label),
            _ => Ok(()),
        }
    }

    fn message_or(&self, fallback: String) -> String {
        self.custom_error.map(str::to_string).unwrap_or(fallback)
    }
}

/// Validate a record against a field table.
///
/// Every field is checked independently, so one invalid field never hides another.
/// A field missing from the record is treated as `Null`.
pub fn validate_record(fields: &[FieldMetadata], record: &Record) -> FieldErrors {
    let mut errors = FieldErrors::new();

    for field in fields {
        let value = record.get(field.name).unwrap_or(&FieldValue::Null);
        if let Err(message) = field
            .validation
            .validate_value(field.value_kind(), value, field.label())
        {
            errors.insert(field.name, message);
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::metadata::{FieldType, FieldUiMetadata};

    fn field(
        name: &'static str,
        rust_type: &'static str,
        field_type: FieldType,
        validation: ValidationRules,
    ) -> FieldMetadata {
        FieldMetadata {
            name,
            rust_type,
            field_type,
            ui: FieldUiMetadata {
                label: name,
                ..FieldUiMetadata::default()
            },
            validation,
            ref_aggregate: None,
        }
    }

    #[test]
    fn test_required_blank_text() {
        let rules = ValidationRules::required();
        assert_eq!(
            rules.validate_value(ValueKind::Text, &FieldValue::Text("  ".into()), "Name"),
            Err("required".to_string())
        );
        assert!(rules
            .validate_value(ValueKind::Text, &FieldValue::Text("Depot".into()), "Name")
            .is_ok());
    }

    #[test]
    fn test_optional_reference_accepts_null() {
        let optional = ValidationRules::none();
        assert!(optional
            .validate_value(ValueKind::Reference, &FieldValue::Null, "Supplier")
            .is_ok());

        let required = ValidationRules::required();
        assert_eq!(
            required.validate_value(ValueKind::Reference, &FieldValue::Null, "Supplier"),
            Err("required".to_string())
        );
        assert_eq!(
            required.validate_value(ValueKind::Reference, &FieldValue::Reference(String::new()), "Supplier"),
            Err("required".to_string())
        );
    }

    #[test]
    fn test_type_mismatch() {
        let rules = ValidationRules::none();
        assert_eq!(
            rules.validate_value(ValueKind::DateTime, &FieldValue::Text("soon".into()), "Opening"),
            Err("must be a date".to_string())
        );
    }

    #[test]
    fn test_pattern_and_custom_error() {
        let rules = ValidationRules {
            pattern: Some(r"^\+?[0-9][0-9 ()-]{2,}$"),
            custom_error: Some("enter a phone number"),
            ..ValidationRules::none()
        };
        assert!(rules.validate_string("555-0100", "Phone").is_ok());
        assert_eq!(
            rules.validate_string("call me", "Phone"),
            Err("enter a phone number".to_string())
        );
    }

    #[test]
    fn test_pattern_compiled_once() {
        const POSTCODE: &str = r"^[0-9]{5}$";
        let rules = ValidationRules {
            pattern: Some(POSTCODE),
            ..ValidationRules::none()
        };

        assert!(rules.validate_string("12345", "Postcode").is_ok());
        let cached = PATTERNS.lock().unwrap().get(POSTCODE).map(|re| re.as_str().to_string());
        assert_eq!(cached.as_deref(), Some(POSTCODE));

        assert!(rules.validate_string("1234", "Postcode").is_err());
        assert!(compiled_pattern("([unclosed").is_err());
        assert!(!PATTERNS.lock().unwrap().contains_key("([unclosed"));
    }

    #[test]
    fn test_number_range() {
        let rules = ValidationRules {
            min: Some(1.0),
            max: Some(10.0),
            ..ValidationRules::none()
        };
        assert!(rules.validate_number(5.0, "Qty").is_ok());
        assert_eq!(rules.validate_number(0.0, "Qty"), Err("Qty must be at least 1".to_string()));
        assert_eq!(rules.validate_number(11.0, "Qty"), Err("Qty must be at most 10".to_string()));
    }

    #[test]
    fn test_validate_record_reports_every_invalid_field() {
        let fields = [
            field("name", "String", FieldType::Primitive, ValidationRules::required()),
            field("qty", "f64", FieldType::Primitive, ValidationRules::required()),
            field("note", "Option<String>", FieldType::Primitive, ValidationRules::none()),
        ];
        let record = Record::from_defaults(&fields, [("qty", FieldValue::Text("many".into()))]);

        let errors = validate_record(&fields, &record);
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["name", "qty"]);
        assert_eq!(errors.get("name"), Some("required"));
        assert_eq!(errors.get("qty"), Some("must be a number"));
    }

    #[test]
    fn test_validate_record_treats_missing_entry_as_null() {
        let fields = [field("name", "String", FieldType::Primitive, ValidationRules::required())];
        let errors = validate_record(&fields, &Record::default());
        assert_eq!(errors.get("name"), Some("required"));
    }
}
