//! Field type enumeration for metadata system

/// Category of field type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldType {
    #[default]
    Primitive,      // String, f64, bool, NaiveDateTime
    AggregateRef,   // Reference to another aggregate by ID
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primitive => "primitive",
            Self::AggregateRef => "aggregate_ref",
        }
    }
}

/// Primitive value kind a form field holds, derived from `rust_type` + `field_type`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    Number,
    DateTime,
    Boolean,
    Reference,
}

impl ValueKind {
    /// Resolve the kind for a declared Rust type. `Option<T>` is unwrapped.
    pub fn resolve(rust_type: &str, field_type: FieldType) -> Self {
        if field_type == FieldType::AggregateRef {
            return Self::Reference;
        }

        let inner = rust_type
            .trim()
            .strip_prefix("Option<")
            .and_then(|rest| rest.strip_suffix('>'))
            .unwrap_or(rust_type)
            .trim();

        match inner {
            "f64" | "f32" | "i32" | "i64" | "u32" | "u64" | "usize" => Self::Number,
            "NaiveDateTime" | "DateTime<Utc>" | "chrono::NaiveDateTime" => Self::DateTime,
            "bool" => Self::Boolean,
            _ => Self::Text,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::DateTime => "date",
            Self::Boolean => "boolean",
            Self::Reference => "reference",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_primitives() {
        assert_eq!(ValueKind::resolve("String", FieldType::Primitive), ValueKind::Text);
        assert_eq!(ValueKind::resolve("Option<f64>", FieldType::Primitive), ValueKind::Number);
        assert_eq!(
            ValueKind::resolve("Option<NaiveDateTime>", FieldType::Primitive),
            ValueKind::DateTime
        );
        assert_eq!(ValueKind::resolve("bool", FieldType::Primitive), ValueKind::Boolean);
    }

    #[test]
    fn test_aggregate_ref_is_reference() {
        assert_eq!(
            ValueKind::resolve("Option<String>", FieldType::AggregateRef),
            ValueKind::Reference
        );
    }
}
