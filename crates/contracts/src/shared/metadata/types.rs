//! Core metadata types for aggregates
//!
//! All types use 'static lifetimes for zero-cost compile-time constants.

use super::field_type::{FieldType, ValueKind};
use super::validation::ValidationRules;

// ============================================================================
// Entity-level metadata
// ============================================================================

/// Metadata for an entity
/// All string fields are 'static for zero-cost compile-time access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityMetadataInfo {
    pub schema_version: &'static str,
    pub entity_type: EntityType,
    pub entity_name: &'static str,
    pub entity_index: &'static str,
    pub collection_name: &'static str,
    pub ui: EntityUiMetadata,
}

/// Type of entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityType {
    Aggregate,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aggregate => "aggregate",
        }
    }
}

/// UI metadata for entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityUiMetadata {
    pub element_name: &'static str,
    pub list_name: &'static str,
    /// Route key of the collection-listing view
    pub list_route: &'static str,
}

// ============================================================================
// Field-level metadata
// ============================================================================

/// Metadata for a single field
/// Copy trait enabled for efficient passing by value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldMetadata {
    pub name: &'static str,
    pub rust_type: &'static str,
    pub field_type: FieldType,
    pub ui: FieldUiMetadata,
    pub validation: ValidationRules,
    pub ref_aggregate: Option<&'static str>,
}

impl FieldMetadata {
    /// Check if field is optional
    pub fn is_optional(&self) -> bool {
        !self.validation.required
    }

    /// Primitive kind of values this field accepts
    pub fn value_kind(&self) -> ValueKind {
        ValueKind::resolve(self.rust_type, self.field_type)
    }

    /// Get referenced aggregate index (for AggregateRef)
    pub fn referenced_aggregate(&self) -> Option<&'static str> {
        self.ref_aggregate
    }

    /// Label for messages and form inputs, falling back to the field name
    pub fn label(&self) -> &'static str {
        if self.ui.label.is_empty() {
            self.name
        } else {
            self.ui.label
        }
    }

    pub fn visible_in_list(&self) -> bool {
        self.ui.visible_in_list
    }

    pub fn visible_in_form(&self) -> bool {
        self.ui.visible_in_form
    }
}

/// Look up a field by name
pub fn find_field(fields: &'static [FieldMetadata], name: &str) -> Option<&'static FieldMetadata> {
    fields.iter().find(|f| f.name == name)
}

/// UI metadata for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldUiMetadata {
    pub label: &'static str,
    pub placeholder: Option<&'static str>,
    pub visible_in_list: bool,
    pub visible_in_form: bool,
    pub widget: Option<&'static str>,
}

impl Default for FieldUiMetadata {
    fn default() -> Self {
        Self {
            label: "",
            placeholder: None,
            visible_in_list: true,
            visible_in_form: true,
            widget: None,
        }
    }
}
