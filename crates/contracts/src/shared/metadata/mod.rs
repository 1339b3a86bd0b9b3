//! Metadata types for describing aggregates
//!
//! This module provides compile-time metadata for all entities in the system.
//! All types use 'static lifetimes for zero-cost access to compile-time constants.
//! The field tables double as the declarative validation schema for create forms.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use contracts::domain::a002_store::metadata::FIELDS;
//! use contracts::shared::metadata::validate_record;
//!
//! let errors = validate_record(FIELDS, &record);
//! for (field, message) in errors.iter() {
//!     println!("{}: {}", field, message);
//! }
//! ```

mod field_type;
mod types;
mod validation;

pub use field_type::{FieldType, ValueKind};
pub use types::{
    find_field, EntityMetadataInfo, EntityType, EntityUiMetadata, FieldMetadata, FieldUiMetadata,
};
pub use validation::{validate_record, ValidationRules, REQUIRED_MESSAGE};
