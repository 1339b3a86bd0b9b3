use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::metadata;
use crate::domain::a001_supplier::aggregate::SupplierId;
use crate::domain::common::{AggregateId, AggregateRoot};
use crate::shared::metadata::{validate_record, EntityMetadataInfo, FieldMetadata};
use crate::shared::record::{FieldErrors, Record};

// ============================================================================
// ID Type
// ============================================================================

/// Store (rental location) identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreId(pub Uuid);

impl StoreId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for StoreId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(StoreId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Rental location owned by a supplier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<NaiveDateTime>,
    #[serde(default)]
    pub closing_hours: Option<NaiveDateTime>,
    #[serde(default)]
    pub supplier_id: Option<SupplierId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AggregateRoot for Store {
    type Id = StoreId;

    fn id(&self) -> Self::Id {
        self.id
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn entity_metadata_info() -> &'static EntityMetadataInfo {
        &metadata::ENTITY_METADATA
    }

    fn field_metadata() -> &'static [FieldMetadata] {
        metadata::FIELDS
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Field-table validation plus the store's cross-field rule:
/// closing hours must not precede opening hours when both are set.
pub fn validate_store_record(record: &Record) -> FieldErrors {
    let mut errors = validate_record(metadata::FIELDS, record);

    if errors.contains("opening_hours") || errors.contains("closing_hours") {
        return errors;
    }

    let opening = record.get("opening_hours").and_then(|v| v.as_datetime());
    let closing = record.get("closing_hours").and_then(|v| v.as_datetime());
    if let (Some(opening), Some(closing)) = (opening, closing) {
        if closing < opening {
            errors.insert("closing_hours", "must not be earlier than opening hours");
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::record::FieldValue;
    use chrono::NaiveDate;

    fn at(hour: u32) -> FieldValue {
        FieldValue::DateTime(
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
        )
    }

    fn record(name: &str, supplier: FieldValue) -> Record {
        Record::from_defaults(
            metadata::FIELDS,
            [
                ("name", FieldValue::Text(name.to_string())),
                ("address", FieldValue::Text("5 Elm St".into())),
                ("contact_number", FieldValue::Text("555-0100".into())),
                ("opening_hours", at(8)),
                ("closing_hours", at(18)),
                ("supplier_id", supplier),
            ],
        )
    }

    #[test]
    fn test_store_schema_order() {
        let names: Vec<_> = Store::field_metadata().iter().map(|f| f.name).collect();
        assert_eq!(
            names,
            vec![
                "name",
                "address",
                "contact_number",
                "opening_hours",
                "closing_hours",
                "supplier_id"
            ]
        );
        assert_eq!(Store::list_name(), "Stores");
        assert_eq!(Store::entity_metadata_info().ui.list_route, "stores");
    }

    #[test]
    fn test_empty_name_only_error() {
        let errors = validate_store_record(&record("", FieldValue::Null));
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["name"]);
        assert_eq!(errors.get("name"), Some("required"));
    }

    #[test]
    fn test_well_formed_record_is_valid() {
        let supplier = FieldValue::Reference(SupplierId::new_v4().as_string());
        assert!(validate_store_record(&record("Downtown Depot", supplier)).is_empty());
        assert!(validate_store_record(&record("Downtown Depot", FieldValue::Null)).is_empty());
    }

    #[test]
    fn test_validation_is_idempotent() {
        let rec = record("", FieldValue::Text("bogus".into()));
        let first = validate_store_record(&rec);
        let second = validate_store_record(&rec);
        assert_eq!(first, second);
        assert_eq!(first.fields().collect::<Vec<_>>(), vec!["name", "supplier_id"]);
    }

    #[test]
    fn test_each_required_field_isolated() {
        for field in Store::field_metadata().iter().filter(|f| f.validation.required) {
            let mut rec = record("Downtown Depot", FieldValue::Null);
            rec.set(field.name, FieldValue::Null);
            let errors = validate_store_record(&rec);
            assert_eq!(errors.fields().collect::<Vec<_>>(), vec![field.name]);
        }
    }

    #[test]
    fn test_closing_before_opening() {
        let mut rec = record("Downtown Depot", FieldValue::Null);
        rec.set("opening_hours", at(18));
        rec.set("closing_hours", at(8));
        let errors = validate_store_record(&rec);
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["closing_hours"]);
    }

    #[test]
    fn test_bad_phone_number() {
        let mut rec = record("Downtown Depot", FieldValue::Null);
        rec.set("contact_number", FieldValue::Text("call us".into()));
        let errors = validate_store_record(&rec);
        assert_eq!(errors.get("contact_number"), Some("enter a valid phone number"));
    }
}
