use chrono::NaiveDate;
use contracts::domain::a002_store::metadata::FIELDS;
use contracts::shared::record::{FieldValue, Record};
use contracts::system::auth::{AccessOperation, AccessRequirement};

use crate::layout::global_context::AppRoute;
use crate::shared::date_utils::start_of_day;
use crate::system::auth::guard::Guard;

pub const CREATE_STORE: AccessRequirement =
    AccessRequirement::project("store", AccessOperation::Create);

/// Evaluated in order before the create page is built
pub const CREATE_STORE_GUARDS: &[Guard] = &[
    Guard::RequireSession {
        redirect_to: AppRoute::LOGIN,
    },
    Guard::RequireAbility(CREATE_STORE),
];

/// Initial values: empty text, both hours at the start of `today`,
/// and the preselected supplier if one was given.
pub fn default_record(today: NaiveDate, supplier_id: Option<&str>) -> Record {
    let midnight = FieldValue::DateTime(start_of_day(today));
    let supplier = match supplier_id.map(str::trim) {
        Some(id) if !id.is_empty() => FieldValue::Reference(id.to_string()),
        _ => FieldValue::Null,
    };

    Record::from_defaults(
        FIELDS,
        [
            ("name", FieldValue::Text(String::new())),
            ("address", FieldValue::Text(String::new())),
            ("contact_number", FieldValue::Text(String::new())),
            ("opening_hours", midnight.clone()),
            ("closing_hours", midnight),
            ("supplier_id", supplier),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_store::aggregate::validate_store_record;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_defaults_cover_schema() {
        let record = default_record(day(), None);
        assert!(record.covers(FIELDS));
        assert_eq!(record.get("supplier_id"), Some(&FieldValue::Null));
        assert_eq!(
            record.get("opening_hours").map(FieldValue::to_input),
            Some("2024-01-01T00:00".to_string())
        );
    }

    #[test]
    fn test_preselected_supplier() {
        let record = default_record(day(), Some("supplier-4"));
        assert_eq!(
            record.get("supplier_id"),
            Some(&FieldValue::Reference("supplier-4".into()))
        );
        assert_eq!(default_record(day(), Some("  ")).get("supplier_id"), Some(&FieldValue::Null));
    }

    #[test]
    fn test_untouched_defaults_only_miss_name() {
        let errors = validate_store_record(&default_record(day(), None));
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["name"]);
    }
}
