use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::metadata;
use crate::domain::common::{AggregateId, AggregateRoot};
use crate::shared::metadata::{EntityMetadataInfo, FieldMetadata};

// ============================================================================
// ID Type
// ============================================================================

/// Supplier identifier (the tenant of the rental business)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupplierId(pub Uuid);

impl SupplierId {
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

impl AggregateId for SupplierId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(SupplierId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Supplier as returned by `GET /api/supplier`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: SupplierId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AggregateRoot for Supplier {
    type Id = SupplierId;

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_metadata() {
        assert_eq!(Supplier::collection_name(), "supplier");
        assert_eq!(Supplier::full_name(), "a001_supplier");
        let names: Vec<_> = Supplier::field_metadata().iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["name", "description"]);
    }

    #[test]
    fn test_supplier_id_round_trip() {
        let id = SupplierId::new_v4();
        assert_eq!(SupplierId::from_string(&id.as_string()), Ok(id));
        assert!(SupplierId::from_string("not-a-uuid").is_err());
    }
}
