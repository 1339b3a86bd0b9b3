use crate::shared::metadata::{EntityMetadataInfo, FieldMetadata};

/// Aggregate root: instance identity plus the static metadata generated from metadata.json
pub trait AggregateRoot {
    /// Identifier type of the aggregate
    type Id;

    /// Record id
    fn id(&self) -> Self::Id;

    /// Name shown in lists and relation pickers
    fn display_name(&self) -> &str;

    /// Full entity metadata (generated constant)
    fn entity_metadata_info() -> &'static EntityMetadataInfo;

    /// Field table, in form order (generated constant)
    fn field_metadata() -> &'static [FieldMetadata];

    /// Aggregate index (e.g. "a002")
    fn aggregate_index() -> &'static str {
        Self::entity_metadata_info().entity_index
    }

    /// Collection name used in API paths (e.g. "store")
    fn collection_name() -> &'static str {
        Self::entity_metadata_info().collection_name
    }

    /// Singular UI name
    fn element_name() -> &'static str {
        Self::entity_metadata_info().ui.element_name
    }

    /// Plural UI name
    fn list_name() -> &'static str {
        Self::entity_metadata_info().ui.list_name
    }

    /// Full aggregate name (e.g. "a002_store")
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }
}
