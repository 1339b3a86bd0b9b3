//! Supplier options for relation selects

use contracts::domain::a001_supplier::aggregate::Supplier;
use contracts::domain::common::AggregateRoot;
use contracts::shared::crud::ListQuery;
use std::rc::Rc;

use crate::shared::entity_form::relation::RelationResolver;
use crate::shared::entity_form::service::EntityService;

/// Field shown as the option label
pub const SUPPLIER_LABEL_FIELD: &str = "name";

/// Suppliers per picker page
pub const SUPPLIER_PAGE_SIZE: usize = 10;

pub fn supplier_resolver(service: Rc<dyn EntityService>) -> RelationResolver {
    RelationResolver::new(service, Supplier::collection_name(), SUPPLIER_LABEL_FIELD)
}

pub fn first_supplier_page() -> ListQuery {
    ListQuery::page(0, SUPPLIER_PAGE_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::entity_form::testing::MockEntityService;

    #[tokio::test]
    async fn test_supplier_resolver_uses_name_labels() {
        let service = Rc::new(MockEntityService::with_suppliers(12));
        let resolver = supplier_resolver(service.clone());

        resolver.fetch(first_supplier_page()).await;

        assert_eq!(resolver.collection(), "supplier");
        assert_eq!(resolver.options().len(), SUPPLIER_PAGE_SIZE);
        let third = resolver.options().into_iter().find(|o| o.id == "supplier-3");
        assert_eq!(third.map(|o| o.label), Some("Supplier 3".to_string()));
        assert_eq!(resolver.total_pages(), 2);
    }
}
