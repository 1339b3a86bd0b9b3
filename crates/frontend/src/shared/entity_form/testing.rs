//! In-memory collaborators for pipeline tests

use async_trait::async_trait;
use contracts::shared::crud::{CreateResponse, ListQuery, ListResponse};
use contracts::shared::record::Record;
use serde_json::json;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use super::navigation::Navigator;
use super::service::{ApiError, EntityService};

/// Serves a generated supplier collection and records create calls
#[derive(Default)]
pub struct MockEntityService {
    suppliers: Vec<serde_json::Value>,
    create_results: RefCell<VecDeque<Result<CreateResponse, ApiError>>>,
    created: RefCell<Vec<(String, Record)>>,
    list_failures: RefCell<VecDeque<ApiError>>,
    list_queries: RefCell<Vec<ListQuery>>,
    lookups: RefCell<Vec<String>>,
    yield_on_create: Cell<bool>,
}

impl MockEntityService {
    pub fn with_suppliers(count: usize) -> Self {
        Self {
            suppliers: (1..=count)
                .map(|n| json!({ "id": format!("supplier-{}", n), "name": format!("Supplier {}", n) }))
                .collect(),
            ..Self::default()
        }
    }

    pub fn push_create_result(&self, result: Result<CreateResponse, ApiError>) {
        self.create_results.borrow_mut().push_back(result);
    }

    pub fn fail_next_list(&self, error: ApiError) {
        self.list_failures.borrow_mut().push_back(error);
    }

    /// Make `create` suspend once before answering
    pub fn yield_on_create(&self) {
        self.yield_on_create.set(true);
    }

    pub fn created(&self) -> Vec<(String, Record)> {
        self.created.borrow().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.list_queries.borrow().len()
    }

    pub fn last_list_query(&self) -> Option<ListQuery> {
        self.list_queries.borrow().last().cloned()
    }

    /// Ids requested through `get`
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.borrow().clone()
    }
}

#[async_trait(?Send)]
impl EntityService for MockEntityService {
    async fn create(&self, collection: &str, record: &Record) -> Result<CreateResponse, ApiError> {
        self.created
            .borrow_mut()
            .push((collection.to_string(), record.clone()));

        if self.yield_on_create.get() {
            tokio::task::yield_now().await;
        }

        let next = self.create_results.borrow_mut().pop_front();
        next.unwrap_or_else(|| {
            Ok(CreateResponse {
                id: format!("{}-{}", collection, self.created.borrow().len()),
            })
        })
    }

    async fn list(
        &self,
        _collection: &str,
        query: &ListQuery,
    ) -> Result<ListResponse<serde_json::Value>, ApiError> {
        self.list_queries.borrow_mut().push(query.clone());

        let failure = self.list_failures.borrow_mut().pop_front();
        if let Some(error) = failure {
            return Err(error);
        }

        let matching: Vec<serde_json::Value> = self
            .suppliers
            .iter()
            .filter(|row| match &query.filter {
                Some(filter) => row["name"]
                    .as_str()
                    .map(|name| name.contains(filter.as_str()))
                    .unwrap_or(false),
                None => true,
            })
            .cloned()
            .collect();

        let items = matching
            .iter()
            .skip(query.page * query.page_size)
            .take(query.page_size)
            .cloned()
            .collect();

        Ok(ListResponse {
            items,
            count: matching.len(),
        })
    }

    async fn get(&self, collection: &str, id: &str) -> Result<serde_json::Value, ApiError> {
        self.lookups.borrow_mut().push(id.to_string());

        self.suppliers
            .iter()
            .find(|row| row["id"].as_str() == Some(id))
            .cloned()
            .ok_or_else(|| ApiError::Http {
                status: 404,
                message: format!("{} {} not found", collection, id),
            })
    }
}

/// Remembers every page it was asked to show
#[derive(Default)]
pub struct RecordingNavigator {
    visited: RefCell<Vec<String>>,
}

impl RecordingNavigator {
    pub fn visited(&self) -> Vec<String> {
        self.visited.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, page: &str) {
        self.visited.borrow_mut().push(page.to_string());
    }
}
