//! Relation resolver: loads pages of a related collection as selectable options.
//!
//! Each `fetch` takes the next sequence number at call time. A completion is
//! applied only while its sequence number is still the latest, so a slow
//! response for an older request can never overwrite a newer one.
//!
//! The selected option is remembered separately from the loaded page, so a
//! selection made on another page (or preselected by id) stays visible.

use contracts::shared::crud::{ListQuery, ListResponse};
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use super::service::{ApiError, EntityService};
use crate::shared::picker_aggregate::AggregatePickerResult;

/// One selectable related entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationOption {
    pub id: String,
    pub label: String,
}

impl RelationOption {
    /// Build an option from a JSON row. Rows without a usable `id` are skipped.
    /// The label falls back to the id when `label_field` is missing.
    pub fn from_row(row: &serde_json::Value, label_field: &str) -> Option<Self> {
        let id = match row.get("id")? {
            serde_json::Value::String(s) if !s.trim().is_empty() => s.clone(),
            serde_json::Value::Number(n) => n.to_string(),
            _ => return None,
        };
        let label = row
            .get(label_field)
            .and_then(|v| v.as_str())
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| id.clone());

        Some(Self { id, label })
    }
}

impl AggregatePickerResult for RelationOption {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn display_name(&self) -> String {
        self.label.clone()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RelationState {
    Idle,
    Loading {
        query: ListQuery,
    },
    Loaded {
        options: Vec<RelationOption>,
        total: usize,
        query: ListQuery,
    },
    Failed {
        error: ApiError,
        query: ListQuery,
    },
}

/// Result of one fetch as seen by its caller
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Applied,
    /// A newer fetch was issued (or the resolver was disposed) before this one completed
    Stale,
    Failed(ApiError),
}

struct ResolverState {
    state: RelationState,
    latest: u64,
    last_query: Option<ListQuery>,
    selected: Option<RelationOption>,
    disposed: bool,
}

#[derive(Clone)]
pub struct RelationResolver {
    service: Rc<dyn EntityService>,
    collection: &'static str,
    label_field: &'static str,
    inner: Rc<RefCell<ResolverState>>,
    on_change: Option<Rc<dyn Fn()>>,
}

impl RelationResolver {
    pub fn new(
        service: Rc<dyn EntityService>,
        collection: &'static str,
        label_field: &'static str,
    ) -> Self {
        Self {
            service,
            collection,
            label_field,
            inner: Rc::new(RefCell::new(ResolverState {
                state: RelationState::Idle,
                latest: 0,
                last_query: None,
                selected: None,
                disposed: false,
            })),
            on_change: None,
        }
    }

    /// Callback invoked after every visible state change
    pub fn with_observer(mut self, on_change: Rc<dyn Fn()>) -> Self {
        self.on_change = Some(on_change);
        self
    }

    pub fn collection(&self) -> &'static str {
        self.collection
    }

    /// Start loading `query`. The request is registered immediately; the
    /// returned future performs the call and applies the result if still current.
    pub fn fetch(&self, query: ListQuery) -> impl Future<Output = FetchOutcome> + 'static {
        let seq = {
            let mut inner = self.inner.borrow_mut();
            if inner.disposed {
                None
            } else {
                inner.latest += 1;
                inner.state = RelationState::Loading {
                    query: query.clone(),
                };
                inner.last_query = Some(query.clone());
                Some(inner.latest)
            }
        };
        if seq.is_some() {
            self.notify();
        }

        let this = self.clone();
        async move {
            let Some(seq) = seq else {
                return FetchOutcome::Stale;
            };
            log::debug!("fetching {} options, request #{}", this.collection, seq);
            let result = this.service.list(this.collection, &query).await;
            this.complete(seq, query, result)
        }
    }

    /// Remember `id` as the chosen option.
    ///
    /// When the option is not on the loaded page a placeholder labelled with
    /// the id is kept and the returned future looks the row up by id.
    pub fn select(&self, id: Option<&str>) -> Option<impl Future<Output = FetchOutcome> + 'static> {
        let lookup = {
            let mut inner = self.inner.borrow_mut();
            if inner.disposed {
                return None;
            }
            match id {
                None => {
                    inner.selected = None;
                    None
                }
                Some(id) if inner.selected.as_ref().is_some_and(|o| o.id == id) => return None,
                Some(id) => {
                    let on_page = match &inner.state {
                        RelationState::Loaded { options, .. } => {
                            options.iter().find(|o| o.id == id).cloned()
                        }
                        _ => None,
                    };
                    match on_page {
                        Some(option) => {
                            inner.selected = Some(option);
                            None
                        }
                        None => {
                            inner.selected = Some(RelationOption {
                                id: id.to_string(),
                                label: id.to_string(),
                            });
                            Some(id.to_string())
                        }
                    }
                }
            }
        };
        self.notify();
        lookup.map(|id| self.lookup(id))
    }

    fn lookup(&self, id: String) -> impl Future<Output = FetchOutcome> + 'static {
        let this = self.clone();
        async move {
            log::debug!("looking up {} {}", this.collection, id);
            let result = this.service.get(this.collection, &id).await;

            let outcome = {
                let mut inner = this.inner.borrow_mut();
                let still_selected = inner.selected.as_ref().is_some_and(|o| o.id == id);
                if inner.disposed || !still_selected {
                    return FetchOutcome::Stale;
                }
                match result {
                    Ok(row) => match RelationOption::from_row(&row, this.label_field) {
                        Some(option) if option.id == id => {
                            inner.selected = Some(option);
                            FetchOutcome::Applied
                        }
                        _ => FetchOutcome::Failed(ApiError::Decode(format!(
                            "no {} row with id {}",
                            this.collection, id
                        ))),
                    },
                    Err(error) => {
                        log::warn!("failed to look up {} {}: {}", this.collection, id, error);
                        FetchOutcome::Failed(error)
                    }
                }
            };
            this.notify();
            outcome
        }
    }

    /// Re-issue the most recent request, if any was made
    pub fn retry(&self) -> Option<impl Future<Output = FetchOutcome> + 'static> {
        let last = self.inner.borrow().last_query.clone();
        last.map(|query| self.fetch(query))
    }

    /// Load the first page matching `filter`, keeping the current page size
    pub fn search(&self, filter: &str) -> impl Future<Output = FetchOutcome> + 'static {
        let page_size = self
            .inner
            .borrow()
            .last_query
            .as_ref()
            .map(|q| q.page_size)
            .unwrap_or(ListQuery::DEFAULT_PAGE_SIZE);
        self.fetch(ListQuery::page(0, page_size).with_filter(filter))
    }

    /// Load another page of the current query (same filter and page size)
    pub fn go_to_page(&self, page: usize) -> impl Future<Output = FetchOutcome> + 'static {
        let mut query = self
            .inner
            .borrow()
            .last_query
            .clone()
            .unwrap_or_default();
        query.page = page;
        self.fetch(query)
    }

    fn complete(
        &self,
        seq: u64,
        query: ListQuery,
        result: Result<ListResponse<serde_json::Value>, ApiError>,
    ) -> FetchOutcome {
        let outcome = {
            let mut inner = self.inner.borrow_mut();
            if inner.disposed || seq != inner.latest {
                log::debug!(
                    "discarding stale {} options, request #{} (latest #{})",
                    self.collection,
                    seq,
                    inner.latest
                );
                return FetchOutcome::Stale;
            }

            match result {
                Ok(page) => {
                    let options: Vec<RelationOption> = page
                        .items
                        .iter()
                        .filter_map(|row| RelationOption::from_row(row, self.label_field))
                        .collect();
                    if let Some(selected) = inner.selected.as_mut() {
                        if let Some(found) = options.iter().find(|o| o.id == selected.id) {
                            *selected = found.clone();
                        }
                    }
                    inner.state = RelationState::Loaded {
                        options,
                        total: page.count,
                        query,
                    };
                    FetchOutcome::Applied
                }
                Err(error) => {
                    log::warn!("failed to load {} options: {}", self.collection, error);
                    inner.state = RelationState::Failed {
                        error: error.clone(),
                        query,
                    };
                    FetchOutcome::Failed(error)
                }
            }
        };
        self.notify();
        outcome
    }

    pub fn state(&self) -> RelationState {
        self.inner.borrow().state.clone()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.inner.borrow().state, RelationState::Loading { .. })
    }

    /// Options of the current page; empty unless loaded
    pub fn options(&self) -> Vec<RelationOption> {
        match &self.inner.borrow().state {
            RelationState::Loaded { options, .. } => options.clone(),
            _ => Vec::new(),
        }
    }

    pub fn selected(&self) -> Option<RelationOption> {
        self.inner.borrow().selected.clone()
    }

    /// Options of the current page, led by the selected option when it lives on another page
    pub fn options_with_selected(&self) -> Vec<RelationOption> {
        let mut options = self.options();
        if let Some(selected) = self.selected() {
            if !options.iter().any(|o| o.id == selected.id) {
                options.insert(0, selected);
            }
        }
        options
    }

    /// Whether the last request failed in a way worth repeating
    pub fn can_retry(&self) -> bool {
        let inner = self.inner.borrow();
        match &inner.state {
            RelationState::Failed { error, .. } => {
                inner.last_query.is_some() && error.is_retryable()
            }
            _ => false,
        }
    }

    /// Page count of the loaded query, 0 when nothing is loaded
    pub fn total_pages(&self) -> usize {
        match &self.inner.borrow().state {
            RelationState::Loaded { total, query, .. } if query.page_size > 0 => {
                total.div_ceil(query.page_size)
            }
            _ => 0,
        }
    }

    /// Page of the most recent request
    pub fn current_page(&self) -> usize {
        self.inner
            .borrow()
            .last_query
            .as_ref()
            .map(|q| q.page)
            .unwrap_or(0)
    }

    pub fn total_count(&self) -> usize {
        match &self.inner.borrow().state {
            RelationState::Loaded { total, .. } => *total,
            _ => 0,
        }
    }

    /// Stop applying completions; later fetches are reported as stale
    pub fn dispose(&self) {
        self.inner.borrow_mut().disposed = true;
    }

    fn notify(&self) {
        if self.inner.borrow().disposed {
            return;
        }
        if let Some(on_change) = &self.on_change {
            on_change();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::entity_form::testing::MockEntityService;
    use serde_json::json;

    fn suppliers(service: &Rc<MockEntityService>) -> RelationResolver {
        RelationResolver::new(service.clone(), "supplier", "name")
    }

    #[test]
    fn test_option_from_row() {
        let row = json!({ "id": "s-1", "name": "Acme Tools" });
        assert_eq!(
            RelationOption::from_row(&row, "name"),
            Some(RelationOption {
                id: "s-1".into(),
                label: "Acme Tools".into()
            })
        );
        let unnamed = json!({ "id": 7 });
        assert_eq!(
            RelationOption::from_row(&unnamed, "name").map(|o| o.label),
            Some("7".to_string())
        );
        assert_eq!(RelationOption::from_row(&json!({ "name": "x" }), "name"), None);
    }

    #[tokio::test]
    async fn test_fetch_loads_options() {
        let service = Rc::new(MockEntityService::with_suppliers(3));
        let resolver = suppliers(&service);
        assert_eq!(resolver.state(), RelationState::Idle);

        let pending = resolver.fetch(ListQuery::page(0, 2));
        assert!(resolver.is_loading());

        assert_eq!(pending.await, FetchOutcome::Applied);
        let labels: Vec<_> = resolver.options().into_iter().map(|o| o.label).collect();
        assert_eq!(labels, vec!["Supplier 1", "Supplier 2"]);
        assert_eq!(resolver.total_pages(), 2);
    }

    #[tokio::test]
    async fn test_out_of_order_response_is_discarded() {
        let service = Rc::new(MockEntityService::with_suppliers(4));
        let resolver = suppliers(&service);

        let page_one = resolver.fetch(ListQuery::page(0, 2));
        let page_two = resolver.fetch(ListQuery::page(1, 2));

        // page 2 answers first, then the older page 1 response arrives
        assert_eq!(page_two.await, FetchOutcome::Applied);
        assert_eq!(page_one.await, FetchOutcome::Stale);

        let labels: Vec<_> = resolver.options().into_iter().map(|o| o.label).collect();
        assert_eq!(labels, vec!["Supplier 3", "Supplier 4"]);
        match resolver.state() {
            RelationState::Loaded { query, total, .. } => {
                assert_eq!(query.page, 1);
                assert_eq!(total, 4);
            }
            other => panic!("unexpected state {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failure_is_retryable_and_distinct_from_empty() {
        let service = Rc::new(MockEntityService::with_suppliers(0));
        service.fail_next_list(ApiError::Network("offline".into()));
        let resolver = suppliers(&service);

        let outcome = resolver.fetch(ListQuery::first_page()).await;
        assert_eq!(outcome, FetchOutcome::Failed(ApiError::Network("offline".into())));
        assert!(matches!(resolver.state(), RelationState::Failed { .. }));

        let retried = resolver.retry().expect("a request was made").await;
        assert_eq!(retried, FetchOutcome::Applied);
        assert_eq!(
            resolver.state(),
            RelationState::Loaded {
                options: vec![],
                total: 0,
                query: ListQuery::first_page(),
            }
        );
        assert_eq!(service.list_calls(), 2);
    }

    #[tokio::test]
    async fn test_only_transient_failures_offer_retry() {
        let service = Rc::new(MockEntityService::with_suppliers(1));
        let resolver = suppliers(&service);
        assert!(!resolver.can_retry());

        service.fail_next_list(ApiError::Http {
            status: 503,
            message: "busy".into(),
        });
        resolver.fetch(ListQuery::first_page()).await;
        assert!(resolver.can_retry());

        service.fail_next_list(ApiError::Unauthorized);
        resolver.fetch(ListQuery::first_page()).await;
        assert!(!resolver.can_retry());

        service.fail_next_list(ApiError::Decode("not json".into()));
        resolver.fetch(ListQuery::first_page()).await;
        assert!(!resolver.can_retry());
    }

    #[tokio::test]
    async fn test_selected_option_off_page_is_looked_up() {
        let service = Rc::new(MockEntityService::with_suppliers(12));
        let resolver = suppliers(&service);
        resolver.fetch(ListQuery::page(0, 10)).await;
        assert!(!resolver.options().iter().any(|o| o.id == "supplier-12"));

        let lookup = resolver
            .select(Some("supplier-12"))
            .expect("supplier-12 is not on page 0");
        assert_eq!(
            resolver.options_with_selected().first(),
            Some(&RelationOption {
                id: "supplier-12".into(),
                label: "supplier-12".into()
            })
        );

        assert_eq!(lookup.await, FetchOutcome::Applied);
        let options = resolver.options_with_selected();
        assert_eq!(options.len(), 11);
        assert_eq!(options[0].label, "Supplier 12");
        assert_eq!(service.lookups(), vec!["supplier-12".to_string()]);
    }

    #[tokio::test]
    async fn test_selection_survives_paging() {
        let service = Rc::new(MockEntityService::with_suppliers(12));
        let resolver = suppliers(&service);
        resolver.fetch(ListQuery::page(0, 10)).await;

        assert!(resolver.select(Some("supplier-3")).is_none());
        resolver.go_to_page(1).await;

        let labels: Vec<_> = resolver
            .options_with_selected()
            .into_iter()
            .map(|o| o.label)
            .collect();
        assert_eq!(labels, vec!["Supplier 3", "Supplier 11", "Supplier 12"]);
        assert!(service.lookups().is_empty());

        resolver.select(None);
        assert_eq!(resolver.options_with_selected(), resolver.options());
    }

    #[tokio::test]
    async fn test_lookup_for_replaced_selection_is_stale() {
        let service = Rc::new(MockEntityService::with_suppliers(12));
        let resolver = suppliers(&service);
        resolver.fetch(ListQuery::page(0, 5)).await;

        let first = resolver.select(Some("supplier-12")).expect("off page");
        let second = resolver.select(Some("supplier-11")).expect("off page");

        assert_eq!(first.await, FetchOutcome::Stale);
        assert_eq!(second.await, FetchOutcome::Applied);
        assert_eq!(
            resolver.selected().map(|o| o.label),
            Some("Supplier 11".to_string())
        );
    }

    #[tokio::test]
    async fn test_refetch_is_idempotent() {
        let service = Rc::new(MockEntityService::with_suppliers(2));
        let resolver = suppliers(&service);

        resolver.fetch(ListQuery::first_page()).await;
        let first = resolver.state();
        resolver.fetch(ListQuery::first_page()).await;
        assert_eq!(resolver.state(), first);
    }

    #[tokio::test]
    async fn test_search_filters_from_first_page() {
        let service = Rc::new(MockEntityService::with_suppliers(12));
        let resolver = suppliers(&service);

        resolver.fetch(ListQuery::page(1, 5)).await;
        resolver.search("Supplier 1").await;

        let labels: Vec<_> = resolver.options().into_iter().map(|o| o.label).collect();
        assert_eq!(labels, vec!["Supplier 1", "Supplier 10", "Supplier 11", "Supplier 12"]);
        assert_eq!(
            service.last_list_query(),
            Some(ListQuery::page(0, 5).with_filter("Supplier 1"))
        );
    }

    #[tokio::test]
    async fn test_disposed_resolver_ignores_completion() {
        let service = Rc::new(MockEntityService::with_suppliers(2));
        let resolver = suppliers(&service);

        let pending = resolver.fetch(ListQuery::first_page());
        resolver.dispose();
        assert_eq!(pending.await, FetchOutcome::Stale);
        assert!(resolver.is_loading());
    }

    #[tokio::test]
    async fn test_observer_notified() {
        let service = Rc::new(MockEntityService::with_suppliers(1));
        let count = Rc::new(std::cell::Cell::new(0));
        let seen = count.clone();
        let resolver = suppliers(&service).with_observer(Rc::new(move || seen.set(seen.get() + 1)));

        resolver.fetch(ListQuery::first_page()).await;
        // loading + loaded
        assert_eq!(count.get(), 2);
    }
}
