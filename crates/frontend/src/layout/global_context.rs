use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use web_sys::window;

use crate::shared::entity_form::navigation::Navigator;

/// Page currently shown in the center area
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    Login,
    #[default]
    StoreList,
    StoreCreate {
        /// Supplier preselected by the caller
        supplier_id: Option<String>,
    },
}

/// URL query mirror of the route: `?page=stores/create&supplier_id=...`
#[derive(Debug, Default, Serialize, Deserialize)]
struct RouteQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    supplier_id: Option<String>,
}

impl AppRoute {
    pub const LOGIN: &'static str = "login";
    pub const STORES: &'static str = "stores";
    pub const STORE_CREATE: &'static str = "stores/create";

    /// Unknown pages fall back to the store list
    pub fn from_page(page: &str, supplier_id: Option<String>) -> Self {
        match page.trim_matches('/') {
            Self::LOGIN => AppRoute::Login,
            Self::STORE_CREATE => AppRoute::StoreCreate {
                supplier_id: supplier_id.filter(|id| !id.trim().is_empty()),
            },
            _ => AppRoute::StoreList,
        }
    }

    pub fn page(&self) -> &'static str {
        match self {
            AppRoute::Login => Self::LOGIN,
            AppRoute::StoreList => Self::STORES,
            AppRoute::StoreCreate { .. } => Self::STORE_CREATE,
        }
    }

    pub fn from_query(search: &str) -> Self {
        let query: RouteQuery =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
        match query.page {
            Some(page) => Self::from_page(&page, query.supplier_id),
            None => AppRoute::default(),
        }
    }

    pub fn to_query(&self) -> String {
        let supplier_id = match self {
            AppRoute::StoreCreate { supplier_id } => supplier_id.clone(),
            _ => None,
        };
        let query = RouteQuery {
            page: Some(self.page().to_string()),
            supplier_id,
        };
        serde_qs::to_string(&query).unwrap_or_default()
    }
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub route: RwSignal<AppRoute>,
    pub left_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            route: RwSignal::new(AppRoute::default()),
            left_open: RwSignal::new(true),
        }
    }

    /// Read the initial route from the URL, then keep the URL in sync with it
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        self.route.set(AppRoute::from_query(&search));

        let this = *self;
        Effect::new(move |_| {
            let new_url = format!("?{}", this.route.with(AppRoute::to_query));

            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();

            if current_search != new_url {
                if let Some(w) = window() {
                    if let Ok(history) = w.history() {
                        let _ = history.push_state_with_url(
                            &wasm_bindgen::JsValue::NULL,
                            "",
                            Some(&new_url),
                        );
                    }
                }
            }
        });
    }

    pub fn open(&self, route: AppRoute) {
        log::debug!("open page '{}'", route.page());
        self.route.set(route);
    }

    pub fn go(&self, page: &str) {
        self.open(AppRoute::from_page(page, None));
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for AppGlobalContext {
    fn navigate(&self, page: &str) {
        self.go(page);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_from_query() {
        assert_eq!(AppRoute::from_query(""), AppRoute::StoreList);
        assert_eq!(AppRoute::from_query("?page=login"), AppRoute::Login);
        assert_eq!(
            AppRoute::from_query("?page=stores%2Fcreate&supplier_id=s-1"),
            AppRoute::StoreCreate {
                supplier_id: Some("s-1".into())
            }
        );
        assert_eq!(AppRoute::from_query("?page=unknown"), AppRoute::StoreList);
    }

    #[test]
    fn test_supplier_only_kept_for_create() {
        assert_eq!(
            AppRoute::from_page("stores", Some("s-1".into())),
            AppRoute::StoreList
        );
        assert_eq!(
            AppRoute::from_page("stores/create", Some(" ".into())),
            AppRoute::StoreCreate { supplier_id: None }
        );
    }

    #[test]
    fn test_query_round_trip_for_create() {
        let route = AppRoute::StoreCreate {
            supplier_id: Some("s-9".into()),
        };
        assert_eq!(AppRoute::from_query(&route.to_query()), route);
        assert_eq!(AppRoute::StoreList.to_query(), "page=stores");
    }
}
