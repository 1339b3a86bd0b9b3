use contracts::domain::a002_store::aggregate::Store;
use contracts::domain::a002_store::metadata::FIELDS;
use contracts::domain::common::AggregateRoot;
use contracts::shared::crud::ListQuery;
use contracts::shared::metadata::{FieldMetadata, ValueKind};
use contracts::system::auth::{AccessOperation, AccessRequirement};
use leptos::prelude::*;
use std::rc::Rc;

use crate::layout::global_context::{AppGlobalContext, AppRoute};
use crate::shared::components::{Breadcrumb, PageHeader, PaginationControls};
use crate::shared::date_utils::format_datetime;
use crate::shared::entity_form::{EntityService, HttpEntityService};
use crate::system::auth::gate::AuthGate;
use crate::system::auth::guard::Guard;

pub const READ_STORES: AccessRequirement =
    AccessRequirement::project("store", AccessOperation::Read);

pub const STORE_LIST_GUARDS: &[Guard] = &[
    Guard::RequireSession {
        redirect_to: AppRoute::LOGIN,
    },
    Guard::RequireAbility(READ_STORES),
];

/// Text shown in a list cell for one field of a row
fn cell_text(row: &serde_json::Value, field: &FieldMetadata) -> String {
    match row.get(field.name) {
        None | Some(serde_json::Value::Null) => "-".to_string(),
        Some(serde_json::Value::String(s)) if field.value_kind() == ValueKind::DateTime => {
            format_datetime(s)
        }
        Some(serde_json::Value::String(s)) if s.is_empty() => "-".to_string(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[component]
pub fn StoreListRoute() -> impl IntoView {
    view! { <AuthGate guards=STORE_LIST_GUARDS render=move |_permit| view! { <StoreList /> } /> }
}

#[component]
#[allow(non_snake_case)]
pub fn StoreList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, _) = crate::system::auth::context::use_auth();

    let (items, set_items) = signal::<Vec<serde_json::Value>>(Vec::new());
    let (total, set_total) = signal(0usize);
    let (total_pages, set_total_pages) = signal(0usize);
    let (page, set_page) = signal(0usize);
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);

    let service: StoredValue<Rc<dyn EntityService>, LocalStorage> = StoredValue::new_local(Rc::new(
        HttpEntityService::new(auth_state.get_untracked().access_token),
    ));

    let fetch = move |page_index: usize| {
        let service = service.get_value();
        set_loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let query = ListQuery::page(page_index, ListQuery::DEFAULT_PAGE_SIZE);
            match service.list(Store::collection_name(), &query).await {
                Ok(response) => {
                    let total_pages = response.total_pages(ListQuery::DEFAULT_PAGE_SIZE);
                    set_items.set(response.items);
                    set_total.set(response.count);
                    set_total_pages.set(total_pages);
                    set_page.set(page_index);
                    set_error.set(None);
                }
                Err(e) => {
                    log::warn!("failed to load stores: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    fetch(0);

    let columns: Vec<&'static FieldMetadata> =
        FIELDS.iter().filter(|f| f.visible_in_list()).collect();
    let header_columns = columns.clone();

    view! {
        <div class="page">
            <PageHeader
                title=Store::list_name()
                breadcrumbs=vec![Breadcrumb { title: Store::list_name(), page: None }]
            >
                <button
                    class="button button--primary"
                    on:click=move |_| ctx.open(AppRoute::StoreCreate { supplier_id: None })
                >
                    "Create"
                </button>
                <button class="button button--secondary" on:click=move |_| fetch(page.get_untracked())>
                    "Refresh"
                </button>
            </PageHeader>

            {move || error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <table class="table">
                <thead>
                    <tr>
                        {header_columns.iter().map(|f| view! { <th>{f.label()}</th> }).collect_view()}
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        if loading.get() && items.with(Vec::is_empty) {
                            return view! {
                                <tr><td colspan=columns.len().to_string()>"Loading..."</td></tr>
                            }.into_any();
                        }
                        items.with(|rows| {
                            if rows.is_empty() {
                                view! { <tr><td colspan=columns.len().to_string()>"No stores yet"</td></tr> }.into_any()
                            } else {
                                rows.iter().map(|row| view! {
                                    <tr>
                                        {columns.iter().map(|f| view! { <td>{cell_text(row, f)}</td> }).collect_view()}
                                    </tr>
                                }).collect_view().into_any()
                            }
                        })
                    }}
                </tbody>
            </table>

            <PaginationControls
                current_page=page
                total_pages=total_pages
                total_count=total
                on_page_change=Callback::new(move |p: usize| fetch(p))
            />
        </div>
    }
}
