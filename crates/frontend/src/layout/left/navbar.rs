use contracts::domain::a002_store::aggregate::Store;
use contracts::domain::common::AggregateRoot;
use leptos::prelude::*;

use crate::layout::global_context::{AppGlobalContext, AppRoute};

#[component]
pub fn Navbar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    let entries = [
        (AppRoute::StoreList, Store::list_name().to_string()),
        (
            AppRoute::StoreCreate { supplier_id: None },
            format!("Create {}", Store::element_name()),
        ),
    ];

    view! {
        <nav class="main-nav-bar">
            <ul>
                {entries.into_iter().map(|(route, title)| {
                    let page = route.page();
                    view! {
                        <li
                            class:active=move || ctx.route.with(|r| r.page() == page)
                            on:click=move |_| ctx.open(route.clone())
                        >
                            <span>{title}</span>
                        </li>
                    }
                }).collect_view()}
            </ul>
        </nav>
    }
}
