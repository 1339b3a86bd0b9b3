use leptos::prelude::*;

use crate::domain::a002_store::ui::create::StoreCreateRoute;
use crate::domain::a002_store::ui::list::StoreListRoute;
use crate::layout::global_context::{AppGlobalContext, AppRoute};
use crate::layout::Shell;
use crate::shared::theme::Theme;
use crate::system::pages::login::LoginPage;

/// Renders the page for the current route inside the shell
#[component]
pub fn AppRoutes(theme: RwSignal<Theme>) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    // Initialize router integration. This runs once when the component is created.
    ctx.init_router_integration();

    let page = Memo::new(move |_| ctx.route.with(AppRoute::page));
    let supplier_id = Signal::derive(move || match ctx.route.get() {
        AppRoute::StoreCreate { supplier_id } => supplier_id,
        _ => None,
    });

    view! {
        <Shell theme=theme>
            {move || match page.get() {
                AppRoute::LOGIN => view! { <LoginPage /> }.into_any(),
                AppRoute::STORE_CREATE => view! { <StoreCreateRoute supplier_id=supplier_id /> }.into_any(),
                _ => view! { <StoreListRoute /> }.into_any(),
            }}
        </Shell>
    }
}
