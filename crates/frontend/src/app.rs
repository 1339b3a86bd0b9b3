use contracts::system::app_config::app_config;
use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use crate::shared::theme::{apply_theme_css, Theme};
use crate::system::auth::context::AuthProvider;

#[component]
pub fn App() -> impl IntoView {
    // Provide the AppGlobalContext store to the whole app via context.
    provide_context(AppGlobalContext::new());

    let theme = RwSignal::new(Theme::initial(&app_config().ui));
    apply_theme_css(theme.get_untracked());

    view! {
        <AuthProvider>
            <AppRoutes theme=theme />
        </AuthProvider>
    }
}
