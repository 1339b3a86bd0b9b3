pub mod global_context;
pub mod left;
pub mod top_header;

use leptos::prelude::*;
use top_header::TopHeader;

use crate::shared::theme::Theme;

/// Application shell.
///
/// ```text
/// +------------------------------+
/// |          TopHeader           |
/// +------------------------------+
/// |  Navbar  |      Content      |
/// +------------------------------+
/// ```
///
/// The theme is passed in by the application; nothing below reads it from context.
#[component]
pub fn Shell(theme: RwSignal<Theme>, children: Children) -> impl IntoView {
    view! {
        <div class="app-layout" data-theme=move || theme.get().as_str()>
            <TopHeader theme=theme />

            <div class="app-body">
                <left::Left>
                    <left::Navbar />
                </left::Left>

                <div class="app-main" data-zone="center">
                    {children()}
                </div>
            </div>
        </div>
    }
}
