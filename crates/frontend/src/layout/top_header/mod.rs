//! Top bar: application name, navigation toggle, quote link, theme, user and logout.

use contracts::system::app_config::{app_config, AppConfig};
use contracts::system::auth::UserInfo;
use leptos::prelude::*;

use crate::layout::global_context::{AppGlobalContext, AppRoute};
use crate::shared::theme::{Theme, ThemeSelector};
use crate::system::auth::context::{do_logout, use_auth};

/// Display name, tagged with the tenant name for tenant roles
fn user_caption(user: &UserInfo, config: &AppConfig) -> String {
    let name = user
        .full_name
        .clone()
        .unwrap_or_else(|| user.username.clone());
    if config.is_tenant_member(&user.roles) {
        format!("{} ({})", name, config.tenant_name)
    } else {
        name
    }
}

#[component]
pub fn TopHeader(theme: RwSignal<Theme>) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, set_auth_state) = use_auth();

    let logout = move |_| {
        wasm_bindgen_futures::spawn_local(async move {
            do_logout(set_auth_state).await;
            ctx.open(AppRoute::Login);
        });
    };

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if ctx.left_open.get() { "Hide navigation" } else { "Show navigation" }
                >
                    "☰"
                </button>
                <span class="top-header__title">{app_config().application_name.clone()}</span>
            </div>

            <div class="top-header__actions">
                {app_config().get_quote_url.clone().map(|url| view! {
                    <a class="top-header__link" href=url target="_blank" rel="noopener">
                        "Get a quote"
                    </a>
                })}

                <ThemeSelector theme=theme />

                <div class="top-header__user">
                    <span>
                        {move || auth_state.get().user_info
                            .map(|u| user_caption(&u, app_config()))
                            .unwrap_or_else(|| "Guest".to_string())}
                    </span>
                </div>

                <Show when=move || auth_state.get().access_token.is_some()>
                    <button class="top-header__icon-btn" on:click=logout title="Sign out">
                        "Sign out"
                    </button>
                </Show>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::app_config::load_app_config;

    fn user(full_name: Option<&str>, roles: &[&str]) -> UserInfo {
        UserInfo {
            id: "u-7".into(),
            username: "dana".into(),
            full_name: full_name.map(str::to_string),
            email: None,
            is_admin: false,
            roles: roles.iter().map(|r| r.to_string()).collect(),
        }
    }

    #[test]
    fn test_tenant_roles_are_tagged() {
        let config = load_app_config().unwrap();
        assert_eq!(
            user_caption(&user(Some("Dana Reyes"), &["Store Employee"]), &config),
            "Dana Reyes (Supplier)"
        );
        assert_eq!(user_caption(&user(None, &["Customer"]), &config), "dana");
    }

    #[test]
    fn test_quote_link_configured() {
        let config = load_app_config().unwrap();
        assert!(config
            .get_quote_url
            .as_deref()
            .is_some_and(|url| url.starts_with("https://")));
    }
}
