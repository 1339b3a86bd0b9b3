use contracts::system::app_config::AppConfig;
use contracts::system::auth::UserInfo;
use leptos::prelude::*;

use super::guard::ActorSession;
use super::{api, storage};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
    /// A stored token is being checked against the server
    pub restoring: bool,
}

impl AuthState {
    /// Session for the access gate, present only with both token and user
    pub fn session(&self, config: &AppConfig) -> Option<ActorSession> {
        match (&self.access_token, &self.user_info) {
            (Some(_), Some(user)) => Some(ActorSession::from_user(user.clone(), config)),
            _ => None,
        }
    }
}

/// Provides auth state and restores a stored session on mount
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let has_token = storage::access_token().is_some();
    let (auth_state, set_auth_state) = signal(AuthState {
        restoring: has_token,
        ..AuthState::default()
    });

    Effect::new(move |_| {
        wasm_bindgen_futures::spawn_local(async move {
            let restored = restore_session().await;
            set_auth_state.set(restored.unwrap_or_default());
        });
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Validate the stored access token, refreshing it once if needed
async fn restore_session() -> Option<AuthState> {
    let access_token = storage::access_token()?;

    if let Ok(user) = api::current_user(&access_token).await {
        return Some(AuthState {
            access_token: Some(access_token),
            user_info: Some(user),
            restoring: false,
        });
    }

    let Some(refresh_token) = storage::refresh_token() else {
        storage::clear_tokens();
        return None;
    };

    match api::refresh(refresh_token).await {
        Ok(response) => {
            storage::save_access_token(&response.access_token);
            let user = api::current_user(&response.access_token).await.ok()?;
            Some(AuthState {
                access_token: Some(response.access_token),
                user_info: Some(user),
                restoring: false,
            })
        }
        Err(e) => {
            log::warn!("session refresh failed: {}", e);
            storage::clear_tokens();
            None
        }
    }
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

pub async fn do_login(
    set_auth_state: WriteSignal<AuthState>,
    username: String,
    password: String,
) -> Result<(), String> {
    let response = api::login(username, password).await?;
    storage::save_tokens(&response.access_token, &response.refresh_token);

    log::info!("signed in as {}", response.user.username);
    set_auth_state.set(AuthState {
        access_token: Some(response.access_token),
        user_info: Some(response.user),
        restoring: false,
    });
    Ok(())
}

pub async fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    if let Some(refresh_token) = storage::refresh_token() {
        if let Err(e) = api::logout(refresh_token).await {
            log::warn!("logout request failed: {}", e);
        }
    }
    storage::clear_tokens();
    set_auth_state.set(AuthState::default());
}
