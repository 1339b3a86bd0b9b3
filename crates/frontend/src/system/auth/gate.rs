use contracts::system::app_config::app_config;
use leptos::prelude::*;

use super::context::use_auth;
use super::guard::{evaluate, AccessPermit, AuthDecision, Guard};
use crate::layout::global_context::AppGlobalContext;

/// Evaluates `guards` before building the page.
///
/// The page is rendered only with the permit from an `Allowed` decision; a
/// missing session navigates to the guard's entry page instead.
#[component]
pub fn AuthGate<F, V>(guards: &'static [Guard], render: F) -> impl IntoView
where
    F: Fn(AccessPermit) -> V + Send + Sync + 'static,
    V: IntoView + 'static,
{
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, _) = use_auth();

    let decision = Memo::new(move |_| {
        let state = auth_state.get();
        if state.restoring {
            return None;
        }
        Some(evaluate(state.session(app_config()).as_ref(), guards))
    });

    Effect::new(move |_| {
        if let Some(AuthDecision::RedirectUnauthenticated { to }) = decision.get() {
            ctx.go(to);
        }
    });

    move || match decision.get() {
        None => view! { <div class="page page--loading">"Loading..."</div> }.into_any(),
        Some(AuthDecision::Allowed(permit)) => render(permit).into_any(),
        Some(AuthDecision::RedirectUnauthenticated { .. }) => ().into_any(),
        Some(AuthDecision::Denied(requirement)) => view! {
            <div class="page">
                <div class="warning-box">
                    {format!(
                        "You do not have permission to {} {}.",
                        requirement.operation.as_str(),
                        requirement.entity
                    )}
                </div>
            </div>
        }
        .into_any(),
    }
}
