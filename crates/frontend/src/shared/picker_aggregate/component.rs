use leptos::prelude::*;

use super::traits::AggregatePickerResult;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::entity_form::relation::{RelationResolver, RelationState};

/// Select bound to a [`RelationResolver`].
///
/// Shows a loading state while options are fetched and a retry action when
/// the fetch failed transiently, without blocking the rest of the form. The
/// resolver's selected option is always listed, even when it belongs to
/// another page. `version` must be bumped by the resolver's observer.
#[component]
pub fn RelationSelect(
    resolver: StoredValue<RelationResolver, LocalStorage>,
    version: RwSignal<u64>,
    #[prop(into)] label: String,
    #[prop(into)] selected: Signal<Option<String>>,
    on_select: Callback<Option<String>>,
    #[prop(optional, into)] error: MaybeProp<String>,
    #[prop(optional, into)] disabled: MaybeProp<bool>,
) -> impl IntoView {
    let state = move || {
        version.track();
        resolver.with_value(|r| r.state())
    };

    let search = move |text: String| {
        let pending = resolver.with_value(|r| r.search(&text));
        wasm_bindgen_futures::spawn_local(async move {
            pending.await;
        });
    };

    let retry = move |_| {
        if let Some(pending) = resolver.with_value(|r| r.retry()) {
            wasm_bindgen_futures::spawn_local(async move {
                pending.await;
            });
        }
    };

    let go_to_page = Callback::new(move |page: usize| {
        let pending = resolver.with_value(|r| r.go_to_page(page));
        wasm_bindgen_futures::spawn_local(async move {
            pending.await;
        });
    });

    let current_page = Signal::derive(move || {
        version.track();
        resolver.with_value(|r| r.current_page())
    });
    let total_pages = Signal::derive(move || {
        version.track();
        resolver.with_value(|r| r.total_pages())
    });
    let total_count = Signal::derive(move || {
        version.track();
        resolver.with_value(|r| r.total_count())
    });

    view! {
        <div class="form__group relation-select">
            <label class="form__label">{label}</label>
            <input
                class="form__input relation-select__search"
                type="search"
                placeholder="Search"
                on:change=move |ev| search(event_target_value(&ev))
            />
            {move || match state() {
                RelationState::Idle | RelationState::Loading { .. } => view! {
                    <select class="form__select" disabled=true>
                        <option>"Loading..."</option>
                    </select>
                }.into_any(),
                RelationState::Failed { error: fetch_error, .. } => {
                    let can_retry = resolver.with_value(|r| r.can_retry());
                    view! {
                        <div class="relation-select__error">
                            <span>{format!("Could not load options: {}", fetch_error)}</span>
                            {can_retry.then(|| view! {
                                <button type="button" class="button button--secondary" on:click=retry>
                                    "Retry"
                                </button>
                            })}
                        </div>
                    }.into_any()
                }
                RelationState::Loaded { .. } => {
                    let options = resolver.with_value(|r| r.options_with_selected());
                    let current = selected.get();
                    view! {
                        <select
                            class="form__select"
                            disabled=move || disabled.get().unwrap_or(false)
                            on:change=move |ev| {
                                let id = event_target_value(&ev);
                                on_select.run(if id.is_empty() { None } else { Some(id) });
                            }
                        >
                            <option value="" selected=current.is_none()>"None"</option>
                            {options.into_iter().map(|option| {
                                let id = option.id();
                                let is_selected = current.as_deref() == Some(id.as_str());
                                view! {
                                    <option value=id selected=is_selected>
                                        {option.display_name()}
                                    </option>
                                }
                            }).collect_view()}
                        </select>
                    }.into_any()
                }
            }}
            <PaginationControls
                current_page=current_page
                total_pages=total_pages
                total_count=total_count
                on_page_change=go_to_page
            />
            {move || error.get().map(|e| view! { <span class="form__error">{e}</span> })}
        </div>
    }
}
