use contracts::domain::a002_store::aggregate::Store;
use contracts::domain::a002_store::metadata::FIELDS;
use contracts::domain::common::AggregateRoot;
use contracts::shared::metadata::{find_field, ValueKind};
use leptos::prelude::*;
use std::rc::Rc;

use super::model::CREATE_STORE_GUARDS;
use super::view_model::StoreCreateViewModel;
use crate::layout::global_context::{AppGlobalContext, AppRoute};
use crate::shared::components::{Breadcrumb, FieldInput, PageHeader};
use crate::shared::entity_form::{EntityService, HttpEntityService, Navigator};
use crate::shared::picker_aggregate::RelationSelect;
use crate::system::auth::context::use_auth;
use crate::system::auth::gate::AuthGate;
use crate::system::auth::guard::AccessPermit;

/// Create page behind the access gate
#[component]
pub fn StoreCreateRoute(#[prop(into)] supplier_id: Signal<Option<String>>) -> impl IntoView {
    view! {
        <AuthGate
            guards=CREATE_STORE_GUARDS
            render=move |permit| view! { <StoreCreatePage permit=permit supplier_id=supplier_id /> }
        />
    }
}

#[component]
pub fn StoreCreatePage(
    permit: AccessPermit,
    #[prop(into)] supplier_id: Signal<Option<String>>,
) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, _) = use_auth();

    let service: Rc<dyn EntityService> = Rc::new(HttpEntityService::new(
        auth_state.get_untracked().access_token,
    ));
    let navigator: Rc<dyn Navigator> = Rc::new(ctx);
    let vm = StoreCreateViewModel::new(permit, service, navigator, supplier_id.get_untracked());
    vm.load_suppliers();

    // reseed once the preselected supplier changes after mount
    Effect::new(move |previous: Option<Option<String>>| {
        let current = supplier_id.get();
        if let Some(previous) = previous {
            if previous != current {
                vm.reseed(current.clone());
            }
        }
        current
    });

    on_cleanup(move || vm.dispose());

    let supplier_label = find_field(FIELDS, "supplier_id")
        .map(|f| f.label())
        .unwrap_or("Supplier");
    let title = format!("Create {}", Store::element_name());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        vm.submit();
    };

    view! {
        <div class="page store-create">
            <PageHeader
                title=title
                breadcrumbs=vec![
                    Breadcrumb { title: Store::list_name(), page: Some(AppRoute::STORES) },
                    Breadcrumb { title: "Create Store", page: None },
                ]
            />

            {move || vm.form_error().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <form class="details-form" on:submit=on_submit>
                {FIELDS
                    .iter()
                    .filter(|f| f.visible_in_form() && f.value_kind() != ValueKind::Reference)
                    .map(|field| {
                        let name = field.name;
                        view! {
                            <FieldInput
                                field=field
                                value=Signal::derive(move || vm.input_value(name))
                                error=Signal::derive(move || vm.error(name))
                                on_input=Callback::new(move |raw: String| vm.set_input(name, raw))
                                disabled=Signal::derive(move || vm.is_submitting())
                            />
                        }
                    })
                    .collect_view()}

                <RelationSelect
                    resolver=vm.suppliers
                    version=vm.supplier_version
                    label=supplier_label
                    selected=Signal::derive(move || vm.reference("supplier_id"))
                    on_select=Callback::new(move |id: Option<String>| vm.select_reference("supplier_id", id))
                    error=Signal::derive(move || vm.error("supplier_id"))
                    disabled=Signal::derive(move || vm.is_submitting())
                />

                <div class="details-actions">
                    <button
                        type="submit"
                        class="button button--primary"
                        disabled=move || vm.is_submitting()
                    >
                        {move || if vm.is_submitting() { "Submitting..." } else { "Submit" }}
                    </button>
                    <button
                        type="button"
                        class="button button--secondary"
                        on:click=move |_| vm.cancel()
                    >
                        "Cancel"
                    </button>
                </div>
            </form>
        </div>
    }
}
