use contracts::domain::a002_store::aggregate::{validate_store_record, Store};
use contracts::domain::a002_store::metadata::FIELDS;
use contracts::domain::common::AggregateRoot;
use contracts::shared::metadata::find_field;
use contracts::shared::record::FieldValue;
use leptos::prelude::*;
use std::rc::Rc;

use super::model;
use crate::domain::a001_supplier::ui::picker::{first_supplier_page, supplier_resolver};
use crate::shared::date_utils::today;
use crate::shared::entity_form::{
    EntityService, FormController, NavigationEffect, Navigator, RelationResolver,
    SubmissionGateway, SubmitOutcome,
};
use crate::system::auth::guard::AccessPermit;

/// Reactive wrapper around the store form controller and the supplier resolver.
///
/// Both are owned here; their observers bump `version`/`supplier_version`
/// so views re-read them.
#[derive(Clone, Copy)]
pub struct StoreCreateViewModel {
    form: StoredValue<FormController, LocalStorage>,
    pub suppliers: StoredValue<RelationResolver, LocalStorage>,
    pub version: RwSignal<u64>,
    pub supplier_version: RwSignal<u64>,
}

impl StoreCreateViewModel {
    pub fn new(
        permit: AccessPermit,
        service: Rc<dyn EntityService>,
        navigator: Rc<dyn Navigator>,
        supplier_id: Option<String>,
    ) -> Self {
        let version = RwSignal::new(0u64);
        let supplier_version = RwSignal::new(0u64);

        let form = FormController::new(
            permit,
            FIELDS,
            validate_store_record,
            SubmissionGateway::new(service.clone(), Store::collection_name()),
            NavigationEffect::new(navigator, Store::entity_metadata_info().ui.list_route),
            model::default_record(today(), supplier_id.as_deref()),
        )
        .with_observer(Rc::new(move || {
            version.try_update(|v| *v += 1);
        }));

        let suppliers = supplier_resolver(service).with_observer(Rc::new(move || {
            supplier_version.try_update(|v| *v += 1);
        }));

        Self {
            form: StoredValue::new_local(form),
            suppliers: StoredValue::new_local(suppliers),
            version,
            supplier_version,
        }
    }

    /// First page of suppliers; the form renders while it loads
    pub fn load_suppliers(&self) {
        let pending = self.suppliers.with_value(|r| r.fetch(first_supplier_page()));
        wasm_bindgen_futures::spawn_local(async move {
            pending.await;
        });
        self.sync_supplier_selection();
    }

    /// Point the supplier select at the record's supplier, wherever it is paged
    fn sync_supplier_selection(&self) {
        let id = self.form.with_value(|f| {
            f.value("supplier_id")
                .as_reference()
                .map(str::to_string)
        });
        if let Some(lookup) = self.suppliers.with_value(|r| r.select(id.as_deref())) {
            wasm_bindgen_futures::spawn_local(async move {
                lookup.await;
            });
        }
    }

    pub fn input_value(&self, name: &str) -> String {
        self.version.track();
        self.form.with_value(|f| f.value(name).to_input())
    }

    pub fn reference(&self, name: &str) -> Option<String> {
        self.version.track();
        self.form
            .with_value(|f| f.value(name).as_reference().map(str::to_string))
    }

    pub fn error(&self, name: &str) -> Option<String> {
        self.version.track();
        self.form.with_value(|f| f.error(name))
    }

    pub fn form_error(&self) -> Option<String> {
        self.version.track();
        self.form.with_value(|f| f.form_error()).map(|e| e.to_string())
    }

    pub fn is_submitting(&self) -> bool {
        self.version.track();
        self.form.with_value(|f| f.is_submitting())
    }

    /// Raw input from a control, converted by the field's value kind
    pub fn set_input(&self, name: &str, raw: String) {
        let Some(field) = find_field(FIELDS, name) else {
            log::warn!("no store field named '{}'", name);
            return;
        };
        let value = FieldValue::from_input(field.value_kind(), &raw);
        self.form.with_value(|f| f.set_field(name, value));
    }

    pub fn select_reference(&self, name: &str, id: Option<String>) {
        let value = id.map(FieldValue::Reference).unwrap_or(FieldValue::Null);
        self.form.with_value(|f| f.set_field(name, value));
        self.sync_supplier_selection();
    }

    /// A preselected supplier arrived or changed after mount
    pub fn reseed(&self, supplier_id: Option<String>) {
        let defaults = model::default_record(today(), supplier_id.as_deref());
        self.form.with_value(|f| f.initialize(defaults));
        self.sync_supplier_selection();
    }

    pub fn submit(&self) {
        let form = self.form.get_value();
        wasm_bindgen_futures::spawn_local(async move {
            match form.submit().await {
                SubmitOutcome::Invalid(errors) => {
                    log::debug!("store form has {} error(s)", errors.len())
                }
                SubmitOutcome::Created(id) => log::info!("store {} created", id),
                SubmitOutcome::Failed(_) | SubmitOutcome::Denied | SubmitOutcome::Skipped => {}
            }
        });
    }

    pub fn cancel(&self) {
        self.form.with_value(|f| f.cancel());
    }

    /// Called when the page unmounts
    pub fn dispose(&self) {
        self.form.try_with_value(|f| f.dispose());
        self.suppliers.try_with_value(|r| r.dispose());
    }
}
