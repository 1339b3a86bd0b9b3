use contracts::shared::metadata::{FieldMetadata, ValueKind};
use leptos::prelude::*;

/// Input for one schema field with its inline error.
///
/// The input type follows the field's value kind; date-times use
/// `datetime-local`.
#[component]
pub fn FieldInput(
    field: &'static FieldMetadata,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] error: Signal<Option<String>>,
    on_input: Callback<String>,
    #[prop(optional, into)] disabled: MaybeProp<bool>,
) -> impl IntoView {
    let input_type = match field.value_kind() {
        ValueKind::Number => "number",
        ValueKind::DateTime => "datetime-local",
        _ => "text",
    };
    let required = field.validation.is_required();

    view! {
        <div class="form__group">
            <label class="form__label" for=field.name>
                {field.label()}
                {required.then_some(" *")}
            </label>
            <input
                id=field.name
                name=field.name
                class=move || {
                    if error.get().is_some() { "form__input form__input--invalid" } else { "form__input" }
                }
                type=input_type
                placeholder=field.ui.placeholder.unwrap_or_default()
                prop:value=move || value.get()
                disabled=move || disabled.get().unwrap_or(false)
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
            {move || error.get().map(|e| view! { <span class="form__error">{e}</span> })}
        </div>
    }
}
