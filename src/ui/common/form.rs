use leptos::prelude::*;

/// Generic form field component with label and input
#[component]
pub fn FormField(
    /// Field label text
    label: &'static str,
    /// Input name, also used as the element id
    name: &'static str,
    /// Whether field is required (shows red asterisk)
    #[prop(default = false)]
    required: bool,
    /// Input type (text, password, email, etc.)
    #[prop(default = "text")]
    input_type: &'static str,
    /// Browser autocomplete hint
    #[prop(default = "off")]
    autocomplete: &'static str,
    /// Current value signal
    #[prop(into)]
    value: Signal<String>,
    /// Input event callback
    on_input: Callback<String>,
    /// Optional error message to display
    #[prop(optional, into)]
    error: Option<Signal<Option<String>>>,
) -> impl IntoView {
    view! {
        <div class="form-field">
            <label class="label" for=name>
                {label}
                {required.then(|| view! { <span class="required-mark">"*"</span> })}
            </label>
            <input
                id=name
                name=name
                type=input_type
                class="input-base"
                class:border-error=move || error.as_ref().and_then(|e| e.get()).is_some()
                autocomplete=autocomplete
                required=required
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
            {move || {
                error.as_ref().and_then(|e| e.get()).map(|err| view! {
                    <p class="field-error">{err}</p>
                })
            }}
        </div>
    }
}
