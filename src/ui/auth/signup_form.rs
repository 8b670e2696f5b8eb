//! Registration form component
//!
//! Collects first name, last name, username, email and password and hands
//! them to the caller. The form does no network work of its own.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::components::Redirect;

use crate::core::form_state::{FormFields, FormState};
use crate::core::registration::{
    RegistrationField, RegistrationFormValues, SignUpView, sign_up_view,
};
use crate::ui::common::{Button, ButtonVariant, FormField};

/// Registration form component
///
/// Signed-in visitors get a redirect to the recipes page instead of the form;
/// the check follows `authenticated` reactively.
#[component]
pub fn RegistrationForm(
    /// Whether the visitor has a session
    #[prop(into)]
    authenticated: Signal<bool>,
    /// Called with the collected values when the form is submitted
    #[prop(into)]
    on_sign_up: Callback<RegistrationFormValues>,
    /// Form state to bind to; lets the caller write server errors into it
    #[prop(optional)]
    form: Option<RwSignal<FormState<RegistrationField>>>,
    /// Message shown above the fields
    #[prop(optional, into)]
    error: Option<Signal<Option<String>>>,
) -> impl IntoView {
    let form = form.unwrap_or_else(|| RwSignal::new(FormState::new()));
    let submit_disabled = Signal::derive(move || !form.with(|f| f.is_valid()));

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        submit_registration(form, on_sign_up);
    };

    move || match sign_up_view(authenticated.get()) {
        SignUpView::Redirect(path) => view! { <Redirect path=path /> }.into_any(),
        SignUpView::Form => view! {
            <form class="form" on:submit=on_submit novalidate=true>
                <h1 class="title">"Registration"</h1>

                {move || {
                    error.as_ref().and_then(|e| e.get()).map(|message| view! {
                        <p class="form-error">{message}</p>
                    })
                }}

                {RegistrationField::all()
                    .iter()
                    .copied()
                    .map(|field| registration_input(form, field))
                    .collect_view()}

                <Button
                    variant=ButtonVariant::DarkBlue
                    button_type="submit"
                    disabled=submit_disabled
                >
                    "Create Account"
                </Button>
            </form>
        }
        .into_any(),
    }
}

/// Hand the current values to the caller.
/// The submit button is disabled while the form is invalid; no re-check here.
fn submit_registration(
    form: RwSignal<FormState<RegistrationField>>,
    on_sign_up: Callback<RegistrationFormValues>,
) {
    let values = form.with_untracked(RegistrationFormValues::from_form);
    on_sign_up.run(values);
}

fn registration_input(
    form: RwSignal<FormState<RegistrationField>>,
    field: RegistrationField,
) -> impl IntoView {
    view! {
        <FormField
            label=field.label()
            name=field.name()
            input_type=field.input_type()
            autocomplete=field.autocomplete()
            required=true
            value=Signal::derive(move || form.with(|f| f.value(field).to_string()))
            on_input=Callback::new(move |value: String| {
                form.update(|f| f.handle_change(field, value))
            })
            error=Signal::derive(move || form.with(|f| f.error(field).map(ToString::to_string)))
        />
    }
}

#[cfg(all(test, feature = "ssr"))]
mod tests {
    use std::sync::{Arc, Mutex};

    use leptos_router::components::{Router, provide_server_redirect};
    use leptos_router::location::RequestUrl;

    use super::*;
    use crate::core::navigation::RECIPES_ROUTE;

    fn filled_form() -> FormState<RegistrationField> {
        let mut form = FormState::new();
        form.handle_change(RegistrationField::FirstName, "Anna");
        form.handle_change(RegistrationField::LastName, "Petrova");
        form.handle_change(RegistrationField::Username, "anna_p");
        form.handle_change(RegistrationField::Email, "anna@example.com");
        form.handle_change(RegistrationField::Password, "Borscht2024");
        form
    }

    fn render_form(form: FormState<RegistrationField>) -> String {
        let form = RwSignal::new(form);
        view! {
            <RegistrationForm
                authenticated=Signal::stored(false)
                on_sign_up=Callback::new(|_: RegistrationFormValues| {})
                form=form
            />
        }
        .to_html()
    }

    fn button_tag(html: &str) -> &str {
        let start = html.find("<button").expect("submit button rendered");
        let end = start + html[start..].find('>').expect("button tag closed");
        &html[start..end]
    }

    #[test]
    fn test_renders_five_labeled_inputs() {
        Owner::new().with(|| {
            let html = render_form(FormState::new());

            assert_eq!(html.matches("<input").count(), 5);
            for field in RegistrationField::all() {
                assert!(html.contains(field.label()), "missing label {}", field.label());
                assert!(html.contains(&format!("name=\"{}\"", field.name())));
            }
            assert_eq!(html.matches("type=\"password\"").count(), 1);
            assert!(html.contains("type=\"email\""));
        });
    }

    #[test]
    fn test_submit_disabled_follows_validity() {
        Owner::new().with(|| {
            let empty = render_form(FormState::new());
            assert!(button_tag(&empty).contains("disabled"));

            let filled = render_form(filled_form());
            assert!(!button_tag(&filled).contains("disabled"));
        });
    }

    #[test]
    fn test_signed_in_visitor_is_redirected_without_inputs() {
        Owner::new().with(|| {
            let redirected = Arc::new(Mutex::new(None::<String>));
            provide_context(RequestUrl::new("/signup"));
            provide_server_redirect({
                let redirected = Arc::clone(&redirected);
                move |path: &str| *redirected.lock().unwrap() = Some(path.to_string())
            });

            let html = view! {
                <Router>
                    <RegistrationForm
                        authenticated=Signal::stored(true)
                        on_sign_up=Callback::new(|_: RegistrationFormValues| {})
                    />
                </Router>
            }
            .to_html();

            assert!(!html.contains("<input"));
            assert!(!html.contains("<form"));
            assert_eq!(redirected.lock().unwrap().as_deref(), Some(RECIPES_ROUTE));
        });
    }

    #[test]
    fn test_submit_runs_callback_once_with_values() {
        Owner::new().with(|| {
            let form = RwSignal::new(filled_form());
            let calls = Arc::new(Mutex::new(Vec::new()));
            let on_sign_up = Callback::new({
                let calls = Arc::clone(&calls);
                move |values: RegistrationFormValues| calls.lock().unwrap().push(values)
            });

            submit_registration(form, on_sign_up);

            let calls = calls.lock().unwrap();
            assert_eq!(calls.len(), 1);
            assert_eq!(calls[0], RegistrationFormValues::from_form(&filled_form()));
        });
    }
}
