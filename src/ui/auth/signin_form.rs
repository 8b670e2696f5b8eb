//! Sign-in form component

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::components::{A, Redirect};

use crate::core::form_state::{FormFields, FormState};
use crate::core::navigation::SIGN_UP_ROUTE;
use crate::core::registration::{SignInField, SignInValues, SignUpView, sign_up_view};
use crate::ui::common::{Button, ButtonVariant, FormField};

/// Sign-in form component
#[component]
pub fn SignInForm(
    /// Whether the visitor has a session
    #[prop(into)]
    authenticated: Signal<bool>,
    /// Called with the credentials when the form is submitted
    #[prop(into)]
    on_sign_in: Callback<SignInValues>,
    /// Message shown above the fields
    #[prop(optional, into)]
    error: Option<Signal<Option<String>>>,
    /// Disables the submit button while a request is in flight
    #[prop(into, default = Signal::stored(false))]
    busy: Signal<bool>,
) -> impl IntoView {
    let form = RwSignal::new(FormState::<SignInField>::new());
    let submit_disabled = Signal::derive(move || busy.get() || !form.with(|f| f.is_valid()));

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        on_sign_in.run(form.with_untracked(SignInValues::from_form));
    };

    // Same rule as registration: a session sends the visitor to the recipes
    move || match sign_up_view(authenticated.get()) {
        SignUpView::Redirect(path) => view! { <Redirect path=path /> }.into_any(),
        SignUpView::Form => view! {
            <form class="form" on:submit=on_submit novalidate=true>
                <h1 class="title">"Sign in"</h1>

                {move || {
                    error.as_ref().and_then(|e| e.get()).map(|message| view! {
                        <p class="form-error">{message}</p>
                    })
                }}

                {SignInField::all()
                    .iter()
                    .copied()
                    .map(|field| view! {
                        <FormField
                            label=field.label()
                            name=field.name()
                            input_type=field.input_type()
                            autocomplete=match field {
                                SignInField::Email => "email",
                                SignInField::Password => "current-password",
                            }
                            required=true
                            value=Signal::derive(move || form.with(|f| f.value(field).to_string()))
                            on_input=Callback::new(move |value: String| {
                                form.update(|f| f.handle_change(field, value))
                            })
                            error=Signal::derive(move || {
                                form.with(|f| f.error(field).map(ToString::to_string))
                            })
                        />
                    })
                    .collect_view()}

                <Button
                    variant=ButtonVariant::DarkBlue
                    button_type="submit"
                    disabled=submit_disabled
                >
                    "Sign in"
                </Button>

                <p class="form-hint">
                    "No account yet? "
                    <A href=SIGN_UP_ROUTE>"Create one"</A>
                </p>
            </form>
        }
        .into_any(),
    }
}
