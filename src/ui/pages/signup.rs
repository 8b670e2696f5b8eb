//! Registration page
//!
//! Wires the registration form to the account API through the auth context.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::{Meta, Title};

use crate::core::form_state::FormState;
use crate::core::registration::{RegistrationField, RegistrationFormValues};
use crate::ui::auth::{RegistrationForm, use_auth_context};

/// Registration page component
#[component]
pub fn SignUpPage() -> impl IntoView {
    let auth = use_auth_context();
    let form = RwSignal::new(FormState::<RegistrationField>::new());

    let on_sign_up = Callback::new(move |values: RegistrationFormValues| {
        auth.clear_error();
        spawn_local(async move {
            match auth.sign_up(values).await {
                // The session change turns the form into a redirect
                Ok(_) => form.update(|f| f.reset_form()),
                Err(err) => auth.report_error(err, form),
            }
        });
    });

    view! {
        <Title text="Registration" />
        <Meta name="description" content="Groccery Assistant - Registration" />
        <Meta property="og:title" content="Registration" />
        <main class="container">
            <RegistrationForm
                authenticated=auth.authenticated()
                on_sign_up=on_sign_up
                form=form
                error=auth.error
            />
        </main>
    }
}
