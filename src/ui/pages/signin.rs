//! Sign-in page

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_meta::{Meta, Title};

use crate::core::registration::SignInValues;
use crate::ui::auth::{SignInForm, use_auth_context};

/// Sign-in page component
#[component]
pub fn SignInPage() -> impl IntoView {
    let auth = use_auth_context();

    let on_sign_in = Callback::new(move |credentials: SignInValues| {
        auth.clear_error();
        spawn_local(async move {
            if let Err(err) = auth.sign_in(credentials).await {
                auth.error.set(Some(err.error));
            }
        });
    });

    view! {
        <Title text="Sign in" />
        <Meta name="description" content="Groccery Assistant - Sign in" />
        <main class="container">
            <SignInForm
                authenticated=auth.authenticated()
                on_sign_in=on_sign_in
                error=auth.error
                busy=auth.loading
            />
        </main>
    }
}
