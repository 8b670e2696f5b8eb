//! Site navigation menu and header

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::core::navigation::{SIGN_IN_ROUTE, SIGN_UP_ROUTE, visible_entries};
use crate::ui::auth::{AuthState, use_auth_context};
use crate::ui::common::{Button, ButtonVariant};

/// Menu of navigation entries visible for the given authentication status
#[component]
pub fn NavMenu(
    /// Whether the visitor has a session
    #[prop(into)]
    authenticated: Signal<bool>,
) -> impl IntoView {
    view! {
        <nav>
            <ul class="nav-menu">
                {move || {
                    visible_entries(authenticated.get())
                        .map(|entry| view! {
                            <li class="nav-menu__item">
                                <A href=entry.href>{entry.title}</A>
                            </li>
                        })
                        .collect_view()
                }}
            </ul>
        </nav>
    }
}

/// Page header with the menu and account links
#[component]
pub fn Header() -> impl IntoView {
    let auth = use_auth_context();

    let handle_sign_out = Callback::new(move |()| {
        spawn_local(async move {
            auth.sign_out().await;
        });
    });

    view! {
        <header class="header">
            <A href="/" attr:class="logo">"Foodgram"</A>
            <NavMenu authenticated=auth.authenticated() />
            <div class="account-menu">
                {move || match auth.state.get() {
                    AuthState::Loading => view! {
                        <span class="account-menu__placeholder"></span>
                    }.into_any(),
                    AuthState::Unauthenticated => view! {
                        <A href=SIGN_IN_ROUTE>"Sign in"</A>
                        <A href=SIGN_UP_ROUTE attr:class="btn-base btn-dark-blue">
                            "Create account"
                        </A>
                    }.into_any(),
                    AuthState::Authenticated(user) => view! {
                        <span class="account-menu__user">{user.username}</span>
                        <Button variant=ButtonVariant::Light on_click=handle_sign_out>
                            "Sign out"
                        </Button>
                    }.into_any(),
                }}
            </div>
        </header>
    }
}
