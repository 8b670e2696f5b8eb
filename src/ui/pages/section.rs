//! Member-only menu sections
//!
//! One page component serves every menu entry that requires a session. The
//! heading comes from the navigation table; anonymous visitors are sent to
//! the sign-in page. Nothing is decided until the stored session is checked.

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_location;

use crate::core::navigation::{RouteAccess, find_entry, pending_route_access};
use crate::ui::auth::use_auth_context;

/// Section page component
#[component]
pub fn SectionPage() -> impl IntoView {
    let auth = use_auth_context();
    let pathname = use_location().pathname;
    let session = auth.session();

    move || {
        let path = pathname.get();
        match pending_route_access(&path, session.get()) {
            None => view! {
                <main class="container">
                    <p class="text-muted">"Loading..."</p>
                </main>
            }
            .into_any(),
            Some(RouteAccess::Redirect(target)) => view! { <Redirect path=target /> }.into_any(),
            Some(RouteAccess::Allowed) => {
                let title = find_entry(&path).map(|entry| entry.title).unwrap_or("Foodgram");
                view! {
                    <Title text=title />
                    <main class="container">
                        <h1 class="title">{title}</h1>
                        <p class="text-muted">"Nothing here yet."</p>
                    </main>
                }
                .into_any()
            }
        }
    }
}
