//! Not found page component
//!
//! A 404 error page displayed when a route is not found.

use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::components::A;

use crate::core::navigation::RECIPES_ROUTE;

/// Not found (404) page component
#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <Title text="Page not found" />
        <main class="container not-found">
            <h1 class="title">"404"</h1>
            <h2>"Page Not Found"</h2>
            <p class="text-muted">
                "The page you're looking for doesn't exist or has been moved."
            </p>
            <A href=RECIPES_ROUTE attr:class="btn-base btn-dark-blue">"Back to recipes"</A>
        </main>
    }
}
