use leptos::prelude::*;
use leptos_meta::Title;

/// Public recipes page
#[component]
pub fn RecipesPage() -> impl IntoView {
    view! {
        <Title text="Recipes" />
        <main class="container">
            <h1 class="title">"Recipes"</h1>
            <p class="text-muted">"No recipes have been published yet."</p>
        </main>
    }
}
