use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

use crate::core::navigation::RECIPES_ROUTE;
use crate::ui::Header;
use crate::ui::auth::provide_auth_context;
use crate::ui::pages::{NotFoundPage, RecipesPage, SectionPage, SignInPage, SignUpPage};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    // Session state shared by the header and the account pages
    provide_auth_context();

    view! {
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/foodgram.css"/>

        // default document title, pages override it
        <Title text="Foodgram"/>

        <Router>
            <Header/>
            <Routes fallback=|| view! { <NotFoundPage/> }>
                <Route path=path!("/") view=|| view! { <Redirect path=RECIPES_ROUTE/> }/>
                <Route path=path!("/recipes") view=RecipesPage/>
                <Route path=path!("/signup") view=SignUpPage/>
                <Route path=path!("/signin") view=SignInPage/>
                <Route path=path!("/subscriptions") view=SectionPage/>
                <Route path=path!("/recipes/create") view=SectionPage/>
                <Route path=path!("/favorites") view=SectionPage/>
                <Route path=path!("/cart") view=SectionPage/>
            </Routes>
        </Router>
    }
}
