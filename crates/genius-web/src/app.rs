use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{
    components::{Redirect, Route, Router, Routes},
    path,
};

use crate::components::refresh::PageRefresh;
use crate::pages::code::CodePage;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_context(PageRefresh::new());

    view! {
        <Stylesheet id="leptos" href="/pkg/genius-web.css"/>
        <Title text="Genius"/>
        <Router>
            <main class="dashboard">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=path!("/") view=|| view! { <Redirect path="/code"/> }/>
                    <Route path=path!("/code") view=CodePage/>
                </Routes>
            </main>
        </Router>
    }
}
