//! Application shell and route table.
//!
//! SYSTEM CONTEXT
//! ==============
//! `shell` renders the HTML document on the server; `App` provides the shared
//! contexts (backend, auth, sidebar) and mounts the router. Backend-backed
//! contexts are only live in the browser build.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::components::header::TITLE_FULL;
use crate::pages::admin::AdminPage;
use crate::pages::dashboard::DashboardPage;
use crate::pages::login::LoginPage;
use crate::pages::module::ModulePage;
use crate::state::auth::provide_auth_context;
use crate::state::sidebar::SidebarState;

/// HTML document wrapper used by the SSR host.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="pt-BR">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
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
    provide_meta_context();

    #[cfg(feature = "hydrate")]
    crate::state::backend::provide_backend(crate::state::backend::build_backend());
    provide_auth_context();

    // Server render always uses the default; the stored preference is applied
    // once hydrated so the markup matches.
    let sidebar = RwSignal::new(SidebarState::default());
    provide_context(sidebar);
    Effect::new(move || sidebar.set(SidebarState::restore()));

    view! {
        <Stylesheet id="leptos" href="/pkg/tutordesk.css"/>
        <Title text=TITLE_FULL/>
        <Router>
            <Routes fallback=|| view! { <p class="not-found">"Página não encontrada."</p> }>
                <Route path=path!("/login") view=LoginPage/>
                <Route path=path!("/") view=DashboardPage/>
                <Route path=path!("/admin") view=AdminPage/>
                <Route
                    path=path!("/alunos")
                    view=|| view! { <ModulePage title="Alunos" module="students"/> }
                />
                <Route
                    path=path!("/agenda")
                    view=|| view! { <ModulePage title="Agenda" module="schedule"/> }
                />
                <Route
                    path=path!("/financeiro")
                    view=|| view! { <ModulePage title="Financeiro" module="financial"/> }
                />
            </Routes>
        </Router>
    }
}
