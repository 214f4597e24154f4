//! Landing page for a feature module linked from the sidebar.
//!
//! Module screens themselves are not part of this client yet; the page
//! reports whether the module is enabled on the professor's profile.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::layout::Layout;
use crate::state::auth::AuthState;
use crate::util::auth::install_unauth_redirect;

#[component]
pub fn ModulePage(title: &'static str, module: &'static str) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_unauth_redirect(auth, use_navigate());

    let enabled = move || auth.with(|a| a.profile().is_none_or(|p| p.module_enabled(module)));

    view! {
        <Layout>
            <section class="module-page">
                <h2>{title}</h2>
                <Show
                    when=enabled
                    fallback=|| {
                        view! {
                            <p class="module-page__notice module-page__notice--disabled">
                                "Este módulo não está ativo no seu plano."
                            </p>
                        }
                    }
                >
                    <p class="module-page__notice">"Em breve."</p>
                </Show>
            </section>
        </Layout>
    }
}
