//! Admin overview, gated on the resolved role.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::app_sidebar::NAV_ITEMS;
use crate::components::layout::Layout;
use crate::hooks::user_role::use_user_role;
use crate::state::auth::AuthState;
use crate::util::auth::install_unauth_redirect;

/// What the admin route may show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdminAccess {
    Checking,
    Denied,
    Granted,
}

impl AdminAccess {
    #[must_use]
    pub fn from_role(loading: bool, is_admin: bool) -> Self {
        match (loading, is_admin) {
            (_, true) => Self::Granted,
            (true, false) => Self::Checking,
            (false, false) => Self::Denied,
        }
    }
}

#[component]
pub fn AdminPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_unauth_redirect(auth, use_navigate());
    let role = use_user_role();

    let access = move || AdminAccess::from_role(role.loading.get(), role.is_admin.get());

    view! {
        <Layout>
            <section class="admin">
                <h2>"Administração"</h2>
                {move || match access() {
                    AdminAccess::Checking => {
                        view! { <p class="admin__notice">"Verificando permissões..."</p> }.into_any()
                    }
                    AdminAccess::Denied => {
                        view! {
                            <p class="admin__notice admin__notice--denied">
                                "Acesso restrito a administradores."
                            </p>
                        }
                            .into_any()
                    }
                    AdminAccess::Granted => {
                        let rows = NAV_ITEMS
                            .iter()
                            .filter_map(|item| item.module.map(|module| (item.label, module)))
                            .map(|(label, module)| {
                                view! {
                                    <tr>
                                        <td>{label}</td>
                                        <td><code>{module}</code></td>
                                    </tr>
                                }
                            })
                            .collect_view();
                        view! {
                            <p class="admin__intro">
                                "Módulos disponíveis para ativação nos perfis de professores:"
                            </p>
                            <table class="admin__modules">
                                <thead>
                                    <tr>
                                        <th>"Módulo"</th>
                                        <th>"Chave"</th>
                                    </tr>
                                </thead>
                                <tbody>{rows}</tbody>
                            </table>
                        }
                            .into_any()
                    }
                }}
            </section>
        </Layout>
    }
}
