//! Navigation sidebar: feature-module links, role badge, and sign-out.
//!
//! SYSTEM CONTEXT
//! ==============
//! Entries tied to a feature module are hidden when the professor's profile
//! disables that module. Admin entries are shown only once role resolution
//! reports an admin. On mobile the sidebar is a drawer that closes after
//! navigation.

#[cfg(test)]
#[path = "app_sidebar_test.rs"]
mod app_sidebar_test;

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::hooks::user_role::use_user_role;
use crate::net::types::{UserProfile, UserRole};
use crate::state::auth::AuthState;
use crate::state::sidebar::{SidebarState, viewport_is_mobile};

/// One navigation entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
    pub icon: &'static str,
    /// Feature module gating this entry, if any.
    pub module: Option<&'static str>,
    pub admin_only: bool,
}

pub const NAV_ITEMS: &[NavItem] = &[
    NavItem { label: "Painel", href: "/", icon: "▦", module: None, admin_only: false },
    NavItem { label: "Alunos", href: "/alunos", icon: "☺", module: Some("students"), admin_only: false },
    NavItem { label: "Agenda", href: "/agenda", icon: "◷", module: Some("schedule"), admin_only: false },
    NavItem { label: "Financeiro", href: "/financeiro", icon: "$", module: Some("financial"), admin_only: false },
    NavItem { label: "Administração", href: "/admin", icon: "⚙", module: None, admin_only: true },
];

/// Entries visible for `profile` and `is_admin`, in declaration order.
#[must_use]
pub fn visible_nav_items(profile: Option<&UserProfile>, is_admin: bool) -> Vec<NavItem> {
    NAV_ITEMS
        .iter()
        .filter(|item| !item.admin_only || is_admin)
        .filter(|item| match (item.module, profile) {
            (Some(module), Some(profile)) => profile.module_enabled(module),
            _ => true,
        })
        .copied()
        .collect()
}

/// Whether `href` is the active entry for `pathname`.
#[must_use]
pub fn is_active_path(href: &str, pathname: &str) -> bool {
    if href == "/" {
        return pathname == "/";
    }
    pathname == href || pathname.strip_prefix(href).is_some_and(|rest| rest.starts_with('/'))
}

/// Badge text for the resolved role.
#[must_use]
pub fn role_badge(role: Option<UserRole>) -> &'static str {
    role.map_or("…", UserRole::label)
}

#[component]
pub fn AppSidebar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let sidebar = expect_context::<RwSignal<SidebarState>>();
    let role = use_user_role();
    let pathname = use_location().pathname;
    #[cfg(feature = "hydrate")]
    let backend = use_context::<crate::state::backend::BackendContext>();

    let items = move || {
        let is_admin = role.is_admin.get();
        auth.with(|a| visible_nav_items(a.profile(), is_admin))
    };

    let display_name = move || {
        auth.with(|a| {
            a.user
                .as_ref()
                .map(|user| {
                    user.profile
                        .as_ref()
                        .map(|p| p.name.clone())
                        .or_else(|| user.email.clone())
                        .unwrap_or_default()
                })
                .unwrap_or_default()
        })
    };

    let on_nav = move |_| {
        if viewport_is_mobile() {
            sidebar.update(SidebarState::close_mobile);
        }
    };

    let on_collapse = move |_| sidebar.update(|s| s.toggle(false));

    let on_sign_out = move |_| {
        #[cfg(feature = "hydrate")]
        {
            let Some(backend) = backend.and_then(|ctx| ctx.try_get_value()) else {
                leptos::logging::warn!("sign-out: backend context missing");
                return;
            };
            leptos::task::spawn_local(async move {
                if let Err(e) = backend.sign_out().await {
                    leptos::logging::error!("sign-out failed: {e}");
                }
                if let Some(w) = web_sys::window() {
                    let _ = w.location().set_href(crate::util::auth::LOGIN_PATH);
                }
            });
        }
    };

    view! {
        <aside
            class="app-sidebar"
            class:app-sidebar--collapsed=move || !sidebar.get().open
            class:app-sidebar--mobile-open=move || sidebar.get().open_mobile
        >
            <div class="app-sidebar__brand">
                <span class="app-sidebar__logo">"TD"</span>
                <span class="app-sidebar__brand-name">"TutorDesk"</span>
                <button
                    class="btn app-sidebar__collapse"
                    type="button"
                    title="Recolher menu"
                    on:click=on_collapse
                >
                    {move || if sidebar.get().open { "«" } else { "»" }}
                </button>
            </div>

            <nav class="app-sidebar__nav">
                <For each=items key=|item| item.href let:item>
                    <a
                        href=item.href
                        class="app-sidebar__link"
                        class:app-sidebar__link--active=move || {
                            is_active_path(item.href, &pathname.get())
                        }
                        title=item.label
                        on:click=on_nav
                    >
                        <span class="app-sidebar__icon">{item.icon}</span>
                        <span class="app-sidebar__label">{item.label}</span>
                    </a>
                </For>
            </nav>

            <div class="app-sidebar__footer">
                <span class="app-sidebar__user">{display_name}</span>
                <span
                    class="app-sidebar__badge"
                    class:app-sidebar__badge--admin=move || role.is_admin.get()
                >
                    {move || role_badge(role.user_role.get())}
                </span>
                <button class="btn app-sidebar__sign-out" type="button" on:click=on_sign_out>
                    "Sair"
                </button>
            </div>
        </aside>
    }
}
