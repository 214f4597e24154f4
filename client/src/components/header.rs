//! Sticky top bar with the product title and the mobile menu toggle.
//!
//! The full and abbreviated titles are both rendered; the stylesheet shows
//! one of them depending on viewport width, as it does for the menu button.

use leptos::prelude::*;

use crate::state::sidebar::{SidebarState, viewport_is_mobile};

pub const TITLE_FULL: &str = "TutorDesk · Gestão de Aulas";
pub const TITLE_SHORT: &str = "TutorDesk";

#[component]
pub fn Header() -> impl IntoView {
    let sidebar = expect_context::<RwSignal<SidebarState>>();

    let on_menu = move |_| sidebar.update(|s| s.toggle(viewport_is_mobile()));

    view! {
        <header class="app-header">
            <button
                class="btn app-header__menu"
                type="button"
                title="Abrir menu"
                aria-label="Abrir menu"
                aria-expanded=move || sidebar.get().open_mobile.to_string()
                on:click=on_menu
            >
                "☰"
            </button>
            <h1 class="app-header__title">
                <span class="app-header__title-full">{TITLE_FULL}</span>
                <span class="app-header__title-short">{TITLE_SHORT}</span>
            </h1>
        </header>
    }
}
