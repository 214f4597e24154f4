//! Responsive page shell: sidebar beside a header and the routed content.

use leptos::prelude::*;

use crate::components::app_sidebar::AppSidebar;
use crate::components::header::Header;
use crate::state::sidebar::SidebarState;

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    let sidebar = expect_context::<RwSignal<SidebarState>>();

    view! {
        <div
            class="app-layout"
            class:app-layout--collapsed=move || !sidebar.get().open
            class:app-layout--drawer-open=move || sidebar.get().open_mobile
        >
            <AppSidebar/>
            <Show when=move || sidebar.get().open_mobile>
                <div
                    class="app-layout__backdrop"
                    on:click=move |_| sidebar.update(SidebarState::close_mobile)
                ></div>
            </Show>
            <div class="app-layout__main">
                <Header/>
                <main class="app-layout__content">{children()}</main>
            </div>
        </div>
    }
}
