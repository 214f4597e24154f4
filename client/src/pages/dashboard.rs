//! Dashboard: the signed-in professor's profile summary.
//!
//! SYSTEM CONTEXT
//! ==============
//! Authenticated landing route. Redirects to `/login` once auth settles
//! without a user and records an `upgrade_click` event from the upgrade
//! call-to-action.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::layout::Layout;
use crate::hooks::conversion_metrics::use_conversion_metrics;
use crate::net::types::{ConversionEventType, EventData};
use crate::state::auth::AuthState;
use crate::util::auth::install_unauth_redirect;
use crate::util::format::{format_date, format_date_time_full};

/// Plan that shows the upgrade call-to-action.
pub const FREE_PLAN: &str = "free";

/// Display-ready values for the profile card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileSummary {
    pub name: String,
    pub email: String,
    pub plan: String,
    pub status: &'static str,
    pub max_students: Option<u32>,
    pub member_since: Option<String>,
    pub last_sign_in: Option<String>,
}

impl ProfileSummary {
    /// Build the card from the settled auth state. `None` without a user.
    #[must_use]
    pub fn from_auth(state: &AuthState) -> Option<Self> {
        let user = state.user.as_ref()?;
        let profile = user.profile.as_ref();
        let last_sign_in = state
            .session
            .as_ref()
            .and_then(|s| s.user.last_sign_in_at.as_deref())
            .map(format_date_time_full);

        Some(Self {
            name: profile.map_or_else(|| user.email.clone().unwrap_or_default(), |p| p.name.clone()),
            email: user
                .email
                .clone()
                .or_else(|| profile.map(|p| p.email.clone()))
                .unwrap_or_default(),
            plan: profile.map_or_else(|| FREE_PLAN.to_owned(), |p| p.plan.clone()),
            status: profile.map_or("—", |p| p.status.label()),
            max_students: profile.map(|p| p.max_students),
            member_since: profile
                .and_then(|p| p.created_at.as_deref())
                .map(format_date),
            last_sign_in,
        })
    }

    #[must_use]
    pub fn can_upgrade(&self) -> bool {
        self.plan == FREE_PLAN
    }
}

/// Event payload recorded with `upgrade_click`.
#[must_use]
pub fn upgrade_event_data(plan: &str) -> EventData {
    let mut data = EventData::new();
    data.insert("source".to_owned(), "dashboard".into());
    data.insert("current_plan".to_owned(), plan.into());
    data
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_unauth_redirect(auth, use_navigate());
    let metrics = use_conversion_metrics();

    let summary = move || auth.with(ProfileSummary::from_auth);

    let on_upgrade = move |_| {
        let plan = summary().map(|s| s.plan).unwrap_or_default();
        metrics.track_event(ConversionEventType::UpgradeClick, Some(upgrade_event_data(&plan)));
    };

    view! {
        <Layout>
            <section class="dashboard">
                <Show
                    when=move || !auth.get().loading
                    fallback=|| view! { <p class="dashboard__loading">"Carregando..."</p> }
                >
                    {move || {
                        summary()
                            .map(|s| {
                                let can_upgrade = s.can_upgrade();
                                view! {
                                    <h2 class="dashboard__greeting">"Olá, " {s.name.clone()}</h2>
                                    <dl class="dashboard__profile">
                                        <dt>"E-mail"</dt>
                                        <dd>{s.email.clone()}</dd>
                                        <dt>"Plano"</dt>
                                        <dd class="dashboard__plan">{s.plan.clone()}</dd>
                                        <dt>"Situação"</dt>
                                        <dd>{s.status}</dd>
                                        <dt>"Limite de alunos"</dt>
                                        <dd>
                                            {s.max_students.map_or_else(|| "—".to_owned(), |n| n.to_string())}
                                        </dd>
                                        <dt>"Membro desde"</dt>
                                        <dd>{s.member_since.clone().unwrap_or_else(|| "—".to_owned())}</dd>
                                        <dt>"Último acesso"</dt>
                                        <dd>{s.last_sign_in.clone().unwrap_or_else(|| "—".to_owned())}</dd>
                                    </dl>
                                    <Show when=move || can_upgrade>
                                        <button class="btn btn--primary dashboard__upgrade" on:click=on_upgrade>
                                            "Conheça o plano Pro"
                                        </button>
                                    </Show>
                                }
                            })
                    }}
                </Show>
            </section>
        </Layout>
    }
}
