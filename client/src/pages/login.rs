//! Email + password sign-in page.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::net::backend::BackendError;
use crate::state::auth::AuthState;
use crate::util::auth::install_auth_redirect;

/// Trim the email and require both fields.
pub fn validate_sign_in_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Informe e-mail e senha.");
    }
    if !email.contains('@') {
        return Err("E-mail inválido.");
    }
    Ok((email.to_owned(), password.to_owned()))
}

/// User-facing message for a failed sign-in.
#[must_use]
pub fn sign_in_error_message(err: &BackendError) -> String {
    match err {
        BackendError::Status { status: 400 | 401, .. } => "E-mail ou senha incorretos.".to_owned(),
        BackendError::NotConfigured(_) | BackendError::Unavailable => {
            "Serviço de autenticação indisponível.".to_owned()
        }
        other => format!("Falha ao entrar: {other}"),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_auth_redirect(auth, use_navigate());

    #[cfg(feature = "hydrate")]
    let backend = use_context::<crate::state::backend::BackendContext>();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, password_value) = match validate_sign_in_input(&email.get(), &password.get()) {
            Ok(values) => values,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Entrando...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            let Some(backend) = backend.and_then(|ctx| ctx.try_get_value()) else {
                info.set(sign_in_error_message(&BackendError::Unavailable));
                busy.set(false);
                return;
            };
            leptos::task::spawn_local(async move {
                match backend
                    .sign_in_with_password(&email_value, &password_value)
                    .await
                {
                    Ok(_) => {
                        password.set(String::new());
                        info.set(String::new());
                    }
                    Err(e) => {
                        leptos::logging::warn!("sign-in failed: {e}");
                        info.set(sign_in_error_message(&e));
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email_value, password_value);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"TutorDesk"</h1>
                <p class="login-card__subtitle">"Acesse sua conta"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="voce@exemplo.com"
                        autocomplete="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Senha"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Entrar"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
