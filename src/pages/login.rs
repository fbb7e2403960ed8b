//! Login page: email + password against the storefront API.
//!
//! On success the session is stored (persisted only when "Manter logado" is
//! checked) and the browser moves to `/produtos`. Failures are shown inline
//! and leave the form editable.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_meta::{Meta, Title};
use leptos_router::hooks::use_navigate;

use crate::app::StorefrontApi;
use crate::net::types::LoginRequest;
use crate::state::session::SessionStore;

/// Label of the submit button for the current busy state.
fn submit_label(busy: bool) -> &'static str {
    if busy { "Entrando..." } else { "Login" }
}

/// Build the request body from raw form input.
fn credentials(email: &str, senha: &str) -> LoginRequest {
    LoginRequest {
        email: email.trim().to_owned(),
        senha: senha.to_owned(),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionStore>>();
    let api = expect_context::<StorefrontApi>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let senha = RwSignal::new(String::new());
    let keep_signed_in = RwSignal::new(false);
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        error.set(String::new());
        busy.set(true);
        let request = credentials(&email.get(), &senha.get());
        let persist = keep_signed_in.get();

        #[cfg(feature = "hydrate")]
        {
            let api = api.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match api.login(&request).await {
                    Ok(success) => {
                        let stored = session.try_update(|s| s.set_session(&success.token, success.user, persist));
                        match stored {
                            Some(Ok(())) => navigate("/produtos", leptos_router::NavigateOptions::default()),
                            Some(Err(e)) => error.set(e.to_string()),
                            None => {}
                        }
                    }
                    Err(e) => {
                        leptos::logging::warn!("login failed: {e:?}");
                        error.set(e.to_string());
                    }
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&api, &navigate, session, request, persist);
        }
    };

    view! {
        <Title text="Login - Innovation Brindes"/>
        <Meta name="description" content="Acesse sua conta Innovation Brindes"/>
        <div class="login-page">
            <div class="login-card">
                <h1>"Bem-vindo a Innovation Brindes"</h1>
                <form class="login-form" on:submit=on_submit>
                    <Show when=move || !error.get().is_empty()>
                        <p class="login-message login-message--error" role="alert">{move || error.get()}</p>
                    </Show>
                    <input
                        class="login-input"
                        type="text"
                        placeholder="Usuário"
                        aria-label="Usuário"
                        required=true
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Senha"
                        aria-label="Senha"
                        required=true
                        prop:value=move || senha.get()
                        on:input=move |ev| senha.set(event_target_value(&ev))
                    />
                    <div class="login-form__options">
                        <label class="login-form__remember">
                            <input
                                type="checkbox"
                                prop:checked=move || keep_signed_in.get()
                                on:change=move |ev| keep_signed_in.set(event_target_checked(&ev))
                            />
                            "Manter logado"
                        </label>
                        <a class="login-form__forgot" href="#">"Esqueceu a senha?"</a>
                    </div>
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || submit_label(busy.get())}
                    </button>
                </form>
            </div>
        </div>
    }
}
