//! Password reset page, reached from the emailed reset link.
//!
//! SYSTEM CONTEXT
//! ==============
//! This route carries its single-use token in the `token` query parameter and
//! must stay reachable for signed-in users too — the route guard special-cases
//! it for exactly that reason.

#[cfg(test)]
#[path = "reset_test.rs"]
mod reset_test;

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use super::auth::{MAX_PASSWORD_LEN, MIN_PASSWORD_LEN};

fn validate_new_password(password: &str, confirm: &str) -> Result<String, &'static str> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 8 characters.");
    }
    if password.len() > MAX_PASSWORD_LEN {
        return Err("Password is too long.");
    }
    if password != confirm {
        return Err("Passwords do not match.");
    }
    Ok(password.to_owned())
}

/// Reset page: set a new password using the token from the reset email.
#[component]
pub fn ResetPage() -> impl IntoView {
    let query = use_query_map();
    let token = Memo::new(move |_| query.with(|q| q.get("token")).unwrap_or_default());

    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let token_value = token.get();
        if token_value.is_empty() {
            info.set("This reset link is missing its token. Request a new email.".to_owned());
            return;
        }
        let new_password = match validate_new_password(&password.get(), &confirm.get()) {
            Ok(v) => v,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Updating password...".to_owned());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::reset_password(&token_value, &new_password).await {
                Ok(()) => {
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href("/auth");
                    }
                }
                Err(e) => {
                    info.set(e);
                    busy.set(false);
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (token_value, new_password);
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Notes"</h1>
                <p class="auth-card__subtitle">"Choose a new password"</p>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="new password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="repeat password"
                        prop:value=move || confirm.get()
                        on:input=move |ev| confirm.set(event_target_value(&ev))
                    />
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        "Set Password"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="auth-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
