//! Auth page: email + password sign-in, registration, and reset requests.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;

/// Password length policy, enforced client-side for early feedback and again
/// by the server.
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;

fn validate_email(email: &str) -> Result<String, &'static str> {
    let email = email.trim().to_ascii_lowercase();
    if email.is_empty() {
        return Err("Enter your email first.");
    }
    if !email.contains('@') {
        return Err("Enter a valid email address.");
    }
    Ok(email)
}

fn validate_credentials(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = validate_email(email)?;
    if password.len() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 8 characters.");
    }
    if password.len() > MAX_PASSWORD_LEN {
        return Err("Password is too long.");
    }
    Ok((email, password.to_owned()))
}

/// Auth page with sign-in, sign-up, and forgot-password forms.
#[component]
pub fn AuthPage() -> impl IntoView {
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let registering = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let creds = match validate_credentials(&email.get(), &password.get()) {
            Ok(creds) => creds,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set(if registering.get() { "Creating account...".to_owned() } else { "Signing in...".to_owned() });

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let (email_value, password_value) = creds;
            let result = if registering.get_untracked() {
                crate::net::api::register(&email_value, &password_value).await
            } else {
                crate::net::api::login(&email_value, &password_value).await
            };
            match result {
                Ok(()) => {
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href("/dashboard");
                    }
                }
                Err(e) => {
                    info.set(e);
                    busy.set(false);
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = creds;
    };

    let on_forgot = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let email_value = match validate_email(&email.get()) {
            Ok(v) => v,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Requesting reset email...".to_owned());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::request_password_reset(&email_value).await {
                Ok(()) => info.set("If that account exists, a reset email is on its way.".to_owned()),
                Err(e) => info.set(e),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = email_value;
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Notes"</h1>
                <p class="auth-card__subtitle">
                    {move || if registering.get() { "Create your account" } else { "Sign in to your notes" }}
                </p>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        {move || if registering.get() { "Create Account" } else { "Sign In" }}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="auth-message">{move || info.get()}</p>
                </Show>
                <div class="auth-divider"></div>
                <button
                    class="auth-link"
                    on:click=move |_| {
                        registering.update(|r| *r = !*r);
                        info.set(String::new());
                    }
                >
                    {move || if registering.get() { "Have an account? Sign in" } else { "New here? Create an account" }}
                </button>
                <button class="auth-link" on:click=on_forgot>
                    "Forgot password?"
                </button>
            </div>
        </div>
    }
}
