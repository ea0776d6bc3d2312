//! Public landing page.

use leptos::prelude::*;

use crate::state::auth::AuthState;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    view! {
        <div class="home-page">
            <div class="home-hero">
                <h1>"Notes"</h1>
                <p>"A small place for the things you want to keep."</p>
                <Show
                    when=move || auth.get().session_present()
                    fallback=|| view! { <a class="auth-button" href="/auth">"Sign in"</a> }
                >
                    <a class="auth-button" href="/dashboard">"Open your notes"</a>
                </Show>
            </div>
        </div>
    }
}
