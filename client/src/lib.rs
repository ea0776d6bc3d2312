//! Client application shell.
//!
//! ARCHITECTURE
//! ============
//! `App` wires the three cross-cutting concerns before any route renders:
//! the session state (fetched once per activation, fail-closed), the theme
//! store (explicit preference over OS preference, persisted), and the route
//! guard that gates `/auth` and `/dashboard` on session presence. Pages get
//! all of it via context.

pub mod net;
pub mod pages;
pub mod state;
pub mod util;

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::hooks::use_navigate;
use leptos_router::path;

use crate::pages::auth::AuthPage;
use crate::pages::dashboard::DashboardPage;
use crate::pages::home::HomePage;
use crate::pages::reset::ResetPage;
use crate::state::auth::AuthState;
use crate::state::theme::ThemeStore;
use crate::util::guard::install_route_guard;

/// HTML document shell used by SSR and hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root component: shared state, theme bootstrap, router, and routes.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    provide_context(auth);

    #[cfg(feature = "hydrate")]
    let theme = ThemeStore::new(
        Arc::new(state::theme::BrowserContext),
        Arc::new(state::theme::BrowserStore),
    );
    #[cfg(not(feature = "hydrate"))]
    let theme = ThemeStore::new(
        Arc::new(state::theme::InertContext),
        Arc::new(state::theme::InMemoryStore::default()),
    );
    provide_context(theme.clone());

    // Client activation: resolve the session exactly once, apply the stored
    // theme, and follow OS theme changes until an explicit choice is made.
    #[cfg(feature = "hydrate")]
    {
        leptos::task::spawn_local(async move {
            let user = net::api::fetch_session().await;
            auth.set(AuthState::resolved(user));
        });
        theme.init_theme();
        let watch = theme.watch_system_preference();
        on_cleanup(move || watch.cancel());
    }

    view! {
        <Title text="Notes"/>
        <Stylesheet id="leptos" href="/pkg/notes.css"/>
        <Router>
            <RouteGuard/>
            <main class="app-main">
                <Routes fallback=|| view! { <p class="not-found">"Page not found."</p> }>
                    <Route path=path!("/") view=HomePage/>
                    <Route path=path!("/auth") view=AuthPage/>
                    <Route path=path!("/auth/reset") view=ResetPage/>
                    <Route path=path!("/dashboard") view=DashboardPage/>
                </Routes>
            </main>
        </Router>
    }
}

/// Invisible component binding the navigation guard to the live router.
#[component]
fn RouteGuard() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_route_guard(auth, use_navigate());
}

/// WASM entry point for client-side hydration.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    leptos::mount::hydrate_body(App);
}
