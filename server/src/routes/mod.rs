//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router carries everything: the JSON API under `/api`, server-side
//! rendering of the Leptos app for every page route, and the compiled client
//! assets under `/pkg`.

pub mod auth;
pub mod notes;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

fn auth_api() -> Router<AppState> {
    Router::new()
        .route("/api/auth/session", get(auth::current_session))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/request-reset", post(auth::request_reset))
        .route("/api/auth/reset", post(auth::reset_password))
}

fn notes_api() -> Router<AppState> {
    Router::new()
        .route("/api/notes", get(notes::list_notes).post(notes::create_note))
        .route("/api/notes/{id}", patch(notes::update_note).delete(notes::delete_note))
}

/// Full application router: API + Leptos SSR + client assets.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded.
pub fn app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let site_root = PathBuf::from(leptos_options.site_root.as_ref());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = auth_api()
        .merge(notes_api())
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state);

    let pages = Router::new()
        .leptos_routes(&leptos_options, generate_route_list(client::App), {
            let opts = leptos_options.clone();
            move || client::shell(opts.clone())
        })
        .with_state(leptos_options);

    Ok(api
        .merge(pages)
        .nest_service("/pkg", ServeDir::new(site_root.join("pkg")))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http()))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
