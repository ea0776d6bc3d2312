mod db;
mod routes;
mod services;
mod state;

use std::net::Ipv4Addr;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let port = std::env::var("PORT").map_or(3000, |raw| raw.parse::<u16>().expect("invalid PORT"));

    let pool = match db::init_pool(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "database init failed");
            std::process::exit(1);
        }
    };

    let app = routes::app(state::AppState::new(pool)).expect("router init failed");

    let listener = tokio::net::TcpListener::bind((Ipv4Addr::UNSPECIFIED, port))
        .await
        .expect("failed to bind");
    tracing::info!(%port, "notes server ready");
    axum::serve(listener, app).await.expect("server exited with error");
}
