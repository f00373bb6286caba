mod auth;
mod cart;
mod config;
mod food;
mod order;
mod state;
mod utils;

use axum::{
    Json, Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::get,
};
use chrono::Utc;
use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use listenfd::ListenFd;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::Config;
use crate::state::AppState;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/");

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::load();

    run_migrations(&config.database_url).await;

    let state = AppState::new(config)
        .await
        .expect("failed to initialize application state");

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_origin(Any);

    let api = Router::new()
        .merge(auth::routes::get_routes())
        .merge(food::routes::get_routes())
        .merge(cart::routes::get_routes())
        .merge(order::routes::get_routes())
        .route("/health", get(health));

    let addr = format!("0.0.0.0:{}", state.config.port);

    let app = Router::new()
        .nest("/api", api)
        .fallback(utils::handler_404)
        .layer(cors)
        .with_state(state);

    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0).expect("invalid listen fd") {
        // if we are given a tcp listener on listen fd 0, we use that one
        Some(listener) => {
            listener
                .set_nonblocking(true)
                .expect("failed to set nonblocking");
            TcpListener::from_std(listener).expect("failed to adopt listener")
        }
        // otherwise fall back to local listening
        None => TcpListener::bind(&addr).await.expect("failed to bind"),
    };

    info!("listening on {}", listener.local_addr().expect("no local addr"));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "message": "Food Ordering API is running",
        "timestamp": Utc::now(),
    }))
}

async fn run_migrations(database_url: &str) {
    let url = database_url.to_owned();

    tokio::task::spawn_blocking(move || {
        let mut conn = PgConnection::establish(&url).expect("failed to connect for migrations");
        conn.run_pending_migrations(MIGRATIONS)
            .map(|_| ())
            .expect("failed to run migrations");
    })
    .await
    .expect("migration task panicked");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("failed to install Ctrl+C handler");
        info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
        info!("received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
