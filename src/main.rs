mod errors;
mod gateway;
mod models;
mod routes;

use axum::{routing::post, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::gateway::GatewayClient;
use crate::routes::assist_routes::assist_handler;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    // Initialise tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "legal_workspace=debug,tower_http=debug".into()),
        )
        .init();

    // ── Dependency wiring ─────────────────────────────────────────────────────
    let gateway = GatewayClient::from_env();

    // The frontend is served separately, so the proxy answers any origin and
    // lets the CORS layer handle preflight.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // ── Router ────────────────────────────────────────────────────────────────
    let app = Router::new()
        .route("/api/assist", post(assist_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(gateway);

    // ── Listen ────────────────────────────────────────────────────────────────
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{addr}/");

    axum::serve(listener, app).await?;
    Ok(())
}
