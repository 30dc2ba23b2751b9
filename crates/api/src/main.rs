use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bizpulse_core::pipeline::{self, BusinessInput, BusinessReport};
use bizpulse_core::recommend::Thresholds;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = bizpulse_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let thresholds = Thresholds::from_env();
    if thresholds != Thresholds::default() {
        tracing::warn!(?thresholds, "running with non-default rule thresholds");
    }

    let state = AppState { thresholds };

    let app = Router::new()
        .route("/healthz", get(healthz))
        .route("/analyze", post(analyze))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Debug, Clone, Copy)]
struct AppState {
    thresholds: Thresholds,
}

#[derive(Debug, Serialize)]
struct ApiError {
    error: String,
}

/// Stateless handler: one business record in, one report out. Validation
/// and arithmetic failures are client errors, not internal ones.
async fn analyze(
    State(state): State<AppState>,
    Json(input): Json<BusinessInput>,
) -> Result<Json<BusinessReport>, (StatusCode, Json<ApiError>)> {
    match pipeline::run_with(input, state.thresholds) {
        Ok(report) => Ok(Json(report)),
        Err(err) => {
            tracing::warn!(error = %err, "analyze request rejected");
            Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiError {
                    error: err.to_string(),
                }),
            ))
        }
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &bizpulse_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
