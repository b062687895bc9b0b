use std::net::SocketAddr;
use std::path::PathBuf;

use axum::{routing::get, Router};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::registrations;
use crate::state::AppState;

pub fn build_app(state: AppState) -> Router {
    let public = PathBuf::from(&state.config.public_dir);
    let uploads = PathBuf::from(&state.config.upload_dir);

    Router::new()
        .merge(registrations::router())
        .route("/health", get(|| async { "ok" }))
        .route_service("/", ServeFile::new(public.join("index.html")))
        .route_service(
            "/view-registrations",
            ServeFile::new(public.join("view-registrations.html")),
        )
        .nest_service("/uploads", ServeDir::new(uploads))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
}

pub async fn serve(app: Router) -> anyhow::Result<()> {
    let addr: SocketAddr = format!(
        "{}:{}",
        std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
        std::env::var("APP_PORT").unwrap_or_else(|_| "3000".into())
    )
    .parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
