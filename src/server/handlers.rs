use anyhow::{Context, Result};
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, Method, Request, Response, StatusCode};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tracing::info;

use super::models::{ErrorResponse, TranslateImageRequest, TranslateImageResponse};
use super::state::ServerState;
use super::trans::translate_image;
use crate::backends::{self, TranslateClient, VisionClient};
use crate::settings;

pub async fn run_server(
    settings: settings::Settings,
    addr: String,
    override_key: Option<&str>,
) -> Result<()> {
    let key = backends::resolve_key(override_key)?;
    let state = Arc::new(ServerState {
        vision: VisionClient::new(key.clone(), settings.vision_endpoint),
        translate: TranslateClient::new(key, settings.translate_endpoint),
    });
    let app = Router::new()
        .route("/health", get(health))
        .route("/trans", post(trans))
        .with_state(state)
        .layer(axum::middleware::from_fn(cors_middleware));
    info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| "failed to bind server address")?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

// The overlay client is a browser extension; it needs allow-all CORS.
async fn cors_middleware(req: Request<Body>, next: Next) -> Result<Response<Body>, StatusCode> {
    if req.method() == Method::OPTIONS {
        let mut response = Response::new(Body::empty());
        *response.status_mut() = StatusCode::NO_CONTENT;
        apply_cors_headers(response.headers_mut());
        return Ok(response);
    }
    let mut response = next.run(req).await;
    apply_cors_headers(response.headers_mut());
    Ok(response)
}

fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert("access-control-allow-origin", HeaderValue::from_static("*"));
    headers.insert(
        "access-control-allow-methods",
        HeaderValue::from_static("GET,POST,OPTIONS"),
    );
    headers.insert(
        "access-control-allow-headers",
        HeaderValue::from_static("content-type,authorization"),
    );
}

async fn trans(
    State(state): State<Arc<ServerState>>,
    Json(payload): Json<TranslateImageRequest>,
) -> Result<Json<TranslateImageResponse>, (StatusCode, Json<ErrorResponse>)> {
    match translate_image(state.as_ref(), payload).await {
        Ok(response) => Ok(Json(response)),
        Err(err) => Err((err.status, Json(ErrorResponse { error: err.message }))),
    }
}
