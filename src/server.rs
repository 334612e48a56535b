//! HTTP endpoint exposing the meta search as `POST /search`.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{MetaSearch, SearchError, SearchRequest};

impl SearchError {
    /// HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            SearchError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            SearchError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            SearchError::Parse(_) | SearchError::Config(_) | SearchError::UrlParse(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(serde_json::json!({ "detail": self.to_string() }))).into_response()
    }
}

/// Builds the router. Shared state is the read-only meta search.
pub fn router(search: Arc<MetaSearch>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/search", post(search_handler))
        .with_state(search)
}

/// Binds `host:port`. `host` may be a hostname or an IPv4/IPv6 literal.
pub async fn bind(host: &str, port: u16) -> std::io::Result<TcpListener> {
    TcpListener::bind((host, port)).await
}

/// Binds `host:port` and serves until the process exits.
pub async fn serve(host: &str, port: u16, search: Arc<MetaSearch>) -> anyhow::Result<()> {
    let listener = bind(host, port).await?;
    let local_addr = listener.local_addr()?;
    info!("metabuscador listening on http://{local_addr}");
    axum::serve(listener, router(search)).await?;
    Ok(())
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn search_handler(
    State(search): State<Arc<MetaSearch>>,
    body: Result<Json<SearchRequest>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "detail": rejection.body_text() })),
            )
                .into_response();
        }
    };

    match search.search(&request).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => {
            warn!("Search for {:?} failed: {}", request.term, e);
            e.into_response()
        }
    }
}
