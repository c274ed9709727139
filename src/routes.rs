//! HTTP surface: routing table, handlers and middleware.
//!
//! - `GET /status` reports liveness and never calls the marketplace.
//! - `GET /buscar?q=` runs a product search.
//!
//! Every response uses the envelopes from [`crate::response`].

use std::any::Any;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, Request, State};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::response::{ApiResponse, ErrorResponse, SearchMetadata};
use crate::service::{SearchQuery, SearchService};

pub const API_WARNING_HEADER: &str = "x-api-warning";
const API_WARNING_TEXT: &str = "Using Mercado Livre API without authentication";

#[derive(Clone)]
pub struct AppState {
    pub service: SearchService,
    pub config: Arc<AppConfig>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        Ok(Self {
            service: SearchService::new(&config)?,
            config: Arc::new(config),
            started_at: Instant::now(),
        })
    }

    fn expose_details(&self) -> bool {
        !self.config.mode.is_production()
    }
}

pub fn build_router(state: AppState) -> Router {
    let expose_details = state.expose_details();

    Router::new()
        .route("/status", get(handle_status))
        .route("/buscar", get(handle_search))
        .fallback(handle_not_found)
        .layer(middleware::from_fn_with_state(state.clone(), credential_warning))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(move |payload: Box<dyn Any + Send + 'static>| {
            panic_response(expose_details, payload)
        }))
        .with_state(state)
}

// ==================== HANDLERS ====================
#[derive(Serialize)]
struct StatusReport {
    status: &'static str,
    timestamp: String,
    uptime: f64,
    environment: &'static str,
}

async fn handle_status(State(state): State<AppState>) -> Json<ApiResponse<StatusReport>> {
    Json(ApiResponse::ok(StatusReport {
        status: "ok",
        timestamp: chrono::Utc::now().to_rfc3339(),
        uptime: state.started_at.elapsed().as_secs_f64(),
        environment: state.config.mode.as_str(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

async fn handle_search(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Response {
    match search(&state, params).await {
        Ok(response) => response,
        Err(err) => {
            error!(error = %err, "Error during search");
            err.into_response_with(state.expose_details())
        }
    }
}

async fn search(
    state: &AppState,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) =
        params.map_err(|rejection| ApiError::InvalidQuery(rejection.body_text()))?;
    let query = SearchQuery::parse(params.q)?;
    info!("Processing search request for: {:?}", query.as_str());

    let result = state.service.search_products(&query).await?;
    info!("Sending {} results to client", result.count);

    Ok(Json(ApiResponse::with_metadata(result, SearchMetadata::now())).into_response())
}

async fn handle_not_found() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("not_found", "Route not found", None)),
    )
}

// ==================== MIDDLEWARE ====================
async fn credential_warning(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    if !state.config.has_real_token() {
        warn!("API credentials not properly configured");
        response.headers_mut().insert(
            HeaderName::from_static(API_WARNING_HEADER),
            HeaderValue::from_static(API_WARNING_TEXT),
        );
    }
    response
}

pub fn panic_response(expose_details: bool, payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!(panic = %detail, "Unhandled application error");

    let details = expose_details.then(|| serde_json::json!({ "message": detail }));
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("internal_error", "Internal server error", details)),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn panic_details_only_outside_production() {
        let response = panic_response(true, Box::new("kaboom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "internal_error");
        assert_eq!(body["error"]["details"]["message"], "kaboom");

        let response = panic_response(false, Box::new(String::from("kaboom")));
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Internal server error");
        assert!(body["error"].get("details").is_none());
    }
}
