//! HTTP boundary for the estimator.
//!
//! Method, origin, payload size and access key are all checked here, before
//! the request reaches the pricing service.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{AppError, Result};
use crate::AppState;

use super::requests::BookingRequest;
use super::responses::PriceEstimate;
use super::services;

/// Largest accepted request body, in bytes
pub const MAX_PAYLOAD_BYTES: usize = 4096;

/// Header carrying the optional shared secret
pub const ESTIMATOR_KEY_HEADER: &str = "x-estimator-key";

/// Estimator routes
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/estimate",
        post(estimate).options(preflight).fallback(method_not_allowed),
    )
}

/// Origin header value, if present and on the allow-list
fn allowed_origin(state: &AppState, headers: &HeaderMap) -> Option<HeaderValue> {
    let origin = headers.get(header::ORIGIN)?;
    let allowed = origin
        .to_str()
        .map(|value| state.config.is_origin_allowed(value))
        .unwrap_or(false);
    allowed.then(|| origin.clone())
}

fn cors_headers(origin: HeaderValue) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, X-Estimator-Key"),
    );
    headers.insert(header::VARY, HeaderValue::from_static("Origin"));
    headers
}

/// CORS preflight. Always 204; CORS headers only for allowed origins.
async fn preflight(State(state): State<AppState>, headers: HeaderMap) -> Response {
    match allowed_origin(&state, &headers) {
        Some(origin) => (StatusCode::NO_CONTENT, cors_headers(origin)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

/// Estimate handler.
///
/// The body extractor is fallible so that the origin check still runs
/// first when the transport limit refuses to buffer the body.
async fn estimate(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Response {
    let Some(origin) = allowed_origin(&state, &headers) else {
        warn!(
            "Rejected estimate from origin {:?}",
            headers.get(header::ORIGIN)
        );
        return AppError::Forbidden.into_response();
    };

    let result = read_body(body).and_then(|body| run_estimate(&state, &headers, &body));
    (cors_headers(origin), result).into_response()
}

fn read_body(body: std::result::Result<Bytes, BytesRejection>) -> Result<Bytes> {
    match body {
        Ok(body) if body.len() > MAX_PAYLOAD_BYTES => {
            warn!("Rejected estimate payload of {} bytes", body.len());
            Err(AppError::PayloadTooLarge)
        }
        Ok(body) => Ok(body),
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            warn!("Rejected estimate payload over the transport limit");
            Err(AppError::PayloadTooLarge)
        }
        Err(rejection) => Err(AppError::Internal(rejection.body_text())),
    }
}

fn run_estimate(state: &AppState, headers: &HeaderMap, body: &[u8]) -> Result<Json<PriceEstimate>> {
    let document: Value = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Object(Default::default())
    } else {
        serde_json::from_slice(body)?
    };

    if let Some(expected) = &state.config.public_key {
        let provided = headers
            .get(ESTIMATOR_KEY_HEADER)
            .and_then(|value| value.to_str().ok());
        if provided != Some(expected.as_str()) {
            warn!("Rejected estimate with missing or wrong key");
            return Err(AppError::Unauthorized);
        }
    }

    let request = BookingRequest::from_value(document);
    let estimate = services::estimate(&request, &state.rates)?;

    debug!(
        total_coverage = %estimate.checklist.total_coverage,
        guest_count = %estimate.checklist.guest_count,
        timeline = estimate.checklist.timeline,
        min = estimate.min,
        max = estimate.max,
        "Estimate computed"
    );

    Ok(Json(estimate))
}
