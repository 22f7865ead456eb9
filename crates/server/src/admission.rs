//! Admission middleware for the chat endpoint.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::warn;

use liftlab_core::admission::AdmissionController;
use liftlab_core::ChatError;

pub async fn require_admission(
    State(controller): State<Arc<AdmissionController>>,
    request: Request,
    next: Next,
) -> Response {
    let peer = request.extensions().get::<ConnectInfo<SocketAddr>>().map(|info| info.0);
    let identity = client_identity(request.headers(), peer);

    if !controller.allow(&identity) {
        let error = ChatError::RateLimited { limit: controller.limit() };
        warn!(client = %identity, "rate limit exceeded");
        return (StatusCode::TOO_MANY_REQUESTS, Json(json!({"error": error.to_string()})))
            .into_response();
    }

    next.run(request).await
}

/// Derive the client identity from proxy headers, first hop wins, falling
/// back to the connection peer.
fn client_identity(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    if let Some(forwarded) = header_value(headers, "x-forwarded-for") {
        if let Some(first_hop) = forwarded.split(',').next() {
            let first_hop = first_hop.trim();
            if !first_hop.is_empty() {
                return first_hop.to_string();
            }
        }
    }

    if let Some(real_ip) = header_value(headers, "x-real-ip") {
        let real_ip = real_ip.trim();
        if !real_ip.is_empty() {
            return real_ip.to_string();
        }
    }

    peer.map(|address| address.ip().to_string()).unwrap_or_else(|| "unknown".to_string())
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}
