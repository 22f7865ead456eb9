use axum::{routing::get, Json, Router};
use serde::Serialize;

pub const SERVICE_NAME: &str = "liftlab-server";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

pub fn router() -> Router {
    Router::new().route("/health", get(health))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok", service: SERVICE_NAME })
}
