//! handlers/status_handler.rs
//! Endpoint de consulta de estado por token.

use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::handlers::error_response;
use crate::services::status_service::StatusService;

/// Primer valor de `token` en la query string; los repetidos se ignoran.
pub fn first_token(pairs: Vec<(String, String)>) -> String {
    pairs
        .into_iter()
        .find(|(key, _)| key == "token")
        .map(|(_, value)| value)
        .unwrap_or_default()
}

/// GET|POST /api/study-status?token=...
pub async fn study_status_endpoint(
    status_service: web::Data<StatusService>,
    query: web::Query<Vec<(String, String)>>,
) -> HttpResponse {
    let token = first_token(query.into_inner());
    log::info!("Consultando estado del estudio {:?}", token);

    match status_service.resolve_status(&token).await {
        Ok(resp) => HttpResponse::Ok().json(resp),
        Err(e) => error_response(&e),
    }
}

/// OPTIONS (preflight CORS): 200 sin cuerpo.
pub async fn preflight_endpoint() -> HttpResponse {
    HttpResponse::Ok().finish()
}

/// GET /health
pub async fn health_endpoint() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}
