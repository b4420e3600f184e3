//! handlers/dashboard_handler.rs
use actix_web::{web, HttpResponse};

use crate::handlers::error_response;
use crate::services::status_service::StatusService;

/// GET /token/{token}
/// Misma búsqueda que el formulario, con el timeline ya armado.
pub async fn dashboard_endpoint(
    status_service: web::Data<StatusService>,
    path: web::Path<String>,
) -> HttpResponse {
    let token = path.into_inner();
    log::info!("Dashboard para token {:?}", token);

    match status_service.dashboard(&token).await {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(e) => error_response(&e),
    }
}
