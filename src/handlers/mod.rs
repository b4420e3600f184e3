//! handlers/mod.rs
//! Handlers HTTP y conversión de errores a respuestas JSON.

pub mod dashboard_handler;
pub mod status_handler;

use actix_web::HttpResponse;
use serde_json::json;

use crate::error::StudyStatusError;

/// Convierte un error de dominio en la respuesta JSON correspondiente.
/// 400 -> `{ error }`, 500 -> `{ error, details }`.
pub fn error_response(err: &StudyStatusError) -> HttpResponse {
    match err {
        StudyStatusError::InvalidRequest => {
            HttpResponse::build(err.status_code()).json(json!({ "error": err.to_string() }))
        }
        _ => {
            log::error!("Error consultando estado: {:?}", err);
            HttpResponse::build(err.status_code()).json(json!({
                "error": "Internal server error",
                "details": err.to_string()
            }))
        }
    }
}
