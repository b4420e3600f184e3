//! app.rs
use actix_web::http::Method;
use actix_web::middleware::DefaultHeaders;
use actix_web::web;

use crate::handlers::{dashboard_handler, status_handler};

/// Headers CORS que lleva toda respuesta (cualquier origen).
pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add((
            "Access-Control-Allow-Headers",
            "authorization, x-client-info, apikey, content-type",
        ))
}

pub fn init_app(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api").service(
            web::resource("/study-status")
                .route(web::get().to(status_handler::study_status_endpoint))
                .route(web::post().to(status_handler::study_status_endpoint))
                .route(web::method(Method::OPTIONS).to(status_handler::preflight_endpoint)),
        ),
    )
    .service(
        web::resource("/token/{token}")
            .route(web::get().to(dashboard_handler::dashboard_endpoint))
            .route(web::method(Method::OPTIONS).to(status_handler::preflight_endpoint)),
    )
    .service(
        web::resource("/health")
            .route(web::get().to(status_handler::health_endpoint))
            .route(web::method(Method::OPTIONS).to(status_handler::preflight_endpoint)),
    );
}
