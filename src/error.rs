//! error.rs
//! Errores de dominio del servicio de estado de estudios.

use actix_web::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StudyStatusError {
    /// Falta el token o viene vacío.
    #[error("Token is required")]
    InvalidRequest,

    /// El almacén devolvió un estado fuera de las cinco etapas conocidas.
    #[error("Unknown status: {0}")]
    UnknownStatus(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl StudyStatusError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            StudyStatusError::InvalidRequest => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type StudyResult<T> = std::result::Result<T, StudyStatusError>;
