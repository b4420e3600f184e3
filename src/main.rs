use std::path::Path;

use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use dotenv::dotenv;

use crate::config::app_config::AppConfig;
use crate::logger::init_logger;
use crate::services::status_service::StatusService;
use crate::services::study_store::StudyStore;

mod app;
mod config;
mod error;
mod handlers;
mod logger;
mod models;
mod services;

#[cfg(test)]
mod tests;

/// Crea la carpeta que contiene el archivo SQLite (p.e. "data/").
fn ensure_database_dir(database_url: &str) -> Result<()> {
    let path = database_url
        .trim_start_matches("sqlite:")
        .trim_start_matches("//");
    if path.is_empty() || path.starts_with(":memory:") {
        return Ok(());
    }

    let path = path.split('?').next().unwrap_or(path);
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("No se pudo crear directorio {:?}", parent))?;
        }
    }
    Ok(())
}

async fn setup_store(config: &AppConfig) -> Result<StudyStore> {
    ensure_database_dir(&config.database_url)?;
    log::info!("Conectando a SQLite en {}", config.database_url);

    let store = StudyStore::connect(&config.database_url, config.database_max_connections)
        .await
        .context("No se pudo conectar a la base de datos SQLite")?;

    store
        .run_migrations()
        .await
        .context("Fallo en migraciones de 'study_status'")?;

    if config.seed_demo_data {
        store
            .seed_demo_data()
            .await
            .context("Fallo al cargar datos demo")?;
    }

    Ok(store)
}

#[actix_web::main]
async fn main() -> Result<()> {
    dotenv().ok(); // Cargar .env al inicio
    let config = AppConfig::from_env();
    init_logger(&config.log_level);
    for warning in &config.warnings {
        log::warn!("{}", warning);
    }

    let store = setup_store(&config).await?;
    let status_service = StatusService::new(store, config.statistics_window_hours);

    log::info!(
        "Levantando servidor en {}:{} (ventana de estadísticas: {}h)",
        config.host,
        config.port,
        config.statistics_window_hours
    );
    HttpServer::new(move || {
        App::new()
            .wrap(app::cors_headers())
            .wrap(Logger::default())
            .app_data(web::Data::new(status_service.clone()))
            .configure(app::init_app)
    })
    .workers(config.http_workers)
    .bind((config.host.as_str(), config.port))
    .with_context(|| format!("No se pudo enlazar {}:{}", config.host, config.port))?
    .run()
    .await
    .context("El servidor HTTP terminó con error")?;

    Ok(())
}
