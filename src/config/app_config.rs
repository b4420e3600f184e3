//! config/app_config.rs
//! Configuración global del servicio, leída de variables de entorno (.env).

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Ventana máxima aceptada para las estadísticas (10 años).
pub const MAX_STATISTICS_WINDOW_HOURS: u32 = 24 * 365 * 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String, // "sqlite:data/study_status.db"
    pub database_max_connections: u32,
    /// Ventana (en horas) sobre la que se calculan las estadísticas
    pub statistics_window_hours: u32,
    pub http_workers: usize,
    pub seed_demo_data: bool,
    /// Filtro por defecto del logger; RUST_LOG lo sobreescribe
    pub log_level: String,
    /// Avisos de valores descartados. Se leen antes de que exista el logger,
    /// así que main los emite después de inicializarlo.
    #[serde(skip)]
    pub warnings: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: "0.0.0.0".to_string(),
            port: 5022,
            database_url: "sqlite:data/study_status.db".to_string(),
            database_max_connections: 5,
            statistics_window_hours: 24,
            http_workers: 1,
            seed_demo_data: false,
            log_level: "info".to_string(),
            warnings: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Lee la configuración del entorno. Los valores ausentes o inválidos
    /// se quedan con el default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();
        let mut warnings = Vec::new();

        let database_max_connections = parse_in_range(
            "DATABASE_MAX_CONNECTIONS",
            lookup("DATABASE_MAX_CONNECTIONS"),
            defaults.database_max_connections,
            1..=64,
            &mut warnings,
        );
        let statistics_window_hours = parse_in_range(
            "STATISTICS_WINDOW_HOURS",
            lookup("STATISTICS_WINDOW_HOURS"),
            defaults.statistics_window_hours,
            1..=MAX_STATISTICS_WINDOW_HOURS,
            &mut warnings,
        );
        let http_workers = parse_in_range(
            "HTTP_WORKERS",
            lookup("HTTP_WORKERS"),
            defaults.http_workers,
            1..=256,
            &mut warnings,
        );
        let port = parse_in_range(
            "PORT",
            lookup("PORT"),
            defaults.port,
            0..=u16::MAX,
            &mut warnings,
        );

        AppConfig {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            database_max_connections,
            statistics_window_hours,
            http_workers,
            seed_demo_data: lookup("SEED_DEMO_DATA")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(defaults.seed_demo_data),
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            warnings,
        }
    }
}

fn parse_in_range<T>(
    key: &str,
    raw: Option<String>,
    default: T,
    range: std::ops::RangeInclusive<T>,
    warnings: &mut Vec<String>,
) -> T
where
    T: FromStr + PartialOrd + std::fmt::Display,
{
    let Some(value) = raw else {
        return default;
    };

    match value.trim().parse::<T>() {
        Ok(parsed) if range.contains(&parsed) => parsed,
        _ => {
            warnings.push(format!(
                "Valor inválido para {}: {:?} (rango {}..={}), usando {}",
                key,
                value,
                range.start(),
                range.end(),
                default
            ));
            default
        }
    }
}
