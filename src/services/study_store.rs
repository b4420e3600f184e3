//! services/study_store.rs
//! Acceso a la tabla `study_status` (eventos de estado por estudio) y
//! agregación de estadísticas sobre una ventana de tiempo.

use std::str::FromStr;

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};

use crate::error::StudyResult;
use crate::models::stage_model::Stage;
use crate::models::statistics_model::AggregateStatisticsRow;
use crate::models::study_model::{StatusRecord, StatusRow};

/// Formato único para los timestamps guardados: RFC3339 en UTC con
/// milisegundos, así el orden lexicográfico coincide con el cronológico.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Inicio de la ventana de `window_hours` horas que termina en `now`.
/// Si la resta se sale del rango de fechas, la ventana empieza en el epoch.
pub fn window_start(now: DateTime<Utc>, window_hours: u32) -> DateTime<Utc> {
    now.checked_sub_signed(Duration::hours(i64::from(window_hours)))
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

#[derive(Clone, Debug)]
pub struct StudyStore {
    db_pool: Pool<Sqlite>,
}

impl StudyStore {
    /// Abre (o crea) la base SQLite indicada por `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> StudyResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let db_pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;
        Ok(StudyStore { db_pool })
    }

    #[cfg(test)]
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.db_pool
    }

    /// Corre migraciones con sqlx
    pub async fn run_migrations(&self) -> StudyResult<()> {
        sqlx::migrate!("./migrations").run(&self.db_pool).await?;
        Ok(())
    }

    /// Registro más reciente del token, o None si aún no hay eventos.
    pub async fn latest_status(&self, token: &str) -> StudyResult<Option<StatusRecord>> {
        let row = sqlx::query_as::<_, StatusRow>(
            r#"
            SELECT status, timestamp
            FROM study_status
            WHERE study_token = ?1
            ORDER BY timestamp DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.db_pool)
        .await?;

        row.map(StatusRecord::try_from).transpose()
    }

    /// Todos los eventos del token, del más antiguo al más reciente.
    pub async fn status_history(&self, token: &str) -> StudyResult<Vec<StatusRecord>> {
        let rows = sqlx::query_as::<_, StatusRow>(
            r#"
            SELECT status, timestamp
            FROM study_status
            WHERE study_token = ?1
            ORDER BY timestamp ASC, id ASC
            "#,
        )
        .bind(token)
        .fetch_all(&self.db_pool)
        .await?;

        rows.into_iter().map(StatusRecord::try_from).collect()
    }

    /// Agrega los eventos de las últimas `window_hours` horas:
    /// - avg_wait_time: minutos promedio entre send_complete y results_received
    /// - total_processed: estudios que llegaron a results_received
    /// - success_rate: % de estudios enviados en la ventana que llegaron a results_received
    pub async fn aggregate_statistics(
        &self,
        window_hours: u32,
    ) -> StudyResult<Option<AggregateStatisticsRow>> {
        let since = format_timestamp(window_start(Utc::now(), window_hours));

        let row = sqlx::query_as::<_, AggregateStatisticsRow>(
            r#"
            WITH per_study AS (
                SELECT
                    study_token,
                    MIN(CASE WHEN status = ?2 THEN timestamp END) AS sent_at,
                    MAX(CASE WHEN status = ?3 THEN timestamp END) AS received_at
                FROM study_status
                WHERE timestamp >= ?1
                GROUP BY study_token
            )
            SELECT
                AVG(
                    CASE WHEN sent_at IS NOT NULL AND received_at IS NOT NULL
                    THEN (julianday(received_at) - julianday(sent_at)) * 1440.0
                    END
                ) AS avg_wait_time,
                COUNT(received_at) AS total_processed,
                CASE WHEN COUNT(sent_at) = 0 THEN NULL
                ELSE 100.0 * SUM(
                    CASE WHEN sent_at IS NOT NULL AND received_at IS NOT NULL THEN 1 ELSE 0 END
                ) / COUNT(sent_at)
                END AS success_rate
            FROM per_study
            "#,
        )
        .bind(since)
        .bind(Stage::SendComplete.as_str())
        .bind(Stage::ResultsReceived.as_str())
        .fetch_optional(&self.db_pool)
        .await?;

        Ok(row)
    }

    /// Inserta un evento de estado. No hay endpoint de escritura: lo usan
    /// la carga de datos demo y los tests.
    pub async fn record_status(
        &self,
        token: &str,
        stage: Stage,
        at: DateTime<Utc>,
    ) -> StudyResult<()> {
        sqlx::query(
            r#"
            INSERT INTO study_status (study_token, status, timestamp)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(token)
        .bind(stage.as_str())
        .bind(format_timestamp(at))
        .execute(&self.db_pool)
        .await?;

        Ok(())
    }

    /// Carga los estudios de demostración si la tabla está vacía.
    /// Devuelve cuántos eventos se insertaron.
    pub async fn seed_demo_data(&self) -> StudyResult<usize> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM study_status")
            .fetch_one(&self.db_pool)
            .await?;
        if count > 0 {
            log::info!("Tabla study_status con {} eventos, no se cargan datos demo", count);
            return Ok(0);
        }

        let now = Utc::now();
        // (token, etapa final, minutos atrás del último evento)
        let demo_studies = [
            ("STUDY001", Stage::ResultsReceived, 10),
            ("STUDY002", Stage::AiProcessing, 5),
            ("STUDY003", Stage::SendComplete, 5),
            ("STUDY007", Stage::ResultsReceived, 5),
        ];

        let mut inserted = 0;
        for (token, final_stage, minutes_ago) in demo_studies {
            let last_at = now - Duration::minutes(minutes_ago);
            let steps = final_stage.position();
            for stage in Stage::ALL.into_iter().take(steps + 1) {
                // 10 minutos entre etapas, terminando en `last_at`
                let offset = (steps - stage.position()) as i64 * 10;
                self.record_status(token, stage, last_at - Duration::minutes(offset))
                    .await?;
                inserted += 1;
            }
        }

        log::info!("Datos demo cargados: {} eventos", inserted);
        Ok(inserted)
    }
}
