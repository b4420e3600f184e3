//! tests/handler_tests.rs
//! Pruebas HTTP de las rutas (sin levantar el servidor).

#[cfg(test)]
mod tests {
    use actix_web::http::{Method, StatusCode};
    use actix_web::{test as actix_test, web, App};
    use chrono::{Duration, Utc};
    use serde_json::{json, Value};

    use crate::app::{cors_headers, init_app};
    use crate::handlers::status_handler::first_token;
    use crate::models::stage_model::Stage;
    use crate::services::status_service::StatusService;
    use crate::services::study_store::{format_timestamp, StudyStore};
    use crate::tests::{memory_store, record_progress};

    macro_rules! test_app {
        ($store:expr) => {
            actix_test::init_service(
                App::new()
                    .wrap(cors_headers())
                    .app_data(web::Data::new(StatusService::new($store, 24)))
                    .configure(init_app),
            )
            .await
        };
    }

    #[actix_rt::test]
    async fn test_missing_token_is_400() {
        let app = test_app!(memory_store().await);

        for uri in ["/api/study-status", "/api/study-status?token="] {
            let req = actix_test::TestRequest::get().uri(uri).to_request();
            let resp = actix_test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "uri {}", uri);

            let body: Value = actix_test::read_body_json(resp).await;
            assert_eq!(body, json!({ "error": "Token is required" }));
        }
    }

    #[actix_rt::test]
    async fn test_status_found() {
        let store = memory_store().await;
        let t = Utc::now() - Duration::minutes(10);
        record_progress(&store, "STUDY001", Stage::ResultsReceived, t, 10).await;
        let app = test_app!(store);

        let req = actix_test::TestRequest::get()
            .uri("/api/study-status?token=STUDY001")
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = actix_test::read_body_json(resp).await;
        assert_eq!(
            body["status"],
            json!({ "status": "results_received", "timestamp": format_timestamp(t) })
        );
        assert_eq!(body["statistics"]["averageWaitTime"], json!(40));
        assert_eq!(body["statistics"]["estimatedQueueTime"], json!(32));
        assert_eq!(body["statistics"]["totalProcessed"], json!(1));
        assert_eq!(body["statistics"]["successRate"], json!(100.0));
    }

    #[actix_rt::test]
    async fn test_repeated_token_uses_first_value() {
        let store = memory_store().await;
        let t = Utc::now() - Duration::minutes(5);
        record_progress(&store, "STUDY002", Stage::AiProcessing, t, 5).await;
        let app = test_app!(store);

        let req = actix_test::TestRequest::get()
            .uri("/api/study-status?token=STUDY002&token=STUDY999")
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["status"]["status"], json!("ai_processing"));
    }

    #[actix_rt::test]
    async fn test_repeated_empty_token_is_json_400() {
        let app = test_app!(memory_store().await);

        let req = actix_test::TestRequest::get()
            .uri("/api/study-status?token=&token=STUDY001")
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = actix_test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "Token is required" }));
    }

    #[test]
    fn test_first_token() {
        let pairs = vec![
            ("other".to_string(), "x".to_string()),
            ("token".to_string(), "A".to_string()),
            ("token".to_string(), "B".to_string()),
        ];
        assert_eq!(first_token(pairs), "A");
        assert_eq!(first_token(Vec::new()), "");
    }

    #[actix_rt::test]
    async fn test_status_not_found_is_null() {
        let app = test_app!(memory_store().await);

        let req = actix_test::TestRequest::post()
            .uri("/api/study-status?token=STUDY999")
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["status"], Value::Null);
        assert_eq!(
            body["statistics"],
            json!({
                "averageWaitTime": 0,
                "estimatedQueueTime": 0,
                "totalProcessed": 0,
                "successRate": 0.0
            })
        );
    }

    #[actix_rt::test]
    async fn test_database_failure_is_500_with_details() {
        // sin migraciones: la tabla no existe
        let store = StudyStore::connect("sqlite::memory:", 1).await.unwrap();
        let app = test_app!(store);

        let req = actix_test::TestRequest::get()
            .uri("/api/study-status?token=STUDY001")
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["error"], json!("Internal server error"));
        assert!(body["details"]
            .as_str()
            .unwrap()
            .contains("study_status"));
    }

    #[actix_rt::test]
    async fn test_preflight_and_cors_headers() {
        let app = test_app!(memory_store().await);

        let req = actix_test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/api/study-status")
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
        assert!(resp
            .headers()
            .get("access-control-allow-headers")
            .unwrap()
            .to_str()
            .unwrap()
            .contains("content-type"));

        let body = actix_test::read_body(resp).await;
        assert!(body.is_empty());

        // también en las respuestas normales y de error
        let req = actix_test::TestRequest::get().uri("/api/study-status").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(
            resp.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }

    #[actix_rt::test]
    async fn test_token_path_builds_dashboard() {
        let store = memory_store().await;
        let t = Utc::now() - Duration::minutes(5);
        record_progress(&store, "STUDY003", Stage::SendComplete, t, 5).await;
        let app = test_app!(store);

        let req = actix_test::TestRequest::get().uri("/token/STUDY003").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["token"], json!("STUDY003"));
        let timeline = body["timeline"].as_array().unwrap();
        assert_eq!(timeline.len(), 5);
        assert_eq!(timeline[0]["completed"], json!(true));
        assert_eq!(timeline[0]["timestamp"], json!(format_timestamp(t)));
        for entry in &timeline[1..] {
            assert_eq!(entry["completed"], json!(false));
            assert_eq!(entry["timestamp"], json!(""));
        }
    }

    #[actix_rt::test]
    async fn test_token_path_unknown_hides_timeline() {
        let app = test_app!(memory_store().await);

        let req = actix_test::TestRequest::get().uri("/token/STUDY999").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["status"], Value::Null);
        assert_eq!(body["timeline"], Value::Null);
        assert!(body["statistics"].is_object());
    }

    #[actix_rt::test]
    async fn test_preflight_on_every_route() {
        let app = test_app!(memory_store().await);

        for uri in ["/api/study-status", "/token/STUDY001", "/health"] {
            let req = actix_test::TestRequest::default()
                .method(Method::OPTIONS)
                .uri(uri)
                .to_request();
            let resp = actix_test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK, "uri {}", uri);
            assert_eq!(
                resp.headers().get("access-control-allow-origin").unwrap(),
                "*"
            );
            assert!(actix_test::read_body(resp).await.is_empty());
        }
    }

    #[actix_rt::test]
    async fn test_health() {
        let app = test_app!(memory_store().await);

        let req = actix_test::TestRequest::get().uri("/health").to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(resp).await;
        assert_eq!(body, json!({ "status": "ok" }));
    }
}
