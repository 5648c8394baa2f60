// API Integration Tests
//
// Purpose: exercise the router end to end with a seeded session, no network.
// Run with: cargo test --features api --test api_integration_tests

#[cfg(feature = "api")]
mod api_tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use relief_intake_rust::csv::parse_csv;
    use relief_intake_rust::records::{map_admin_rows, map_submission_rows};
    use relief_intake_rust::{create_router, AppState, Config};
    use serde_json::Value;
    use tower::ServiceExt; // for oneshot

    const ADMIN_FEED: &str = "\
region,province,commune,douar
R1,P1,C1,D1
R1,P1,C1,D2
R1,P2,C2,D3
";

    const LOG_FEED: &str = "\
region,province,commune,douar,urgency,damage,needs,phone,location,maps
R1,P1,C1,D1,4- حرج جداً,انهيار مباني,خيام,0600000001,\"31.5,-7.1\",link
R1,P2,C2,D3,2- متوسط,انقطاع طريق,أغطية,0600000002,\"bad,12.3\",link
";

    // Helper: app over a seeded session; the script endpoint points at a
    // closed local port so a submission can never leave the machine.
    async fn create_test_app() -> axum::Router {
        let config = Config {
            script_url: "http://127.0.0.1:9/exec".to_string(),
            ..Config::default()
        };
        let state = AppState::new(config).expect("app state");

        {
            let mut session = state.session.write().await;
            session.replace_admin_rows(map_admin_rows(&parse_csv(ADMIN_FEED)));
            session.replace_reports(map_submission_rows(&parse_csv(LOG_FEED)));
        }

        create_router(state)
    }

    // Helper: Parse JSON response
    async fn json_response(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        serde_json::from_slice(&body).expect("Failed to parse JSON")
    }

    // =========================================================================
    // Section 1: Health Check
    // =========================================================================

    #[tokio::test]
    async fn test_health_check() {
        let app = create_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = json_response(response).await;
        assert_eq!(body["status"], "healthy");
        assert!(body["timestamp"].is_string());
    }

    // =========================================================================
    // Section 2: Hierarchy Options
    // =========================================================================

    #[tokio::test]
    async fn test_options_without_selection() {
        let app = create_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/hierarchy/options")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = json_response(response).await;
        assert_eq!(body["regions"], serde_json::json!(["R1"]));
        assert_eq!(body["provinces"], serde_json::json!([]));
        assert_eq!(body["communes"], serde_json::json!([]));
        assert_eq!(body["douars"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_options_narrow_with_the_selection() {
        let app = create_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/hierarchy/options?region=R1&province=P1&commune=C1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = json_response(response).await;
        assert_eq!(body["provinces"], serde_json::json!(["P1", "P2"]));
        assert_eq!(body["communes"], serde_json::json!(["C1"]));
        assert_eq!(body["douars"], serde_json::json!(["D1", "D2"]));
    }

    // =========================================================================
    // Section 3: Report Log
    // =========================================================================

    #[tokio::test]
    async fn test_reports_are_ranked_not_filtered() {
        let app = create_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/reports?douar=D3")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = json_response(response).await;
        assert_eq!(body["rows"], 2);
        let data = body["data"].as_array().unwrap();
        // The match floats to the top; the non-match stays in the list.
        assert_eq!(data[0]["douar"], "D3");
        assert_eq!(data[1]["douar"], "D1");
    }

    #[tokio::test]
    async fn test_map_points_skip_unparseable_coordinates() {
        let app = create_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/reports/points")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body: Value = json_response(response).await;
        assert_eq!(body["rows"], 1);
        let data = body["data"].as_array().unwrap();
        assert_eq!(data[0]["douar"], "D1");
        assert_eq!(data[0]["severity"], "critical");
        assert_eq!(data[0]["color"], "#ef4444");
        assert!(body["default_center"]["lat"].is_number());
    }

    // =========================================================================
    // Section 4: Submission
    // =========================================================================

    #[tokio::test]
    async fn test_submit_rejects_incomplete_draft_before_any_network_call() {
        let app = create_test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/reports")
                    .header("content-type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = json_response(response).await;
        assert!(body["error"].as_str().unwrap().contains("region"));
    }

    #[tokio::test]
    async fn test_submit_transport_failure_is_bad_gateway() {
        let app = create_test_app().await;

        let draft = serde_json::json!({
            "region": "R1",
            "province": "P1",
            "commune": "C1",
            "nom_douar": "D1",
            "niveau_urgence": "HIGH",
            "nature_dommages": "انهيار مباني",
            "besoins_essentiels": "50 خيمة",
            "numero_telephone": "0612345678",
            "latitude": "31.500000",
            "longitude": "-7.100000",
            "lien_maps": "https://www.google.com/maps?q=31.500000,-7.100000"
        });

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/reports")
                    .header("content-type", "application/json")
                    .body(Body::from(draft.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        // The script URL points at a closed port; the POST cannot complete.
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    // =========================================================================
    // Section 5: Session Semantics
    // =========================================================================

    #[tokio::test]
    async fn test_empty_session_serves_empty_lists_not_errors() {
        let config = Config {
            script_url: "http://127.0.0.1:9/exec".to_string(),
            ..Config::default()
        };
        let state = AppState::new(config).expect("app state");
        let app = create_router(state);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/hierarchy/options")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = json_response(response).await;
        assert_eq!(body["regions"], serde_json::json!([]));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/reports")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = json_response(response).await;
        assert_eq!(body["rows"], 0);
    }
}
