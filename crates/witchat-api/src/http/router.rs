//! Axum router configuration with middleware.
//!
//! The chat page lives at `/` and `/chat/{id}`; JSON routes are under
//! `/api/v1/`. Middleware: CORS, tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/sessions",
            post(handlers::session::create_session).get(handlers::session::list_sessions),
        )
        .route(
            "/sessions/{id}",
            get(handlers::session::get_session).delete(handlers::session::delete_session),
        )
        .route(
            "/sessions/{id}/messages",
            post(handlers::session::post_message),
        )
        .route("/sessions/{id}/clear", post(handlers::session::clear_session))
        .route(
            "/sessions/{id}/transcript",
            get(handlers::session::get_transcript),
        )
        .route("/classify", post(handlers::classify::classify))
        .route("/health", get(health_check));

    let ui_routes = Router::new()
        .route("/", get(handlers::ui::index))
        .route(
            "/chat/{id}",
            get(handlers::ui::chat_page).post(handlers::ui::submit),
        )
        .route("/chat/{id}/clear", post(handlers::ui::clear))
        .route("/chat/{id}/download", get(handlers::ui::download));

    Router::new()
        .merge(ui_routes)
        .nest("/api/v1", api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /api/v1/health - Liveness check.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use witchat_core::nlu::box_classifier::BoxIntentClassifier;
    use witchat_core::nlu::stub::StubClassifier;
    use witchat_types::config::ChatConfig;
    use witchat_types::error::ClassifierError;

    fn stub() -> StubClassifier {
        StubClassifier::new()
            .with_intent("hola", "greet", 0.9)
            .with_intent("adios", "bye", 0.8)
            .with_error("boom", ClassifierError::AuthenticationFailed)
    }

    fn test_state(stub: StubClassifier) -> AppState {
        AppState::from_parts(
            BoxIntentClassifier::new(stub),
            ChatConfig::default(),
            std::env::temp_dir(),
        )
    }

    async fn send(router: &Router, req: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let resp = router.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp.into_body().collect().await.unwrap().to_bytes().to_vec();
        (status, headers, body)
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn create_session(router: &Router) -> String {
        let (status, _, body) = send(router, empty_request("POST", "/api/v1/sessions")).await;
        assert_eq!(status, StatusCode::CREATED);
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        value["data"]["id"].as_str().unwrap().to_string()
    }

    async fn post_message(router: &Router, id: &str, message: &str) -> serde_json::Value {
        let (status, _, body) = send(
            router,
            json_request(
                "POST",
                &format!("/api/v1/sessions/{id}/messages"),
                serde_json::json!({ "message": message }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let router = build_router(test_state(stub()));
        let (status, _, body) = send(&router, empty_request("GET", "/api/v1/health")).await;
        assert_eq!(status, StatusCode::OK);
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["status"], "ok");
    }

    #[tokio::test]
    async fn message_turn_and_transcript_newest_first() {
        let router = build_router(test_state(stub()));
        let id = create_session(&router).await;

        let first = post_message(&router, &id, "hola").await;
        assert_eq!(first["data"]["response"], "greet");
        assert_eq!(first["data"]["outcome"]["kind"], "classified");
        assert_eq!(first["data"]["turn_count"], 1);

        post_message(&router, &id, "adios").await;

        let (status, _, body) = send(
            &router,
            empty_request("GET", &format!("/api/v1/sessions/{id}/transcript")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();

        let texts: Vec<&str> = value["data"]["rows"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["text"].as_str().unwrap())
            .collect();
        assert_eq!(texts, vec!["bye", "adios", "greet", "hola"]);
        assert_eq!(value["data"]["interleaved"][0], serde_json::json!([false, "bye"]));
        assert_eq!(value["data"]["interleaved"][1], serde_json::json!([true, "adios"]));
    }

    #[tokio::test]
    async fn unknown_and_failed_turns_use_fallback() {
        let router = build_router(test_state(stub()));
        let id = create_session(&router).await;

        let unknown = post_message(&router, &id, "qwerty").await;
        assert_eq!(unknown["data"]["response"], "no intent found");
        assert_eq!(unknown["data"]["outcome"]["kind"], "no_intent");

        let failed = post_message(&router, &id, "boom").await;
        assert_eq!(failed["data"]["response"], "no intent found");
        assert_eq!(failed["data"]["outcome"]["kind"], "failed");
        assert_eq!(failed["data"]["turn_count"], 2);
    }

    #[tokio::test]
    async fn empty_message_is_rejected() {
        let router = build_router(test_state(stub()));
        let id = create_session(&router).await;

        let (status, _, body) = send(
            &router,
            json_request(
                "POST",
                &format!("/api/v1/sessions/{id}/messages"),
                serde_json::json!({ "message": "  " }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["errors"][0]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn unknown_session_is_404() {
        let router = build_router(test_state(stub()));
        let id = uuid::Uuid::now_v7();

        let (status, _, body) = send(
            &router,
            json_request(
                "POST",
                &format!("/api/v1/sessions/{id}/messages"),
                serde_json::json!({ "message": "hola" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["errors"][0]["code"], "SESSION_NOT_FOUND");

        let (status, _, _) = send(&router, empty_request("GET", &format!("/chat/{id}"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_session_id_is_400() {
        let router = build_router(test_state(stub()));
        let (status, _, _) = send(&router, empty_request("GET", "/api/v1/sessions/not-a-uuid")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn clear_and_delete_session() {
        let router = build_router(test_state(stub()));
        let id = create_session(&router).await;
        post_message(&router, &id, "hola").await;

        let (status, _, body) = send(
            &router,
            empty_request("POST", &format!("/api/v1/sessions/{id}/clear")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["data"]["turn_count"], 0);

        let (_, _, body) = send(
            &router,
            empty_request("GET", &format!("/api/v1/sessions/{id}/transcript")),
        )
        .await;
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(value["data"]["rows"].as_array().unwrap().is_empty());

        let (status, _, _) = send(&router, empty_request("DELETE", &format!("/api/v1/sessions/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _, _) = send(&router, empty_request("GET", &format!("/api/v1/sessions/{id}"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_sessions_reports_turn_counts() {
        let router = build_router(test_state(stub()));
        let a = create_session(&router).await;
        create_session(&router).await;
        post_message(&router, &a, "hola").await;

        let (_, _, body) = send(&router, empty_request("GET", "/api/v1/sessions")).await;
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let sessions = value["data"].as_array().unwrap();
        assert_eq!(sessions.len(), 2);

        let first = sessions.iter().find(|s| s["id"] == a.as_str()).unwrap();
        assert_eq!(first["turn_count"], 1);
    }

    #[tokio::test]
    async fn get_session_includes_history() {
        let router = build_router(test_state(stub()));
        let id = create_session(&router).await;
        post_message(&router, &id, "hola").await;

        let (_, _, body) = send(&router, empty_request("GET", &format!("/api/v1/sessions/{id}"))).await;
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["data"]["last_input"], "hola");
        assert_eq!(value["data"]["history"]["past_user_inputs"][0], "hola");
        assert_eq!(value["data"]["history"]["generated_responses"][0], "greet");
    }

    #[tokio::test]
    async fn classify_endpoint_surfaces_errors() {
        let router = build_router(test_state(stub()));

        let (status, _, body) = send(
            &router,
            json_request("POST", "/api/v1/classify", serde_json::json!({ "text": "hola" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["data"]["intents"][0]["name"], "greet");

        let (status, _, body) = send(
            &router,
            json_request("POST", "/api/v1/classify", serde_json::json!({ "text": "boom" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["errors"][0]["code"], "CLASSIFIER_ERROR");
    }

    #[tokio::test]
    async fn web_flow_redirects_and_renders() {
        let router = build_router(test_state(stub()));

        let (status, headers, _) = send(&router, empty_request("GET", "/")).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        let location = headers[header::LOCATION].to_str().unwrap().to_string();
        assert!(location.starts_with("/chat/"));

        let submit = Request::builder()
            .method("POST")
            .uri(&location)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("user_input=hola"))
            .unwrap();
        let (status, headers, _) = send(&router, submit).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(headers[header::LOCATION], location.as_str());

        let (status, _, body) = send(&router, empty_request("GET", &location)).await;
        assert_eq!(status, StatusCode::OK);
        let page = String::from_utf8(body).unwrap();
        let bot = page.find(">greet<").unwrap();
        let user = page.find(">hola<").unwrap();
        assert!(bot < user);

        let (status, headers, body) =
            send(&router, empty_request("GET", &format!("{location}/download"))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(headers[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .starts_with("attachment"));
        let entries: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(entries, serde_json::json!([[false, "greet"], [true, "hola"]]));

        let (status, _, _) = send(&router, empty_request("POST", &format!("{location}/clear"))).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        let (_, _, body) = send(&router, empty_request("GET", &location)).await;
        let page = String::from_utf8(body).unwrap();
        assert!(!page.contains(">greet<"));
    }

    #[tokio::test]
    async fn web_blank_input_is_ignored() {
        let state = test_state(stub());
        let router = build_router(state.clone());
        let id = state.sessions.create().await;

        let submit = Request::builder()
            .method("POST")
            .uri(format!("/chat/{id}"))
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("user_input="))
            .unwrap();
        let (status, _, _) = send(&router, submit).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert!(state.sessions.get(&id).await.unwrap().lock().await.store().is_empty());
    }

    #[tokio::test]
    async fn abandoned_web_session_expires() {
        let mut config = ChatConfig::default();
        config.server.session_idle_secs = 1;
        let state = AppState::from_parts(BoxIntentClassifier::new(stub()), config, std::env::temp_dir());
        let router = build_router(state.clone());

        let (status, headers, _) = send(&router, empty_request("GET", "/")).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        let location = headers[header::LOCATION].to_str().unwrap().to_string();
        assert_eq!(state.sessions.len().await, 1);

        tokio::time::sleep(std::time::Duration::from_millis(1500)).await;

        assert!(state.sessions.is_empty().await);
        let (status, _, _) = send(&router, empty_request("GET", &location)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn repeated_utterance_is_classified_once() {
        let stub = stub();
        let router = build_router(test_state(stub.clone()));
        let id = create_session(&router).await;

        let first = post_message(&router, &id, "hola").await;
        let second = post_message(&router, &id, "hola").await;
        assert_eq!(first["data"]["cached"], false);
        assert_eq!(second["data"]["cached"], true);
        assert_eq!(stub.call_count(), 1);
    }
}
