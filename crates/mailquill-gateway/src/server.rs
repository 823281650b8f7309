// SPDX-FileCopyrightText: 2026 Mailquill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state. Routes under `/api/chats`
//! sit behind the session middleware; the email/generate/auth routes and
//! `/health` are public.

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use mailquill_core::{ChatStore, GenerationBackend, MailquillError, UserStore};
use mailquill_dispatch::Dispatcher;

use crate::auth::{require_session, AuthKeys};
use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Durable chat store scoped by authenticated identity.
    pub store: Arc<dyn ChatStore>,
    /// Account store for credential auth.
    pub users: Arc<dyn UserStore>,
    /// Configured generation backend.
    pub backend: Arc<dyn GenerationBackend>,
    /// Dispatcher wired to `store` and `backend`.
    pub dispatcher: Arc<Dispatcher>,
    /// Session token keys.
    pub auth: AuthKeys,
    /// Process start, for uptime reporting.
    pub started_at: std::time::Instant,
}

impl AppState {
    pub fn new(
        store: Arc<dyn ChatStore>,
        users: Arc<dyn UserStore>,
        backend: Arc<dyn GenerationBackend>,
        auth: AuthKeys,
    ) -> Self {
        let dispatcher = Arc::new(Dispatcher::new(store.clone(), backend.clone()));
        Self {
            store,
            users,
            backend,
            dispatcher,
            auth,
            started_at: std::time::Instant::now(),
        }
    }
}

/// Builds the full route tree.
pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .route("/api/generate", post(handlers::post_generate))
        .route("/api/email", post(handlers::post_email))
        .route("/api/auth/signup", post(handlers::post_signup))
        .route("/api/auth/login", post(handlers::post_login))
        .with_state(state.clone());

    let chat_routes = Router::new()
        .route(
            "/api/chats",
            get(handlers::get_chats).post(handlers::post_chats),
        )
        .route(
            "/api/chats/{id}",
            get(handlers::get_chat)
                .patch(handlers::patch_chat)
                .delete(handlers::delete_chat),
        )
        .route("/api/chats/{id}/messages", post(handlers::post_message))
        .route_layer(axum_middleware::from_fn_with_state(
            state.auth.clone(),
            require_session,
        ))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(chat_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Binds and serves the gateway.
pub async fn start_server(host: &str, port: u16, state: AppState) -> Result<(), MailquillError> {
    let app = build_router(state);
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| MailquillError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("Mailquill gateway listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| MailquillError::Internal(format!("gateway server error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use tower::ServiceExt;

    use mailquill_storage::MemoryChatStore;
    use mailquill_test_utils::MockBackend;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn test_router(replies: Vec<&str>) -> Router {
        let store = Arc::new(MemoryChatStore::new());
        let backend = Arc::new(MockBackend::with_replies(
            replies.into_iter().map(String::from).collect(),
        ));
        let state = AppState::new(
            store.clone(),
            store,
            backend,
            AuthKeys::new(Some(SECRET.to_string()), 3600),
        );
        build_router(state)
    }

    async fn request(
        router: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn signup_and_login(router: &Router, email: &str) -> String {
        let credentials = serde_json::json!({"email": email, "password": "correct-horse"});
        let (status, _) = request(
            router,
            Method::POST,
            "/api/auth/signup",
            None,
            Some(credentials.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = request(
            router,
            Method::POST,
            "/api/auth/login",
            None,
            Some(credentials),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn health_is_public() {
        let router = test_router(vec![]);
        let (status, body) = request(&router, Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["backend"], "mock");
    }

    #[tokio::test]
    async fn get_generate_is_rejected_with_allow_header() {
        let router = test_router(vec![]);
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri("/api/generate")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let allow = response
            .headers()
            .get(header::ALLOW)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(allow.contains("POST"), "Allow header was `{allow}`");
    }

    #[tokio::test]
    async fn generate_passthrough_failure_returns_error_and_timestamp() {
        // MockBackend has no raw passthrough, matching a subprocess deployment.
        let router = test_router(vec![]);
        let (status, body) = request(
            &router,
            Method::POST,
            "/api/generate",
            None,
            Some(serde_json::json!({"prompt": "hi"})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("passthrough"));
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn email_requires_action_and_text() {
        let router = test_router(vec![]);
        let (status, body) = request(
            &router,
            Method::POST,
            "/api/email",
            None,
            Some(serde_json::json!({"text": "hello"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["result"], "Action and text are required");
    }

    #[tokio::test]
    async fn anonymous_email_turn_returns_result_and_persists_nothing() {
        let router = test_router(vec!["Dear team, the roadmap is attached."]);
        let (status, body) = request(
            &router,
            Method::POST,
            "/api/email",
            None,
            Some(serde_json::json!({"action": "write", "text": "share the roadmap"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"], "Dear team, the roadmap is attached.");
        assert!(body.get("chatId").is_none());

        // The durable store saw nothing: a fresh session lists zero chats.
        let token = signup_and_login(&router, "observer@example.com").await;
        let (_, chats) = request(
            &router,
            Method::GET,
            "/api/chats?type=write",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(chats["chats"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn email_reply_without_previous_content_is_400() {
        let router = test_router(vec![]);
        let (status, body) = request(
            &router,
            Method::POST,
            "/api/email",
            None,
            Some(serde_json::json!({"action": "reply", "text": "say thanks"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["result"].as_str().unwrap().contains("previous email"));
    }

    #[tokio::test]
    async fn email_backend_failure_is_500_with_error_result() {
        let store = Arc::new(MemoryChatStore::new());
        let backend = Arc::new(MockBackend::new());
        backend.push_failure("model not loaded");
        let router = build_router(AppState::new(
            store.clone(),
            store,
            backend,
            AuthKeys::new(Some(SECRET.to_string()), 3600),
        ));

        let (status, body) = request(
            &router,
            Method::POST,
            "/api/email",
            None,
            Some(serde_json::json!({"action": "write", "text": "anything"})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let result = body["result"].as_str().unwrap();
        assert!(result.starts_with("Error:"), "got `{result}`");
        assert!(result.contains("model not loaded"));
    }

    #[tokio::test]
    async fn chat_routes_require_a_session() {
        let router = test_router(vec![]);
        for (method, uri) in [
            (Method::GET, "/api/chats?type=write"),
            (Method::GET, "/api/chats/some-id"),
            (Method::DELETE, "/api/chats/some-id"),
        ] {
            let (status, _) = request(&router, method.clone(), uri, None, None).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{method} {uri}");
        }

        let (status, _) = request(
            &router,
            Method::POST,
            "/api/chats",
            Some("not-a-valid-token"),
            Some(serde_json::json!({"type": "write"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn chat_crud_flow_over_http() {
        let router = test_router(vec![]);
        let token = signup_and_login(&router, "writer@example.com").await;

        // Create.
        let (status, chat) = request(
            &router,
            Method::POST,
            "/api/chats",
            Some(&token),
            Some(serde_json::json!({"type": "write", "title": "Launch email", "language": "de"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(chat["title"], "Launch email");
        assert_eq!(chat["language"], "de");
        let chat_id = chat["id"].as_str().unwrap().to_string();

        // List is scoped by kind.
        let (_, listed) = request(
            &router,
            Method::GET,
            "/api/chats?type=write",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(listed["chats"].as_array().unwrap().len(), 1);
        let (_, listed) = request(
            &router,
            Method::GET,
            "/api/chats?type=reply",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(listed["chats"].as_array().unwrap().len(), 0);

        // Patch tone only; language is untouched.
        let (status, patched) = request(
            &router,
            Method::PATCH,
            &format!("/api/chats/{chat_id}"),
            Some(&token),
            Some(serde_json::json!({"tone": "casual"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(patched["tone"], "casual");
        assert_eq!(patched["language"], "de");

        // Append a message.
        let (status, with_message) = request(
            &router,
            Method::POST,
            &format!("/api/chats/{chat_id}/messages"),
            Some(&token),
            Some(serde_json::json!({"role": "user", "content": "draft the launch email"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(with_message["messages"].as_array().unwrap().len(), 1);

        // Delete, then the chat is gone.
        let (status, _) = request(
            &router,
            Method::DELETE,
            &format!("/api/chats/{chat_id}"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = request(
            &router,
            Method::GET,
            &format!("/api/chats/{chat_id}"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn foreign_chats_read_as_missing() {
        let router = test_router(vec![]);
        let owner_token = signup_and_login(&router, "owner@example.com").await;
        let (_, chat) = request(
            &router,
            Method::POST,
            "/api/chats",
            Some(&owner_token),
            Some(serde_json::json!({"type": "write"})),
        )
        .await;
        let chat_id = chat["id"].as_str().unwrap();

        let other_token = signup_and_login(&router, "other@example.com").await;
        let (status, _) = request(
            &router,
            Method::GET,
            &format!("/api/chats/{chat_id}"),
            Some(&other_token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn authenticated_email_turn_lands_in_the_callers_chats() {
        let router = test_router(vec!["Hallo zusammen, ..."]);
        let token = signup_and_login(&router, "du@example.com").await;

        let (status, body) = request(
            &router,
            Method::POST,
            "/api/email",
            Some(&token),
            Some(serde_json::json!({
                "action": "write",
                "text": "invite the team to the offsite",
                "language": "de"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"], "Hallo zusammen, ...");
        let chat_id = body["chatId"].as_str().unwrap();

        let (_, chat) = request(
            &router,
            Method::GET,
            &format!("/api/chats/{chat_id}"),
            Some(&token),
            None,
        )
        .await;
        let messages = chat["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(messages[1]["role"], "assistant");
        assert_eq!(chat["language"], "de");
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_401() {
        let router = test_router(vec![]);
        signup_and_login(&router, "someone@example.com").await;

        let (status, _) = request(
            &router,
            Method::POST,
            "/api/auth/login",
            None,
            Some(serde_json::json!({"email": "someone@example.com", "password": "wrong"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn invalid_type_param_is_400() {
        let router = test_router(vec![]);
        let token = signup_and_login(&router, "typo@example.com").await;
        let (status, _) = request(
            &router,
            Method::GET,
            "/api/chats?type=compose",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = request(&router, Method::GET, "/api/chats", Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
