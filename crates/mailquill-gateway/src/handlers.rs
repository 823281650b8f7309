// SPDX-FileCopyrightText: 2026 Mailquill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the Mailquill REST API.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use mailquill_core::{ActionKind, ChatId, ChatPatch, HealthStatus, MailquillError, Role, Tone};
use mailquill_dispatch::{Dispatcher, TurnRequest};
use mailquill_storage::MemoryChatStore;

use crate::auth::{self, Identity};
use crate::server::AppState;

/// Error response body for chat/auth routes.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Request body for POST /api/email.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequest {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub tone: Option<Tone>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub previous_email: Option<String>,
    #[serde(default)]
    pub chat_id: Option<String>,
}

/// Response body for POST /api/email.
#[derive(Debug, Serialize)]
pub struct EmailResponse {
    pub result: String,
    /// Chat the turn was recorded in; present only for authenticated turns.
    #[serde(rename = "chatId", skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<String>,
}

/// Request body for POST /api/chats.
#[derive(Debug, Deserialize)]
pub struct CreateChatRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub tone: Option<Tone>,
    #[serde(default)]
    pub language: Option<String>,
}

/// Query string for GET /api/chats.
#[derive(Debug, Deserialize)]
pub struct ChatsQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Response body for GET /api/chats.
#[derive(Debug, Serialize)]
pub struct ChatListResponse {
    pub chats: Vec<mailquill_core::Chat>,
}

/// Request body for POST /api/chats/{id}/messages.
#[derive(Debug, Deserialize)]
pub struct AppendMessageRequest {
    pub role: Role,
    pub content: String,
}

/// Request body for the signup/login routes.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Response body for POST /api/auth/signup.
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub id: String,
    pub email: String,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub backend: String,
}

/// POST /api/generate
///
/// Legacy passthrough: the body is forwarded verbatim to the backend's
/// generate endpoint and the backend JSON is returned as-is.
pub async fn post_generate(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    match state.backend.forward_raw(body).await {
        Ok(value) => (StatusCode::OK, Json(value)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "generate passthrough failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": e.to_string(),
                    "timestamp": chrono::Utc::now().to_rfc3339(),
                })),
            )
                .into_response()
        }
    }
}

/// POST /api/email
///
/// One email-assistant turn. With a valid session token the turn runs
/// against the caller's durable chats; without one it runs against a
/// throwaway in-memory store that does not outlive the request.
pub async fn post_email(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<EmailRequest>,
) -> Response {
    let (Some(action_raw), Some(text)) = (body.action.as_deref(), body.text.clone()) else {
        return email_error(StatusCode::BAD_REQUEST, "Action and text are required");
    };
    let Ok(action) = action_raw.parse::<ActionKind>() else {
        return email_error(
            StatusCode::BAD_REQUEST,
            &format!("unknown action `{action_raw}`"),
        );
    };

    let identity = state.auth.identity_from_headers(&headers);
    let turn = TurnRequest {
        action,
        text,
        tone: body.tone,
        language: body.language.clone(),
        previous_email: body.previous_email.clone(),
        chat_id: body.chat_id.clone().map(ChatId),
    };

    let result = match &identity {
        Some(identity) => state.dispatcher.dispatch(&identity.user_id, turn).await,
        None => {
            let ephemeral =
                Dispatcher::new(Arc::new(MemoryChatStore::new()), state.backend.clone());
            ephemeral.dispatch("anonymous", turn).await
        }
    };

    match result {
        Ok(outcome) => {
            if let Some(warning) = &outcome.persistence_warning {
                tracing::warn!(chat_id = %outcome.chat_id, warning = %warning, "reply returned but not persisted");
            }
            let chat_id = identity.is_some().then(|| outcome.chat_id.0.clone());
            (
                StatusCode::OK,
                Json(EmailResponse {
                    result: outcome.reply,
                    chat_id,
                }),
            )
                .into_response()
        }
        Err(MailquillError::Validation(message)) => {
            email_error(StatusCode::BAD_REQUEST, &message)
        }
        Err(MailquillError::NotFound { resource }) => {
            email_error(StatusCode::NOT_FOUND, &format!("Error: {resource} not found"))
        }
        Err(e) => {
            tracing::error!(error = %e, "email action failed");
            email_error(StatusCode::INTERNAL_SERVER_ERROR, &format!("Error: {e}"))
        }
    }
}

fn email_error(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "result": message }))).into_response()
}

/// GET /api/chats?type=<action>
pub async fn get_chats(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<ChatsQuery>,
) -> Response {
    let kind = match parse_kind(query.kind.as_deref()) {
        Ok(kind) => kind,
        Err(response) => return response,
    };
    match state.store.list_chats(&identity.user_id, kind).await {
        Ok(chats) => (StatusCode::OK, Json(ChatListResponse { chats })).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/chats
pub async fn post_chats(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(body): Json<CreateChatRequest>,
) -> Response {
    let kind = match parse_kind(body.kind.as_deref()) {
        Ok(kind) => kind,
        Err(response) => return response,
    };
    let title = body.title.as_deref().unwrap_or("New chat");

    let created = state.store.create_chat(&identity.user_id, title, kind).await;
    let chat = match created {
        Ok(chat) => chat,
        Err(e) => return error_response(e),
    };

    // Apply requested preferences in the same request.
    if body.tone.is_some() || body.language.is_some() {
        let patched = state
            .store
            .patch_chat(
                &identity.user_id,
                &chat.id,
                ChatPatch {
                    tone: body.tone,
                    language: body.language,
                },
            )
            .await;
        return match patched {
            Ok(chat) => (StatusCode::CREATED, Json(chat)).into_response(),
            Err(e) => error_response(e),
        };
    }

    (StatusCode::CREATED, Json(chat)).into_response()
}

/// GET /api/chats/{id}
pub async fn get_chat(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Response {
    match state.store.get_chat(&identity.user_id, &ChatId(id)).await {
        Ok(chat) => (StatusCode::OK, Json(chat)).into_response(),
        Err(e) => error_response(e),
    }
}

/// PATCH /api/chats/{id}
pub async fn patch_chat(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
    Json(patch): Json<ChatPatch>,
) -> Response {
    match state
        .store
        .patch_chat(&identity.user_id, &ChatId(id), patch)
        .await
    {
        Ok(chat) => (StatusCode::OK, Json(chat)).into_response(),
        Err(e) => error_response(e),
    }
}

/// DELETE /api/chats/{id}
pub async fn delete_chat(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Response {
    match state.store.delete_chat(&identity.user_id, &ChatId(id)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/chats/{id}/messages
pub async fn post_message(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
    Json(body): Json<AppendMessageRequest>,
) -> Response {
    if body.content.trim().is_empty() {
        return error_response(MailquillError::Validation(
            "message content must not be empty".to_string(),
        ));
    }
    match state
        .store
        .append_message(&identity.user_id, &ChatId(id), body.role, &body.content)
        .await
    {
        Ok(chat) => (StatusCode::CREATED, Json(chat)).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/auth/signup
pub async fn post_signup(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequest>,
) -> Response {
    let email = body.email.trim();
    if email.is_empty() || !email.contains('@') {
        return error_response(MailquillError::Validation(
            "a valid email address is required".to_string(),
        ));
    }
    if body.password.len() < 8 {
        return error_response(MailquillError::Validation(
            "password must be at least 8 characters".to_string(),
        ));
    }

    let hash = match auth::hash_password(&body.password) {
        Ok(hash) => hash,
        Err(e) => return error_response(e),
    };
    match state.users.create_user(email, &hash).await {
        Ok(user) => (
            StatusCode::CREATED,
            Json(SignupResponse {
                id: user.id,
                email: user.email,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/auth/login
pub async fn post_login(
    State(state): State<AppState>,
    Json(body): Json<CredentialsRequest>,
) -> Response {
    let user = match state.users.find_user(body.email.trim()).await {
        Ok(user) => user,
        Err(e) => return error_response(e),
    };

    let user = match user {
        Some(user) if auth::verify_password(&body.password, &user.password_hash) => user,
        _ => {
            return error_response(MailquillError::Auth(
                "invalid email or password".to_string(),
            ));
        }
    };

    match state.auth.issue(&user.id) {
        Ok(session) => (StatusCode::OK, Json(session)).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /health
pub async fn get_health(State(state): State<AppState>) -> Json<HealthResponse> {
    let status = match state.backend.health_check().await {
        Ok(HealthStatus::Healthy) => "ok",
        Ok(HealthStatus::Degraded(_)) => "degraded",
        Ok(HealthStatus::Unhealthy(_)) | Err(_) => "unhealthy",
    };
    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.started_at.elapsed().as_secs(),
        backend: state.backend.name().to_string(),
    })
}

fn parse_kind(raw: Option<&str>) -> Result<ActionKind, Response> {
    let Some(raw) = raw else {
        return Err(error_response(MailquillError::Validation(
            "query parameter `type` is required".to_string(),
        )));
    };
    raw.parse().map_err(|_| {
        error_response(MailquillError::Validation(format!(
            "unknown action kind `{raw}`"
        )))
    })
}

/// Maps error kinds to status codes: validation 400, not-found 404,
/// auth 401, everything else 500.
pub(crate) fn error_response(err: MailquillError) -> Response {
    let status = match &err {
        MailquillError::Validation(_) => StatusCode::BAD_REQUEST,
        MailquillError::NotFound { .. } => StatusCode::NOT_FOUND,
        MailquillError::Auth(_) => StatusCode::UNAUTHORIZED,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(error = %err, "request failed");
    }
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_request_accepts_camel_case_fields() {
        let json = r#"{
            "action": "reply",
            "text": "accept the invite",
            "tone": "friendly",
            "language": "fr",
            "previousEmail": "Dinner on Friday?",
            "chatId": "chat-1"
        }"#;
        let req: EmailRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.action.as_deref(), Some("reply"));
        assert_eq!(req.tone, Some(Tone::Friendly));
        assert_eq!(req.previous_email.as_deref(), Some("Dinner on Friday?"));
        assert_eq!(req.chat_id.as_deref(), Some("chat-1"));
    }

    #[test]
    fn email_request_fields_default_to_none() {
        let req: EmailRequest = serde_json::from_str("{}").unwrap();
        assert!(req.action.is_none());
        assert!(req.text.is_none());
        assert!(req.tone.is_none());
        assert!(req.chat_id.is_none());
    }

    #[test]
    fn email_response_omits_chat_id_when_absent() {
        let json = serde_json::to_string(&EmailResponse {
            result: "ok".to_string(),
            chat_id: None,
        })
        .unwrap();
        assert!(!json.contains("chatId"));

        let json = serde_json::to_string(&EmailResponse {
            result: "ok".to_string(),
            chat_id: Some("c1".to_string()),
        })
        .unwrap();
        assert!(json.contains("\"chatId\":\"c1\""));
    }

    #[test]
    fn create_chat_request_reads_type_key() {
        let req: CreateChatRequest =
            serde_json::from_str(r#"{"title": "t", "type": "write"}"#).unwrap();
        assert_eq!(req.kind.as_deref(), Some("write"));
    }

    #[test]
    fn health_response_serializes() {
        let json = serde_json::to_string(&HealthResponse {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
            uptime_secs: 42,
            backend: "ollama".to_string(),
        })
        .unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("\"uptime_secs\":42"));
    }
}
