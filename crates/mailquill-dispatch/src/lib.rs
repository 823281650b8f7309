// SPDX-FileCopyrightText: 2026 Mailquill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-turn action dispatcher.
//!
//! Orchestrates one user turn: validates the request, resolves previous
//! email content, builds the prompt, calls the generation backend, and
//! appends both turns to the chat store. Each turn walks the states
//! `Idle -> Validating -> Building -> Generating -> Persisting -> Idle`,
//! with `Errored` reachable from `Validating`, `Generating`, and
//! `Persisting`.
//!
//! The user message is persisted before the backend call, so a failed
//! generation never loses the user's turn. Chat ids are threaded explicitly
//! through every call; there is no ambient "current chat". Cancellation is
//! advisory only: a caller abandoning the turn does not abort an in-flight
//! backend call.

use std::sync::Arc;

use tracing::{debug, error, warn};

use mailquill_core::{
    ActionKind, Chat, ChatId, ChatPatch, ChatStore, GenerationBackend, MailquillError, Role, Tone,
};
use mailquill_prompt::build_prompt;

/// States a single turn moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    /// No turn in flight.
    Idle,
    /// Checking request shape and resolving previous content.
    Validating,
    /// Building the prompt.
    Building,
    /// User turn persisted; waiting on the backend.
    Generating,
    /// Appending the assistant result.
    Persisting,
    /// Turn failed; the error carries the cause.
    Errored,
}

impl std::fmt::Display for TurnState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TurnState::Idle => write!(f, "idle"),
            TurnState::Validating => write!(f, "validating"),
            TurnState::Building => write!(f, "building"),
            TurnState::Generating => write!(f, "generating"),
            TurnState::Persisting => write!(f, "persisting"),
            TurnState::Errored => write!(f, "errored"),
        }
    }
}

/// One user turn, as submitted by the caller.
#[derive(Debug, Clone)]
pub struct TurnRequest {
    pub action: ActionKind,
    pub text: String,
    /// Overrides the chat's stored tone for this turn when given.
    pub tone: Option<Tone>,
    /// Overrides the chat's stored language for this turn when given.
    pub language: Option<String>,
    /// Explicit email body for reply/enhance/summarize.
    pub previous_email: Option<String>,
    /// Target chat. `None` targets the active chat of the action kind,
    /// creating one implicitly if none is selected.
    pub chat_id: Option<ChatId>,
}

/// Result of a successfully generated turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// Chat the turn was recorded in.
    pub chat_id: ChatId,
    /// Generated assistant text.
    pub reply: String,
    /// Set when the assistant message could not be persisted after a
    /// successful generation. The reply is still returned; the write is not
    /// retried.
    pub persistence_warning: Option<String>,
}

/// Orchestrates turns against one chat store and one generation backend.
pub struct Dispatcher {
    store: Arc<dyn ChatStore>,
    backend: Arc<dyn GenerationBackend>,
}

impl Dispatcher {
    pub fn new(store: Arc<dyn ChatStore>, backend: Arc<dyn GenerationBackend>) -> Self {
        Self { store, backend }
    }

    /// Runs one turn for `owner`.
    ///
    /// Validation failures are reported before any side effect: no chat is
    /// created, no message persisted, no backend call made.
    pub async fn dispatch(
        &self,
        owner: &str,
        request: TurnRequest,
    ) -> Result<TurnOutcome, MailquillError> {
        let mut state = TurnState::Validating;
        debug!(action = %request.action, %state, "turn started");

        // --- Validating ---
        let text = request.text.trim();
        if text.is_empty() {
            state = TurnState::Errored;
            debug!(%state, "empty text");
            return Err(MailquillError::Validation(
                "text must not be empty".to_string(),
            ));
        }

        // Resolve the target chat read-only; implicit creation waits until
        // validation has passed.
        let target: Option<Chat> = match &request.chat_id {
            Some(id) => Some(self.store.get_chat(owner, id).await?),
            None => match self.store.active_chat(owner, request.action).await? {
                Some(id) => Some(self.store.get_chat(owner, &id).await?),
                None => None,
            },
        };

        let previous_email = resolve_previous_email(&request, target.as_ref())?;

        // --- Building ---
        state = TurnState::Building;
        let tone = request
            .tone
            .or_else(|| target.as_ref().map(|c| c.tone))
            .unwrap_or_default();
        let language = request
            .language
            .clone()
            .or_else(|| target.as_ref().map(|c| c.language.clone()))
            .unwrap_or_else(|| "en".to_string());
        let prompt = build_prompt(
            request.action,
            text,
            tone,
            &language,
            previous_email.as_deref(),
        );
        debug!(%state, prompt_len = prompt.len(), "prompt built");

        // --- Generating ---
        state = TurnState::Generating;
        debug!(%state, backend = self.backend.name(), "recording user turn before backend call");
        let chat_id = match target {
            Some(chat) => {
                if request.chat_id.is_some() {
                    // Dispatching against an explicit chat selects it.
                    self.store.select_chat(owner, &chat.id).await?;
                }
                chat.id
            }
            None => {
                let chat = self
                    .store
                    .create_chat(owner, &title_from_text(text), request.action)
                    .await?;
                if request.tone.is_some() || request.language.is_some() {
                    // Keep the implicit chat's preferences in sync with the
                    // turn that created it.
                    self.store
                        .patch_chat(
                            owner,
                            &chat.id,
                            ChatPatch {
                                tone: request.tone,
                                language: request.language.clone(),
                            },
                        )
                        .await?;
                }
                debug!(chat_id = %chat.id, "chat created implicitly");
                chat.id
            }
        };

        self.store
            .append_message(owner, &chat_id, Role::User, text)
            .await?;

        let reply = match self.backend.generate(&prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                state = TurnState::Errored;
                warn!(%state, chat_id = %chat_id, error = %e, "generation failed; user turn kept");
                return Err(e);
            }
        };

        // --- Persisting ---
        state = TurnState::Persisting;
        debug!(%state, chat_id = %chat_id, "recording assistant turn");
        let persistence_warning = match self
            .store
            .append_message(owner, &chat_id, Role::Assistant, &reply)
            .await
        {
            Ok(_) => None,
            Err(e) => {
                // The generated text is still returned; the write is not
                // retried.
                error!(chat_id = %chat_id, error = %e, "assistant message not persisted");
                Some(e.to_string())
            }
        };

        state = TurnState::Idle;
        debug!(%state, chat_id = %chat_id, "turn complete");

        Ok(TurnOutcome {
            chat_id,
            reply,
            persistence_warning,
        })
    }
}

/// Resolution order: explicit previous email, else the last assistant
/// message of the target chat. Actions that operate on an existing email
/// fail validation when neither exists.
fn resolve_previous_email(
    request: &TurnRequest,
    target: Option<&Chat>,
) -> Result<Option<String>, MailquillError> {
    let explicit = request
        .previous_email
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty());
    if let Some(previous) = explicit {
        return Ok(Some(previous.to_string()));
    }

    let from_history = target
        .and_then(|chat| chat.last_assistant_reply())
        .map(str::to_string);
    if from_history.is_some() {
        return Ok(from_history);
    }

    if request.action.requires_previous_email() {
        return Err(MailquillError::Validation(format!(
            "action `{}` requires previous email content",
            request.action
        )));
    }
    Ok(None)
}

/// Titles an implicitly created chat from the leading words of the input.
fn title_from_text(text: &str) -> String {
    let mut title: String = text.chars().take(40).collect();
    if text.chars().count() > 40 {
        title.push('…');
    }
    title
}
