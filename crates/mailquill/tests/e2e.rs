// SPDX-FileCopyrightText: 2026 Mailquill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end integration tests for the complete Mailquill pipeline.
//!
//! Each test creates an isolated TestHarness with temp SQLite, a mock
//! backend, and a dispatcher. Tests are independent and order-insensitive.

use mailquill_core::{ActionKind, ChatStore, MailquillError, Role, SpeechCapture, Tone};
use mailquill_dispatch::TurnRequest;
use mailquill_test_utils::{MockSpeechCapture, TestHarness, TEST_OWNER};

// ---- Turn-to-reply pipeline ----

#[tokio::test]
async fn write_turn_returns_mock_reply() {
    let harness = TestHarness::builder()
        .with_replies(vec!["Dear Prof. Okafor, ...".to_string()])
        .build()
        .await
        .unwrap();

    let outcome = harness
        .send(ActionKind::Write, "ask about the seminar schedule")
        .await
        .unwrap();
    assert_eq!(outcome.reply, "Dear Prof. Okafor, ...");
}

#[tokio::test]
async fn turn_persists_user_and_assistant_messages() {
    let harness = TestHarness::builder()
        .with_replies(vec!["Persisted reply".to_string()])
        .build()
        .await
        .unwrap();

    harness
        .send(ActionKind::Write, "confirm the venue booking")
        .await
        .unwrap();

    let chats = harness
        .store
        .list_chats(TEST_OWNER, ActionKind::Write)
        .await
        .unwrap();
    assert_eq!(chats.len(), 1);
    assert_eq!(chats[0].messages.len(), 2);
    assert_eq!(chats[0].messages[0].role, Role::User);
    assert_eq!(chats[0].messages[0].content, "confirm the venue booking");
    assert_eq!(chats[0].messages[1].role, Role::Assistant);
    assert_eq!(chats[0].messages[1].content, "Persisted reply");
}

#[tokio::test]
async fn consecutive_turns_accumulate_in_the_active_chat() {
    let harness = TestHarness::builder()
        .with_replies(vec!["First draft".to_string(), "Second draft".to_string()])
        .build()
        .await
        .unwrap();

    let first = harness
        .send(ActionKind::Write, "draft a welcome email")
        .await
        .unwrap();
    let second = harness
        .send(ActionKind::Write, "make it warmer")
        .await
        .unwrap();

    // No chat id was given, so both turns land in the active chat.
    assert_eq!(first.chat_id, second.chat_id);

    let chat = harness
        .store
        .get_chat(TEST_OWNER, &first.chat_id)
        .await
        .unwrap();
    assert_eq!(chat.messages.len(), 4);
    assert_eq!(chat.messages[1].content, "First draft");
    assert_eq!(chat.messages[3].content, "Second draft");
}

// ---- Previous-content resolution ----

#[tokio::test]
async fn enhance_turn_uses_prior_assistant_draft() {
    let harness = TestHarness::builder()
        .with_replies(vec![
            "Draft one".to_string(),
            "Polished draft".to_string(),
        ])
        .build()
        .await
        .unwrap();

    // A write turn leaves assistant history in the active chat; the follow-up
    // enhance turn resolves its previous email from that history.
    harness
        .send(ActionKind::Write, "draft the renewal notice")
        .await
        .unwrap();

    // The enhance scope has no history of its own, so the previous email is
    // supplied explicitly, as the UI does when switching actions.
    let outcome = harness
        .send_request(TurnRequest {
            action: ActionKind::Enhance,
            text: "make it more formal".to_string(),
            tone: Some(Tone::Professional),
            language: None,
            previous_email: Some("Draft one".to_string()),
            chat_id: None,
        })
        .await
        .unwrap();
    assert_eq!(outcome.reply, "Polished draft");

    let prompts = harness.backend.prompts();
    assert!(prompts[1].contains("Here is an existing email"));
    assert!(prompts[1].contains("Draft one"));
}

#[tokio::test]
async fn summarize_without_previous_content_fails_and_persists_nothing() {
    let harness = TestHarness::builder().build().await.unwrap();

    let chat = harness
        .store
        .create_chat(TEST_OWNER, "summaries", ActionKind::Summarize)
        .await
        .unwrap();

    let err = harness
        .send(ActionKind::Summarize, "Summarize: the contract thread")
        .await
        .unwrap_err();
    assert!(matches!(err, MailquillError::Validation(_)));

    let chat = harness.store.get_chat(TEST_OWNER, &chat.id).await.unwrap();
    assert!(chat.messages.is_empty());
    assert!(harness.backend.prompts().is_empty());
}

// ---- Failure handling ----

#[tokio::test]
async fn generation_failure_surfaces_once_and_keeps_user_turn() {
    let harness = TestHarness::builder().build().await.unwrap();
    harness.backend.push_failure("Ollama returned 503");

    let err = harness
        .send(ActionKind::Write, "announce the outage")
        .await
        .unwrap_err();
    assert!(matches!(err, MailquillError::Generation { .. }));
    assert!(err.to_string().contains("503"));

    // Exactly one backend call -- nothing retries.
    assert_eq!(harness.backend.prompts().len(), 1);

    let chats = harness
        .store
        .list_chats(TEST_OWNER, ActionKind::Write)
        .await
        .unwrap();
    assert_eq!(chats.len(), 1);
    assert_eq!(chats[0].messages.len(), 1);
    assert_eq!(chats[0].messages[0].role, Role::User);
}

// ---- Chat lifecycle across the store contract ----

#[tokio::test]
async fn deleting_the_active_chat_promotes_the_most_recent_remaining() {
    let harness = TestHarness::builder().build().await.unwrap();
    let store = harness.chat_store();

    store.create_chat(TEST_OWNER, "a", ActionKind::Write).await.unwrap();
    let b = store.create_chat(TEST_OWNER, "b", ActionKind::Write).await.unwrap();
    let c = store.create_chat(TEST_OWNER, "c", ActionKind::Write).await.unwrap();

    store.delete_chat(TEST_OWNER, &c.id).await.unwrap();
    assert_eq!(
        store.active_chat(TEST_OWNER, ActionKind::Write).await.unwrap(),
        Some(b.id)
    );
}

// ---- Dictation seam ----

#[tokio::test]
async fn dictated_text_drives_a_turn_like_typed_text() {
    let harness = TestHarness::builder()
        .with_replies(vec!["Dear landlord, ...".to_string()])
        .build()
        .await
        .unwrap();

    // The host recognizer delivers partial transcripts; only the final plain
    // text reaches the dispatcher.
    let capture = MockSpeechCapture::scripted(vec![
        "write to the".to_string(),
        "write to the landlord about".to_string(),
        "write to the landlord about the broken heater".to_string(),
    ]);
    let dictated = std::sync::Arc::new(std::sync::Mutex::new(String::new()));
    let sink = dictated.clone();
    let handle = capture
        .start_capture(Box::new(move |text| {
            *sink.lock().unwrap() = text.to_string();
        }))
        .unwrap();
    capture.stop(handle).unwrap();

    let text = dictated.lock().unwrap().clone();
    let outcome = harness.send(ActionKind::Write, &text).await.unwrap();
    assert_eq!(outcome.reply, "Dear landlord, ...");

    let chat = harness
        .store
        .get_chat(TEST_OWNER, &outcome.chat_id)
        .await
        .unwrap();
    assert_eq!(
        chat.messages[0].content,
        "write to the landlord about the broken heater"
    );
}
