// SPDX-FileCopyrightText: 2026 Mailquill Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across the Mailquill workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for a chat.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatId(pub String);

impl std::fmt::Display for ChatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the user is asking the assistant to do with an email.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Write,
    Summarize,
    Enhance,
    Reply,
}

impl ActionKind {
    /// Whether this action operates on an existing email body.
    pub fn requires_previous_email(self) -> bool {
        !matches!(self, ActionKind::Write)
    }
}

/// Register the generated email should be written in.
///
/// Unrecognized tone strings deserialize to [`Tone::Professional`]; a missing
/// tone defaults the same way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Professional,
    Friendly,
    Casual,
    Custom,
}

impl<'de> Deserialize<'de> for Tone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or_default())
    }
}

/// Author of a chat message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single turn in a chat. Immutable once created; owned by its parent chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

/// A titled conversation scoped to one action kind, holding tone/language
/// preferences and an append-only message history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: ChatId,
    pub title: String,
    pub kind: ActionKind,
    pub tone: Tone,
    pub language: String,
    /// Insertion order is conversation order.
    pub messages: Vec<Message>,
    pub created_at: String,
    pub updated_at: String,
}

impl Chat {
    /// Content of the most recent assistant message, if any.
    pub fn last_assistant_reply(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::Assistant)
            .map(|m| m.content.as_str())
    }
}

/// Partial update of a chat's preferences. Omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatPatch {
    #[serde(default)]
    pub tone: Option<Tone>,
    #[serde(default)]
    pub language: Option<String>,
}

/// A registered account for credential auth. Storage-level only; never
/// serialized to API responses as-is.
#[derive(Clone)]
pub struct User {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"[redacted]")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn action_kind_round_trips_through_display_and_fromstr() {
        for kind in [
            ActionKind::Write,
            ActionKind::Summarize,
            ActionKind::Enhance,
            ActionKind::Reply,
        ] {
            let s = kind.to_string();
            assert_eq!(ActionKind::from_str(&s).unwrap(), kind);
        }
    }

    #[test]
    fn only_write_skips_previous_email() {
        assert!(!ActionKind::Write.requires_previous_email());
        assert!(ActionKind::Summarize.requires_previous_email());
        assert!(ActionKind::Enhance.requires_previous_email());
        assert!(ActionKind::Reply.requires_previous_email());
    }

    #[test]
    fn unknown_tone_deserializes_to_professional() {
        let tone: Tone = serde_json::from_str("\"sarcastic\"").unwrap();
        assert_eq!(tone, Tone::Professional);

        let tone: Tone = serde_json::from_str("\"friendly\"").unwrap();
        assert_eq!(tone, Tone::Friendly);
    }

    #[test]
    fn tone_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Tone::Casual).unwrap(), "\"casual\"");
    }

    #[test]
    fn last_assistant_reply_finds_most_recent() {
        let mut chat = Chat {
            id: ChatId("c1".into()),
            title: "t".into(),
            kind: ActionKind::Write,
            tone: Tone::Professional,
            language: "en".into(),
            messages: vec![],
            created_at: "2026-01-01T00:00:00Z".into(),
            updated_at: "2026-01-01T00:00:00Z".into(),
        };
        assert!(chat.last_assistant_reply().is_none());

        for (i, (role, content)) in [
            (Role::User, "first"),
            (Role::Assistant, "draft one"),
            (Role::User, "shorter please"),
            (Role::Assistant, "draft two"),
        ]
        .into_iter()
        .enumerate()
        {
            chat.messages.push(Message {
                id: format!("m{i}"),
                role,
                content: content.into(),
                created_at: format!("2026-01-01T00:00:0{i}Z"),
            });
        }
        assert_eq!(chat.last_assistant_reply(), Some("draft two"));
    }
}
