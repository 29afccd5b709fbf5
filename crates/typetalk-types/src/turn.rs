//! Conversation turn types.
//!
//! A turn is one rendered message: either the user's input or the bot's
//! reply. Bot replies start life as a pending placeholder which is swapped
//! for a resolved turn once the classifier answers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::personality::PersonalityInfo;

/// Unique identifier for a turn, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnId(pub Uuid);

impl TurnId {
    /// Create a new TurnId using UUID v7.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for TurnId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TurnId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Bot,
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnRole::User => write!(f, "user"),
            TurnRole::Bot => write!(f, "bot"),
        }
    }
}

impl FromStr for TurnRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(TurnRole::User),
            "bot" => Ok(TurnRole::Bot),
            other => Err(format!("invalid turn role: '{other}'")),
        }
    }
}

/// A single rendered message in the conversation.
///
/// Turns are immutable once created. Resolving a pending placeholder means
/// removing it and appending a fresh turn, never editing the placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub id: TurnId,
    pub role: TurnRole,
    pub text: String,
    /// Personality code detected by the classifier (resolved bot turns only).
    pub label: Option<String>,
    pub pending: bool,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    /// A turn holding the user's (already trimmed) input.
    pub fn user(text: impl Into<String>) -> Self {
        Self::build(TurnRole::User, text.into(), None, false)
    }

    /// A placeholder bot turn shown while a request is in flight.
    pub fn pending_bot() -> Self {
        Self::build(TurnRole::Bot, String::new(), None, true)
    }

    /// A resolved bot turn, optionally labelled with a personality code.
    pub fn bot(text: impl Into<String>, label: Option<String>) -> Self {
        Self::build(TurnRole::Bot, text.into(), label, false)
    }

    fn build(role: TurnRole, text: String, label: Option<String>, pending: bool) -> Self {
        Self {
            id: TurnId::new(),
            role,
            text,
            label,
            pending,
            created_at: Utc::now(),
        }
    }

    /// Reference data for this turn's label, if it carries one.
    pub fn personality(&self) -> Option<PersonalityInfo> {
        self.label.as_deref().map(PersonalityInfo::lookup)
    }
}
