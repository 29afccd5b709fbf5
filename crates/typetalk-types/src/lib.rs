//! Shared domain types for typetalk.
//!
//! Conversation turns, the personality reference table, the classifier wire
//! format, client configuration, and their error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod classify;
pub mod config;
pub mod error;
pub mod personality;
pub mod turn;
