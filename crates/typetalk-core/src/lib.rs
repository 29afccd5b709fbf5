//! Conversation logic and port trait definitions for typetalk.
//!
//! This crate defines the "ports" ([`presenter::Presenter`] and
//! [`transport::ClassifierTransport`]) that the UI and infrastructure layers
//! implement, plus the [`controller::TurnController`] that drives a single
//! message exchange. It depends only on `typetalk-types`.

pub mod controller;
pub mod presenter;
pub mod session;
pub mod transport;
