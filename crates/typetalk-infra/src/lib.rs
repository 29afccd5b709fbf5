//! Infrastructure implementations for typetalk.
//!
//! Provides the concrete [`http::HttpClassifier`] transport and the
//! configuration file loader used by the CLI.

pub mod config;
pub mod http;
