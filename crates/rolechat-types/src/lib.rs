//! Shared domain types for Rolechat.
//!
//! This crate has no business logic: it defines the chat data model, the
//! character profile input shape, completion request types, the error
//! taxonomy, and configuration. Logic lives in `rolechat-core`.

pub mod character;
pub mod chat;
pub mod completion;
pub mod config;
pub mod error;
