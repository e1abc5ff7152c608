//! Business logic for Rolechat.
//!
//! Defines the seams (chat-store repository, completion provider, token
//! verifier) as traits implemented in `rolechat-infra`, and the logic
//! built on them: transcript editing, persona rendering, context-window
//! construction, reply post-processing, and the chat service that
//! orchestrates a request under per-user locking.

pub mod auth;
pub mod completion;
pub mod persona;
pub mod postprocess;
pub mod repository;
pub mod service;
pub mod transcript;
pub mod window;
