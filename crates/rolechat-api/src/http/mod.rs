//! HTTP/REST layer.
//!
//! Axum-based API with bearer-token authentication, an envelope response
//! format, and CORS support.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod router;
