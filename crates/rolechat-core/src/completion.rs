//! CompletionProvider trait definition.
//!
//! The completion capability is a black box: a bounded message window and
//! fixed generation options go in, generated text or a structured failure
//! comes out. Implementations live in `rolechat-infra` (e.g.
//! `LlamaServerProvider`); tests use in-process fakes.

use rolechat_types::completion::CompletionRequest;
use rolechat_types::error::CompletionError;

/// Trait for completion backends.
///
/// Built once at startup and injected into the chat service; never
/// accessed as ambient global state.
pub trait CompletionProvider: Send + Sync {
    /// Human-readable backend name (e.g. "llama-server").
    fn name(&self) -> &str;

    /// Send a completion request and return the raw generated text.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<String, CompletionError>> + Send;
}
