//! Context-window construction for completion calls.

use rolechat_types::chat::ChatMessage;

/// Project the transcript to bare `(role, content)` pairs and keep only
/// the last `max_context_messages` entries.
///
/// Truncation drops the oldest entries first; the leading system message
/// is NOT guaranteed to survive on long conversations. That matches the
/// historical behavior -- if persona retention becomes a requirement,
/// this is the place to pin index 0.
pub fn build_window(messages: &[ChatMessage], max_context_messages: usize) -> Vec<ChatMessage> {
    let start = messages.len().saturating_sub(max_context_messages);
    messages[start..]
        .iter()
        .map(|m| ChatMessage::new(m.role, m.content.clone()))
        .collect()
}
