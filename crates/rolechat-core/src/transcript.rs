//! Transcript editing: append, delete, edit.
//!
//! Matching is exact `(role, content)` equality with no normalization.
//! Delete removes every match; edit replaces the first match only. The
//! asymmetry is deliberate and covered by tests; do not unify the two
//! without a product decision.

use rolechat_types::chat::{CharacterTranscript, ChatMessage};
use rolechat_types::error::ChatError;

/// Append a message to the end of the transcript. Always succeeds.
pub fn append(transcript: &mut CharacterTranscript, message: ChatMessage) {
    transcript.messages.push(message);
}

/// Remove every message whose `(role, content)` equals `target`.
///
/// Zero matches is a silent no-op; the match count is returned so
/// callers and tests can still observe what happened.
pub fn delete_matching(transcript: &mut CharacterTranscript, target: &ChatMessage) -> usize {
    let before = transcript.messages.len();
    transcript.messages.retain(|m| m != target);
    before - transcript.messages.len()
}

/// Replace the content of the first message matching `old`.
///
/// Fails with `ChatError::MessageNotFound` when no message matches.
pub fn edit_first(
    transcript: &mut CharacterTranscript,
    old: &ChatMessage,
    new_content: &str,
) -> Result<(), ChatError> {
    match transcript.messages.iter_mut().find(|m| *m == old) {
        Some(message) => {
            message.content = new_content.to_string();
            Ok(())
        }
        None => Err(ChatError::MessageNotFound),
    }
}
