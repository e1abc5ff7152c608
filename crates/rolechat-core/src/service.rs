//! Chat service: the request-level orchestrator.
//!
//! Every mutation follows the same discipline: acquire the per-user lock,
//! load the collection, mutate a copy of that user's record in memory,
//! and commit once at the end. A failure anywhere before the commit
//! discards the copy, so requests are atomic at request granularity -- a
//! failed send never persists the user's turn without the assistant's.
//!
//! Two locks are involved:
//!
//! - The per-user lock serializes load -> mutate -> commit for one
//!   username. Without it, two concurrent sends for the same user would
//!   each commit from a stale snapshot and the last writer would silently
//!   drop the other's turns. It is held across the completion call, so a
//!   user's own sends are strictly ordered. Different usernames proceed
//!   in parallel.
//! - The commit lock covers only the reload-merge-save step. Persistence
//!   rewrites the whole collection as one document, so the commit path
//!   re-loads the latest state and splices in just the locked user's
//!   record; otherwise parallel writers for different users would clobber
//!   each other's records.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use rolechat_types::character::CharacterProfile;
use rolechat_types::chat::{CharacterTranscript, ChatMessage, UserChatRecord};
use rolechat_types::completion::{CompletionRequest, GenerationOptions};
use rolechat_types::config::ChatConfig;
use rolechat_types::error::ChatError;

use crate::completion::CompletionProvider;
use crate::repository::ChatStoreRepository;
use crate::{persona, postprocess, transcript, window};

/// Orchestrates chat operations over a store repository and a completion
/// provider.
///
/// Generic over both seams so `rolechat-core` never depends on
/// `rolechat-infra`, and tests can substitute in-memory fakes.
pub struct ChatService<R: ChatStoreRepository, P: CompletionProvider> {
    repo: R,
    provider: P,
    generation: GenerationOptions,
    max_context_messages: usize,
    /// Per-username serialization. Entries are created lazily and never
    /// removed; the table is bounded by the user population.
    user_locks: DashMap<String, Arc<Mutex<()>>>,
    /// Guards the reload-merge-save commit step.
    commit_lock: Mutex<()>,
}

impl<R: ChatStoreRepository, P: CompletionProvider> ChatService<R, P> {
    pub fn new(
        repo: R,
        provider: P,
        chat_config: ChatConfig,
        generation: GenerationOptions,
    ) -> Self {
        Self {
            repo,
            provider,
            generation,
            max_context_messages: chat_config.max_context_messages,
            user_locks: DashMap::new(),
            commit_lock: Mutex::new(()),
        }
    }

    fn user_lock(&self, username: &str) -> Arc<Mutex<()>> {
        self.user_locks
            .entry(username.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Persist one user's record: reload the latest collection, replace
    /// (or append) that record, save the whole document.
    ///
    /// Caller must hold the user's lock; the commit lock taken here only
    /// keeps writers for *different* users from saving over each other.
    async fn commit_user_record(
        &self,
        username: &str,
        record: UserChatRecord,
    ) -> Result<(), ChatError> {
        let _commit = self.commit_lock.lock().await;
        let mut latest = self.repo.load().await?;
        match latest.find_user_mut(username) {
            Some(existing) => *existing = record,
            None => latest.records.push(record),
        }
        self.repo.save(&latest).await?;
        Ok(())
    }

    /// All known usernames, in collection order. Empty on a missing store.
    pub async fn list_users(&self) -> Result<Vec<String>, ChatError> {
        let collection = self.repo.load().await?;
        Ok(collection.usernames())
    }

    /// Create a character for a user, or re-render its persona.
    ///
    /// The user's record is created lazily on first character creation.
    pub async fn create_or_update_character(
        &self,
        username: &str,
        profile: &CharacterProfile,
    ) -> Result<(), ChatError> {
        let lock = self.user_lock(username);
        let _guard = lock.lock().await;

        let collection = self.repo.load().await?;
        let mut record = collection
            .find_user(username)
            .cloned()
            .unwrap_or_else(|| UserChatRecord::new(username));
        persona::create_or_update_character(&mut record, profile);
        self.commit_user_record(username, record).await?;

        info!(username, character = %profile.name, "character created or updated");
        Ok(())
    }

    /// The whole record for one user.
    pub async fn get_user_record(&self, username: &str) -> Result<UserChatRecord, ChatError> {
        let collection = self.repo.load().await?;
        collection
            .find_user(username)
            .cloned()
            .ok_or_else(|| ChatError::UserNotFound(username.to_string()))
    }

    /// One character's transcript.
    pub async fn get_transcript(
        &self,
        username: &str,
        character_name: &str,
    ) -> Result<CharacterTranscript, ChatError> {
        let record = self.get_user_record(username).await?;
        record
            .transcript(character_name)
            .cloned()
            .ok_or_else(|| ChatError::CharacterNotFound(character_name.to_string()))
    }

    /// Load a user's record for mutation, failing if the user or the
    /// character has no history yet.
    async fn record_for_mutation(
        &self,
        username: &str,
        character_name: &str,
    ) -> Result<UserChatRecord, ChatError> {
        let record = self.get_user_record(username).await?;
        if record.transcript(character_name).is_none() {
            return Err(ChatError::CharacterNotFound(character_name.to_string()));
        }
        Ok(record)
    }

    /// Append a user turn, complete, post-process, append the assistant
    /// turn, persist. Returns the cleaned reply text.
    ///
    /// The per-user lock is held across the completion call: a user's own
    /// sends are serialized, which is also what keeps the whole pipeline
    /// a single load -> mutate -> commit under one guard.
    pub async fn send_message(
        &self,
        username: &str,
        character_name: &str,
        text: &str,
    ) -> Result<String, ChatError> {
        let lock = self.user_lock(username);
        let _guard = lock.lock().await;

        let mut record = self.record_for_mutation(username, character_name).await?;
        let transcript_ref = record
            .transcript_mut(character_name)
            .ok_or_else(|| ChatError::CharacterNotFound(character_name.to_string()))?;

        transcript::append(transcript_ref, ChatMessage::user(text));
        let messages = window::build_window(&transcript_ref.messages, self.max_context_messages);

        debug!(
            username,
            character = character_name,
            window_len = messages.len(),
            "invoking completion"
        );
        let request = CompletionRequest {
            messages,
            options: self.generation.clone(),
        };
        let raw = self.provider.complete(&request).await?;

        let cleaned = postprocess::dedupe_sentences(raw.trim());
        if cleaned.is_empty() {
            warn!(
                username,
                character = character_name,
                "completion produced no usable content"
            );
            return Err(ChatError::EmptyReply);
        }

        transcript::append(transcript_ref, ChatMessage::assistant(cleaned.clone()));
        self.commit_user_record(username, record).await?;

        info!(
            username,
            character = character_name,
            reply_len = cleaned.len(),
            "message exchange persisted"
        );
        Ok(cleaned)
    }

    /// Delete every message matching `target`. Returns the match count
    /// (zero matches is a silent no-op, per the historical contract).
    pub async fn delete_message(
        &self,
        username: &str,
        character_name: &str,
        target: &ChatMessage,
    ) -> Result<usize, ChatError> {
        let lock = self.user_lock(username);
        let _guard = lock.lock().await;

        let mut record = self.record_for_mutation(username, character_name).await?;
        let transcript_ref = record
            .transcript_mut(character_name)
            .ok_or_else(|| ChatError::CharacterNotFound(character_name.to_string()))?;

        let removed = transcript::delete_matching(transcript_ref, target);
        self.commit_user_record(username, record).await?;

        debug!(username, character = character_name, removed, "messages deleted");
        Ok(removed)
    }

    /// Replace the content of the first message matching `old`.
    pub async fn edit_message(
        &self,
        username: &str,
        character_name: &str,
        old: &ChatMessage,
        new_content: &str,
    ) -> Result<(), ChatError> {
        let lock = self.user_lock(username);
        let _guard = lock.lock().await;

        let mut record = self.record_for_mutation(username, character_name).await?;
        let transcript_ref = record
            .transcript_mut(character_name)
            .ok_or_else(|| ChatError::CharacterNotFound(character_name.to_string()))?;

        transcript::edit_first(transcript_ref, old, new_content)?;
        self.commit_user_record(username, record).await?;

        debug!(username, character = character_name, "message edited");
        Ok(())
    }
}
