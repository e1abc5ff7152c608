//! End-to-end service scenarios: the create/send/delete flow and the
//! lost-update property under concurrent sends for one user.

use std::sync::Arc;

use tokio::sync::Mutex;

use rolechat_core::completion::CompletionProvider;
use rolechat_core::repository::ChatStoreRepository;
use rolechat_core::service::ChatService;
use rolechat_types::character::CharacterProfile;
use rolechat_types::chat::{ChatCollection, ChatMessage, MessageRole};
use rolechat_types::completion::{CompletionRequest, GenerationOptions};
use rolechat_types::config::ChatConfig;
use rolechat_types::error::{CompletionError, StoreError};

/// In-memory store shared across tasks; load clones, save overwrites.
#[derive(Clone)]
struct SharedMemoryStore {
    collection: Arc<Mutex<ChatCollection>>,
}

impl SharedMemoryStore {
    fn new() -> Self {
        Self {
            collection: Arc::new(Mutex::new(ChatCollection::default())),
        }
    }
}

impl ChatStoreRepository for SharedMemoryStore {
    async fn load(&self) -> Result<ChatCollection, StoreError> {
        Ok(self.collection.lock().await.clone())
    }

    async fn save(&self, collection: &ChatCollection) -> Result<(), StoreError> {
        *self.collection.lock().await = collection.clone();
        Ok(())
    }
}

/// Echoes the last user message back, prefixed, after yielding to the
/// scheduler so concurrent sends actually interleave.
struct EchoProvider;

impl CompletionProvider for EchoProvider {
    fn name(&self) -> &str {
        "echo"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        tokio::task::yield_now().await;
        let last_user = request
            .messages
            .iter()
            .rev()
            .find(|m| m.role == MessageRole::User)
            .map(|m| m.content.clone())
            .unwrap_or_default();
        Ok(format!("you said: {last_user}"))
    }
}

fn nova() -> CharacterProfile {
    CharacterProfile {
        name: "Nova".to_string(),
        background: "explorer".to_string(),
        physical_description: "tall".to_string(),
        mannerisms: "curious".to_string(),
        known_connections: "none".to_string(),
        persona: "Ann".to_string(),
        other: "loves maps".to_string(),
    }
}

fn new_service() -> ChatService<SharedMemoryStore, EchoProvider> {
    ChatService::new(
        SharedMemoryStore::new(),
        EchoProvider,
        ChatConfig::default(),
        GenerationOptions::default(),
    )
}

#[tokio::test]
async fn end_to_end_create_send_delete() {
    let service = new_service();

    service.create_or_update_character("ann", &nova()).await.unwrap();

    let reply = service.send_message("ann", "Nova", "hello").await.unwrap();
    assert!(!reply.is_empty());

    let transcript = service.get_transcript("ann", "Nova").await.unwrap();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript.messages[0].role, MessageRole::System);
    assert_eq!(transcript.messages[1], ChatMessage::user("hello"));
    assert_eq!(transcript.messages[2].role, MessageRole::Assistant);
    assert_eq!(transcript.messages[2].content, reply);

    let removed = service
        .delete_message("ann", "Nova", &ChatMessage::user("hello"))
        .await
        .unwrap();
    assert_eq!(removed, 1);

    let transcript = service.get_transcript("ann", "Nova").await.unwrap();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript.messages[0].role, MessageRole::System);
    assert_eq!(transcript.messages[1].content, reply);
}

#[tokio::test]
async fn concurrent_sends_for_one_user_lose_nothing() {
    const N: usize = 16;

    let service = Arc::new(new_service());
    service.create_or_update_character("ann", &nova()).await.unwrap();

    let mut handles = Vec::new();
    for i in 0..N {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service
                .send_message("ann", "Nova", &format!("message {i}"))
                .await
                .unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let transcript = service.get_transcript("ann", "Nova").await.unwrap();
    // system + N user turns + N assistant turns, none overwritten.
    assert_eq!(transcript.len(), 1 + 2 * N);
    for i in 0..N {
        let expected = ChatMessage::user(format!("message {i}"));
        assert!(
            transcript.messages.contains(&expected),
            "lost update: user message {i} missing"
        );
    }
}

#[tokio::test]
async fn concurrent_sends_for_different_users_are_independent() {
    let service = Arc::new(new_service());
    service.create_or_update_character("ann", &nova()).await.unwrap();
    service.create_or_update_character("bob", &nova()).await.unwrap();

    let a = {
        let service = service.clone();
        tokio::spawn(async move { service.send_message("ann", "Nova", "from ann").await })
    };
    let b = {
        let service = service.clone();
        tokio::spawn(async move { service.send_message("bob", "Nova", "from bob").await })
    };
    a.await.unwrap().unwrap();
    b.await.unwrap().unwrap();

    let ann = service.get_transcript("ann", "Nova").await.unwrap();
    let bob = service.get_transcript("bob", "Nova").await.unwrap();
    assert_eq!(ann.len(), 3);
    assert_eq!(bob.len(), 3);
    assert_eq!(ann.messages[1].content, "from ann");
    assert_eq!(bob.messages[1].content, "from bob");
}
