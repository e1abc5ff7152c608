//! Application state wiring all services together.
//!
//! `ChatService` is generic over its repository and provider traits;
//! AppState pins it to the concrete infra implementations and shares it
//! between the CLI and the REST handlers.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rolechat_core::service::ChatService;
use rolechat_infra::llm::LlamaServerProvider;
use rolechat_infra::resolve_data_dir;
use rolechat_infra::store::accounts::JsonFileAccountStore;
use rolechat_infra::store::chats::JsonFileChatStore;
use rolechat_infra::token::HmacTokenSigner;
use rolechat_types::config::RolechatConfig;

/// The service generics pinned to the infra implementations.
pub type ConcreteChatService = ChatService<JsonFileChatStore, LlamaServerProvider>;

/// Shared application state for CLI commands and REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub accounts: Arc<JsonFileAccountStore>,
    pub tokens: Arc<HmacTokenSigner>,
    pub config: RolechatConfig,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Initialize the application state: load config, wire stores and the
    /// completion client.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_config(&data_dir).await?;

        let chat_store = JsonFileChatStore::in_data_dir(&data_dir);
        let provider = LlamaServerProvider::new(&config.completion)?;
        let chat_service = Arc::new(ChatService::new(
            chat_store,
            provider,
            config.chat.clone(),
            config.completion.generation.clone(),
        ));

        let accounts = Arc::new(JsonFileAccountStore::in_data_dir(&data_dir));
        let tokens = Arc::new(HmacTokenSigner::from_key_file(&data_dir.join("token.key")).await?);

        Ok(Self {
            chat_service,
            accounts,
            tokens,
            config,
            data_dir,
        })
    }
}

/// Read `config.toml` from the data directory. A missing file means
/// defaults; a present-but-invalid file is an error.
async fn load_config(data_dir: &Path) -> anyhow::Result<RolechatConfig> {
    let path = data_dir.join("config.toml");
    match tokio::fs::read_to_string(&path).await {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(RolechatConfig::default()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_config_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = load_config(dir.path()).await.unwrap();
        assert_eq!(config.server.port, 8000);
    }

    #[tokio::test]
    async fn test_config_file_overrides_defaults() {
        let dir = tempdir().unwrap();
        tokio::fs::write(dir.path().join("config.toml"), "[server]\nport = 9001\n")
            .await
            .unwrap();
        let config = load_config(dir.path()).await.unwrap();
        assert_eq!(config.server.port, 9001);
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[tokio::test]
    async fn test_invalid_config_file_is_an_error() {
        let dir = tempdir().unwrap();
        tokio::fs::write(dir.path().join("config.toml"), "[server\nport =")
            .await
            .unwrap();
        assert!(load_config(dir.path()).await.is_err());
    }
}
