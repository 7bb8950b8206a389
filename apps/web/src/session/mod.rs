//! Login state: `SignedOut` or `SignedIn`, mirrored to an injected store.
//!
//! No credentials are checked. The flag only decides which view the shell shows.

pub mod store;

use std::sync::Arc;

use anyhow::Result;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::info;

pub use store::{FileStore, MemoryStore, RedisStore, SessionStore};

use crate::config::SessionBackend;

/// Store key holding the login flag.
pub const SESSION_FLAG_KEY: &str = "isLoggedIn";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    SignedOut,
    SignedIn,
}

impl SessionState {
    pub fn is_signed_in(self) -> bool {
        self == SessionState::SignedIn
    }
}

/// Owns the current session state and writes every transition through to the store.
pub struct SessionController {
    store: Arc<dyn SessionStore>,
    state: RwLock<SessionState>,
}

impl SessionController {
    /// Reads the persisted flag; anything other than `"true"` means signed out.
    pub async fn load(store: Arc<dyn SessionStore>) -> Result<Self> {
        let state = match store.get(SESSION_FLAG_KEY).await?.as_deref() {
            Some("true") => SessionState::SignedIn,
            _ => SessionState::SignedOut,
        };
        info!(?state, "Session restored");
        Ok(Self {
            store,
            state: RwLock::new(state),
        })
    }

    pub async fn current(&self) -> SessionState {
        *self.state.read().await
    }

    /// Accepts any sign-in submission.
    pub async fn handle_login(&self) -> Result<SessionState> {
        let mut state = self.state.write().await;
        self.store.set(SESSION_FLAG_KEY, "true").await?;
        *state = SessionState::SignedIn;
        info!("Signed in");
        Ok(*state)
    }

    pub async fn handle_logout(&self) -> Result<SessionState> {
        let mut state = self.state.write().await;
        self.store.remove(SESSION_FLAG_KEY).await?;
        *state = SessionState::SignedOut;
        info!("Signed out");
        Ok(*state)
    }
}

/// Opens the store selected by configuration.
pub fn open_store(backend: &SessionBackend) -> Result<Arc<dyn SessionStore>> {
    Ok(match backend {
        SessionBackend::Memory => Arc::new(MemoryStore::default()),
        SessionBackend::File(path) => Arc::new(FileStore::new(path.clone())),
        SessionBackend::Redis(url) => Arc::new(RedisStore::open(url)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_defaults_to_signed_out() {
        let controller = SessionController::load(Arc::new(MemoryStore::default()))
            .await
            .unwrap();
        assert_eq!(controller.current().await, SessionState::SignedOut);
    }

    #[tokio::test]
    async fn test_login_persists_flag() {
        let store: Arc<dyn SessionStore> = Arc::new(MemoryStore::default());
        let controller = SessionController::load(store.clone()).await.unwrap();

        let state = controller.handle_login().await.unwrap();
        assert_eq!(state, SessionState::SignedIn);
        assert_eq!(controller.current().await, SessionState::SignedIn);
        assert_eq!(
            store.get(SESSION_FLAG_KEY).await.unwrap().as_deref(),
            Some("true")
        );
    }

    #[tokio::test]
    async fn test_logout_clears_flag() {
        let store: Arc<dyn SessionStore> = Arc::new(MemoryStore::default());
        let controller = SessionController::load(store.clone()).await.unwrap();
        controller.handle_login().await.unwrap();

        let state = controller.handle_logout().await.unwrap();
        assert_eq!(state, SessionState::SignedOut);
        assert_eq!(store.get(SESSION_FLAG_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_reload_restores_last_state() {
        let store: Arc<dyn SessionStore> = Arc::new(MemoryStore::default());
        SessionController::load(store.clone())
            .await
            .unwrap()
            .handle_login()
            .await
            .unwrap();

        let reloaded = SessionController::load(store.clone()).await.unwrap();
        assert_eq!(reloaded.current().await, SessionState::SignedIn);

        reloaded.handle_logout().await.unwrap();
        let reloaded = SessionController::load(store).await.unwrap();
        assert_eq!(reloaded.current().await, SessionState::SignedOut);
    }

    #[tokio::test]
    async fn test_unexpected_flag_value_is_signed_out() {
        let store: Arc<dyn SessionStore> = Arc::new(MemoryStore::default());
        store.set(SESSION_FLAG_KEY, "yes").await.unwrap();
        let controller = SessionController::load(store).await.unwrap();
        assert_eq!(controller.current().await, SessionState::SignedOut);
    }

    #[tokio::test]
    async fn test_file_backed_session_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let backend = SessionBackend::File(dir.path().join("session.json"));

        let controller = SessionController::load(open_store(&backend).unwrap())
            .await
            .unwrap();
        controller.handle_login().await.unwrap();

        let restarted = SessionController::load(open_store(&backend).unwrap())
            .await
            .unwrap();
        assert!(restarted.current().await.is_signed_in());
    }
}
