//! Browser lifetime
//!
//! Ties the navigation state to durable storage: the session is loaded once
//! when the browser opens and written once when it closes.

use nar_session::{SessionState, SessionStore, SqliteSessionStore};
use nar_storage::Database;
use nar_tabs::PageFactory;

use crate::config::Config;
use crate::manager::NavigationStateManager;
use crate::shell::ShellView;
use crate::Result;

pub struct Browser<S: SessionStore = SqliteSessionStore> {
    store: S,
    manager: NavigationStateManager,
}

impl Browser {
    /// Open the browser on the database named in `config`, creating its
    /// directory if needed.
    pub fn open(
        config: Config,
        factory: Box<dyn PageFactory>,
        shell: Box<dyn ShellView>,
    ) -> Result<Self> {
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&config.database_path)?;
        let store = SqliteSessionStore::new(db, config.homepage.clone());

        tracing::info!(path = %config.database_path.display(), "Opened browser database");

        Self::with_store(store, config, factory, shell)
    }
}

impl<S: SessionStore> Browser<S> {
    pub fn with_store(
        store: S,
        config: Config,
        factory: Box<dyn PageFactory>,
        shell: Box<dyn ShellView>,
    ) -> Result<Self> {
        let session = store.load()?;
        let manager = NavigationStateManager::new(config, session, factory, shell);

        Ok(Self { store, manager })
    }

    pub fn manager(&self) -> &NavigationStateManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut NavigationStateManager {
        &mut self.manager
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Release every tab and persist the session. Returns what was saved.
    pub fn close(self) -> Result<SessionState> {
        let Self { store, manager } = self;
        let state = manager.into_session_state();
        store.save(&state)?;

        tracing::info!("Browser closed");

        Ok(state)
    }
}
