//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{GameSession, TreeStore};
use crate::config::Settings;
use crate::domain::Seed;
use crate::infrastructure::traits::{FileSystem, RealFileSystem, StdioTerminal, Terminal};

/// Container holding settings and I/O boundaries for all services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Player terminal abstraction
    pub terminal: Arc<dyn Terminal>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem), Arc::new(StdioTerminal))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        terminal: Arc<dyn Terminal>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self {
            settings,
            fs,
            terminal,
        }
    }

    /// Tree store honoring the configured tag policy.
    pub fn tree_store(&self) -> TreeStore {
        TreeStore::new(Arc::clone(&self.fs), self.settings.tag_policy)
    }

    /// Fresh game session on `seed`, or on the configured seed.
    pub fn game_session(&self, seed: Option<Seed>) -> GameSession {
        GameSession::new(
            Arc::clone(&self.terminal),
            self.tree_store(),
            seed.unwrap_or(self.settings.seed),
        )
    }
}
