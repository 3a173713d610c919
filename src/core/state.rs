// Application state (AppState)

use crate::analytics::stats::StatsCache;
use crate::core::config::Config;
use crate::stores::org_store::OrgStore;
use std::sync::Arc;

/// Shared application state
///
/// Handed to every handler; the store is the only owner of the organization
/// aggregate.
#[derive(Clone)]
pub struct AppState {
    /// Organization aggregate and login session
    pub store: Arc<OrgStore>,

    /// Analytics derived from the store, invalidated by its revision
    pub stats: Arc<StatsCache>,

    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, store: OrgStore) -> Self {
        Self {
            store: Arc::new(store),
            stats: Arc::new(StatsCache::new()),
            config: Arc::new(config),
        }
    }

    /// Seeded, memory-backed state for handler tests
    #[cfg(test)]
    pub fn for_tests() -> Arc<Self> {
        use crate::core::startup::{open_storage, open_store};

        let config = Config::from_toml("[server]\nport = 8080\n[storage]\nin_memory = true\n")
            .expect("test config");
        let storage = open_storage(&config).expect("memory storage");
        let store = open_store(&config, storage);
        Arc::new(Self::new(config, store))
    }
}
