use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::core::config::Config;
use crate::persistence::snapshot::{SnapshotSource, SnapshotStore};
use crate::persistence::storage::{FileStorage, KeyValueStorage, MemoryStorage};
use crate::stores::org_store::OrgStore;

// this runs at boot time
pub fn open_storage(config: &Config) -> Result<Arc<dyn KeyValueStorage>> {
    if config.storage.in_memory {
        info!("Using in-memory storage, state will not survive a restart");
        return Ok(Arc::new(MemoryStorage::new()));
    }

    let storage = FileStorage::new(config.storage.data_dir.clone())
        .context("Failed to open file storage")?;
    info!(data_dir = %storage.dir().display(), "File storage opened");
    Ok(Arc::new(storage))
}

/// Load the organization snapshot into a fresh store
pub fn open_store(config: &Config, storage: Arc<dyn KeyValueStorage>) -> OrgStore {
    let snapshot = SnapshotStore::new(storage, config.organization.seed_state());
    let (state, source) = snapshot.load_with_source();

    if source == SnapshotSource::Legacy {
        // Rewrite in the versioned layout right away
        snapshot.save(&state);
        info!("Legacy snapshot migrated to the versioned layout");
    }

    info!(
        org_name = %state.org_name,
        users = state.users.len(),
        leads = state.leads.len(),
        credits = state.credits,
        source = ?source,
        "Organization state loaded"
    );

    OrgStore::with_state(state, snapshot)
}
