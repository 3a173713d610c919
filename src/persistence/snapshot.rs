use crate::models::org::OrganizationState;
use crate::persistence::storage::KeyValueStorage;
use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Storage slot holding the organization snapshot
pub const STORAGE_KEY: &str = "receptoOrgData";

/// Current snapshot envelope version
pub const SNAPSHOT_VERSION: u64 = 1;

/// Where a loaded state came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotSource {
    /// Current versioned envelope
    Stored,
    /// Bare unversioned state, upgraded in memory
    Legacy,
    /// Slot was empty or unusable; seed data was written back
    Seeded,
}

#[derive(Serialize)]
struct Envelope<'a> {
    version: u64,
    state: &'a OrganizationState,
}

/// Loads and saves the whole aggregate to a single storage slot.
///
/// Every failure is soft: loading falls back to the seed state and saving
/// only logs.
pub struct SnapshotStore {
    storage: Arc<dyn KeyValueStorage>,
    seed: OrganizationState,
}

impl SnapshotStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>, seed: OrganizationState) -> Self {
        Self { storage, seed }
    }

    pub fn load(&self) -> OrganizationState {
        self.load_with_source().0
    }

    pub fn load_with_source(&self) -> (OrganizationState, SnapshotSource) {
        let payload = match self.storage.get(STORAGE_KEY) {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                info!(key = STORAGE_KEY, "No stored snapshot, seeding");
                return (self.reseed(), SnapshotSource::Seeded);
            }
            Err(e) => {
                error!(key = STORAGE_KEY, error = %e, "Failed to read snapshot, seeding");
                return (self.reseed(), SnapshotSource::Seeded);
            }
        };

        match decode(&payload) {
            Ok((state, source)) => {
                debug!(
                    users = state.users.len(),
                    leads = state.leads.len(),
                    credits = state.credits,
                    ?source,
                    "Snapshot loaded"
                );
                (state, source)
            }
            Err(e) => {
                error!(key = STORAGE_KEY, error = %e, "Stored snapshot is unusable, seeding");
                (self.reseed(), SnapshotSource::Seeded)
            }
        }
    }

    pub fn save(&self, state: &OrganizationState) {
        if let Err(e) = self.try_save(state) {
            warn!(key = STORAGE_KEY, error = %e, "Failed to save snapshot");
        }
    }

    fn try_save(&self, state: &OrganizationState) -> Result<()> {
        let payload = encode(state)?;
        self.storage
            .set(STORAGE_KEY, &payload)
            .context("Failed to write snapshot")
    }

    fn reseed(&self) -> OrganizationState {
        let state = self.seed.clone();
        self.save(&state);
        state
    }
}

pub fn encode(state: &OrganizationState) -> Result<String> {
    serde_json::to_string(&Envelope {
        version: SNAPSHOT_VERSION,
        state,
    })
    .context("Failed to serialize snapshot")
}

pub fn decode(payload: &str) -> Result<(OrganizationState, SnapshotSource)> {
    let mut value: serde_json::Value =
        serde_json::from_str(payload).context("Snapshot is not valid JSON")?;

    let Some(object) = value.as_object_mut() else {
        bail!("Snapshot is not a JSON object");
    };

    let version = object.get("version").cloned();
    match version {
        None => {
            let state = serde_json::from_value(value).context("Legacy snapshot has unexpected shape")?;
            Ok((state, SnapshotSource::Legacy))
        }
        Some(version) => {
            let Some(version) = version.as_u64() else {
                bail!("Snapshot version is not a number");
            };
            if version != SNAPSHOT_VERSION {
                bail!("Unsupported snapshot version {} (expected {})", version, SNAPSHOT_VERSION);
            }
            let state = object
                .remove("state")
                .context("Snapshot envelope has no state")?;
            let state = serde_json::from_value(state).context("Snapshot state has unexpected shape")?;
            Ok((state, SnapshotSource::Stored))
        }
    }
}
