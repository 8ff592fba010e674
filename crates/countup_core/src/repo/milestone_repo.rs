//! Persisted set of celebrated milestones.
//!
//! # Responsibility
//! - Encode the milestone set as a JSON array of month counts.
//! - Degrade missing, unreadable or malformed entries to an empty set.
//!
//! # Invariants
//! - `load` never returns an error; failures are logged and swallowed.
//! - `save` writes the full set, replacing the previous entry.

use crate::model::milestone::MilestoneSet;
use crate::repo::kv_repo::{KeyValueStore, StoreError, StoreResult};
use log::{debug, warn};

/// Milestone persistence over any key-value store.
pub struct MilestoneRepository<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> MilestoneRepository<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Loads the stored set, or an empty set when anything goes wrong.
    pub fn load(&self) -> MilestoneSet {
        match self.try_load() {
            Ok(Some(set)) => {
                debug!(
                    "event=milestones_load module=repo status=ok count={}",
                    set.len()
                );
                set
            }
            Ok(None) => {
                debug!("event=milestones_load module=repo status=empty");
                MilestoneSet::new()
            }
            Err(err) => {
                warn!(
                    "event=milestones_load module=repo status=degraded error={}",
                    err
                );
                MilestoneSet::new()
            }
        }
    }

    /// Loads the stored set, surfacing storage and decode errors.
    pub fn try_load(&self) -> StoreResult<Option<MilestoneSet>> {
        match self.store.get(&self.key)? {
            Some(raw) => decode_milestones(&self.key, &raw).map(Some),
            None => Ok(None),
        }
    }

    /// Replaces the stored entry with `set`.
    pub fn save(&self, set: &MilestoneSet) -> StoreResult<()> {
        let encoded = serde_json::to_string(set).map_err(StoreError::Encode)?;
        self.store.put(&self.key, &encoded)
    }
}

/// Decodes `[1,2,3]`-style arrays; zero or negative entries are corrupt.
pub fn decode_milestones(key: &str, raw: &str) -> StoreResult<MilestoneSet> {
    let months: Vec<u32> = serde_json::from_str(raw).map_err(|err| StoreError::Corrupt {
        key: key.to_string(),
        details: err.to_string(),
    })?;

    if months.contains(&0) {
        return Err(StoreError::Corrupt {
            key: key.to_string(),
            details: "month 0 is not a milestone".to_string(),
        });
    }

    Ok(months.into_iter().collect())
}
