// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Durable storage of per-card progress.
//!
//! Only review state is stored. Image URLs are always refetched.

use std::collections::BTreeMap;
use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::error::StudyError;
use crate::types::card::Card;
use crate::types::card::CardKey;
use crate::types::progress::Progress;

/// The current version of the persisted snapshot.
pub const SCHEMA_VERSION: u64 = 1;

/// Persisted progress, looked up by card key.
pub type ProgressMap = HashMap<CardKey, Progress>;

/// A string-keyed blob store. Failures are reported but never fatal.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StudyError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StudyError>;

    fn remove(&mut self, key: &str) -> Result<(), StudyError>;
}

#[derive(Serialize, Deserialize)]
struct Snapshot {
    version: u64,
    cards: BTreeMap<CardKey, ProgressRecord>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProgressRecord {
    id: CardKey,
    #[serde(flatten)]
    progress: Progress,
}

pub struct PersistenceAdapter {
    store: Box<dyn KeyValueStore>,
    /// The key under which the snapshot is stored.
    key: String,
    /// Set after a failed read or write. Progress then lives in memory only
    /// until the adapter is recreated.
    degraded: bool,
}

impl PersistenceAdapter {
    pub fn new(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            degraded: false,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Load persisted progress. A missing, empty, or unreadable store means
    /// no prior history. A snapshot that exists but cannot be read is left
    /// in place: the adapter stops writing for the rest of the session.
    pub fn load(&mut self) -> ProgressMap {
        let blob = match self.store.get(&self.key) {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                log::debug!("No persisted progress under '{}'.", self.key);
                return ProgressMap::new();
            }
            Err(e) => {
                // Don't clobber history we could not read.
                log::warn!("{e}; progress will not be saved this session.");
                self.degraded = true;
                return ProgressMap::new();
            }
        };
        if blob.trim().is_empty() {
            return ProgressMap::new();
        }
        match decode(&blob) {
            Ok(map) => {
                log::debug!("Loaded progress for {} cards.", map.len());
                map
            }
            Err(e) => {
                log::warn!(
                    "Ignoring unreadable progress snapshot ({e}); progress will not be saved this session."
                );
                self.degraded = true;
                ProgressMap::new()
            }
        }
    }

    /// Write the progress of every card. Cards not in `cards` are dropped
    /// from the store.
    pub fn save(&mut self, cards: &[Card]) {
        if self.degraded {
            return;
        }
        let result = encode(cards).and_then(|blob| self.store.set(&self.key, &blob));
        if let Err(e) = result {
            log::warn!("{e}; continuing with in-memory progress only.");
            self.degraded = true;
        }
    }

    /// Delete all persisted progress. This is attempted even when degraded;
    /// once it succeeds the store is empty and saving resumes.
    pub fn clear(&mut self) {
        match self.store.remove(&self.key) {
            Ok(()) => self.degraded = false,
            Err(e) => {
                log::warn!("{e}; continuing with in-memory progress only.");
                self.degraded = true;
            }
        }
    }
}

fn encode(cards: &[Card]) -> Result<String, StudyError> {
    let snapshot = Snapshot {
        version: SCHEMA_VERSION,
        cards: cards
            .iter()
            .map(|card| {
                let record = ProgressRecord {
                    id: card.key().clone(),
                    progress: card.progress.clone(),
                };
                (card.key().clone(), record)
            })
            .collect(),
    };
    serde_json::to_string(&snapshot).map_err(|e| StudyError::Persistence(e.to_string()))
}

fn decode(blob: &str) -> Result<ProgressMap, StudyError> {
    let value: Value =
        serde_json::from_str(blob).map_err(|e| StudyError::Persistence(e.to_string()))?;
    let version = value.get("version").and_then(Value::as_u64);
    match version {
        Some(SCHEMA_VERSION) => {
            let snapshot: Snapshot = serde_json::from_value(value)
                .map_err(|e| StudyError::Persistence(e.to_string()))?;
            Ok(snapshot
                .cards
                .into_iter()
                .map(|(key, record)| (key, record.progress))
                .collect())
        }
        Some(other) => Err(StudyError::Persistence(format!(
            "unsupported snapshot version {other}"
        ))),
        None => migrate_unversioned(value),
    }
}

/// The unversioned format is a flat object keyed by full file name, e.g.
/// `{"12.png": {"confidenceLevel": 2, ...}}`.
fn migrate_unversioned(value: Value) -> Result<ProgressMap, StudyError> {
    let legacy: BTreeMap<String, Progress> =
        serde_json::from_value(value).map_err(|e| StudyError::Persistence(e.to_string()))?;
    log::debug!("Migrating {} unversioned progress records.", legacy.len());
    Ok(legacy
        .into_iter()
        .map(|(name, progress)| (CardKey::from_file_name(&name), progress))
        .collect())
}
