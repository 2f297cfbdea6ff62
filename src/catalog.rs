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

use std::collections::BTreeMap;
use std::collections::HashSet;
use std::time::Instant;

use crate::error::StudyError;
use crate::persistence::ProgressMap;
use crate::remote::ObjectStore;
use crate::types::card::Card;
use crate::types::card::CardKey;
use crate::types::timestamp::Timestamp;

/// Where the two sides of each card live in the object store.
#[derive(Clone, Debug)]
pub struct Layout {
    pub front_prefix: String,
    pub back_prefix: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            front_prefix: "front".to_string(),
            back_prefix: "back".to_string(),
        }
    }
}

/// A name with whichever sides have been found so far.
#[derive(Default)]
struct CatalogEntry {
    front: Option<String>,
    back: Option<String>,
}

/// The ordered set of studyable cards.
pub struct Catalog {
    cards: Vec<Card>,
}

impl Catalog {
    /// List both sides, pair them by key, and overlay persisted progress.
    ///
    /// Fails if either listing fails or if nothing pairs up.
    pub fn fetch(
        store: &dyn ObjectStore,
        layout: &Layout,
        persisted: &ProgressMap,
    ) -> Result<Self, StudyError> {
        let start = Instant::now();
        let fronts = store.list(&layout.front_prefix).inspect_err(|e| {
            log::error!("{e}");
        })?;
        let backs = store.list(&layout.back_prefix).inspect_err(|e| {
            log::error!("{e}");
        })?;

        // Keyed by `CardKey`, so iteration is already in catalog order.
        let mut entries: BTreeMap<CardKey, CatalogEntry> = BTreeMap::new();
        for front in &fronts {
            let entry = entries
                .entry(CardKey::from_file_name(&front.name))
                .or_default();
            if entry.front.is_none() {
                entry.front = Some(front.name.clone());
            }
        }
        for back in &backs {
            // Backs without a front can never become cards.
            if let Some(entry) = entries.get_mut(&CardKey::from_file_name(&back.name)) {
                if entry.back.is_none() {
                    entry.back = Some(back.name.clone());
                }
            }
        }

        let mut cards = Vec::new();
        for (key, entry) in entries {
            let (Some(front), Some(back)) = (entry.front, entry.back) else {
                log::debug!("Skipping unmatched front '{key}'.");
                continue;
            };
            let front_url = store.public_url(&format!("{}/{}", layout.front_prefix, front));
            let back_url = store.public_url(&format!("{}/{}", layout.back_prefix, back));
            let progress = persisted.get(&key).cloned().unwrap_or_default();
            cards.push(Card::new(key, front_url, back_url, progress));
        }

        let duration = start.elapsed().as_millis();
        log::info!(
            "Matched {} cards from {} fronts and {} backs in {duration}ms.",
            cards.len(),
            fronts.len(),
            backs.len()
        );
        if cards.is_empty() {
            return Err(StudyError::EmptyCatalog);
        }
        Ok(Self { cards })
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn cards_mut(&mut self) -> &mut [Card] {
        &mut self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Card> {
        self.cards.get_mut(index)
    }

    /// The progress of every card, keyed by card.
    pub fn progress(&self) -> ProgressMap {
        self.cards
            .iter()
            .map(|c| (c.key().clone(), c.progress.clone()))
            .collect()
    }

    /// The number of cards whose next review is not in the future.
    pub fn due_count(&self, now: Timestamp) -> usize {
        self.cards.iter().filter(|c| c.progress.is_due(now)).count()
    }

    /// Persisted keys with no card in this catalog. Their progress is dropped
    /// on the next save.
    pub fn orphans(&self, persisted: &ProgressMap) -> Vec<CardKey> {
        let keys: HashSet<&CardKey> = self.cards.iter().map(|c| c.key()).collect();
        let mut orphans: Vec<CardKey> = persisted
            .keys()
            .filter(|k| !keys.contains(k))
            .cloned()
            .collect();
        orphans.sort();
        orphans
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::FakeStore;
    use crate::types::confidence::ConfidenceLevel;
    use crate::types::progress::Progress;

    fn keys(catalog: &Catalog) -> Vec<&str> {
        catalog.cards().iter().map(|c| c.key().as_str()).collect()
    }

    #[test]
    fn test_intersection() {
        let store = FakeStore::new(
            &["1.png", "2.png", "3.png", "4.png"],
            &["2.png", "4.png", "5.png"],
        );
        let catalog = Catalog::fetch(&store, &Layout::default(), &ProgressMap::new()).unwrap();
        assert_eq!(keys(&catalog), vec!["2", "4"]);
    }

    #[test]
    fn test_numeric_order() {
        let store = FakeStore::new(&["10.png", "9.png", "1.png"], &["1.png", "9.png", "10.png"]);
        let catalog = Catalog::fetch(&store, &Layout::default(), &ProgressMap::new()).unwrap();
        assert_eq!(keys(&catalog), vec!["1", "9", "10"]);
    }

    #[test]
    fn test_lexical_fallback() {
        let store = FakeStore::new(&["b.png", "a.png", "3.png"], &["a.png", "b.png", "3.png"]);
        let catalog = Catalog::fetch(&store, &Layout::default(), &ProgressMap::new()).unwrap();
        assert_eq!(keys(&catalog), vec!["3", "a", "b"]);
    }

    /// Matching ignores the extension, and each key appears once.
    #[test]
    fn test_extension_stripped() {
        let store = FakeStore::new(&["1.jpg", "1.png"], &["1.png"]);
        let catalog = Catalog::fetch(&store, &Layout::default(), &ProgressMap::new()).unwrap();
        assert_eq!(catalog.len(), 1);
        let card = catalog.get(0).unwrap();
        assert_eq!(card.front_url(), "https://cdn.test/front/1.jpg");
        assert_eq!(card.back_url(), "https://cdn.test/back/1.png");
    }

    #[test]
    fn test_overlay() {
        let mut persisted = ProgressMap::new();
        let progress = Progress {
            confidence_level: ConfidenceLevel::Correct,
            times_reviewed: 5,
            ..Progress::default()
        };
        persisted.insert(CardKey::new("2"), progress.clone());
        persisted.insert(CardKey::new("gone"), Progress::default());
        let store = FakeStore::new(&["1.png", "2.png"], &["1.png", "2.png"]);
        let catalog = Catalog::fetch(&store, &Layout::default(), &persisted).unwrap();
        assert_eq!(catalog.get(0).unwrap().progress, Progress::default());
        assert_eq!(catalog.get(1).unwrap().progress, progress);
        assert_eq!(catalog.orphans(&persisted), vec![CardKey::new("gone")]);
    }

    #[test]
    fn test_listing_failure() {
        let store = FakeStore::failing();
        let result = Catalog::fetch(&store, &Layout::default(), &ProgressMap::new());
        assert!(matches!(result, Err(StudyError::Listing(_))));
    }

    #[test]
    fn test_empty_catalog() {
        let store = FakeStore::new(&["1.png"], &["2.png"]);
        let result = Catalog::fetch(&store, &Layout::default(), &ProgressMap::new());
        assert!(matches!(result, Err(StudyError::EmptyCatalog)));
    }

    #[test]
    fn test_due_count() {
        let store = FakeStore::new(&["1.png", "2.png"], &["1.png", "2.png"]);
        let mut catalog =
            Catalog::fetch(&store, &Layout::default(), &ProgressMap::new()).unwrap();
        let now = Timestamp::now();
        assert_eq!(catalog.due_count(now), 2);
        catalog.get_mut(0).unwrap().progress.next_review_date =
            Some(now + chrono::Duration::days(1));
        assert_eq!(catalog.due_count(now), 1);
    }
}
