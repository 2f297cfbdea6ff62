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

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::catalog::Catalog;
use crate::catalog::Layout;
use crate::error::StudyError;
use crate::persistence::PersistenceAdapter;
use crate::remote::ObjectStore;
use crate::selection::Mode;
use crate::selection::SelectionEngine;
use crate::session::SessionStats;
use crate::tracker;
use crate::types::card::Card;
use crate::types::confidence::ConfidenceLevel;
use crate::types::timestamp::Timestamp;

/// Everything a study session needs, owned in one place and handed to
/// whatever drives the UI.
pub struct StudyState {
    layout: Layout,
    /// `None` until the first successful load.
    catalog: Option<Catalog>,
    engine: SelectionEngine,
    stats: SessionStats,
    persistence: PersistenceAdapter,
    rng: StdRng,
}

impl StudyState {
    pub fn new(layout: Layout, persistence: PersistenceAdapter, mode: Mode) -> Self {
        Self::with_rng(layout, persistence, mode, StdRng::from_entropy())
    }

    pub fn with_rng(
        layout: Layout,
        persistence: PersistenceAdapter,
        mode: Mode,
        rng: StdRng,
    ) -> Self {
        Self {
            layout,
            catalog: None,
            engine: SelectionEngine::new(mode),
            stats: SessionStats::default(),
            persistence,
            rng,
        }
    }

    /// Build the catalog from `store` and the persisted progress. On failure
    /// the previous catalog, if any, stays in place.
    ///
    /// Once persistence has degraded, the store no longer reflects this
    /// session, so progress is carried over from the current catalog instead.
    pub fn load(&mut self, store: &dyn ObjectStore) -> Result<usize, StudyError> {
        let persisted = match &self.catalog {
            Some(catalog) if self.persistence.is_degraded() => catalog.progress(),
            _ => self.persistence.load(),
        };
        let catalog = Catalog::fetch(store, &self.layout, &persisted)?;
        let orphans = catalog.orphans(&persisted);
        if !orphans.is_empty() {
            log::warn!(
                "Dropping progress of {} cards no longer in the collection.",
                orphans.len()
            );
        }
        self.engine.reconcile(catalog.len());
        let len = catalog.len();
        self.catalog = Some(catalog);
        Ok(len)
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    pub fn current_index(&self) -> usize {
        self.engine.current_index()
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.catalog.as_ref()?.get(self.engine.current_index())
    }

    pub fn mode(&self) -> Mode {
        self.engine.mode()
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.engine.set_mode(mode);
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn next(&mut self) -> Result<Option<usize>, StudyError> {
        let catalog = self.catalog.as_ref().ok_or(StudyError::NotLoaded)?;
        Ok(self.engine.next(catalog.cards(), &mut self.rng))
    }

    pub fn prev(&mut self) -> Result<Option<usize>, StudyError> {
        let catalog = self.catalog.as_ref().ok_or(StudyError::NotLoaded)?;
        Ok(self.engine.prev(catalog.cards()))
    }

    pub fn jump_to(&mut self, index: usize) -> Result<usize, StudyError> {
        let catalog = self.catalog.as_ref().ok_or(StudyError::NotLoaded)?;
        self.engine.jump_to(index, catalog.len())
    }

    /// Rate the shown card. Only level 3 counts as a correct answer.
    pub fn rate_current(&mut self, level: u8) -> Result<&Card, StudyError> {
        let level = ConfidenceLevel::try_from(level)?;
        let index = self.engine.current_index();
        let catalog = self.catalog.as_mut().ok_or(StudyError::NotLoaded)?;
        let card = catalog
            .get_mut(index)
            .ok_or(StudyError::IndexOutOfRange(index))?;
        let is_correct = level == ConfidenceLevel::Correct;
        tracker::rate(card, level, Some(is_correct), Timestamp::now());
        self.stats.record_outcome(is_correct);
        self.persistence.save(catalog.cards());
        catalog.get(index).ok_or(StudyError::IndexOutOfRange(index))
    }

    /// Forget all progress, persisted and in memory, and restart the
    /// session counters.
    pub fn reset_progress(&mut self) {
        if let Some(catalog) = self.catalog.as_mut() {
            tracker::reset_confidence(catalog.cards_mut());
        }
        self.persistence.clear();
        self.stats.reset();
    }

    /// True once progress can no longer be saved this session.
    pub fn is_degraded(&self) -> bool {
        self.persistence.is_degraded()
    }
}
