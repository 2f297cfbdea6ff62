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

//! Choosing which card to show next.
//!
//! Navigation methods return `Some(index)` whenever the shown card changes
//! (even if it is the same index, as in a one-card study cycle), and `None`
//! when nothing happens. On `Some`, the view must flip back to the front.

use std::fmt::Display;
use std::fmt::Formatter;

use rand::Rng;

use crate::error::StudyError;
use crate::types::card::Card;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Mode {
    /// Cycle through the catalog in order.
    #[default]
    Study,
    /// Weighted-random draws, with a history that can be replayed.
    Test,
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Study => write!(f, "study"),
            Mode::Test => write!(f, "test"),
        }
    }
}

#[derive(Default)]
pub struct SelectionEngine {
    current: usize,
    mode: Mode,
    /// Indices drawn in test mode, in order.
    history: Vec<usize>,
    /// Position in `history` of the shown card. `None` until the first draw.
    cursor: Option<usize>,
}

impl SelectionEngine {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[cfg(test)]
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    /// Switch modes. The current card stays; the test history does not.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            self.mode = mode;
            self.clear_history();
        }
    }

    /// Adjust to a rebuilt catalog of `len` cards. Indices from the old
    /// catalog may now point elsewhere, so the history is dropped.
    pub fn reconcile(&mut self, len: usize) {
        if self.current >= len {
            self.current = 0;
        }
        self.clear_history();
    }

    pub fn next<R: Rng + ?Sized>(&mut self, cards: &[Card], rng: &mut R) -> Option<usize> {
        if cards.is_empty() {
            return None;
        }
        match self.mode {
            Mode::Study => {
                self.current = (self.current + 1) % cards.len();
            }
            Mode::Test => match self.cursor {
                // Replay forward through history without drawing.
                Some(cursor) if cursor + 1 < self.history.len() => {
                    self.cursor = Some(cursor + 1);
                    self.current = self.history[cursor + 1];
                }
                _ => {
                    let index = weighted_index(cards, rng);
                    self.history.push(index);
                    self.cursor = Some(self.history.len() - 1);
                    self.current = index;
                }
            },
        }
        Some(self.current)
    }

    pub fn prev(&mut self, cards: &[Card]) -> Option<usize> {
        if cards.is_empty() {
            return None;
        }
        match self.mode {
            Mode::Study => {
                self.current = (self.current + cards.len() - 1) % cards.len();
                Some(self.current)
            }
            Mode::Test => match self.cursor {
                Some(cursor) if cursor > 0 => {
                    self.cursor = Some(cursor - 1);
                    self.current = self.history[cursor - 1];
                    Some(self.current)
                }
                // Can't go before the first draw.
                _ => None,
            },
        }
    }

    /// Show the card at `index` directly. The test history is kept as is.
    pub fn jump_to(&mut self, index: usize, len: usize) -> Result<usize, StudyError> {
        if index >= len {
            return Err(StudyError::IndexOutOfRange(index));
        }
        self.current = index;
        Ok(index)
    }

    fn clear_history(&mut self) {
        self.history.clear();
        self.cursor = None;
    }
}

/// Draw a card index with probability proportional to its confidence
/// weight. Draws from the whole catalog, due or not.
///
/// Panics if `cards` is empty.
pub fn weighted_index<R: Rng + ?Sized>(cards: &[Card], rng: &mut R) -> usize {
    let weights: Vec<f64> = cards
        .iter()
        .map(|c| c.progress.confidence_level.weight())
        .collect();
    let total: f64 = weights.iter().sum();
    let mut remainder = rng.gen_range(0.0..total);
    for (index, weight) in weights.iter().enumerate() {
        remainder -= weight;
        if remainder <= 0.0 {
            return index;
        }
    }
    // Rounding can leave a sliver past the last weight.
    cards.len() - 1
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::types::card::CardKey;
    use crate::types::confidence::ConfidenceLevel;
    use crate::types::progress::Progress;

    fn cards(levels: &[ConfidenceLevel]) -> Vec<Card> {
        levels
            .iter()
            .enumerate()
            .map(|(i, level)| {
                Card::new(
                    CardKey::new(i.to_string()),
                    format!("f{i}"),
                    format!("b{i}"),
                    Progress {
                        confidence_level: *level,
                        ..Progress::default()
                    },
                )
            })
            .collect()
    }

    fn uniform(n: usize) -> Vec<Card> {
        cards(&vec![ConfidenceLevel::Incorrect; n])
    }

    #[test]
    fn test_study_wraparound() {
        let cards = uniform(3);
        let mut rng = StdRng::seed_from_u64(0);
        let mut engine = SelectionEngine::new(Mode::Study);
        assert_eq!(engine.next(&cards, &mut rng), Some(1));
        assert_eq!(engine.next(&cards, &mut rng), Some(2));
        assert_eq!(engine.next(&cards, &mut rng), Some(0));
        assert_eq!(engine.prev(&cards), Some(2));
        assert_eq!(engine.prev(&cards), Some(1));
    }

    #[test]
    fn test_empty_catalog_is_noop() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut engine = SelectionEngine::new(Mode::Test);
        assert_eq!(engine.next(&[], &mut rng), None);
        assert_eq!(engine.prev(&[]), None);
    }

    #[test]
    fn test_prev_before_first_draw() {
        let cards = uniform(5);
        let mut rng = StdRng::seed_from_u64(1);
        let mut engine = SelectionEngine::new(Mode::Test);
        assert_eq!(engine.prev(&cards), None);
        engine.next(&cards, &mut rng);
        assert_eq!(engine.prev(&cards), None);
    }

    /// Going back and then forward replays the recorded draws.
    #[test]
    fn test_history_replay() {
        let cards = uniform(20);
        let mut rng = StdRng::seed_from_u64(7);
        let mut engine = SelectionEngine::new(Mode::Test);
        let drawn: Vec<usize> = (0..6)
            .map(|_| engine.next(&cards, &mut rng).unwrap())
            .collect();
        assert_eq!(engine.history(), drawn.as_slice());

        let mut back = Vec::new();
        for _ in 0..5 {
            back.push(engine.prev(&cards).unwrap());
        }
        let mut expected_back: Vec<usize> = drawn[..5].to_vec();
        expected_back.reverse();
        assert_eq!(back, expected_back);

        let forward: Vec<usize> = (0..5)
            .map(|_| engine.next(&cards, &mut rng).unwrap())
            .collect();
        assert_eq!(forward, drawn[1..].to_vec());
        assert_eq!(engine.history().len(), 6);

        // At the end of history, the next step draws.
        engine.next(&cards, &mut rng);
        assert_eq!(engine.history().len(), 7);
    }

    #[test]
    fn test_mode_switch_resets_history() {
        let cards = uniform(4);
        let mut rng = StdRng::seed_from_u64(3);
        let mut engine = SelectionEngine::new(Mode::Test);
        engine.next(&cards, &mut rng);
        engine.next(&cards, &mut rng);
        let current = engine.current_index();
        engine.set_mode(Mode::Study);
        assert_eq!(engine.current_index(), current);
        assert!(engine.history().is_empty());
        engine.set_mode(Mode::Test);
        assert_eq!(engine.prev(&cards), None);
    }

    #[test]
    fn test_jump_to() {
        let mut engine = SelectionEngine::new(Mode::Study);
        assert_eq!(engine.jump_to(2, 3), Ok(2));
        assert_eq!(engine.current_index(), 2);
        assert_eq!(engine.jump_to(3, 3), Err(StudyError::IndexOutOfRange(3)));
        assert_eq!(engine.current_index(), 2);
    }

    #[test]
    fn test_reconcile_clamps() {
        let mut engine = SelectionEngine::new(Mode::Study);
        engine.jump_to(4, 5).unwrap();
        engine.reconcile(3);
        assert_eq!(engine.current_index(), 0);
    }

    #[test]
    fn test_weighted_frequency() {
        let cards = cards(&[
            ConfidenceLevel::Incorrect,
            ConfidenceLevel::Unsure,
            ConfidenceLevel::Correct,
        ]);
        let mut rng = StdRng::seed_from_u64(42);
        let trials = 100_000;
        let mut counts = [0usize; 3];
        for _ in 0..trials {
            counts[weighted_index(&cards, &mut rng)] += 1;
        }
        let freq: Vec<f64> = counts.iter().map(|c| *c as f64 / trials as f64).collect();
        assert!((freq[0] - 0.5).abs() < 0.01, "{freq:?}");
        assert!((freq[1] - 0.3).abs() < 0.01, "{freq:?}");
        assert!((freq[2] - 0.2).abs() < 0.01, "{freq:?}");
    }

    #[test]
    fn test_single_card() {
        let cards = cards(&[ConfidenceLevel::Correct]);
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..100 {
            assert_eq!(weighted_index(&cards, &mut rng), 0);
        }
    }
}
