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

use serde::Serialize;

/// Counters for the current session only. Never persisted.
#[derive(Clone, PartialEq, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub cards_reviewed: u32,
    pub correct_answers: u32,
    pub current_streak: u32,
    /// Never decreases until `reset`.
    pub best_streak: u32,
}

impl SessionStats {
    pub fn record_outcome(&mut self, is_correct: bool) {
        self.cards_reviewed += 1;
        if is_correct {
            self.correct_answers += 1;
            self.current_streak += 1;
        } else {
            self.current_streak = 0;
        }
        self.best_streak = self.best_streak.max(self.current_streak);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Percentage of correct answers, rounded. Zero before any review.
    pub fn success_rate(&self) -> u32 {
        if self.cards_reviewed == 0 {
            return 0;
        }
        let rate = f64::from(self.correct_answers) / f64::from(self.cards_reviewed);
        (rate * 100.0).round() as u32
    }
}
