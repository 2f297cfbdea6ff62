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

use chrono::Duration;

use crate::types::card::Card;
use crate::types::confidence::ConfidenceLevel;
use crate::types::progress::Progress;
use crate::types::timestamp::Timestamp;

/// The review interval in days for a card rated `Correct`. Lower levels
/// double it once per step.
const BASE_INTERVAL_DAYS: i64 = 1;

/// The gap between a rating and the next review:
/// `BASE_INTERVAL * 2^(3 - level)`, i.e. 4, 2, and 1 days for levels 1, 2,
/// and 3.
pub fn review_interval(level: ConfidenceLevel) -> Duration {
    let exponent = 3 - u32::from(level.as_u8());
    Duration::days(BASE_INTERVAL_DAYS * 2_i64.pow(exponent))
}

/// Record a rating of `card` made at `now`.
///
/// `is_correct` bumps the matching answer counter; `None` records the review
/// without an outcome.
pub fn rate(card: &mut Card, level: ConfidenceLevel, is_correct: Option<bool>, now: Timestamp) {
    let progress = &mut card.progress;
    progress.times_reviewed += 1;
    progress.confidence_level = level;
    progress.last_reviewed = Some(now);
    progress.next_review_date = Some(now + review_interval(level));
    match is_correct {
        Some(true) => progress.correct_answers += 1,
        Some(false) => progress.incorrect_answers += 1,
        None => {}
    }
    log::debug!(
        "{} rated {} ({} reviews), next review in {}d",
        card.key(),
        level,
        card.progress.times_reviewed,
        review_interval(level).num_days()
    );
}

/// Forget all progress on every card. There is no undo.
pub fn reset_confidence(cards: &mut [Card]) {
    for card in cards.iter_mut() {
        card.progress = Progress::default();
    }
    log::debug!("Reset progress on {} cards.", cards.len());
}
