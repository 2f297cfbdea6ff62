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

use serde::Deserialize;
use serde::Serialize;

use crate::types::confidence::ConfidenceLevel;
use crate::types::timestamp::Timestamp;

/// Review state of a single card.
///
/// `correct_answers + incorrect_answers <= times_reviewed` always holds,
/// since a review may be recorded without an outcome.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Progress {
    /// The most recent self-assessment.
    pub confidence_level: ConfidenceLevel,
    /// The number of times the card has been rated.
    pub times_reviewed: u32,
    pub correct_answers: u32,
    pub incorrect_answers: u32,
    /// When the card was last rated.
    pub last_reviewed: Option<Timestamp>,
    /// When the card is next eligible for review.
    pub next_review_date: Option<Timestamp>,
}

impl Progress {
    /// A card is due if it has no scheduled review, or the scheduled review
    /// is not in the future.
    pub fn is_due(&self, now: Timestamp) -> bool {
        match self.next_review_date {
            None => true,
            Some(next) => next <= now,
        }
    }

    pub fn is_new(&self) -> bool {
        self.times_reviewed == 0
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn test_default_is_unrated() {
        let progress = Progress::default();
        assert_eq!(progress.confidence_level, ConfidenceLevel::Incorrect);
        assert_eq!(progress.times_reviewed, 0);
        assert_eq!(progress.correct_answers, 0);
        assert_eq!(progress.incorrect_answers, 0);
        assert!(progress.last_reviewed.is_none());
        assert!(progress.next_review_date.is_none());
        assert!(progress.is_new());
    }

    #[test]
    fn test_is_due() {
        let now = Timestamp::now();
        let mut progress = Progress::default();
        assert!(progress.is_due(now));
        progress.next_review_date = Some(now);
        assert!(progress.is_due(now));
        progress.next_review_date = Some(now + Duration::days(1));
        assert!(!progress.is_due(now));
    }

    #[test]
    fn test_missing_fields_default() {
        let progress: Progress = serde_json::from_str(r#"{"timesReviewed": 2}"#).unwrap();
        assert_eq!(progress.times_reviewed, 2);
        assert_eq!(progress.confidence_level, ConfidenceLevel::Incorrect);
    }
}
