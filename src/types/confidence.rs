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

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::error::StudyError;

/// How well the user recalled a card, on a three-point scale.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ConfidenceLevel {
    /// Got it wrong. Also the level of a card that was never rated.
    #[default]
    Incorrect,
    /// Not sure.
    Unsure,
    /// Got it right.
    Correct,
}

impl ConfidenceLevel {
    pub fn as_u8(self) -> u8 {
        match self {
            ConfidenceLevel::Incorrect => 1,
            ConfidenceLevel::Unsure => 2,
            ConfidenceLevel::Correct => 3,
        }
    }

    /// Relative probability of drawing a card at this level in test mode.
    pub fn weight(self) -> f64 {
        match self {
            ConfidenceLevel::Incorrect => 0.5,
            ConfidenceLevel::Unsure => 0.3,
            ConfidenceLevel::Correct => 0.2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConfidenceLevel::Incorrect => "incorrect",
            ConfidenceLevel::Unsure => "unsure",
            ConfidenceLevel::Correct => "correct",
        }
    }
}

impl TryFrom<u8> for ConfidenceLevel {
    type Error = StudyError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ConfidenceLevel::Incorrect),
            2 => Ok(ConfidenceLevel::Unsure),
            3 => Ok(ConfidenceLevel::Correct),
            _ => Err(StudyError::InvalidRating(i64::from(value))),
        }
    }
}

impl From<ConfidenceLevel> for u8 {
    fn from(value: ConfidenceLevel) -> Self {
        value.as_u8()
    }
}

impl Display for ConfidenceLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
