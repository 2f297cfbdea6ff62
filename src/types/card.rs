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

use std::cmp::Ordering;
use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::types::progress::Progress;

/// Stable identity of a card: the matched file name without its extension.
///
/// Keys order numerically when both are bare integers, so that `2` sorts
/// before `10`. Everything else falls back to lexical order, with numeric
/// keys first.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardKey(String);

impl CardKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Derive a key from a file name by stripping the extension, if any.
    /// Dotfiles like `.png` keep their full name.
    pub fn from_file_name(name: &str) -> Self {
        match name.rfind('.') {
            Some(pos) if pos > 0 => Self::new(&name[..pos]),
            _ => Self::new(name),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The value of a bare integer key: ASCII digits only, no sign.
    fn numeric(&self) -> Option<u64> {
        if self.0.is_empty() || !self.0.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        self.0.parse().ok()
    }
}

impl PartialOrd for CardKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CardKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric(), other.numeric()) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.0.cmp(&other.0),
        }
    }
}

impl Display for CardKey {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A matched pair of images plus its review state.
#[derive(Clone, PartialEq, Debug)]
pub struct Card {
    key: CardKey,
    /// The public URL of the front image.
    front_url: String,
    /// The public URL of the back image.
    back_url: String,
    pub progress: Progress,
}

impl Card {
    pub fn new(key: CardKey, front_url: String, back_url: String, progress: Progress) -> Self {
        Self {
            key,
            front_url,
            back_url,
            progress,
        }
    }

    pub fn key(&self) -> &CardKey {
        &self.key
    }

    pub fn front_url(&self) -> &str {
        &self.front_url
    }

    pub fn back_url(&self) -> &str {
        &self.back_url
    }
}
