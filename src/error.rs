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

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

/// A user-facing error: just a message.
#[derive(Debug, PartialEq)]
pub struct ErrorReport {
    message: String,
}

pub type Fallible<T> = Result<T, ErrorReport>;

impl ErrorReport {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

impl Display for ErrorReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "error: {}", self.message)
    }
}

impl Error for ErrorReport {}

pub fn fail<T>(message: impl Into<String>) -> Fallible<T> {
    Err(ErrorReport {
        message: message.into(),
    })
}

impl From<std::io::Error> for ErrorReport {
    fn from(value: std::io::Error) -> Self {
        ErrorReport::new(&format!("I/O error: {value}"))
    }
}

impl From<rusqlite::Error> for ErrorReport {
    fn from(value: rusqlite::Error) -> Self {
        ErrorReport::new(&format!("database error: {value}"))
    }
}

impl From<serde_json::Error> for ErrorReport {
    fn from(value: serde_json::Error) -> Self {
        ErrorReport::new(&format!("JSON error: {value}"))
    }
}

impl From<toml::de::Error> for ErrorReport {
    fn from(value: toml::de::Error) -> Self {
        ErrorReport::new(&format!("invalid configuration: {value}"))
    }
}

impl From<walkdir::Error> for ErrorReport {
    fn from(value: walkdir::Error) -> Self {
        ErrorReport::new(&format!("directory traversal error: {value}"))
    }
}

impl From<StudyError> for ErrorReport {
    fn from(value: StudyError) -> Self {
        ErrorReport::new(&value.to_string())
    }
}

/// Errors raised by the study engine itself.
#[derive(Debug, PartialEq)]
pub enum StudyError {
    /// A remote listing could not be fetched. The previous catalog, if any,
    /// stays in effect.
    Listing(String),
    /// A confidence level outside `1..=3`.
    InvalidRating(i64),
    /// The durable store rejected a read or write. Never fatal.
    Persistence(String),
    /// No front had a matching back.
    EmptyCatalog,
    /// Rating or navigation was attempted before any catalog was loaded.
    NotLoaded,
    /// A direct jump past the end of the catalog.
    IndexOutOfRange(usize),
}

impl Display for StudyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StudyError::Listing(msg) => write!(f, "failed to list remote files: {msg}"),
            StudyError::InvalidRating(level) => {
                write!(f, "invalid confidence level {level}, expected 1, 2, or 3")
            }
            StudyError::Persistence(msg) => write!(f, "failed to persist progress: {msg}"),
            StudyError::EmptyCatalog => write!(f, "nothing to study: no matching card pairs"),
            StudyError::NotLoaded => write!(f, "no catalog loaded"),
            StudyError::IndexOutOfRange(index) => write!(f, "no card at index {index}"),
        }
    }
}

impl Error for StudyError {}
