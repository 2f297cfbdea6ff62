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

use std::cell::Cell;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::File;
use std::fs::create_dir_all;
use std::path::PathBuf;
use std::rc::Rc;

use tempfile::tempdir;

use crate::error::Fallible;
use crate::error::StudyError;
use crate::persistence::KeyValueStore;
use crate::remote::ObjectEntry;
use crate::remote::ObjectStore;

pub fn create_tmp_directory() -> Fallible<PathBuf> {
    let dir: PathBuf = tempdir()?.keep().canonicalize()?;
    Ok(dir)
}

/// Create a collection directory with empty image files under `front/` and
/// `back/`.
pub fn create_tmp_collection(fronts: &[&str], backs: &[&str]) -> Fallible<PathBuf> {
    let root = create_tmp_directory()?;
    let front = root.join("front");
    let back = root.join("back");
    create_dir_all(&front)?;
    create_dir_all(&back)?;
    for name in fronts {
        File::create(front.join(name))?;
    }
    for name in backs {
        File::create(back.join(name))?;
    }
    Ok(root)
}

/// An in-memory key-value store. Clones share the same entries, so a test
/// can keep a handle after moving the store into an adapter.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
    failing_reads: Rc<Cell<bool>>,
    failing_writes: Rc<Cell<bool>>,
}

impl MemoryStore {
    pub fn insert(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    /// The stored value, bypassing any read failure.
    pub fn entry(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Make every subsequent read fail.
    pub fn fail_reads(&self) {
        self.failing_reads.set(true);
    }

    /// Make every subsequent write fail.
    pub fn fail_writes(&self) {
        self.failing_writes.set(true);
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StudyError> {
        if self.failing_reads.get() {
            return Err(StudyError::Persistence("store unreadable".to_string()));
        }
        Ok(self.entry(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StudyError> {
        if self.failing_writes.get() {
            return Err(StudyError::Persistence("quota exceeded".to_string()));
        }
        self.insert(key, value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StudyError> {
        if self.failing_writes.get() {
            return Err(StudyError::Persistence("store unavailable".to_string()));
        }
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// An object store with fixed `front` and `back` listings.
#[derive(Default)]
pub struct FakeStore {
    pub front: Vec<String>,
    pub back: Vec<String>,
    /// If set, listing the `back` prefix fails.
    pub fail_back: bool,
}

impl FakeStore {
    pub fn new(front: &[&str], back: &[&str]) -> Self {
        Self {
            front: front.iter().map(|s| s.to_string()).collect(),
            back: back.iter().map(|s| s.to_string()).collect(),
            fail_back: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_back: true,
            ..Self::default()
        }
    }
}

impl ObjectStore for FakeStore {
    fn list(&self, prefix: &str) -> Result<Vec<ObjectEntry>, StudyError> {
        let names = match prefix {
            "front" => &self.front,
            "back" if self.fail_back => {
                return Err(StudyError::Listing("connection refused".to_string()));
            }
            "back" => &self.back,
            _ => return Ok(Vec::new()),
        };
        Ok(names
            .iter()
            .map(|name| ObjectEntry {
                name: name.clone(),
                last_modified: None,
            })
            .collect())
    }

    fn public_url(&self, path: &str) -> String {
        format!("https://cdn.test/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tmp_collection() -> Fallible<()> {
        let root = create_tmp_collection(&["1.png"], &["1.png", "2.png"])?;
        assert!(root.join("front/1.png").is_file());
        assert!(root.join("back/2.png").is_file());
        Ok(())
    }
}
