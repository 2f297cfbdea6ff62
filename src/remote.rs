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

use std::path::PathBuf;

use walkdir::WalkDir;

use crate::error::StudyError;
use crate::types::timestamp::Timestamp;

/// One object in a listing.
#[derive(Clone, PartialEq, Debug)]
pub struct ObjectEntry {
    /// The object's name relative to the listed prefix.
    pub name: String,
    pub last_modified: Option<Timestamp>,
}

/// Where card images live.
pub trait ObjectStore {
    /// List the objects directly under `prefix`.
    fn list(&self, prefix: &str) -> Result<Vec<ObjectEntry>, StudyError>;

    /// The absolute URL of the object at `path`. Never fails.
    fn public_url(&self, path: &str) -> String;
}

/// An object store backed by a local directory. Prefixes are
/// subdirectories.
pub struct DirectoryStore {
    /// Absolute path to the collection root.
    root: PathBuf,
    /// If set, URLs are built from this instead of `file://` paths.
    base_url: Option<String>,
}

impl DirectoryStore {
    pub fn new(root: PathBuf, base_url: Option<String>) -> Self {
        Self { root, base_url }
    }
}

impl ObjectStore for DirectoryStore {
    fn list(&self, prefix: &str) -> Result<Vec<ObjectEntry>, StudyError> {
        let dir = self.root.join(prefix);
        if !dir.is_dir() {
            return Err(StudyError::Listing(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
        let mut entries = Vec::new();
        let walker = WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();
        for entry in walker {
            let entry = entry.map_err(|e| StudyError::Listing(e.to_string()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            // Skip `.DS_Store` and friends.
            if name.starts_with('.') {
                continue;
            }
            let last_modified = entry
                .metadata()
                .ok()
                .and_then(|m| m.modified().ok())
                .map(Timestamp::from);
            entries.push(ObjectEntry {
                name,
                last_modified,
            });
        }
        log::debug!("Listed {} objects under {prefix}/.", entries.len());
        Ok(entries)
    }

    fn public_url(&self, path: &str) -> String {
        match &self.base_url {
            Some(base) => format!("{}/{}", base.trim_end_matches('/'), path),
            None => format!("file://{}", self.root.join(path).display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs::create_dir_all;

    use super::*;
    use crate::error::Fallible;
    use crate::helper::create_tmp_collection;
    use crate::helper::create_tmp_directory;

    #[test]
    fn test_list_sorted_and_filtered() -> Fallible<()> {
        let root = create_tmp_collection(&["2.png", "1.png", ".DS_Store"], &[])?;
        create_dir_all(root.join("front/nested"))?;
        let store = DirectoryStore::new(root, None);
        let names: Vec<String> = store
            .list("front")
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["1.png", "2.png"]);
        Ok(())
    }

    #[test]
    fn test_list_records_modification_time() -> Fallible<()> {
        let root = create_tmp_collection(&["1.png"], &[])?;
        let store = DirectoryStore::new(root, None);
        let entries = store.list("front").unwrap();
        assert!(entries[0].last_modified.is_some());
        Ok(())
    }

    #[test]
    fn test_list_missing_prefix() -> Fallible<()> {
        let root = create_tmp_directory()?;
        let store = DirectoryStore::new(root, None);
        let result = store.list("front");
        assert!(matches!(result, Err(StudyError::Listing(_))));
        Ok(())
    }

    #[test]
    fn test_public_url() {
        let store = DirectoryStore::new(
            PathBuf::from("/data/cards"),
            Some("https://cdn.example.com/flashcards/".to_string()),
        );
        assert_eq!(
            store.public_url("front/1.png"),
            "https://cdn.example.com/flashcards/front/1.png"
        );
        let store = DirectoryStore::new(PathBuf::from("/data/cards"), None);
        assert_eq!(
            store.public_url("front/1.png"),
            "file:///data/cards/front/1.png"
        );
    }
}
