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

use std::env::current_dir;
use std::path::PathBuf;

use crate::config::Config;
use crate::db::Database;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::persistence::PersistenceAdapter;
use crate::remote::DirectoryStore;
use crate::selection::Mode;
use crate::study::StudyState;

pub const DATABASE_FILE_NAME: &str = "cardflip.db";

/// A collection directory: images under the front and back prefixes, an
/// optional config file, and the progress database.
pub struct Collection {
    pub directory: PathBuf,
    pub config: Config,
    pub store: DirectoryStore,
}

impl Collection {
    pub fn new(directory: Option<String>) -> Fallible<Self> {
        let directory: PathBuf = match directory {
            Some(dir) => PathBuf::from(dir),
            None => current_dir()?,
        };
        let directory = if directory.exists() {
            directory.canonicalize()?
        } else {
            return fail("directory does not exist.");
        };
        let config = Config::load(&directory)?;
        let store = DirectoryStore::new(directory.clone(), config.public_base_url.clone());
        Ok(Self {
            directory,
            config,
            store,
        })
    }

    pub fn database(&self) -> Fallible<Database> {
        let db_path: PathBuf = self.directory.join(DATABASE_FILE_NAME);
        let db_path: &str = db_path
            .to_str()
            .ok_or_else(|| ErrorReport::new("invalid path"))?;
        Database::new(db_path)
    }

    pub fn persistence(&self) -> Fallible<PersistenceAdapter> {
        let db = self.database()?;
        Ok(PersistenceAdapter::new(
            Box::new(db),
            self.config.storage_key.clone(),
        ))
    }

    /// A study session over this collection, with the catalog loaded.
    pub fn study(&self, mode: Mode) -> Fallible<StudyState> {
        let mut state = StudyState::new(self.config.layout(), self.persistence()?, mode);
        state.load(&self.store)?;
        Ok(state)
    }
}
