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

use crate::catalog::Catalog;
use crate::collection::Collection;
use crate::error::Fallible;
use crate::error::StudyError;
use crate::persistence::ProgressMap;
use crate::types::card::CardKey;

pub fn list_orphans(directory: Option<String>) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    let persisted = coll.persistence()?.load();
    for key in find_orphans(&coll, &persisted)? {
        println!("{}", key);
    }
    Ok(())
}

/// Keys with persisted progress but no matching card. If nothing matches at
/// all, every persisted key is an orphan.
fn find_orphans(coll: &Collection, persisted: &ProgressMap) -> Fallible<Vec<CardKey>> {
    match Catalog::fetch(&coll.store, &coll.config.layout(), persisted) {
        Ok(catalog) => Ok(catalog.orphans(persisted)),
        Err(StudyError::EmptyCatalog) => {
            let mut keys: Vec<CardKey> = persisted.keys().cloned().collect();
            keys.sort();
            Ok(keys)
        }
        Err(e) => Err(e.into()),
    }
}
