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

use crate::catalog::Catalog;
use crate::collection::Collection;
use crate::error::Fallible;
use crate::types::card::CardKey;
use crate::types::progress::Progress;

pub fn export_collection(directory: Option<String>) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    let persisted = coll.persistence()?.load();
    let catalog = Catalog::fetch(&coll.store, &coll.config.layout(), &persisted)?;
    let export = get_export(&catalog);
    let json: String = serde_json::to_string_pretty(&export)?;
    println!("{json}");
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Export<'a> {
    cards: Vec<CardExport<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CardExport<'a> {
    key: &'a CardKey,
    front_url: &'a str,
    back_url: &'a str,
    progress: &'a Progress,
}

fn get_export(catalog: &Catalog) -> Export<'_> {
    let cards = catalog
        .cards()
        .iter()
        .map(|card| CardExport {
            key: card.key(),
            front_url: card.front_url(),
            back_url: card.back_url(),
            progress: &card.progress,
        })
        .collect();
    Export { cards }
}
