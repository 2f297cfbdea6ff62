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

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Transaction;
use serde::Serialize;

use crate::error::Fallible;
use crate::error::StudyError;
use crate::persistence::KeyValueStore;
use crate::types::card::CardKey;
use crate::types::timestamp::Timestamp;

pub struct Database {
    conn: Connection,
}

pub type GalleryCardId = i64;

/// A named card in the gallery, with a free-form category.
#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryCard {
    pub id: GalleryCardId,
    pub name: String,
    pub front_image_url: String,
    pub back_image_url: String,
    pub category: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl GalleryCard {
    /// The key a study card matched from a file of this name would have.
    pub fn key(&self) -> CardKey {
        CardKey::from_file_name(&self.name)
    }
}

pub struct NewGalleryCard {
    pub name: String,
    pub front_image_url: String,
    pub back_image_url: String,
    pub category: String,
}

impl Database {
    pub fn new(database_path: &str) -> Fallible<Self> {
        let mut conn = Connection::open(database_path)?;
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                log::debug!("Creating database schema.");
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        Ok(Self { conn })
    }

    /// Add a card to the gallery, returning its ID.
    pub fn insert_gallery_card(
        &self,
        card: &NewGalleryCard,
        now: Timestamp,
    ) -> Fallible<GalleryCardId> {
        let sql = "insert into gallery_cards (name, front_image_url, back_image_url, category, created_at, updated_at) values (?, ?, ?, ?, ?, ?) returning card_id;";
        let id: GalleryCardId = self.conn.query_row(
            sql,
            (
                &card.name,
                &card.front_image_url,
                &card.back_image_url,
                &card.category,
                now,
                now,
            ),
            |row| row.get(0),
        )?;
        log::debug!("Added gallery card {id} ({}).", card.name);
        Ok(id)
    }

    /// All gallery cards, ordered by name.
    pub fn gallery_cards(&self) -> Fallible<Vec<GalleryCard>> {
        let sql = "select card_id, name, front_image_url, back_image_url, category, created_at, updated_at from gallery_cards order by name, card_id;";
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([])?;
        let mut cards = Vec::new();
        while let Some(row) = rows.next()? {
            cards.push(GalleryCard {
                id: row.get(0)?,
                name: row.get(1)?,
                front_image_url: row.get(2)?,
                back_image_url: row.get(3)?,
                category: row.get(4)?,
                created_at: row.get(5)?,
                updated_at: row.get(6)?,
            });
        }
        Ok(cards)
    }

    /// Delete a gallery card. Returns false if no card has that ID.
    pub fn delete_gallery_card(&self, id: GalleryCardId) -> Fallible<bool> {
        let count = self
            .conn
            .execute("delete from gallery_cards where card_id = ?;", [id])?;
        Ok(count > 0)
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>, StudyError> {
        let sql = "select value from progress_store where key = ?;";
        self.conn
            .query_row(sql, [key], |row| row.get(0))
            .optional()
            .map_err(|e| StudyError::Persistence(e.to_string()))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StudyError> {
        let sql = "insert into progress_store (key, value, updated_at) values (?, ?, ?) on conflict (key) do update set value = excluded.value, updated_at = excluded.updated_at;";
        self.conn
            .execute(sql, (key, value, Timestamp::now()))
            .map_err(|e| StudyError::Persistence(e.to_string()))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StudyError> {
        self.conn
            .execute("delete from progress_store where key = ?;", [key])
            .map_err(|e| StudyError::Persistence(e.to_string()))?;
        Ok(())
    }
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["progress_store"], |row| row.get(0))?;
    Ok(count > 0)
}
