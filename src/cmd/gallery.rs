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

use crate::collection::Collection;
use crate::db::GalleryCardId;
use crate::db::NewGalleryCard;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::timestamp::Timestamp;

pub fn list_gallery(directory: Option<String>) -> Fallible<()> {
    let db = Collection::new(directory)?.database()?;
    for card in db.gallery_cards()? {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            card.id,
            card.key(),
            card.category,
            card.front_image_url,
            card.back_image_url
        );
    }
    Ok(())
}

pub fn add_gallery_card(directory: Option<String>, card: NewGalleryCard) -> Fallible<()> {
    if card.name.trim().is_empty() {
        return fail("card name must not be empty.");
    }
    let db = Collection::new(directory)?.database()?;
    let id = db.insert_gallery_card(&card, Timestamp::now())?;
    println!("{id}");
    Ok(())
}

pub fn delete_gallery_card(directory: Option<String>, id: GalleryCardId) -> Fallible<()> {
    let db = Collection::new(directory)?.database()?;
    if !db.delete_gallery_card(id)? {
        return fail(format!("no gallery card with ID {id}."));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::create_tmp_directory;

    fn new_card(name: &str) -> NewGalleryCard {
        NewGalleryCard {
            name: name.to_string(),
            front_image_url: "https://cdn.test/fronts/a.png".to_string(),
            back_image_url: "https://cdn.test/backs/a.png".to_string(),
            category: "misc".to_string(),
        }
    }

    #[test]
    fn test_gallery_commands() -> Fallible<()> {
        let root = create_tmp_directory()?;
        let directory = Some(root.display().to_string());
        add_gallery_card(directory.clone(), new_card("alpha"))?;
        assert!(add_gallery_card(directory.clone(), new_card("  ")).is_err());
        list_gallery(directory.clone())?;

        let db = Collection::new(directory.clone())?.database()?;
        let cards = db.gallery_cards()?;
        assert_eq!(cards.len(), 1);
        delete_gallery_card(directory.clone(), cards[0].id)?;
        assert!(delete_gallery_card(directory, cards[0].id).is_err());
        Ok(())
    }
}
