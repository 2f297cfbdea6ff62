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

use clap::ValueEnum;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::collection::Collection;
use crate::error::Fallible;
use crate::types::card::CardKey;
use crate::types::confidence::ConfidenceLevel;
use crate::types::timestamp::Timestamp;

#[derive(ValueEnum, Clone)]
pub enum StatsFormat {
    /// Plain text output.
    Text,
    /// JSON output.
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Text => write!(f, "text"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

pub fn print_collection_stats(directory: Option<String>, format: StatsFormat) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    let mut persistence = coll.persistence()?;
    let persisted = persistence.load();
    let catalog = Catalog::fetch(&coll.store, &coll.config.layout(), &persisted)?;
    let orphans = catalog.orphans(&persisted);
    let stats = Stats::new(&catalog, &orphans, Timestamp::now());
    match format {
        StatsFormat::Text => {
            println!("Cards:          {}", stats.card_count);
            println!("Reviewed:       {}", stats.reviewed_count);
            println!("Due:            {}", stats.due_count);
            println!("Total reviews:  {}", stats.review_count);
            println!("Incorrect:      {}", stats.by_confidence.incorrect);
            println!("Unsure:         {}", stats.by_confidence.unsure);
            println!("Correct:        {}", stats.by_confidence.correct);
            println!("Orphaned:       {}", stats.orphan_count);
        }
        StatsFormat::Json => {
            let stats_json = serde_json::to_string_pretty(&stats)?;
            println!("{}", stats_json);
        }
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    card_count: usize,
    reviewed_count: usize,
    due_count: usize,
    review_count: u64,
    by_confidence: ConfidenceHistogram,
    orphan_count: usize,
}

#[derive(Serialize, Default)]
pub struct ConfidenceHistogram {
    incorrect: usize,
    unsure: usize,
    correct: usize,
}

impl Stats {
    fn new(catalog: &Catalog, orphans: &[CardKey], now: Timestamp) -> Self {
        let mut by_confidence = ConfidenceHistogram::default();
        let mut reviewed_count = 0;
        let mut review_count = 0;
        for card in catalog.cards() {
            let progress = &card.progress;
            match progress.confidence_level {
                ConfidenceLevel::Incorrect => by_confidence.incorrect += 1,
                ConfidenceLevel::Unsure => by_confidence.unsure += 1,
                ConfidenceLevel::Correct => by_confidence.correct += 1,
            }
            if !progress.is_new() {
                reviewed_count += 1;
            }
            review_count += u64::from(progress.times_reviewed);
        }
        Self {
            card_count: catalog.len(),
            reviewed_count,
            due_count: catalog.due_count(now),
            review_count,
            by_confidence,
            orphan_count: orphans.len(),
        }
    }
}
