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

use clap::Parser;
use clap::Subcommand;

use crate::cmd::check::check_collection;
use crate::cmd::export::export_collection;
use crate::cmd::gallery::add_gallery_card;
use crate::cmd::gallery::delete_gallery_card;
use crate::cmd::gallery::list_gallery;
use crate::cmd::orphans::list_orphans;
use crate::cmd::reset::reset_progress;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_collection_stats;
use crate::cmd::study::study;
use crate::db::GalleryCardId;
use crate::db::NewGalleryCard;
use crate::error::Fallible;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Check that the collection has cards to study.
    Check {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Print collection statistics.
    Stats {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Output format.
        #[arg(long, default_value_t = StatsFormat::Json)]
        format: StatsFormat,
    },
    /// Study cards interactively.
    Study {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Start in test mode: weighted-random draws instead of in-order cycling.
        #[arg(long)]
        test: bool,
    },
    /// Forget all saved progress.
    Reset {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// List saved progress that no longer matches any card.
    Orphans {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Export the cards and their progress as JSON.
    Export {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Manage the card gallery.
    Gallery {
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
        #[command(subcommand)]
        command: GalleryCommand,
    },
}

#[derive(Subcommand)]
enum GalleryCommand {
    /// List gallery cards.
    List,
    /// Add a gallery card.
    Add {
        name: String,
        front_image_url: String,
        back_image_url: String,
        #[arg(long, default_value = "")]
        category: String,
    },
    /// Delete a gallery card by ID.
    Delete { id: GalleryCardId },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Check { directory } => check_collection(directory),
        Command::Stats { directory, format } => print_collection_stats(directory, format),
        Command::Study { directory, test } => study(directory, test),
        Command::Reset { directory } => reset_progress(directory),
        Command::Orphans { directory } => list_orphans(directory),
        Command::Export { directory } => export_collection(directory),
        Command::Gallery { directory, command } => match command {
            GalleryCommand::List => list_gallery(directory),
            GalleryCommand::Add {
                name,
                front_image_url,
                back_image_url,
                category,
            } => add_gallery_card(
                directory,
                NewGalleryCard {
                    name,
                    front_image_url,
                    back_image_url,
                    category,
                },
            ),
            GalleryCommand::Delete { id } => delete_gallery_card(directory, id),
        },
    }
}
