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

use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;

use crate::catalog::Layout;
use crate::error::Fallible;

pub const CONFIG_FILE_NAME: &str = "cardflip.toml";

/// Collection settings from `cardflip.toml`. Every key is optional.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Subdirectory holding front images.
    pub front_prefix: String,
    /// Subdirectory holding back images.
    pub back_prefix: String,
    /// Base URL under which images are published. Without it, cards point at
    /// local `file://` paths.
    pub public_base_url: Option<String>,
    /// Key of the progress snapshot in the store.
    pub storage_key: String,
}

impl Default for Config {
    fn default() -> Self {
        let layout = Layout::default();
        Self {
            front_prefix: layout.front_prefix,
            back_prefix: layout.back_prefix,
            public_base_url: None,
            storage_key: "flashcard-confidence".to_string(),
        }
    }
}

impl Config {
    /// Read the config file in `directory`, or the defaults if there is none.
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE_NAME);
        if !path.exists() {
            log::debug!("No {CONFIG_FILE_NAME}, using defaults.");
            return Ok(Self::default());
        }
        let content = read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn layout(&self) -> Layout {
        Layout {
            front_prefix: self.front_prefix.clone(),
            back_prefix: self.back_prefix.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use super::*;
    use crate::helper::create_tmp_directory;

    #[test]
    fn test_missing_file() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        assert_eq!(Config::load(&dir)?, Config::default());
        Ok(())
    }

    #[test]
    fn test_partial_file() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        write(
            dir.join(CONFIG_FILE_NAME),
            "front_prefix = \"fronts\"\npublic_base_url = \"https://cdn.test\"\n",
        )?;
        let config = Config::load(&dir)?;
        assert_eq!(config.front_prefix, "fronts");
        assert_eq!(config.back_prefix, "back");
        assert_eq!(config.public_base_url.as_deref(), Some("https://cdn.test"));
        assert_eq!(config.storage_key, "flashcard-confidence");
        Ok(())
    }

    #[test]
    fn test_unknown_key() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        write(dir.join(CONFIG_FILE_NAME), "colour = \"red\"\n")?;
        assert!(Config::load(&dir).is_err());
        Ok(())
    }
}
