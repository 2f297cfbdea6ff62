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
use crate::error::Fallible;
use crate::error::fail;
use crate::selection::Mode;
use crate::study::StudyState;

pub fn reset_progress(directory: Option<String>) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    // No catalog needed: clearing the store resets every card on next load.
    let mut state = StudyState::new(coll.config.layout(), coll.persistence()?, Mode::Study);
    state.reset_progress();
    if state.is_degraded() {
        return fail("could not clear saved progress.");
    }
    println!("Progress reset.");
    Ok(())
}
