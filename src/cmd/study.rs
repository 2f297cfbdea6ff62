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

//! A line-oriented study loop over stdin/stdout.

use std::io::BufRead;
use std::io::Write;
use std::io::stdin;
use std::io::stdout;

use crate::collection::Collection;
use crate::error::Fallible;
use crate::error::StudyError;
use crate::selection::Mode;
use crate::study::StudyState;

const HELP: &str = "n: next  p: previous  f: flip  1/2/3: rate  t: toggle mode  g N: go to card N  r: reset progress  q: quit";

pub fn study(directory: Option<String>, test: bool) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    let mode = if test { Mode::Test } else { Mode::Study };
    let mut state = coll.study(mode)?;
    let stdin = stdin();
    run_study(&mut state, stdin.lock(), stdout().lock())
}

/// Which side of the current card is shown.
#[derive(Clone, Copy, PartialEq, Debug)]
enum Side {
    Front,
    Back,
}

enum Action {
    Next,
    Prev,
    Flip,
    Rate(i64),
    Toggle,
    Jump(usize),
    Reset,
    Quit,
}

fn parse_action(line: &str) -> Option<Action> {
    let mut words = line.split_whitespace();
    let action = match (words.next()?, words.next()) {
        ("n", None) => Action::Next,
        ("p", None) => Action::Prev,
        ("f", None) => Action::Flip,
        ("t", None) => Action::Toggle,
        ("r", None) => Action::Reset,
        ("q", None) => Action::Quit,
        // Cards are numbered from one on screen.
        ("g", Some(n)) => Action::Jump(n.parse::<usize>().ok()?.checked_sub(1)?),
        (level, None) => Action::Rate(level.parse().ok()?),
        _ => return None,
    };
    if words.next().is_some() {
        return None;
    }
    Some(action)
}

pub fn run_study<R: BufRead, W: Write>(
    state: &mut StudyState,
    input: R,
    mut output: W,
) -> Fallible<()> {
    let mut side = Side::Front;
    writeln!(output, "{HELP}")?;
    show(state, side, &mut output)?;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let Some(action) = parse_action(&line) else {
            writeln!(output, "Unknown command. {HELP}")?;
            continue;
        };
        match action {
            Action::Next => {
                if state.next()?.is_some() {
                    side = Side::Front;
                }
            }
            Action::Prev => {
                if state.prev()?.is_some() {
                    side = Side::Front;
                }
            }
            Action::Flip => {
                side = match side {
                    Side::Front => Side::Back,
                    Side::Back => Side::Front,
                };
            }
            Action::Rate(level) => {
                let rated = match u8::try_from(level) {
                    Ok(level) => state.rate_current(level),
                    Err(_) => Err(StudyError::InvalidRating(level)),
                };
                match rated {
                    Ok(card) => {
                        writeln!(
                            output,
                            "Rated {} as {}.",
                            card.key(),
                            card.progress.confidence_level
                        )?;
                        if state.next()?.is_some() {
                            side = Side::Front;
                        }
                    }
                    Err(e) => writeln!(output, "{e}")?,
                }
            }
            Action::Toggle => {
                let mode = match state.mode() {
                    Mode::Study => Mode::Test,
                    Mode::Test => Mode::Study,
                };
                state.set_mode(mode);
            }
            Action::Jump(index) => match state.jump_to(index) {
                Ok(_) => side = Side::Front,
                Err(e) => writeln!(output, "{e}")?,
            },
            Action::Reset => {
                state.reset_progress();
                writeln!(output, "Progress reset.")?;
            }
            Action::Quit => break,
        }
        show(state, side, &mut output)?;
    }
    let stats = state.stats();
    writeln!(
        output,
        "Reviewed {} cards, {} correct ({}%). Best streak: {}.",
        stats.cards_reviewed,
        stats.correct_answers,
        stats.success_rate(),
        stats.best_streak
    )?;
    if state.is_degraded() {
        writeln!(output, "Warning: progress from this session was not saved.")?;
    }
    Ok(())
}

fn show<W: Write>(state: &StudyState, side: Side, output: &mut W) -> Fallible<()> {
    let Some(catalog) = state.catalog() else {
        return Ok(());
    };
    let Some(card) = state.current_card() else {
        return Ok(());
    };
    writeln!(
        output,
        "[{}/{}] card {} ({})",
        state.current_index() + 1,
        catalog.len(),
        card.key(),
        state.mode()
    )?;
    match side {
        Side::Front => writeln!(output, "front: {}", card.front_url())?,
        Side::Back => writeln!(output, "back: {}", card.back_url())?,
    }
    Ok(())
}
