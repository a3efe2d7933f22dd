//! Interactive choice of which stale cache folders to remove.
//!
//! The operator sees the numbered stale set and answers with one token:
//!
//! - `a`: remove everything listed
//! - `n`: leave everything and exit
//! - `d`: pick folders by number (`1 3 5-7`), review the pick, confirm `y`/`n`
//!
//! Nothing is ever asked twice. Any answer that is not understood ends the
//! run without removing anything, so an ambiguous intent means starting the
//! tool again rather than guessing.

pub mod parse;

use std::io;

use crate::classify::{RemovalSet, StaleSet};
use crate::error::{Stage, Stop};
use crate::prompt::Prompt;
use crate::report::{present_selected, present_stale};

pub use parse::{parse_selection, Selection, SelectionError, SelectionToken};

const TOP_LEVEL_QUESTION: &str =
    "Type 'a' to delete all, 'n' to exit or 'd' to selectively delete (select numbers)";
const CUSTOM_QUESTION: &str = "Enter the numbers of the folders to delete separated by a space\n\
                               You can also input a range like 1-3";
const CONFIRM_QUESTION: &str = "Do you want to delete the above folders? (y/n)";

/// Top-level answer to the stale-set listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// `a`
    All,
    /// `n`
    Nothing,
    /// `d`
    Custom,
}

impl Choice {
    /// Interpret a top-level answer.
    #[must_use]
    pub fn from_answer(answer: &str) -> Option<Self> {
        match answer {
            "a" => Some(Self::All),
            "n" => Some(Self::Nothing),
            "d" => Some(Self::Custom),
            _ => None,
        }
    }
}

/// Present the stale set and return the operator-confirmed removal set.
///
/// # Errors
///
/// Returns an I/O error only if the prompt itself fails.
pub fn select(stale: StaleSet, prompt: &mut dyn Prompt) -> io::Result<Stage<RemovalSet>> {
    present_stale(prompt, &stale)?;

    let answer = prompt.ask(TOP_LEVEL_QUESTION)?;
    match Choice::from_answer(&answer) {
        Some(Choice::All) => {
            log::debug!("Operator selected all {} stale folder(s)", stale.len());
            Ok(Stage::Continue(stale))
        }
        Some(Choice::Nothing) => Ok(Stage::Stop(Stop::Declined)),
        Some(Choice::Custom) => select_custom(&stale, prompt),
        None => {
            log::debug!("Unrecognized top-level answer: {:?}", answer);
            Ok(Stage::Stop(Stop::InvalidInput(format!(
                "'{answer}' is not one of a, n, d"
            ))))
        }
    }
}

/// Custom-selection sub-protocol: number list, review, confirmation.
fn select_custom(stale: &StaleSet, prompt: &mut dyn Prompt) -> io::Result<Stage<RemovalSet>> {
    let answer = prompt.ask(CUSTOM_QUESTION)?;
    let numbers = match parse_selection(&answer, stale.len()) {
        Ok(numbers) => numbers,
        Err(e) => {
            log::debug!("Rejected selection {:?}: {}", answer, e);
            return Ok(Stage::Stop(Stop::InvalidInput(e.to_string())));
        }
    };
    log::debug!("Selected numbers: {:?}", numbers);

    let selected = stale.retain_numbers(|n| numbers.contains(&n));
    present_selected(prompt, &selected)?;

    let confirm = prompt.ask(CONFIRM_QUESTION)?;
    match confirm.as_str() {
        "y" => Ok(Stage::Continue(selected)),
        "n" => Ok(Stage::Stop(Stop::Declined)),
        other => {
            log::debug!("Unrecognized confirmation: {:?}", other);
            Ok(Stage::Stop(Stop::InvalidInput(format!(
                "'{other}' is not one of y, n"
            ))))
        }
    }
}
