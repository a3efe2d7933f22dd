//! Parsing of the custom selection list.
//!
//! The operator types whitespace-separated tokens, each either a number
//! (`4`) or an inclusive range (`1-3`). A descending range such as `5-3`
//! selects nothing. Numbers outside `1..=N` are accepted by the parser and
//! ignored when the selection is applied.

use std::collections::BTreeSet;
use std::num::IntErrorKind;
use std::str::FromStr;

use thiserror::Error;

/// Error type for an unparseable selection list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The answer contained no tokens.
    #[error("no folder numbers given")]
    Empty,

    /// A token is not a non-negative integer.
    #[error("'{0}' is not a folder number")]
    InvalidNumber(String),

    /// A token containing `-` is not `START-END`.
    #[error("'{0}' is not a range like 1-3")]
    InvalidRange(String),
}

/// One token of a selection list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionToken {
    /// A single folder number.
    Single(usize),
    /// Every number from `start` to `end`, inclusive. Empty if `start > end`.
    Range { start: usize, end: usize },
}

impl FromStr for SelectionToken {
    type Err = SelectionError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        if token.contains('-') {
            let mut parts = token.split('-');
            let (Some(start), Some(end), None) = (parts.next(), parts.next(), parts.next()) else {
                return Err(SelectionError::InvalidRange(token.to_string()));
            };
            match (parse_number(start), parse_number(end)) {
                (Some(start), Some(end)) => Ok(Self::Range { start, end }),
                _ => Err(SelectionError::InvalidRange(token.to_string())),
            }
        } else {
            parse_number(token)
                .map(Self::Single)
                .ok_or_else(|| SelectionError::InvalidNumber(token.to_string()))
        }
    }
}

/// Parse a folder number, saturating integers too large for `usize`.
///
/// Saturated numbers are beyond any listing and get clamped away by
/// [`Selection::indices`].
fn parse_number(text: &str) -> Option<usize> {
    match text.parse::<usize>() {
        Ok(n) => Some(n),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Some(usize::MAX),
        Err(_) => None,
    }
}

/// A parsed selection list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    tokens: Vec<SelectionToken>,
}

impl FromStr for Selection {
    type Err = SelectionError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let tokens = input
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<SelectionToken>, _>>()?;
        if tokens.is_empty() {
            return Err(SelectionError::Empty);
        }
        Ok(Self { tokens })
    }
}

impl Selection {
    /// The deduplicated set of selected numbers within `1..=count`.
    ///
    /// Ranges are clamped before expansion, so huge bounds stay cheap.
    #[must_use]
    pub fn indices(&self, count: usize) -> BTreeSet<usize> {
        let mut selected = BTreeSet::new();
        for token in &self.tokens {
            match *token {
                SelectionToken::Single(n) => {
                    if (1..=count).contains(&n) {
                        selected.insert(n);
                    }
                }
                SelectionToken::Range { start, end } => {
                    selected.extend(start.max(1)..=end.min(count));
                }
            }
        }
        selected
    }
}

/// Parse a selection answer and resolve it against a set of `count` entries.
///
/// # Errors
///
/// Returns [`SelectionError`] if any token is malformed or there are none.
///
/// # Example
///
/// ```
/// use vscache::selection::parse_selection;
///
/// let picked = parse_selection("2 4-4 9", 5).unwrap();
/// assert_eq!(picked.into_iter().collect::<Vec<_>>(), vec![2, 4]);
/// assert!(parse_selection("1,2", 5).is_err());
/// ```
pub fn parse_selection(input: &str, count: usize) -> Result<BTreeSet<usize>, SelectionError> {
    Ok(input.parse::<Selection>()?.indices(count))
}
