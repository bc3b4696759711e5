//! Board grid data model
//!
//! This module defines the category × point-value grid a session is played
//! on: cell keys, the prompt/answer cells behind them, and the assembled
//! board with its structural completeness guarantees. Boards are immutable
//! once a session starts; all mutation during play happens in the session's
//! answered set, never here.

use std::{collections::HashMap, fmt::Display, num::ParseIntError, str::FromStr};

use garde::Validate;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use thiserror::Error;

use crate::constants::board::{
    FULL_CATEGORY_COUNT, FULL_TIERS, MAX_ANSWER_LENGTH, MAX_PROMPT_LENGTH, REDUCED_CATEGORY_COUNT,
    REDUCED_TIERS,
};

/// The grid size a session is played on
///
/// The tiers and category count are fixed per layout; the bank must supply
/// a prompt for every category × tier intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoardLayout {
    /// Five categories, five value tiers (100 through 500)
    #[default]
    Full,
    /// Three categories, three value tiers (100 through 300)
    Reduced,
}

impl BoardLayout {
    /// The ascending point value tiers of this layout
    pub fn tiers(self) -> &'static [u32] {
        match self {
            Self::Full => &FULL_TIERS,
            Self::Reduced => &REDUCED_TIERS,
        }
    }

    /// The number of categories this layout expects
    pub fn category_count(self) -> usize {
        match self {
            Self::Full => FULL_CATEGORY_COUNT,
            Self::Reduced => REDUCED_CATEGORY_COUNT,
        }
    }
}

/// A unique identifier for one category × value intersection
///
/// Keys display as `category:value`, which is also their serialized form
/// and the representation the answered set is exchanged in.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, SerializeDisplay, DeserializeFromStr,
)]
pub struct CellKey {
    category: String,
    value: u32,
}

impl CellKey {
    /// Creates a key for the given category and point value
    pub fn new(category: impl Into<String>, value: u32) -> Self {
        Self {
            category: category.into(),
            value,
        }
    }

    /// The category name of this key
    pub fn category(&self) -> &str {
        &self.category
    }

    /// The point value of this key
    pub fn value(&self) -> u32 {
        self.value
    }
}

impl Display for CellKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.category, self.value)
    }
}

/// Errors that can occur when parsing a cell key from its string form
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseKeyError {
    /// The string has no `:` separator between category and value
    #[error("missing ':' separator")]
    MissingSeparator,
    /// The value part is not a valid point value
    #[error("invalid point value: {0}")]
    InvalidValue(#[from] ParseIntError),
}

impl FromStr for CellKey {
    type Err = ParseKeyError;

    /// Parses a `category:value` string
    ///
    /// The split happens at the last `:` so category names containing the
    /// separator still round-trip.
    ///
    /// # Errors
    ///
    /// Returns [`ParseKeyError`] if the separator is absent or the value
    /// part is not a number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (category, value) = s.rsplit_once(':').ok_or(ParseKeyError::MissingSeparator)?;
        Ok(Self {
            category: category.to_owned(),
            value: value.parse()?,
        })
    }
}

/// One question behind a cell: the prompt shown to players and the
/// canonical answer it is graded against
///
/// The answer must never reach the presentation layer before the cell is
/// resolved; the board therefore only hands out whole cells to the session,
/// which decides what to reveal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Cell {
    /// The question text shown when the cell is selected
    #[garde(length(chars, min = 1, max = MAX_PROMPT_LENGTH))]
    prompt: String,
    /// The canonical answer used for grading
    #[garde(length(chars, min = 1, max = MAX_ANSWER_LENGTH))]
    answer: String,
}

impl Cell {
    /// Creates a cell from a prompt and its canonical answer
    pub fn new(prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            answer: answer.into(),
        }
    }

    /// The question text
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// The canonical answer
    pub fn answer(&self) -> &str {
        &self.answer
    }
}

/// Errors that can occur when assembling a board
#[derive(Debug, Error)]
pub enum Error {
    /// The category list is empty
    #[error("board has no categories")]
    NoCategories,
    /// The same category name appears twice
    #[error("duplicate category {0:?}")]
    DuplicateCategory(String),
    /// A category × tier intersection has no cell behind it
    #[error("missing cell for {0}")]
    MissingCell(CellKey),
    /// A cell's prompt or answer text is out of bounds
    #[error("invalid cell content: {0}")]
    InvalidCell(garde::Report),
}

/// The full set of cells for a session
///
/// A board is structurally complete by construction: every category has a
/// cell for every tier of its layout. Category order is stable and is the
/// display order chosen at session start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    layout: BoardLayout,
    categories: Vec<String>,
    cells: HashMap<CellKey, Cell>,
}

impl Board {
    /// Assembles a board, verifying structural completeness
    ///
    /// # Errors
    ///
    /// Returns [`Error`] if the category list is empty or has duplicates,
    /// if any category × tier cell is missing, or if any cell's text fails
    /// validation.
    pub fn new(
        layout: BoardLayout,
        categories: Vec<String>,
        cells: HashMap<CellKey, Cell>,
    ) -> Result<Self, Error> {
        if categories.is_empty() {
            return Err(Error::NoCategories);
        }
        let mut seen = std::collections::HashSet::new();
        for category in &categories {
            if !seen.insert(category.as_str()) {
                return Err(Error::DuplicateCategory(category.clone()));
            }
        }
        for category in &categories {
            for &value in layout.tiers() {
                let key = CellKey::new(category.clone(), value);
                let cell = cells.get(&key).ok_or_else(|| Error::MissingCell(key))?;
                cell.validate().map_err(Error::InvalidCell)?;
            }
        }
        Ok(Self {
            layout,
            categories,
            cells,
        })
    }

    /// The layout this board was assembled for
    pub fn layout(&self) -> BoardLayout {
        self.layout
    }

    /// The ordered category names
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// The ascending point value tiers
    pub fn tiers(&self) -> &'static [u32] {
        self.layout.tiers()
    }

    /// Looks up the cell behind a key, if any
    pub fn cell(&self, key: &CellKey) -> Option<&Cell> {
        self.cells.get(key)
    }

    /// Whether the key names a cell on this board
    pub fn contains(&self, key: &CellKey) -> bool {
        self.cells.contains_key(key)
    }

    /// Total number of cells (categories × tiers)
    pub fn total_cells(&self) -> usize {
        self.categories.len() * self.layout.tiers().len()
    }
}
