//! Session configuration: difficulty tiers and gameplay policy
//!
//! Difficulty selects the per-question time budget from a fixed table;
//! options control the board layout and whether turn ownership is enforced
//! by the core or left advisory for the presentation layer.

use std::time::Duration;

use enum_map::{Enum, EnumMap, enum_map};
use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::{
    board::BoardLayout,
    constants::timer::{EASY_SECONDS, HARD_SECONDS, MEDIUM_SECONDS},
};

/// Difficulty label selecting the per-question time limit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Enum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// 15 seconds per question
    Easy,
    /// 10 seconds per question
    #[default]
    Medium,
    /// 5 seconds per question
    Hard,
}

impl Difficulty {
    /// The full difficulty → time-limit configuration table
    pub fn time_table() -> EnumMap<Self, Duration> {
        enum_map! {
            Self::Easy => Duration::from_secs(EASY_SECONDS),
            Self::Medium => Duration::from_secs(MEDIUM_SECONDS),
            Self::Hard => Duration::from_secs(HARD_SECONDS),
        }
    }

    /// The time budget a question gets at this difficulty
    pub fn time_limit(self) -> Duration {
        Self::time_table()[self]
    }
}

/// Gameplay policy options for a session
///
/// These are fixed at setup and apply for the whole session.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Validate)]
pub struct Options {
    /// Whether out-of-turn cell selection is rejected by the core
    ///
    /// When false (the default) turn ownership is advisory: the presentation
    /// layer is expected to gate its own controls, and the core accepts any
    /// requester.
    #[garde(skip)]
    pub enforce_turns: bool,
    /// The grid size boards are drawn at
    #[garde(skip)]
    pub layout: BoardLayout,
}
