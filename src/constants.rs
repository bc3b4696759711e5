//! Configuration constants for the quizboard game system
//!
//! This module contains all the configuration limits and fixed tables
//! used throughout the session core, grouped by the component they
//! constrain.

/// Board grid configuration constants
pub mod board {
    /// Point value tiers for the full board configuration, ascending
    pub const FULL_TIERS: [u32; 5] = [100, 200, 300, 400, 500];
    /// Point value tiers for the reduced board configuration, ascending
    pub const REDUCED_TIERS: [u32; 3] = [100, 200, 300];
    /// Number of categories on a full board
    pub const FULL_CATEGORY_COUNT: usize = 5;
    /// Number of categories on a reduced board
    pub const REDUCED_CATEGORY_COUNT: usize = 3;
    /// Maximum length of a question prompt in characters
    pub const MAX_PROMPT_LENGTH: usize = 300;
    /// Maximum length of a canonical answer in characters
    pub const MAX_ANSWER_LENGTH: usize = 200;
}

/// Player roster configuration constants
pub mod roster {
    /// Maximum number of players in a single session
    pub const MAX_PLAYER_COUNT: usize = 4;
    /// Maximum length of a player display name in characters
    pub const MAX_NAME_LENGTH: usize = 30;
}

/// Question countdown configuration constants
pub mod timer {
    /// Seconds allowed per question on easy difficulty
    pub const EASY_SECONDS: u64 = 15;
    /// Seconds allowed per question on medium difficulty
    pub const MEDIUM_SECONDS: u64 = 10;
    /// Seconds allowed per question on hard difficulty
    pub const HARD_SECONDS: u64 = 5;
}

/// Final standings configuration constants
pub mod standings {
    /// Per-cell score multiple required for the top performance tier
    pub const TOP_TIER_PER_CELL: i64 = 200;
    /// Per-cell score multiple required for the upper performance tier
    pub const UPPER_TIER_PER_CELL: i64 = 100;
}
