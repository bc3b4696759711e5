//! Player roster and turn rotation
//!
//! This module owns everything about who is playing: display names with
//! placeholder defaulting, the stable seat order assigned at setup, score
//! bookkeeping, and the single turn-rotation rule (advance by one, modulo
//! the player count, after every resolution).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::roster::{MAX_NAME_LENGTH, MAX_PLAYER_COUNT};

/// One participant: display name, running score, and seat index
///
/// The seat index is the stable turn-order position assigned at setup.
/// Duplicate display names are permitted; seats are what distinguish
/// players. Scores are unbounded in both directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    score: i64,
    seat: usize,
}

impl Player {
    /// The display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current score
    pub fn score(&self) -> i64 {
        self.score
    }

    /// The stable turn-order index
    pub fn seat(&self) -> usize {
        self.seat
    }
}

/// Errors that can occur when assembling a roster
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// No player names were supplied
    #[error("at least one player is required")]
    Empty,
    /// More names than the supported maximum were supplied
    #[error("at most {MAX_PLAYER_COUNT} players are supported")]
    TooMany,
}

/// The ordered list of players plus whose turn it is
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    players: Vec<Player>,
    current: usize,
}

impl Roster {
    /// Builds a roster from raw display names
    ///
    /// Names are whitespace-trimmed; a name that is blank after trimming
    /// defaults to the positional placeholder `Player N` (1-based). Over-long
    /// names are truncated to the display limit. Nothing is deduplicated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] for an empty list and [`Error::TooMany`]
    /// above the supported maximum.
    pub fn assemble(names: &[String]) -> Result<Self, Error> {
        if names.is_empty() {
            return Err(Error::Empty);
        }
        if names.len() > MAX_PLAYER_COUNT {
            return Err(Error::TooMany);
        }

        let players = names
            .iter()
            .enumerate()
            .map(|(seat, raw)| {
                let trimmed = rustrict::trim_whitespace(raw);
                let name = if trimmed.is_empty() {
                    format!("Player {}", seat + 1)
                } else {
                    trimmed.chars().take(MAX_NAME_LENGTH).collect()
                };
                Player {
                    name,
                    score: 0,
                    seat,
                }
            })
            .collect();

        Ok(Self {
            players,
            current: 0,
        })
    }

    /// Number of players
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether the roster is empty (never true after a successful assemble)
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Whether more than one player is seated
    pub fn is_multiplayer(&self) -> bool {
        self.players.len() > 1
    }

    /// All players in seat order
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// The seat index whose turn it is
    pub fn current_seat(&self) -> usize {
        self.current
    }

    /// The player whose turn it is
    ///
    /// # Panics
    ///
    /// Never panics after a successful assemble: the current seat always
    /// refers to an existing player.
    pub fn current(&self) -> &Player {
        &self.players[self.current]
    }

    /// Advances the turn to the next seat, wrapping to zero
    ///
    /// With a single player this leaves the seat at zero.
    pub fn advance(&mut self) {
        self.current = (self.current + 1) % self.players.len();
    }

    /// Applies a score delta to the current player, returning their new
    /// score
    pub fn apply(&mut self, delta: i64) -> i64 {
        let player = &mut self.players[self.current];
        player.score += delta;
        player.score
    }

    /// Zeroes all scores and returns the turn to seat zero
    pub fn reset(&mut self) {
        for player in &mut self.players {
            player.score = 0;
        }
        self.current = 0;
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_assemble_empty_fails() {
        assert!(matches!(Roster::assemble(&[]), Err(Error::Empty)));
    }

    #[test]
    fn test_assemble_too_many_fails() {
        let result = Roster::assemble(&names(&["a", "b", "c", "d", "e"]));
        assert!(matches!(result, Err(Error::TooMany)));
    }

    #[test]
    fn test_blank_name_gets_placeholder() {
        let roster = Roster::assemble(&names(&["Alice", "  ", ""])).unwrap();
        assert_eq!(roster.players()[0].name(), "Alice");
        assert_eq!(roster.players()[1].name(), "Player 2");
        assert_eq!(roster.players()[2].name(), "Player 3");
    }

    #[test]
    fn test_single_blank_name() {
        let roster = Roster::assemble(&names(&[""])).unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.players()[0].name(), "Player 1");
        assert!(!roster.is_multiplayer());
    }

    #[test]
    fn test_duplicate_names_permitted() {
        let roster = Roster::assemble(&names(&["Sam", "Sam"])).unwrap();
        assert_eq!(roster.players()[0].name(), "Sam");
        assert_eq!(roster.players()[1].name(), "Sam");
        assert_eq!(roster.players()[0].seat(), 0);
        assert_eq!(roster.players()[1].seat(), 1);
    }

    #[test]
    fn test_name_trimmed_and_truncated() {
        let long = "x".repeat(MAX_NAME_LENGTH + 10);
        let roster = Roster::assemble(&names(&["  Alice  ", &long])).unwrap();
        assert_eq!(roster.players()[0].name(), "Alice");
        assert_eq!(roster.players()[1].name().chars().count(), MAX_NAME_LENGTH);
    }

    #[test]
    fn test_turn_rotation_wraps() {
        let mut roster = Roster::assemble(&names(&["a", "b", "c"])).unwrap();
        assert_eq!(roster.current_seat(), 0);
        roster.advance();
        assert_eq!(roster.current_seat(), 1);
        roster.advance();
        assert_eq!(roster.current_seat(), 2);
        roster.advance();
        assert_eq!(roster.current_seat(), 0);
    }

    #[test]
    fn test_single_player_rotation_is_noop() {
        let mut roster = Roster::assemble(&names(&["solo"])).unwrap();
        for _ in 0..5 {
            roster.advance();
            assert_eq!(roster.current_seat(), 0);
        }
    }

    #[test]
    fn test_apply_delta_unbounded() {
        let mut roster = Roster::assemble(&names(&["a"])).unwrap();
        assert_eq!(roster.apply(-300), -300);
        assert_eq!(roster.apply(200), -100);
        assert_eq!(roster.current().score(), -100);
    }

    #[test]
    fn test_apply_targets_current_player() {
        let mut roster = Roster::assemble(&names(&["a", "b"])).unwrap();
        roster.apply(100);
        roster.advance();
        roster.apply(-200);
        assert_eq!(roster.players()[0].score(), 100);
        assert_eq!(roster.players()[1].score(), -200);
    }

    #[test]
    fn test_reset_clears_scores_and_turn() {
        let mut roster = Roster::assemble(&names(&["a", "b"])).unwrap();
        roster.apply(500);
        roster.advance();
        roster.reset();
        assert_eq!(roster.current_seat(), 0);
        assert!(roster.players().iter().all(|p| p.score() == 0));
    }
}
