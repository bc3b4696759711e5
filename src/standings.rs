//! Final standings and performance grading
//!
//! Once every cell on the board is answered the session computes a single
//! [`Outcome`]: a graded performance tier for a solo run, or a ranked
//! standings table with winner and tie detection for a multiplayer one. The
//! outcome is computed exactly once and cached by the session.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    constants::standings::{TOP_TIER_PER_CELL, UPPER_TIER_PER_CELL},
    roster::Roster,
};

/// Graded performance band for a solo session
///
/// Thresholds scale with the board size so a reduced board grades on the
/// same curve as a full one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceTier {
    /// Score at or above 200 points per cell
    Champion,
    /// Score at or above 100 points per cell
    Star,
    /// Non-negative score
    Steady,
    /// Negative score
    Rookie,
}

impl PerformanceTier {
    /// Grades a final score against the size of the board it was earned on
    pub fn grade(score: i64, total_cells: usize) -> Self {
        let cells = i64::try_from(total_cells).unwrap_or(i64::MAX);
        if score >= cells * TOP_TIER_PER_CELL {
            Self::Champion
        } else if score >= cells * UPPER_TIER_PER_CELL {
            Self::Star
        } else if score >= 0 {
            Self::Steady
        } else {
            Self::Rookie
        }
    }
}

/// One row of the final multiplayer standings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// The player's display name
    pub name: String,
    /// The player's seat index
    pub seat: usize,
    /// The player's final score
    pub score: i64,
}

/// The final result of a completed session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Outcome {
    /// A single player's graded run
    Solo {
        /// The final score
        score: i64,
        /// The graded performance band
        tier: PerformanceTier,
    },
    /// A ranked multiplayer result
    Multiplayer {
        /// All players in descending score order, ties in seat order
        standings: Vec<Standing>,
        /// Seats sharing the top score
        winners: Vec<usize>,
        /// Whether more than one player holds the top score
        tied: bool,
    },
}

/// Computes the final outcome for a finished board
///
/// Solo sessions are graded on the per-cell curve; multiplayer sessions are
/// sorted by descending score with the seat order breaking ties, and every
/// seat matching the top score counts as a winner.
pub fn judge(roster: &Roster, total_cells: usize) -> Outcome {
    if !roster.is_multiplayer() {
        let score = roster.players()[0].score();
        return Outcome::Solo {
            score,
            tier: PerformanceTier::grade(score, total_cells),
        };
    }

    let standings: Vec<Standing> = roster
        .players()
        .iter()
        .sorted_by_key(|player| std::cmp::Reverse(player.score()))
        .map(|player| Standing {
            name: player.name().to_owned(),
            seat: player.seat(),
            score: player.score(),
        })
        .collect();

    let top = standings[0].score;
    let winners: Vec<usize> = standings
        .iter()
        .take_while(|standing| standing.score == top)
        .map(|standing| standing.seat)
        .collect();

    Outcome::Multiplayer {
        tied: winners.len() > 1,
        standings,
        winners,
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn roster_with_scores(scores: &[i64]) -> Roster {
        let names: Vec<String> = (0..scores.len()).map(|i| format!("p{i}")).collect();
        let mut roster = Roster::assemble(&names).unwrap();
        for &score in scores {
            roster.apply(score);
            roster.advance();
        }
        roster
    }

    #[test]
    fn test_grade_thresholds_full_board() {
        // 25 cells: champion at 5000, star at 2500
        assert_eq!(PerformanceTier::grade(5000, 25), PerformanceTier::Champion);
        assert_eq!(PerformanceTier::grade(4999, 25), PerformanceTier::Star);
        assert_eq!(PerformanceTier::grade(2500, 25), PerformanceTier::Star);
        assert_eq!(PerformanceTier::grade(2499, 25), PerformanceTier::Steady);
        assert_eq!(PerformanceTier::grade(0, 25), PerformanceTier::Steady);
        assert_eq!(PerformanceTier::grade(-100, 25), PerformanceTier::Rookie);
    }

    #[test]
    fn test_grade_scales_with_board_size() {
        // 9 cells: the same curve, smaller absolutes
        assert_eq!(PerformanceTier::grade(1800, 9), PerformanceTier::Champion);
        assert_eq!(PerformanceTier::grade(900, 9), PerformanceTier::Star);
        assert_eq!(PerformanceTier::grade(899, 9), PerformanceTier::Steady);
    }

    #[test]
    fn test_solo_outcome() {
        let roster = roster_with_scores(&[1200]);
        let outcome = judge(&roster, 9);
        assert_eq!(
            outcome,
            Outcome::Solo {
                score: 1200,
                tier: PerformanceTier::Star,
            }
        );
    }

    #[test]
    fn test_multiplayer_ranking() {
        let roster = roster_with_scores(&[300, 800, -100]);
        let Outcome::Multiplayer {
            standings,
            winners,
            tied,
        } = judge(&roster, 25)
        else {
            panic!("expected multiplayer outcome");
        };

        let order: Vec<usize> = standings.iter().map(|s| s.seat).collect();
        assert_eq!(order, vec![1, 0, 2]);
        assert_eq!(winners, vec![1]);
        assert!(!tied);
    }

    #[test]
    fn test_multiplayer_tie_at_top() {
        let roster = roster_with_scores(&[600, 600, 400]);
        let Outcome::Multiplayer {
            standings,
            winners,
            tied,
        } = judge(&roster, 25)
        else {
            panic!("expected multiplayer outcome");
        };

        // Stable sort keeps seat order within the tied pair
        let order: Vec<usize> = standings.iter().map(|s| s.seat).collect();
        assert_eq!(order, vec![0, 1, 2]);
        assert_eq!(winners, vec![0, 1]);
        assert!(tied);
    }

    #[test]
    fn test_multiplayer_all_tied() {
        let roster = roster_with_scores(&[0, 0]);
        let Outcome::Multiplayer { winners, tied, .. } = judge(&roster, 25) else {
            panic!("expected multiplayer outcome");
        };
        assert_eq!(winners, vec![0, 1]);
        assert!(tied);
    }

    #[test]
    fn test_outcome_serialization_round_trip() {
        let outcome = judge(&roster_with_scores(&[500, -200]), 25);
        let serialized = serde_json::to_string(&outcome).unwrap();
        let deserialized: Outcome = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, outcome);
    }
}
