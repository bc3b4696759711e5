//! The session state machine
//!
//! A [`Session`] owns one game from setup to completion: the drawn board,
//! the answered set, the single active question with its countdown, the
//! roster with its turn rotation, and the cached final outcome. Every
//! mutation goes through one of the operations here, and each operation
//! either completes fully or leaves the session untouched.

use std::{collections::HashSet, time::Duration};

use once_cell_serde::sync::OnceCell;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    bank::{self, QuestionBank},
    board::{Board, CellKey},
    config::{Difficulty, Options},
    evaluator::AnswerEvaluator,
    roster::{self, Player, Roster},
    standings::{self, Outcome},
    timer::{AlarmMessage, QuestionTimer},
};

/// Errors a session operation can report
#[derive(Debug, Error)]
pub enum Error {
    /// The roster could not be assembled from the given names
    #[error("invalid setup: {0}")]
    InvalidSetup(#[from] roster::Error),
    /// The bank could not supply a board
    #[error("board unavailable: {0}")]
    BoardUnavailable(#[from] bank::Error),
    /// A cell was selected while another question is still active
    #[error("a question is already in progress")]
    QuestionInProgress,
    /// A resolution was requested with no active question
    #[error("no question is active")]
    NoActiveQuestion,
    /// The requesting seat is not the current player and turns are enforced
    #[error("it is not this player's turn")]
    NotCurrentTurn,
    /// The key names no cell on the board
    #[error("no such cell: {0}")]
    UnknownCell(CellKey),
    /// The operation needs a started board
    #[error("the session has not been started")]
    NotStarted,
}

/// The question handed out when a cell is selected
///
/// Carries the prompt and the seat answering it, never the canonical
/// answer.
#[serde_with::serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveQuestion {
    /// The selected cell
    pub key: CellKey,
    /// The question text to display
    pub prompt: String,
    /// The seat on the clock
    pub seat: usize,
    /// Display name of the seat on the clock
    pub player: String,
    /// The countdown budget for this question
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    pub time_limit: Duration,
}

/// The result of a cell selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Selection {
    /// The cell was already answered; nothing changed
    AlreadyAnswered {
        /// The cell that was re-selected
        key: CellKey,
    },
    /// The cell became the active question
    Question(ActiveQuestion),
}

/// Everything a caller needs to present one resolved question
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// The cell that was resolved
    pub key: CellKey,
    /// Whether the submission was graded correct
    pub correct: bool,
    /// Whether the resolution came from the countdown expiring
    pub timed_out: bool,
    /// The canonical answer, safe to reveal now
    pub canonical_answer: String,
    /// The seat whose score moved
    pub scoring_seat: usize,
    /// That seat's score after the delta
    pub score: i64,
    /// All players after scoring, in seat order
    pub players: Vec<Player>,
    /// The seat on the clock for the next selection
    pub next_seat: usize,
    /// Whether this resolution finished the board
    pub completed: bool,
    /// The final outcome, present exactly when the board is finished
    pub outcome: Option<Outcome>,
}

/// A read-only view of the whole session for reconnecting displays
#[serde_with::serde_as]
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// Category names in display order, empty before the first start
    pub categories: Vec<String>,
    /// Point value tiers in ascending order, empty before the first start
    pub tiers: Vec<u32>,
    /// Answered cells in sorted key order
    pub answered: Vec<CellKey>,
    /// All players in seat order
    pub players: Vec<Player>,
    /// The seat on the clock
    pub current_seat: usize,
    /// Whether more than one player is seated
    pub is_multiplayer: bool,
    /// The active question's prompt, if one is on the clock
    pub active_prompt: Option<String>,
    /// Whole seconds left on the active countdown
    pub remaining_secs: u64,
    /// The session difficulty
    pub difficulty: Difficulty,
    /// The per-question time budget
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    pub time_limit: Duration,
    /// Whether the board is finished
    pub completed: bool,
    /// The final outcome, if the board is finished
    pub outcome: Option<Outcome>,
}

/// One game from setup to completion
#[serde_with::serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    difficulty: Difficulty,
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    time_limit: Duration,
    options: Options,
    roster: Roster,
    board: Option<Board>,
    answered: HashSet<CellKey>,
    active: Option<CellKey>,
    timer: QuestionTimer,
    outcome: OnceCell<Outcome>,
}

impl Session {
    /// Creates a session from player names and configuration
    ///
    /// The session is not playable until [`Self::start`] draws a board.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSetup`] if the roster cannot be assembled.
    pub fn setup(names: &[String], difficulty: Difficulty, options: Options) -> Result<Self, Error> {
        let roster = Roster::assemble(names)?;
        Ok(Self {
            difficulty,
            time_limit: difficulty.time_limit(),
            options,
            roster,
            board: None,
            answered: HashSet::new(),
            active: None,
            timer: QuestionTimer::default(),
            outcome: OnceCell::new(),
        })
    }

    /// Draws a fresh board and resets all play state
    ///
    /// Scores, the answered set, the turn, the countdown, and any cached
    /// outcome are all cleared. The board is drawn before anything is
    /// touched, so a failing draw leaves the previous game fully intact.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BoardUnavailable`] if the bank cannot supply a
    /// board for the configured layout.
    pub fn start<B: QuestionBank>(&mut self, bank: &B) -> Result<(), Error> {
        let board = bank.draw_board(self.options.layout)?;

        self.board = Some(board);
        self.answered.clear();
        self.active = None;
        self.timer.clear();
        self.roster.reset();
        self.outcome = OnceCell::new();
        Ok(())
    }

    /// Whether every cell on the board has been answered
    pub fn completed(&self) -> bool {
        self.outcome.get().is_some()
    }

    /// The cached final outcome, if the board is finished
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.get()
    }

    /// Selects a cell, putting its question on the clock
    ///
    /// Re-selecting an answered cell is not an error: it reports
    /// [`Selection::AlreadyAnswered`] and changes nothing, so a stale
    /// double-click never disturbs play. On success the countdown starts and
    /// `schedule` is handed the expiry alarm to deliver back through
    /// [`Self::receive_alarm`] after the time limit.
    ///
    /// `requester` is the seat asking; it is only checked when turn
    /// enforcement is on.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotStarted`] before the first start,
    /// [`Error::UnknownCell`] for a key off the board,
    /// [`Error::NotCurrentTurn`] for an enforced out-of-turn request, and
    /// [`Error::QuestionInProgress`] while another question is active.
    pub fn select_cell<S: FnMut(AlarmMessage, Duration)>(
        &mut self,
        key: CellKey,
        requester: Option<usize>,
        mut schedule: S,
    ) -> Result<Selection, Error> {
        let Some(board) = &self.board else {
            return Err(Error::NotStarted);
        };

        if self.answered.contains(&key) {
            return Ok(Selection::AlreadyAnswered { key });
        }
        let Some(cell) = board.cell(&key) else {
            return Err(Error::UnknownCell(key));
        };
        if self.options.enforce_turns
            && requester.is_some_and(|seat| seat != self.roster.current_seat())
        {
            return Err(Error::NotCurrentTurn);
        }
        if self.active.is_some() {
            return Err(Error::QuestionInProgress);
        }

        let prompt = cell.prompt().to_owned();
        let generation = self.timer.start(self.time_limit);
        self.active = Some(key.clone());
        schedule(
            AlarmMessage::Expired {
                key: key.clone(),
                generation,
            },
            self.time_limit,
        );

        Ok(Selection::Question(ActiveQuestion {
            key,
            prompt,
            seat: self.roster.current_seat(),
            player: self.roster.current().name().to_owned(),
            time_limit: self.time_limit,
        }))
    }

    /// Resolves the active question against a submission
    ///
    /// A timed-out resolution is graded incorrect without consulting the
    /// evaluator; it scores identically to a wrong submission. Either way
    /// the cell joins the answered set, the current player's score moves by
    /// the cell's value, and the turn advances by one seat. If this was the
    /// last open cell the final outcome is computed and cached.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoActiveQuestion`] if nothing is on the clock.
    pub fn resolve_active<E: AnswerEvaluator>(
        &mut self,
        submitted: &str,
        timed_out: bool,
        evaluator: &E,
    ) -> Result<Resolution, Error> {
        let Some(key) = self.active.take() else {
            return Err(Error::NoActiveQuestion);
        };
        let Some(board) = &self.board else {
            return Err(Error::NotStarted);
        };
        let cell = board.cell(&key).ok_or(Error::NoActiveQuestion)?;
        let canonical_answer = cell.answer().to_owned();
        let total_cells = board.total_cells();

        if timed_out {
            let generation = self.timer.generation();
            self.timer.expire(generation);
        } else {
            self.timer.resolve();
        }

        let correct = !timed_out && evaluator.is_correct(submitted, &canonical_answer);
        let value = i64::from(key.value());
        let delta = if correct { value } else { -value };

        let scoring_seat = self.roster.current_seat();
        let score = self.roster.apply(delta);
        self.answered.insert(key.clone());

        let completed = self.answered.len() == total_cells;
        let outcome = if completed {
            Some(
                self.outcome
                    .get_or_init(|| standings::judge(&self.roster, total_cells))
                    .clone(),
            )
        } else {
            None
        };

        self.roster.advance();

        Ok(Resolution {
            key,
            correct,
            timed_out,
            canonical_answer,
            scoring_seat,
            score,
            players: self.roster.players().to_vec(),
            next_seat: self.roster.current_seat(),
            completed,
            outcome,
        })
    }

    /// Delivers a scheduled expiry alarm
    ///
    /// Returns the timeout resolution if the alarm still applies, and
    /// `None` for a stale alarm: one for a cell no longer active, or from a
    /// countdown that was resolved or superseded in the meantime.
    pub fn receive_alarm<E: AnswerEvaluator>(
        &mut self,
        alarm: &AlarmMessage,
        evaluator: &E,
    ) -> Option<Resolution> {
        let AlarmMessage::Expired { key, generation } = alarm;
        if self.active.as_ref() != Some(key) {
            return None;
        }
        if !self.timer.expire(*generation) {
            return None;
        }
        self.resolve_active("", true, evaluator).ok()
    }

    /// A read-only view of the full session state
    ///
    /// Safe to send to any display at any time: the active question's
    /// prompt is included but its answer never is.
    pub fn snapshot(&self) -> Snapshot {
        let active_prompt = self.active.as_ref().and_then(|key| {
            self.board
                .as_ref()
                .and_then(|board| board.cell(key))
                .map(|cell| cell.prompt().to_owned())
        });
        let mut answered: Vec<CellKey> = self.answered.iter().cloned().collect();
        answered.sort_unstable();

        Snapshot {
            categories: self
                .board
                .as_ref()
                .map(|board| board.categories().to_vec())
                .unwrap_or_default(),
            tiers: self
                .board
                .as_ref()
                .map(|board| board.tiers().to_vec())
                .unwrap_or_default(),
            answered,
            players: self.roster.players().to_vec(),
            current_seat: self.roster.current_seat(),
            is_multiplayer: self.roster.is_multiplayer(),
            active_prompt,
            remaining_secs: self.timer.remaining_secs(),
            difficulty: self.difficulty,
            time_limit: self.time_limit,
            completed: self.completed(),
            outcome: self.outcome.get().cloned(),
        }
    }
}
