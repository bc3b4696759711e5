//! The hosting layer over a session
//!
//! [`GameHost`] is what an embedding (an HTTP handler, a websocket loop, a
//! CLI) talks to. It owns the question bank and the grading policy, holds
//! at most one session at a time, and translates each request into the
//! corresponding session operation. A new setup replaces the previous
//! session wholesale, and only once it has succeeded.

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::{
    AlarmMessage,
    bank::QuestionBank,
    board::CellKey,
    config::{Difficulty, Options},
    evaluator::AnswerEvaluator,
    roster::Player,
    session::{self, Resolution, Selection, Session, Snapshot},
};

/// Errors the host can report
#[derive(Debug, Error)]
pub enum Error {
    /// The request needs a session and none has been set up
    #[error("no session has been set up")]
    NoSession,
    /// The session rejected the request
    #[error(transparent)]
    Session(#[from] session::Error),
}

/// Confirmation of a successful setup
#[serde_with::serde_as]
#[derive(Debug, Clone, Serialize)]
pub struct SetupReply {
    /// The assembled players in seat order
    pub players: Vec<Player>,
    /// Whether more than one player is seated
    pub is_multiplayer: bool,
    /// The per-question time budget the difficulty selected
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    pub time_limit: Duration,
}

/// The freshly drawn board a start hands back
#[derive(Debug, Clone, Serialize)]
pub struct StartReply {
    /// Category names in display order
    pub categories: Vec<String>,
    /// Point value tiers in ascending order
    pub tiers: Vec<u32>,
    /// Already-answered cell keys, empty on a fresh board
    pub answered: Vec<CellKey>,
    /// All players in seat order, scores zeroed
    pub players: Vec<Player>,
    /// The seat on the clock for the first selection
    pub current_seat: usize,
    /// Whether more than one player is seated
    pub is_multiplayer: bool,
}

/// The front door to one game at a time
///
/// Generic over the bank and the evaluator so embeddings choose their
/// content source and grading policy once, at construction.
#[derive(Debug)]
pub struct GameHost<B: QuestionBank, E: AnswerEvaluator> {
    bank: B,
    evaluator: E,
    session: Option<Session>,
}

impl<B: QuestionBank, E: AnswerEvaluator> GameHost<B, E> {
    /// Creates a host with no session
    pub fn new(bank: B, evaluator: E) -> Self {
        Self {
            bank,
            evaluator,
            session: None,
        }
    }

    /// Whether a session has been set up
    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// Sets up a new session, replacing any previous one
    ///
    /// The previous session survives a failed setup untouched.
    ///
    /// # Errors
    ///
    /// Returns [`session::Error::InvalidSetup`] if the roster cannot be
    /// assembled.
    pub fn setup(
        &mut self,
        names: &[String],
        difficulty: Difficulty,
        options: Options,
    ) -> Result<SetupReply, Error> {
        let session = Session::setup(names, difficulty, options)?;
        let snapshot = session.snapshot();
        self.session = Some(session);

        Ok(SetupReply {
            players: snapshot.players,
            is_multiplayer: snapshot.is_multiplayer,
            time_limit: snapshot.time_limit,
        })
    }

    /// Draws a board from the bank and begins play
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSession`] before any setup, or the session's
    /// error if the bank cannot supply a board.
    pub fn start(&mut self) -> Result<StartReply, Error> {
        let session = self.session.as_mut().ok_or(Error::NoSession)?;
        session.start(&self.bank)?;
        let snapshot = session.snapshot();

        Ok(StartReply {
            categories: snapshot.categories,
            tiers: snapshot.tiers,
            answered: snapshot.answered,
            players: snapshot.players,
            current_seat: snapshot.current_seat,
            is_multiplayer: snapshot.is_multiplayer,
        })
    }

    /// Selects a cell for the current question
    ///
    /// `schedule` receives the countdown's expiry alarm and the delay after
    /// which to deliver it back through [`Self::receive_alarm`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSession`] before any setup, or whatever the
    /// session rejects the selection with.
    pub fn select<S: FnMut(AlarmMessage, Duration)>(
        &mut self,
        key: CellKey,
        requester: Option<usize>,
        mut schedule: S,
    ) -> Result<Selection, Error> {
        let session = self.session.as_mut().ok_or(Error::NoSession)?;
        Ok(session.select_cell(key, requester, |alarm, after| {
            schedule(alarm.into(), after);
        })?)
    }

    /// Grades a submission against the active question
    ///
    /// `timed_out` marks a submission made on behalf of an elapsed clock,
    /// for embeddings that run their own countdown display; it is graded
    /// incorrect without consulting the evaluator, exactly like a delivered
    /// expiry alarm.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSession`] before any setup, or
    /// [`session::Error::NoActiveQuestion`] if nothing is on the clock.
    pub fn submit(&mut self, submitted: &str, timed_out: bool) -> Result<Resolution, Error> {
        let session = self.session.as_mut().ok_or(Error::NoSession)?;
        Ok(session.resolve_active(submitted, timed_out, &self.evaluator)?)
    }

    /// Delivers a previously scheduled alarm
    ///
    /// Stale alarms, and alarms arriving with no session, produce `None`.
    pub fn receive_alarm(&mut self, alarm: &AlarmMessage) -> Option<Resolution> {
        let session = self.session.as_mut()?;
        let AlarmMessage::Timer(alarm) = alarm;
        session.receive_alarm(alarm, &self.evaluator)
    }

    /// A read-only view of the current session
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoSession`] before any setup.
    pub fn snapshot(&self) -> Result<Snapshot, Error> {
        let session = self.session.as_ref().ok_or(Error::NoSession)?;
        Ok(session.snapshot())
    }
}
