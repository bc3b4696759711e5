//! # Quizboard Game Library
//!
//! This library provides the core game logic for a turn-based trivia board
//! game. It handles session setup, board drawing, turn rotation, question
//! countdowns, answer grading, and final standings, behind a small hosting
//! surface an embedding can drive from any transport.

#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
use serde::{Deserialize, Serialize};

pub mod constants;

pub mod bank;
pub mod board;
pub mod config;
pub mod evaluator;
pub mod host;
pub mod roster;
pub mod session;
pub mod standings;
pub mod timer;

/// Replies handed back by the host, ready for transmission
///
/// This enum aggregates every reply shape the host produces so an embedding
/// can serialize them through one channel.
#[derive(Debug, Serialize, Clone, derive_more::From)]
pub enum Reply {
    /// Confirmation of a successful setup
    Setup(host::SetupReply),
    /// The freshly drawn board
    Start(host::StartReply),
    /// The result of a cell selection
    Selection(session::Selection),
    /// One resolved question
    Resolution(session::Resolution),
    /// The full session view
    Snapshot(session::Snapshot),
}

impl Reply {
    /// Converts the reply to a JSON string for transmission
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }
}

/// Messages scheduled for later delivery back to the host
///
/// These messages are handed to the embedding's scheduler when a countdown
/// starts and delivered back through
/// [`GameHost::receive_alarm`](host::GameHost::receive_alarm) once the
/// delay elapses.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::From, Serialize, Deserialize)]
pub enum AlarmMessage {
    /// A question countdown reached its deadline
    Timer(timer::AlarmMessage),
}
