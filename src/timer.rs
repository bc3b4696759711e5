//! Per-question countdown controller
//!
//! The countdown itself runs outside the core: when a cell is selected the
//! session hands the caller an expiry alarm to schedule after the time
//! limit, and the alarm is delivered back through
//! [`Session::receive_alarm`](crate::session::Session::receive_alarm).
//! Cancellation is by generation: every start bumps a counter that is baked
//! into the scheduled alarm, so an alarm from a countdown that has since
//! been resolved or restarted no longer matches and is discarded. This is
//! what keeps a late expiry from resolving an already-resolved question.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use web_time::SystemTime;

use crate::board::CellKey;

/// The phases of a question countdown
///
/// `Running` is entered only when a cell becomes active; `Resolved` and
/// `Expired` record which of the two racing resolution paths won.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerPhase {
    /// No countdown exists
    #[default]
    Idle,
    /// A countdown is ticking toward its deadline
    Running,
    /// The question was answered before the deadline
    Resolved,
    /// The deadline passed and the question was resolved as a timeout
    Expired,
}

/// Scheduled messages delivered back to the session when a countdown ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlarmMessage {
    /// The countdown for a question reached zero
    Expired {
        /// The cell whose countdown ended
        key: CellKey,
        /// Generation of the countdown the alarm belongs to
        generation: u64,
    },
}

/// State for the single per-question countdown
///
/// Exactly one countdown exists at a time; starting a new one implicitly
/// cancels the previous one through the generation bump.
#[serde_with::serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionTimer {
    phase: TimerPhase,
    #[serde_as(as = "serde_with::DurationSeconds<u64>")]
    limit: Duration,
    started_at: Option<SystemTime>,
    generation: u64,
}

impl QuestionTimer {
    /// The current phase
    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    /// The generation of the most recent countdown
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Starts a countdown with the given limit, returning its generation
    ///
    /// Any previous countdown becomes stale: its pending alarm carries an
    /// older generation and will be rejected by [`Self::expire`].
    pub fn start(&mut self, limit: Duration) -> u64 {
        self.generation += 1;
        self.phase = TimerPhase::Running;
        self.limit = limit;
        self.started_at = Some(SystemTime::now());
        self.generation
    }

    /// Marks the running countdown as resolved by a manual submission
    ///
    /// Returns whether a countdown was actually running; calling this in any
    /// other phase is a no-op.
    pub fn resolve(&mut self) -> bool {
        if self.phase == TimerPhase::Running {
            self.phase = TimerPhase::Resolved;
            true
        } else {
            false
        }
    }

    /// Attempts to expire the countdown a delivered alarm belongs to
    ///
    /// Returns `true` only if a countdown is running and the alarm's
    /// generation matches; a stale alarm (superseded or already resolved)
    /// returns `false` and changes nothing.
    pub fn expire(&mut self, generation: u64) -> bool {
        if self.phase == TimerPhase::Running && generation == self.generation {
            self.phase = TimerPhase::Expired;
            true
        } else {
            false
        }
    }

    /// Returns the countdown to idle, as on a fresh board
    pub fn clear(&mut self) {
        self.phase = TimerPhase::Idle;
        self.started_at = None;
    }

    /// Whole seconds left on the countdown, from the limit down to zero
    /// inclusive
    ///
    /// Reports zero once resolved or expired, and the full limit while idle
    /// (the value a display would show before the countdown starts).
    pub fn remaining_secs(&self) -> u64 {
        match self.phase {
            TimerPhase::Idle => self.limit.as_secs(),
            TimerPhase::Running => {
                let elapsed = self
                    .started_at
                    .and_then(|t| t.elapsed().ok())
                    .unwrap_or_default();
                self.limit.as_secs().saturating_sub(elapsed.as_secs())
            }
            TimerPhase::Resolved | TimerPhase::Expired => 0,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle() {
        let timer = QuestionTimer::default();
        assert_eq!(timer.phase(), TimerPhase::Idle);
        assert_eq!(timer.remaining_secs(), 0);
    }

    #[test]
    fn test_start_runs_and_counts_down_from_limit() {
        let mut timer = QuestionTimer::default();
        timer.start(Duration::from_secs(10));
        assert_eq!(timer.phase(), TimerPhase::Running);
        assert_eq!(timer.remaining_secs(), 10);
    }

    #[test]
    fn test_resolve_beats_expiry() {
        let mut timer = QuestionTimer::default();
        let generation = timer.start(Duration::from_secs(10));

        assert!(timer.resolve());
        assert_eq!(timer.phase(), TimerPhase::Resolved);

        // The alarm scheduled for this countdown is now stale
        assert!(!timer.expire(generation));
        assert_eq!(timer.phase(), TimerPhase::Resolved);
        assert_eq!(timer.remaining_secs(), 0);
    }

    #[test]
    fn test_expiry_beats_resolve() {
        let mut timer = QuestionTimer::default();
        let generation = timer.start(Duration::from_secs(5));

        assert!(timer.expire(generation));
        assert_eq!(timer.phase(), TimerPhase::Expired);

        assert!(!timer.resolve());
        assert_eq!(timer.phase(), TimerPhase::Expired);
    }

    #[test]
    fn test_restart_invalidates_previous_generation() {
        let mut timer = QuestionTimer::default();
        let first = timer.start(Duration::from_secs(10));
        let second = timer.start(Duration::from_secs(10));
        assert_ne!(first, second);

        assert!(!timer.expire(first));
        assert_eq!(timer.phase(), TimerPhase::Running);
        assert!(timer.expire(second));
        assert_eq!(timer.phase(), TimerPhase::Expired);
    }

    #[test]
    fn test_expire_when_idle_is_noop() {
        let mut timer = QuestionTimer::default();
        assert!(!timer.expire(0));
        assert_eq!(timer.phase(), TimerPhase::Idle);
    }

    #[test]
    fn test_clear_returns_to_idle() {
        let mut timer = QuestionTimer::default();
        timer.start(Duration::from_secs(10));
        timer.resolve();
        timer.clear();
        assert_eq!(timer.phase(), TimerPhase::Idle);
    }

    #[test]
    fn test_alarm_message_serialization() {
        let alarm = AlarmMessage::Expired {
            key: CellKey::new("History", 200),
            generation: 3,
        };
        let serialized = serde_json::to_string(&alarm).unwrap();
        let deserialized: AlarmMessage = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, alarm);
    }
}
