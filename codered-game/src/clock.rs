//! Virtual-time scheduler for driving a [`ShiftSession`] without a browser.
//!
//! The clock owns at most one repeating countdown ticker and at most one
//! deferred transition. After every event it reconciles both against what
//! the session currently wants, so a ticker is replaced (never stacked)
//! when the question changes and dropped once feedback is showing.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::TICK_INTERVAL_MS;
use crate::session::{ShiftSession, TickOutcome};
use crate::state::{PendingKind, PendingTransition, Phase, QuestionToken};

/// Something the clock delivered to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockEvent {
    Tick {
        at_ms: u64,
        token: QuestionToken,
        remaining_tenths: u16,
    },
    TimedOut {
        at_ms: u64,
        token: QuestionToken,
    },
    Resolved {
        at_ms: u64,
        token: QuestionToken,
        kind: PendingKind,
        phase: Phase,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Ticker {
    token: QuestionToken,
    next_due: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Deferred {
    pending: PendingTransition,
    due: u64,
}

#[derive(Debug, Clone, Default)]
pub struct ShiftClock {
    now_ms: u64,
    ticker: Option<Ticker>,
    deferred: Option<Deferred>,
}

impl ShiftClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Token the repeating ticker is currently scheduled for.
    #[must_use]
    pub fn ticker_token(&self) -> Option<QuestionToken> {
        self.ticker.map(|t| t.token)
    }

    #[must_use]
    pub fn deferred(&self) -> Option<PendingTransition> {
        self.deferred.map(|d| d.pending)
    }

    /// Milliseconds until the next scheduled event, if any.
    #[must_use]
    pub fn next_due_in(&self) -> Option<u64> {
        let ticker = self.ticker.map(|t| t.next_due);
        let deferred = self.deferred.map(|d| d.due);
        ticker
            .into_iter()
            .chain(deferred)
            .min()
            .map(|due| due.saturating_sub(self.now_ms))
    }

    /// Reconcile scheduled work with what `session` currently needs.
    pub fn sync<R: Rng>(&mut self, session: &ShiftSession<R>) {
        let wanted_ticker = session
            .countdown_active()
            .then(|| session.token())
            .flatten();
        match (wanted_ticker, self.ticker) {
            (Some(token), Some(current)) if current.token == token => {}
            (Some(token), _) => {
                self.ticker = Some(Ticker {
                    token,
                    next_due: self.now_ms + u64::from(TICK_INTERVAL_MS),
                });
            }
            (None, _) => self.ticker = None,
        }

        match (session.pending(), self.deferred) {
            (Some(pending), Some(current)) if current.pending == pending => {}
            (Some(pending), _) => {
                self.deferred = Some(Deferred {
                    pending,
                    due: self.now_ms + u64::from(pending.delay_ms),
                });
            }
            (None, _) => self.deferred = None,
        }
    }

    /// Move virtual time forward by `ms`, firing everything that falls due.
    pub fn advance<R: Rng>(&mut self, ms: u64, session: &mut ShiftSession<R>) -> Vec<ClockEvent> {
        let target = self.now_ms.saturating_add(ms);
        let mut events = Vec::new();
        self.sync(session);

        loop {
            let tick_due = self.ticker.map(|t| t.next_due).filter(|&due| due <= target);
            let deferred_due = self.deferred.map(|d| d.due).filter(|&due| due <= target);

            let fire_ticker = match (tick_due, deferred_due) {
                (None, None) => break,
                (Some(t), Some(d)) => t <= d,
                (Some(_), None) => true,
                (None, Some(_)) => false,
            };

            if fire_ticker {
                if let Some(event) = self.fire_ticker(session) {
                    events.push(event);
                }
            } else if let Some(event) = self.fire_deferred(session) {
                events.push(event);
            }
            self.sync(session);
        }

        self.now_ms = target;
        events
    }

    fn fire_ticker<R: Rng>(&mut self, session: &mut ShiftSession<R>) -> Option<ClockEvent> {
        let ticker = self.ticker.as_mut()?;
        self.now_ms = ticker.next_due;
        ticker.next_due += u64::from(TICK_INTERVAL_MS);
        let token = ticker.token;

        match session.tick(token) {
            TickOutcome::Running(remaining_tenths) => Some(ClockEvent::Tick {
                at_ms: self.now_ms,
                token,
                remaining_tenths,
            }),
            TickOutcome::TimedOut => Some(ClockEvent::TimedOut {
                at_ms: self.now_ms,
                token,
            }),
            TickOutcome::Ignored => {
                self.ticker = None;
                None
            }
        }
    }

    fn fire_deferred<R: Rng>(&mut self, session: &mut ShiftSession<R>) -> Option<ClockEvent> {
        let deferred = self.deferred.take()?;
        self.now_ms = deferred.due;
        let token = deferred.pending.token;
        session.resolve_pending(token).then(|| ClockEvent::Resolved {
            at_ms: self.now_ms,
            token,
            kind: deferred.pending.kind,
            phase: session.phase(),
        })
    }
}
