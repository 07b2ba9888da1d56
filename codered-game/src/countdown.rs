//! Per-question countdown measured in whole ticks.
//!
//! Time is kept as integer tenths of a second so that a full question always
//! expires after exactly [`QUESTION_TENTHS`] ticks.

use serde::{Deserialize, Serialize};

use crate::constants::{QUESTION_TENTHS, TICKS_PER_SECOND, URGENT_BELOW_SECONDS};

/// Result of advancing the countdown by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountdownTick {
    /// The countdown is stopped; nothing changed.
    Idle,
    /// Still running with this many tenths left.
    Running(u16),
    /// Reached zero on this tick; the countdown has stopped.
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    remaining_tenths: u16,
    running: bool,
}

impl Default for Countdown {
    fn default() -> Self {
        Self {
            remaining_tenths: QUESTION_TENTHS,
            running: false,
        }
    }
}

impl Countdown {
    /// Refill to the full question time and start running.
    pub const fn restart(&mut self) {
        self.remaining_tenths = QUESTION_TENTHS;
        self.running = true;
    }

    pub const fn stop(&mut self) {
        self.running = false;
    }

    pub fn tick(&mut self) -> CountdownTick {
        if !self.running {
            return CountdownTick::Idle;
        }
        self.remaining_tenths = self.remaining_tenths.saturating_sub(1);
        if self.remaining_tenths == 0 {
            self.running = false;
            CountdownTick::Expired
        } else {
            CountdownTick::Running(self.remaining_tenths)
        }
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub const fn remaining_tenths(&self) -> u16 {
        self.remaining_tenths
    }

    #[must_use]
    pub fn remaining_seconds(&self) -> f32 {
        f32::from(self.remaining_tenths) / f32::from(TICKS_PER_SECOND)
    }

    /// Under five seconds left; the HUD switches to its alarm styling.
    #[must_use]
    pub fn is_urgent(&self) -> bool {
        self.remaining_seconds() < URGENT_BELOW_SECONDS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_question_expires_after_exactly_two_hundred_ticks() {
        let mut countdown = Countdown::default();
        countdown.restart();
        let mut ticks = 0;
        let mut expirations = 0;
        loop {
            ticks += 1;
            match countdown.tick() {
                CountdownTick::Running(_) => {}
                CountdownTick::Expired => {
                    expirations += 1;
                    break;
                }
                CountdownTick::Idle => panic!("countdown stopped early"),
            }
        }
        assert_eq!(ticks, 200);
        assert_eq!(expirations, 1);
        assert!((countdown.remaining_seconds() - 0.0).abs() < f32::EPSILON);
        assert_eq!(countdown.tick(), CountdownTick::Idle);
    }

    #[test]
    fn stopped_countdown_holds_its_value() {
        let mut countdown = Countdown::default();
        countdown.restart();
        countdown.tick();
        countdown.stop();
        assert_eq!(countdown.tick(), CountdownTick::Idle);
        assert_eq!(countdown.remaining_tenths(), QUESTION_TENTHS - 1);
    }

    #[test]
    fn urgency_starts_below_five_seconds() {
        let mut countdown = Countdown::default();
        countdown.restart();
        for _ in 0..150 {
            countdown.tick();
        }
        assert!(!countdown.is_urgent());
        countdown.tick();
        assert!(countdown.is_urgent());
    }
}
