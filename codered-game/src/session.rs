use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{DAMAGE_ON_MISS, HEAL_ON_CORRECT, HEALTH_MAX, LOG_TARGET};
use crate::countdown::{Countdown, CountdownTick};
use crate::data::{ScenarioDeck, ScenarioRecord};
use crate::state::{
    AnswerRecord, Feedback, Outcome, PendingKind, PendingTransition, Phase, QuestionToken,
    VitalsBand, clamp_display_health,
};

/// Mutable per-run state, owned exclusively by a [`ShiftSession`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SessionState {
    pub phase: Phase,
    /// Deck indices in play order, fixed once the run starts.
    pub scenario_order: Vec<usize>,
    pub current_index: usize,
    /// Stored health; may dip below zero while the loss delay runs.
    pub health: i32,
    pub countdown: Countdown,
    pub option_order: Vec<String>,
    pub feedback: Option<Feedback>,
    pub streak: u32,
    pub best_streak: u32,
    /// Incremented on every `start`; part of every [`QuestionToken`].
    pub run: u32,
    pub pending: Option<PendingTransition>,
    pub answers: Vec<AnswerRecord>,
}

/// Result of delivering one countdown tick to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// Stale token, feedback pending, or not in progress.
    Ignored,
    Running(u16),
    /// The countdown hit zero and the timeout was scored.
    TimedOut,
}

/// Owned session binding a scenario deck, a randomness source, and the run state.
#[derive(Debug, Clone)]
pub struct ShiftSession<R = ChaCha20Rng> {
    deck: ScenarioDeck,
    rng: R,
    seed: Option<u64>,
    state: SessionState,
}

impl ShiftSession<ChaCha20Rng> {
    /// Session whose shuffles are fully determined by `seed`.
    #[must_use]
    pub fn seeded(deck: ScenarioDeck, seed: u64) -> Self {
        let mut session = Self::with_rng(deck, ChaCha20Rng::seed_from_u64(seed));
        session.seed = Some(seed);
        session
    }

    /// Deterministically reseed; takes effect on the next `start`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha20Rng::seed_from_u64(seed);
        self.seed = Some(seed);
    }
}

impl<R: Rng> ShiftSession<R> {
    #[must_use]
    pub fn with_rng(deck: ScenarioDeck, rng: R) -> Self {
        Self {
            deck,
            rng,
            seed: None,
            state: SessionState {
                health: HEALTH_MAX,
                ..SessionState::default()
            },
        }
    }

    /// Begin (or restart) a shift with a fresh case order and full health.
    pub fn start(&mut self) {
        let mut order: Vec<usize> = (0..self.deck.len()).collect();
        order.shuffle(&mut self.rng);

        let run = self.state.run.wrapping_add(1);
        self.state = SessionState {
            phase: Phase::InProgress,
            scenario_order: order,
            current_index: 0,
            health: HEALTH_MAX,
            run,
            ..SessionState::default()
        };
        log::info!(target: LOG_TARGET, "shift run {run} started with {} cases", self.deck.len());
        self.prepare_question(0);
    }

    fn prepare_question(&mut self, index: usize) {
        self.state.current_index = index;
        let mut options = self
            .current_scenario()
            .map(|s| s.options.clone())
            .unwrap_or_default();
        options.shuffle(&mut self.rng);
        self.state.option_order = options;
        self.state.countdown.restart();
        log::debug!(target: LOG_TARGET, "prepared case {} of run {}", index + 1, self.state.run);
    }

    /// Score the current case. `None` means the countdown ran out.
    ///
    /// Returns `None` without changing anything when an answer was already
    /// taken for this case or the shift is not in progress. A label that is
    /// not one of the current options scores as incorrect.
    pub fn submit_answer(&mut self, selected: Option<&str>) -> Option<Outcome> {
        if self.state.phase != Phase::InProgress || self.state.feedback.is_some() {
            return None;
        }
        let token = self.token()?;
        let scenario = self.current_scenario()?.clone();

        let seconds_left = self.state.countdown.remaining_seconds();
        self.state.countdown.stop();

        let outcome = match selected {
            Some(label) if scenario.is_correct(label) => Outcome::Correct,
            Some(_) => Outcome::Incorrect,
            None => Outcome::Timeout,
        };

        if outcome.is_correct() {
            self.state.streak += 1;
            self.state.best_streak = self.state.best_streak.max(self.state.streak);
            self.state.health = (self.state.health + HEAL_ON_CORRECT).min(HEALTH_MAX);
        } else {
            self.state.streak = 0;
            self.state.health -= DAMAGE_ON_MISS;
        }
        self.state.feedback = Some(Feedback::for_outcome(outcome, &scenario));
        self.state.answers.push(AnswerRecord {
            case: self.state.current_index + 1,
            scenario_id: scenario.id,
            selected: selected.map(str::to_string),
            outcome,
            health_after: self.state.health,
            seconds_left,
        });

        let kind = if self.state.health <= 0 {
            PendingKind::Lose
        } else {
            PendingKind::Advance
        };
        self.state.pending = Some(PendingTransition::new(token, kind));
        log::debug!(
            target: LOG_TARGET,
            "case {} scored {outcome:?}; health {} streak {}",
            token.case + 1,
            self.state.health,
            self.state.streak
        );
        Some(outcome)
    }

    /// Score the current case as unanswered.
    pub fn timeout(&mut self) -> Option<Outcome> {
        self.submit_answer(None)
    }

    /// Deliver one countdown tick scheduled for `token`.
    pub fn tick(&mut self, token: QuestionToken) -> TickOutcome {
        if !self.countdown_active() || self.token() != Some(token) {
            return TickOutcome::Ignored;
        }
        match self.state.countdown.tick() {
            CountdownTick::Idle => TickOutcome::Ignored,
            CountdownTick::Running(tenths) => TickOutcome::Running(tenths),
            CountdownTick::Expired => {
                log::debug!(target: LOG_TARGET, "case {} timed out", token.case + 1);
                self.timeout();
                TickOutcome::TimedOut
            }
        }
    }

    /// Apply the pending transition scheduled for `token`.
    ///
    /// Returns `false` when nothing is pending or the token is stale.
    pub fn resolve_pending(&mut self, token: QuestionToken) -> bool {
        let Some(pending) = self.state.pending else {
            return false;
        };
        if pending.token != token || self.token() != Some(token) {
            return false;
        }
        self.state.pending = None;
        match pending.kind {
            PendingKind::Lose => self.finish(Phase::Lost),
            PendingKind::Advance => {
                let next = self.state.current_index + 1;
                if next >= self.state.scenario_order.len() {
                    self.finish(Phase::Won);
                } else {
                    self.state.feedback = None;
                    self.prepare_question(next);
                }
            }
        }
        true
    }

    fn finish(&mut self, phase: Phase) {
        self.state.phase = phase;
        self.state.feedback = None;
        self.state.countdown.stop();
        log::info!(
            target: LOG_TARGET,
            "shift run {} ended {phase} on case {}",
            self.state.run,
            self.state.current_index + 1
        );
    }

    /// The countdown should be ticking: in progress with no feedback showing.
    #[must_use]
    pub fn countdown_active(&self) -> bool {
        self.state.phase == Phase::InProgress
            && self.state.feedback.is_none()
            && self.state.countdown.is_running()
    }

    /// Token of the case currently on screen, while a run is in progress.
    #[must_use]
    pub fn token(&self) -> Option<QuestionToken> {
        (self.state.phase == Phase::InProgress).then_some(QuestionToken {
            run: self.state.run,
            case: self.state.current_index,
        })
    }

    #[must_use]
    pub const fn pending(&self) -> Option<PendingTransition> {
        self.state.pending
    }

    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub const fn deck(&self) -> &ScenarioDeck {
        &self.deck
    }

    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.state.phase
    }

    #[must_use]
    pub const fn health(&self) -> i32 {
        self.state.health
    }

    #[must_use]
    pub fn display_health(&self) -> u8 {
        clamp_display_health(self.state.health)
    }

    #[must_use]
    pub const fn vitals(&self) -> VitalsBand {
        VitalsBand::for_health(self.state.health)
    }

    #[must_use]
    pub const fn streak(&self) -> u32 {
        self.state.streak
    }

    #[must_use]
    pub fn remaining_seconds(&self) -> f32 {
        self.state.countdown.remaining_seconds()
    }

    #[must_use]
    pub fn timer_urgent(&self) -> bool {
        self.state.countdown.is_urgent()
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.state.option_order
    }

    #[must_use]
    pub const fn feedback(&self) -> Option<&Feedback> {
        self.state.feedback.as_ref()
    }

    #[must_use]
    pub fn current_scenario(&self) -> Option<&ScenarioRecord> {
        self.state
            .scenario_order
            .get(self.state.current_index)
            .and_then(|&idx| self.deck.get(idx))
    }

    /// 1-based number of the case on screen.
    #[must_use]
    pub const fn case_number(&self) -> usize {
        self.state.current_index + 1
    }

    #[must_use]
    pub fn total_cases(&self) -> usize {
        self.deck.len()
    }

    /// Test and tooling hook for placing the run at an arbitrary vitals level.
    pub const fn set_health(&mut self, health: i32) {
        self.state.health = health;
    }
}
