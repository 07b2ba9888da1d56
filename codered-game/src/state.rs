use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{
    ADVANCE_DELAY_MS, HEALTH_MAX, LOSS_DELAY_MS, VITALS_GUARDED_ABOVE, VITALS_STABLE_ABOVE,
};
use crate::data::ScenarioRecord;

/// Top-level shift state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl Phase {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Won => "won",
            Self::Lost => "lost",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a single case was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Correct,
    Incorrect,
    Timeout,
}

impl Outcome {
    #[must_use]
    pub const fn is_correct(self) -> bool {
        matches!(self, Self::Correct)
    }
}

/// Post-answer explanation shown until the next case (or the end screen)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub outcome: Outcome,
    pub title: String,
    pub message: String,
}

impl Feedback {
    #[must_use]
    pub fn for_outcome(outcome: Outcome, scenario: &ScenarioRecord) -> Self {
        match outcome {
            Outcome::Correct => Self {
                outcome,
                title: String::from("Diagnosis Correct"),
                message: scenario.reason.clone(),
            },
            Outcome::Incorrect => Self {
                outcome,
                title: String::from("Medical Error"),
                message: format!(
                    "Wrong choice! Correct treatment was: {}. {}",
                    scenario.correct, scenario.reason
                ),
            },
            Outcome::Timeout => Self {
                outcome,
                title: String::from("Resuscitation Failed (Timeout)"),
                message: format!(
                    "Patient vital signs lost. Correct treatment was: {}. {}",
                    scenario.correct, scenario.reason
                ),
            },
        }
    }
}

/// Coarse health tier used to color the vitals bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VitalsBand {
    Stable,
    Guarded,
    Critical,
}

impl VitalsBand {
    #[must_use]
    pub const fn for_health(health: i32) -> Self {
        if health > VITALS_STABLE_ABOVE {
            Self::Stable
        } else if health > VITALS_GUARDED_ABOVE {
            Self::Guarded
        } else {
            Self::Critical
        }
    }
}

/// Clamp a stored health value into the displayable `0..=100` range.
#[must_use]
pub fn clamp_display_health(health: i32) -> u8 {
    u8::try_from(health.clamp(0, HEALTH_MAX)).unwrap_or(0)
}

/// Identifies one prepared question within one run of a session.
///
/// Deferred callbacks carry the token they were scheduled for, so anything
/// that fires after the session has moved on is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionToken {
    pub run: u32,
    pub case: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingKind {
    /// Move to the next case, or to `Won` after the last one.
    Advance,
    /// Health ran out; move to `Lost`.
    Lose,
}

impl PendingKind {
    #[must_use]
    pub const fn delay_ms(self) -> u32 {
        match self {
            Self::Advance => ADVANCE_DELAY_MS,
            Self::Lose => LOSS_DELAY_MS,
        }
    }
}

/// The single delayed transition scheduled after an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PendingTransition {
    pub token: QuestionToken,
    pub kind: PendingKind,
    pub delay_ms: u32,
}

impl PendingTransition {
    #[must_use]
    pub const fn new(token: QuestionToken, kind: PendingKind) -> Self {
        Self {
            token,
            kind,
            delay_ms: kind.delay_ms(),
        }
    }
}

/// One line of the shift log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    /// 1-based case number within the run.
    pub case: usize,
    pub scenario_id: u32,
    pub selected: Option<String>,
    pub outcome: Outcome,
    pub health_after: i32,
    pub seconds_left: f32,
}
