//! End-of-shift debrief
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::seed::replay_code;
use crate::session::ShiftSession;
use crate::state::{Outcome, Phase};

/// How the shift ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ending {
    /// Every case was worked without losing the patient.
    Won,
    /// Health reached zero.
    Lost,
}

impl std::fmt::Display for Ending {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ending::Won => write!(f, "won"),
            Ending::Lost => write!(f, "lost"),
        }
    }
}

/// Everything the result screen and the tester reports show about a finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftSummary {
    pub ending: Ending,
    /// 1-based case the shift ended on.
    pub case_reached: usize,
    pub cases_total: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub timeouts: usize,
    pub best_streak: u32,
    pub final_health: u8,
    pub accuracy_pct: f32,
    /// Replay code, when the session's seed has one that reproduces it.
    pub code: Option<String>,
    pub takeaways: Vec<String>,
    pub deck_fingerprint: u64,
}

impl ShiftSummary {
    /// Summarize a session that reached `Won` or `Lost`; `None` otherwise.
    #[must_use]
    pub fn from_session<R: Rng>(session: &ShiftSession<R>) -> Option<Self> {
        let ending = match session.phase() {
            Phase::Won => Ending::Won,
            Phase::Lost => Ending::Lost,
            Phase::NotStarted | Phase::InProgress => return None,
        };
        let state = session.state();
        let count = |outcome: Outcome| {
            state
                .answers
                .iter()
                .filter(|record| record.outcome == outcome)
                .count()
        };
        let correct = count(Outcome::Correct);
        let answered = state.answers.len();
        #[allow(clippy::cast_precision_loss)]
        let accuracy_pct = if answered == 0 {
            0.0
        } else {
            correct as f32 * 100.0 / answered as f32
        };

        Some(Self {
            ending,
            case_reached: session.case_number(),
            cases_total: session.total_cases(),
            correct,
            incorrect: count(Outcome::Incorrect),
            timeouts: count(Outcome::Timeout),
            best_streak: state.best_streak,
            final_health: session.display_health(),
            accuracy_pct,
            code: session.seed().and_then(replay_code),
            takeaways: session.deck().takeaways().to_vec(),
            deck_fingerprint: session.deck().fingerprint(),
        })
    }
}
