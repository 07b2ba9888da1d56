use std::fmt;

use clap::ValueEnum;
use codered_game::ScenarioRecord;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

/// Policy interface for scripted shifts.
pub trait AnswerPolicy {
    /// Name used for logging/debug output.
    fn name(&self) -> &'static str;

    /// Virtual milliseconds of countdown spent before answering.
    fn reaction_ms(&self) -> u64;

    /// Pick one of `options` (display order), or `None` to let the clock run out.
    fn choose(&mut self, scenario: &ScenarioRecord, options: &[String]) -> Option<String>;
}

/// Built-in answer policies
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    /// Always picks the correct treatment
    Perfect,
    /// Picks a random option
    Guesser,
    /// Never answers; every case times out
    Sleeper,
    /// Picks whatever is displayed first
    FirstPick,
    /// Correct four times out of five
    Scholar,
}

impl PolicyKind {
    pub const ALL: [Self; 5] = [
        Self::Perfect,
        Self::Guesser,
        Self::Sleeper,
        Self::FirstPick,
        Self::Scholar,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Perfect => "perfect",
            Self::Guesser => "guesser",
            Self::Sleeper => "sleeper",
            Self::FirstPick => "first-pick",
            Self::Scholar => "scholar",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Perfect => "always correct after 1.5s; must win at full health",
            Self::Guesser => "uniform random option after 3s",
            Self::Sleeper => "never answers; must lose on case 3",
            Self::FirstPick => "first displayed option after 0.8s",
            Self::Scholar => "correct with 80% probability after 6s",
        }
    }

    #[must_use]
    pub fn create_policy(self, seed: u64) -> Box<dyn AnswerPolicy> {
        match self {
            Self::Perfect => Box::new(PerfectPolicy),
            Self::Guesser => Box::new(GuesserPolicy::new(seed)),
            Self::Sleeper => Box::new(SleeperPolicy),
            Self::FirstPick => Box::new(FirstPickPolicy),
            Self::Scholar => Box::new(ScholarPolicy::new(seed, 0.8)),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

struct PerfectPolicy;

impl AnswerPolicy for PerfectPolicy {
    fn name(&self) -> &'static str {
        "perfect"
    }

    fn reaction_ms(&self) -> u64 {
        1_500
    }

    fn choose(&mut self, scenario: &ScenarioRecord, _options: &[String]) -> Option<String> {
        Some(scenario.correct.clone())
    }
}

struct GuesserPolicy {
    rng: ChaCha20Rng,
}

impl GuesserPolicy {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed ^ 0x6755_E55E),
        }
    }
}

impl AnswerPolicy for GuesserPolicy {
    fn name(&self) -> &'static str {
        "guesser"
    }

    fn reaction_ms(&self) -> u64 {
        3_000
    }

    fn choose(&mut self, _scenario: &ScenarioRecord, options: &[String]) -> Option<String> {
        options.choose(&mut self.rng).cloned()
    }
}

struct SleeperPolicy;

impl AnswerPolicy for SleeperPolicy {
    fn name(&self) -> &'static str {
        "sleeper"
    }

    fn reaction_ms(&self) -> u64 {
        0
    }

    fn choose(&mut self, _scenario: &ScenarioRecord, _options: &[String]) -> Option<String> {
        None
    }
}

struct FirstPickPolicy;

impl AnswerPolicy for FirstPickPolicy {
    fn name(&self) -> &'static str {
        "first-pick"
    }

    fn reaction_ms(&self) -> u64 {
        800
    }

    fn choose(&mut self, _scenario: &ScenarioRecord, options: &[String]) -> Option<String> {
        options.first().cloned()
    }
}

struct ScholarPolicy {
    rng: ChaCha20Rng,
    accuracy: f64,
}

impl ScholarPolicy {
    fn new(seed: u64, accuracy: f64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed ^ 0x5C40_1A55),
            accuracy,
        }
    }
}

impl AnswerPolicy for ScholarPolicy {
    fn name(&self) -> &'static str {
        "scholar"
    }

    fn reaction_ms(&self) -> u64 {
        6_000
    }

    fn choose(&mut self, scenario: &ScenarioRecord, options: &[String]) -> Option<String> {
        if self.rng.gen_bool(self.accuracy) {
            return Some(scenario.correct.clone());
        }
        let wrong: Vec<&String> = options.iter().filter(|o| **o != scenario.correct).collect();
        wrong.choose(&mut self.rng).map(|o| (*o).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codered_game::ScenarioDeck;

    fn first_case() -> ScenarioRecord {
        ScenarioDeck::builtin().unwrap().scenarios()[0].clone()
    }

    #[test]
    fn policy_names_match_keys() {
        for kind in PolicyKind::ALL {
            assert_eq!(kind.create_policy(1).name(), kind.key());
        }
    }

    #[test]
    fn perfect_and_sleeper_are_deterministic() {
        let case = first_case();
        let mut perfect = PolicyKind::Perfect.create_policy(9);
        assert_eq!(
            perfect.choose(&case, &case.options).as_deref(),
            Some(case.correct.as_str())
        );
        let mut sleeper = PolicyKind::Sleeper.create_policy(9);
        assert!(sleeper.choose(&case, &case.options).is_none());
    }

    #[test]
    fn random_policies_pick_displayed_options() {
        let case = first_case();
        for kind in [PolicyKind::Guesser, PolicyKind::Scholar, PolicyKind::FirstPick] {
            let mut policy = kind.create_policy(3);
            for _ in 0..20 {
                let pick = policy.choose(&case, &case.options).unwrap();
                assert!(case.has_option(&pick), "{kind} picked {pick}");
            }
        }
    }

    #[test]
    fn reactions_fit_inside_the_countdown() {
        for kind in PolicyKind::ALL {
            assert!(kind.create_policy(0).reaction_ms() < 20_000);
        }
    }
}
