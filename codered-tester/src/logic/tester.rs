use colored::Colorize;
use codered_game::constants::HEALTH_MAX;
use codered_game::{Ending, ScenarioDeck};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use super::policy::PolicyKind;
use super::seeds::SeedInfo;
use super::simulation::{ShiftRun, play_shift};

/// Aggregate of every iteration of one policy on one seed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub policy: PolicyKind,
    pub seed: u64,
    pub code: String,
    pub passed: bool,
    pub iterations_run: usize,
    pub wins: usize,
    pub losses: usize,
    pub failures: Vec<String>,
    pub average_case_reached: f64,
    pub average_accuracy_pct: f64,
    #[serde(with = "duration_serde")]
    pub average_duration: Duration,
}

pub struct LogicTester {
    deck: ScenarioDeck,
    verbose: bool,
}

impl LogicTester {
    pub const fn new(deck: ScenarioDeck, verbose: bool) -> Self {
        Self { deck, verbose }
    }

    pub fn run_policy(
        &self,
        policy: PolicyKind,
        seeds: &[SeedInfo],
        iterations: usize,
    ) -> Vec<ScenarioResult> {
        seeds
            .iter()
            .map(|seed| {
                if self.verbose {
                    println!(
                        "🧪 Playing policy: {} (code: {} seed: {})",
                        policy.key().bright_white(),
                        seed.display_code(),
                        seed.seed
                    );
                }
                self.run_single(policy, seed, iterations)
            })
            .collect()
    }

    fn run_single(&self, policy: PolicyKind, seed: &SeedInfo, iterations: usize) -> ScenarioResult {
        let mut failures = Vec::new();
        let mut wins = 0;
        let mut losses = 0;
        let mut case_total = 0_usize;
        let mut accuracy_total = 0.0_f64;
        let mut durations = Vec::with_capacity(iterations);

        for iteration in 0..iterations {
            let run_seed = seed.iteration_seed(iteration);
            let mut answerer = policy.create_policy(run_seed);
            let started = Instant::now();
            let outcome = play_shift(&self.deck, run_seed, answerer.as_mut());
            durations.push(started.elapsed());

            match outcome {
                Ok(run) => {
                    match run.summary.ending {
                        Ending::Won => wins += 1,
                        Ending::Lost => losses += 1,
                    }
                    case_total += run.summary.case_reached;
                    accuracy_total += f64::from(run.summary.accuracy_pct);
                    failures.extend(
                        check_expectations(policy, &run)
                            .into_iter()
                            .map(|msg| format!("iteration {iteration} (seed {run_seed}): {msg}")),
                    );
                }
                Err(err) => failures.push(format!("iteration {iteration}: {err:#}")),
            }
        }

        let completed = (wins + losses).max(1);
        #[allow(clippy::cast_precision_loss)]
        let (average_case_reached, average_accuracy_pct) = (
            case_total as f64 / completed as f64,
            accuracy_total / completed as f64,
        );
        let average_duration = if durations.is_empty() {
            Duration::ZERO
        } else {
            durations.iter().sum::<Duration>() / u32::try_from(durations.len()).unwrap_or(1)
        };

        ScenarioResult {
            policy,
            seed: seed.seed,
            code: seed.display_code(),
            passed: failures.is_empty(),
            iterations_run: iterations,
            wins,
            losses,
            failures,
            average_case_reached,
            average_accuracy_pct,
            average_duration,
        }
    }
}

/// Invariants every run must hold, plus the per-policy guarantees.
#[must_use]
pub fn check_expectations(policy: PolicyKind, run: &ShiftRun) -> Vec<String> {
    let mut failures = Vec::new();
    let summary = &run.summary;

    if run.max_health > HEALTH_MAX {
        failures.push(format!("health rose to {}", run.max_health));
    }
    if run.answers.len() != summary.case_reached {
        failures.push(format!(
            "answer log has {} entries but the shift ended on case {}",
            run.answers.len(),
            summary.case_reached
        ));
    }
    if summary.correct + summary.incorrect + summary.timeouts != run.answers.len() {
        failures.push(String::from("outcome counts do not add up to the answer log"));
    }
    if summary.ending == Ending::Won && summary.case_reached != summary.cases_total {
        failures.push(format!(
            "won after only {} of {} cases",
            summary.case_reached, summary.cases_total
        ));
    }

    match policy {
        PolicyKind::Perfect => {
            if summary.ending != Ending::Won || summary.final_health != 100 {
                failures.push(format!(
                    "perfect play ended {} with health {}",
                    summary.ending, summary.final_health
                ));
            }
        }
        PolicyKind::Sleeper => {
            if summary.ending != Ending::Lost || summary.case_reached != 3 {
                failures.push(format!(
                    "sleeping through the shift ended {} on case {}",
                    summary.ending, summary.case_reached
                ));
            }
        }
        PolicyKind::Guesser | PolicyKind::FirstPick | PolicyKind::Scholar => {}
    }

    failures
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_micros().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let micros = u64::deserialize(deserializer)?;
        Ok(Duration::from_micros(micros))
    }
}
