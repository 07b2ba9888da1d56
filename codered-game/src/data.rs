use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::hash::Hasher;
use twox_hash::XxHash64;

use crate::constants::OPTIONS_PER_SCENARIO;
use crate::error::DeckError;

const BUILTIN_DECK_JSON: &str = include_str!("../data/scenarios.json");

/// Clinical difficulty label shown next to a case title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One clinical case: presentation, four treatment options, and the explanation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioRecord {
    pub id: u32,
    pub title: String,
    pub symptoms: String,
    pub history: String,
    pub options: Vec<String>,
    pub correct: String,
    pub reason: String,
    #[serde(default)]
    pub difficulty: Difficulty,
}

impl ScenarioRecord {
    /// Whether `label` is the correct treatment for this case.
    #[must_use]
    pub fn is_correct(&self, label: &str) -> bool {
        self.correct == label
    }

    #[must_use]
    pub fn has_option(&self, label: &str) -> bool {
        self.options.iter().any(|opt| opt == label)
    }

    fn validate(&self) -> Result<(), DeckError> {
        if self.options.len() != OPTIONS_PER_SCENARIO {
            return Err(DeckError::OptionCount {
                id: self.id,
                found: self.options.len(),
                expected: OPTIONS_PER_SCENARIO,
            });
        }
        let mut seen = HashSet::new();
        for option in &self.options {
            if !seen.insert(option.as_str()) {
                return Err(DeckError::DuplicateOption {
                    id: self.id,
                    option: option.clone(),
                });
            }
        }
        if !self.has_option(&self.correct) {
            return Err(DeckError::CorrectNotInOptions {
                id: self.id,
                correct: self.correct.clone(),
            });
        }
        Ok(())
    }
}

/// Immutable, validated list of scenarios plus the debrief takeaways
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioDeck {
    scenarios: Vec<ScenarioRecord>,
    #[serde(default)]
    takeaways: Vec<String>,
}

impl ScenarioDeck {
    /// The ten cases shipped with the game.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded asset fails validation.
    pub fn builtin() -> Result<Self, DeckError> {
        Self::from_json(BUILTIN_DECK_JSON)
    }

    /// Parse and validate a deck from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::Parse`] for malformed JSON and a shape error for
    /// any record that breaks the four-options / correct-in-options contract.
    pub fn from_json(json: &str) -> Result<Self, DeckError> {
        let deck: Self = serde_json::from_str(json)?;
        deck.validate()?;
        Ok(deck)
    }

    /// Build a deck from pre-parsed records.
    ///
    /// # Errors
    ///
    /// Returns a shape error if any record is invalid.
    pub fn from_scenarios(
        scenarios: Vec<ScenarioRecord>,
        takeaways: Vec<String>,
    ) -> Result<Self, DeckError> {
        let deck = Self {
            scenarios,
            takeaways,
        };
        deck.validate()?;
        Ok(deck)
    }

    fn validate(&self) -> Result<(), DeckError> {
        if self.scenarios.is_empty() {
            return Err(DeckError::Empty);
        }
        let mut ids = HashSet::new();
        for scenario in &self.scenarios {
            if !ids.insert(scenario.id) {
                return Err(DeckError::DuplicateId { id: scenario.id });
            }
            scenario.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn scenarios(&self) -> &[ScenarioRecord] {
        &self.scenarios
    }

    #[must_use]
    pub fn takeaways(&self) -> &[String] {
        &self.takeaways
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ScenarioRecord> {
        self.scenarios.get(index)
    }

    /// Stable digest of the deck content, used to tie replay codes to a deck revision.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = XxHash64::with_seed(0);
        for scenario in &self.scenarios {
            hasher.write(&scenario.id.to_le_bytes());
            for field in [
                &scenario.title,
                &scenario.symptoms,
                &scenario.history,
                &scenario.correct,
                &scenario.reason,
            ] {
                hasher.write(field.as_bytes());
                hasher.write_u8(0xFF);
            }
            for option in &scenario.options {
                hasher.write(option.as_bytes());
                hasher.write_u8(0xFE);
            }
            hasher.write(scenario.difficulty.as_str().as_bytes());
        }
        for takeaway in &self.takeaways {
            hasher.write(takeaway.as_bytes());
            hasher.write_u8(0xFD);
        }
        hasher.finish()
    }
}
