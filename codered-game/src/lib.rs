//! Code Red Game Engine
//!
//! Platform-agnostic core for the Endocrine ER: Code Red pharmacology triage game.
//! This crate provides the scenario deck, the shift session, the countdown,
//! and a virtual clock without UI or platform-specific dependencies.

pub mod clock;
pub mod constants;
pub mod countdown;
pub mod data;
pub mod error;
pub mod result;
pub mod seed;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use clock::{ClockEvent, ShiftClock};
pub use countdown::{Countdown, CountdownTick};
pub use data::{Difficulty, ScenarioDeck, ScenarioRecord};
pub use error::DeckError;
pub use result::{Ending, ShiftSummary};
pub use seed::{decode_to_seed, generate_code_from_entropy, replay_code};
pub use session::{SessionState, ShiftSession, TickOutcome};
pub use state::{
    AnswerRecord, Feedback, Outcome, PendingKind, PendingTransition, Phase, QuestionToken,
    VitalsBand, clamp_display_health,
};

/// Trait for abstracting where the scenario deck comes from
/// Platform-specific implementations may provide this
pub trait DeckLoader {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load and validate the scenario deck
    ///
    /// # Errors
    ///
    /// Returns an error if the deck cannot be loaded or fails validation.
    fn load_deck(&self) -> Result<ScenarioDeck, Self::Error>;
}

/// Loader for the deck embedded in this crate
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinDeck;

impl DeckLoader for BuiltinDeck {
    type Error = DeckError;

    fn load_deck(&self) -> Result<ScenarioDeck, Self::Error> {
        ScenarioDeck::builtin()
    }
}

/// Builds shift sessions from a deck loader
pub struct ShiftEngine<L>
where
    L: DeckLoader,
{
    loader: L,
}

impl<L> ShiftEngine<L>
where
    L: DeckLoader,
{
    pub const fn new(loader: L) -> Self {
        Self { loader }
    }

    /// Create an unstarted session seeded with `seed`.
    ///
    /// # Errors
    ///
    /// Returns an error if the deck cannot be loaded.
    pub fn create_session(&self, seed: u64) -> Result<ShiftSession, L::Error> {
        let deck = self.loader.load_deck()?;
        Ok(ShiftSession::seeded(deck, seed))
    }

    /// Create a session from a replay code; `Ok(None)` when the code is not recognised.
    ///
    /// # Errors
    ///
    /// Returns an error if the deck cannot be loaded.
    pub fn session_from_code(&self, code: &str) -> Result<Option<ShiftSession>, L::Error> {
        match decode_to_seed(code) {
            Some(seed) => self.create_session(seed).map(Some),
            None => Ok(None),
        }
    }
}
