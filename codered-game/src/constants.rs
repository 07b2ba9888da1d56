//! Centralized balance and timing constants for Code Red shift logic.
//!
//! These values define the deterministic math for a shift. Keeping them
//! together ensures that pacing can only be adjusted via code changes
//! reviewed in version control, rather than through the scenario asset.

// Vitals -------------------------------------------------------------------
pub const HEALTH_MAX: i32 = 100;
pub const HEAL_ON_CORRECT: i32 = 10;
pub const DAMAGE_ON_MISS: i32 = 35;
pub const VITALS_STABLE_ABOVE: i32 = 60;
pub const VITALS_GUARDED_ABOVE: i32 = 30;

// Countdown ----------------------------------------------------------------
/// Countdown resolution; one tick removes one tenth of a second.
pub const TICKS_PER_SECOND: u16 = 10;
pub const QUESTION_SECONDS: u16 = 20;
pub const QUESTION_TENTHS: u16 = QUESTION_SECONDS * TICKS_PER_SECOND;
pub const TICK_INTERVAL_MS: u32 = 100;
pub const URGENT_BELOW_SECONDS: f32 = 5.0;

// Deferred transitions -----------------------------------------------------
pub const ADVANCE_DELAY_MS: u32 = 4_000;
pub const LOSS_DELAY_MS: u32 = 3_500;

// Deck shape ---------------------------------------------------------------
pub const OPTIONS_PER_SCENARIO: usize = 4;

// Logging keys -------------------------------------------------------------
pub(crate) const LOG_TARGET: &str = "codered::shift";
