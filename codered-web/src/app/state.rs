use std::rc::Rc;

use codered_game::{
    BuiltinDeck, QuestionToken, ShiftEngine, ShiftSession, decode_to_seed,
    generate_code_from_entropy,
};
use once_cell::sync::Lazy;
use regex::Regex;
use yew::prelude::*;

static CODE_PATTERN: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^ER-[A-Z]+\d{2}$").ok());

/// Shape check for a replay code typed on the start screen.
#[must_use]
pub fn is_code_valid(code: &str) -> bool {
    CODE_PATTERN
        .as_ref()
        .is_some_and(|re| re.is_match(code.trim()))
}

/// Everything the reducer can be asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShiftAction {
    Start { seed: u64 },
    Answer(String),
    Tick(QuestionToken),
    Resolve(QuestionToken),
    SetCode(String),
}

/// App-wide state held in a `use_reducer`.
#[derive(Debug, Clone)]
pub struct ShiftStore {
    pub session: Option<ShiftSession>,
    pub code: AttrValue,
    pub load_error: Option<String>,
}

impl ShiftStore {
    /// Load the builtin deck and prefill the code box from `entropy`.
    #[must_use]
    pub fn boot(entropy: u64) -> Self {
        let code = generate_code_from_entropy(entropy);
        let seed = decode_to_seed(&code).unwrap_or(entropy);
        match ShiftEngine::new(BuiltinDeck).create_session(seed) {
            Ok(session) => Self {
                session: Some(session),
                code: AttrValue::from(code),
                load_error: None,
            },
            Err(err) => {
                log::error!("scenario deck failed to load: {err}");
                Self {
                    session: None,
                    code: AttrValue::from(code),
                    load_error: Some(err.to_string()),
                }
            }
        }
    }

    /// Seed to use for the next shift: the typed code if it decodes, otherwise a fresh one.
    #[must_use]
    pub fn seed_for_start(&self, entropy: u64) -> u64 {
        decode_to_seed(&self.code).unwrap_or_else(|| {
            let code = generate_code_from_entropy(entropy);
            decode_to_seed(&code).unwrap_or(entropy)
        })
    }

    #[must_use]
    pub fn code_valid(&self) -> bool {
        is_code_valid(&self.code) && decode_to_seed(&self.code).is_some()
    }
}

impl Reducible for ShiftStore {
    type Action = ShiftAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = Rc::unwrap_or_clone(self);
        let Some(session) = next.session.as_mut() else {
            if let ShiftAction::SetCode(code) = action {
                next.code = AttrValue::from(code);
            }
            return Rc::new(next);
        };
        match action {
            ShiftAction::Start { seed } => {
                // Reseed rather than rebuild so the run counter keeps rising
                // and timers from the previous run stay stale.
                session.reseed(seed);
                session.start();
                if let Some(code) = codered_game::replay_code(seed) {
                    next.code = AttrValue::from(code);
                }
            }
            ShiftAction::Answer(label) => {
                session.submit_answer(Some(&label));
            }
            ShiftAction::Tick(token) => {
                session.tick(token);
            }
            ShiftAction::Resolve(token) => {
                session.resolve_pending(token);
            }
            ShiftAction::SetCode(code) => {
                next.code = AttrValue::from(code.trim().to_ascii_uppercase());
            }
        }
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codered_game::{Outcome, PendingKind, Phase};

    fn started() -> Rc<ShiftStore> {
        let store = Rc::new(ShiftStore::boot(1_700_000_000_000));
        let seed = store.seed_for_start(0);
        store.reduce(ShiftAction::Start { seed })
    }

    fn session(store: &ShiftStore) -> &ShiftSession {
        store.session.as_ref().unwrap()
    }

    #[test]
    fn code_pattern_accepts_only_er_codes() {
        assert!(is_code_valid("ER-INSULIN42"));
        assert!(is_code_valid(" ER-CODE07 "));
        assert!(!is_code_valid("CL-ORANGE42"));
        assert!(!is_code_valid("ER-insulin42"));
        assert!(!is_code_valid("ER-INSULIN4"));
    }

    #[test]
    fn boot_prefills_a_valid_code() {
        let store = ShiftStore::boot(42);
        assert!(store.code_valid());
        assert!(store.load_error.is_none());
        assert_eq!(session(&store).phase(), Phase::NotStarted);
    }

    #[test]
    fn start_uses_the_typed_code() {
        let store = Rc::new(ShiftStore::boot(7));
        let store = store.reduce(ShiftAction::SetCode(String::from(" er-glucose11 ")));
        assert_eq!(store.code.as_str(), "ER-GLUCOSE11");
        let seed = store.seed_for_start(0);
        assert_eq!(Some(seed), decode_to_seed("ER-GLUCOSE11"));
        let store = store.reduce(ShiftAction::Start { seed });
        assert_eq!(session(&store).phase(), Phase::InProgress);
        assert_eq!(store.code.as_str(), "ER-GLUCOSE11");
    }

    #[test]
    fn start_with_a_codeless_seed_keeps_the_code_box() {
        let store = Rc::new(ShiftStore::boot(7));
        let before = store.code.clone();
        let store = store.reduce(ShiftAction::Start { seed: 1337 });
        assert_eq!(session(&store).phase(), Phase::InProgress);
        assert_eq!(store.code, before);
    }

    #[test]
    fn answer_then_resolve_advances() {
        let store = started();
        let correct = session(&store).current_scenario().unwrap().correct.clone();
        let store = store.reduce(ShiftAction::Answer(correct));
        let pending = session(&store).pending().unwrap();
        assert_eq!(pending.kind, PendingKind::Advance);
        let store = store.reduce(ShiftAction::Resolve(pending.token));
        assert_eq!(session(&store).case_number(), 2);
    }

    #[test]
    fn ticks_from_an_old_run_are_ignored() {
        let store = started();
        let old = session(&store).token().unwrap();
        let seed = store.seed_for_start(0);
        let store = store.reduce(ShiftAction::Start { seed });
        let before = session(&store).remaining_seconds();
        let store = store.reduce(ShiftAction::Tick(old));
        assert!((session(&store).remaining_seconds() - before).abs() < f32::EPSILON);

        let current = session(&store).token().unwrap();
        let store = store.reduce(ShiftAction::Tick(current));
        assert!(session(&store).remaining_seconds() < before);
    }

    #[test]
    fn second_answer_is_ignored() {
        let store = started();
        let store = store.reduce(ShiftAction::Answer(String::from("Not an option")));
        let health = session(&store).health();
        let correct = session(&store).current_scenario().unwrap().correct.clone();
        let store = store.reduce(ShiftAction::Answer(correct));
        assert_eq!(session(&store).health(), health);
        assert_eq!(
            session(&store).feedback().unwrap().outcome,
            Outcome::Incorrect
        );
    }
}
