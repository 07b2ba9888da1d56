use std::collections::HashSet;

use codered_game::constants::OPTIONS_PER_SCENARIO;
use codered_game::{BuiltinDeck, DeckError, DeckLoader, Difficulty, ScenarioDeck};

#[test]
fn builtin_deck_loads_through_loader() {
    let deck = BuiltinDeck.load_deck().unwrap();
    assert_eq!(deck.len(), 10);
    assert_eq!(deck.fingerprint(), ScenarioDeck::builtin().unwrap().fingerprint());
}

#[test]
fn every_case_has_unique_options_and_one_correct_answer() {
    let deck = ScenarioDeck::builtin().unwrap();
    let mut ids = HashSet::new();
    for scenario in deck.scenarios() {
        assert!(ids.insert(scenario.id), "duplicate id {}", scenario.id);
        assert_eq!(scenario.options.len(), OPTIONS_PER_SCENARIO);
        let unique: HashSet<&str> = scenario.options.iter().map(String::as_str).collect();
        assert_eq!(unique.len(), OPTIONS_PER_SCENARIO, "{}", scenario.title);
        assert_eq!(
            scenario
                .options
                .iter()
                .filter(|o| scenario.is_correct(o))
                .count(),
            1
        );
        assert!(!scenario.reason.is_empty());
        assert!(!scenario.symptoms.is_empty());
    }
}

#[test]
fn deck_covers_every_difficulty() {
    let deck = ScenarioDeck::builtin().unwrap();
    let levels: HashSet<Difficulty> = deck.scenarios().iter().map(|s| s.difficulty).collect();
    assert!(levels.contains(&Difficulty::Medium));
    assert!(levels.contains(&Difficulty::Hard));
}

#[test]
fn serialized_deck_reloads_with_same_fingerprint() {
    let deck = ScenarioDeck::builtin().unwrap();
    let json = serde_json::to_string(&deck).unwrap();
    let reloaded = ScenarioDeck::from_json(&json).unwrap();
    assert_eq!(reloaded, deck);
    assert_eq!(reloaded.fingerprint(), deck.fingerprint());
}

#[test]
fn load_errors_name_the_offending_case() {
    let json = r#"{
        "scenarios": [
            {
                "id": 42,
                "title": "Broken",
                "symptoms": "S",
                "history": "H",
                "options": ["A", "B", "C", "D"],
                "correct": "Z",
                "reason": "R",
                "difficulty": "Easy"
            }
        ]
    }"#;
    let err = ScenarioDeck::from_json(json).unwrap_err();
    assert!(matches!(err, DeckError::CorrectNotInOptions { id: 42, .. }));
    assert!(err.to_string().contains("42"));
}
