use thiserror::Error;

/// Problems found while loading or validating a scenario deck.
#[derive(Debug, Error)]
pub enum DeckError {
    #[error("scenario deck could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("scenario deck is empty")]
    Empty,
    #[error("scenario {id} has {found} options, expected {expected}")]
    OptionCount {
        id: u32,
        found: usize,
        expected: usize,
    },
    #[error("scenario {id} lists correct answer {correct:?} which is not one of its options")]
    CorrectNotInOptions { id: u32, correct: String },
    #[error("scenario {id} repeats option {option:?}")]
    DuplicateOption { id: u32, option: String },
    #[error("scenario id {id} appears more than once")]
    DuplicateId { id: u32 },
}
