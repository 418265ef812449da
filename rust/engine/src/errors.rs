use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Drawing from an empty deck. A fresh deck per hand makes this an invariant violation.
    #[error("Deck exhausted")]
    DeckExhausted,
    #[error("Unknown action: {0}")]
    InvalidAction(String),
    #[error("Start a new hand first.")]
    TableIdle,
    #[error("Hero is not active.")]
    InactiveHero,
    #[error("Hand is complete. Start a new hand.")]
    HandComplete,
    #[error("Invalid roster: {0}")]
    InvalidRoster(String),
}

impl GameError {
    /// Whether the error reports a broken engine invariant rather than a rejected command.
    pub fn is_fatal(&self) -> bool {
        matches!(self, GameError::DeckExhausted)
    }
}
