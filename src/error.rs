//! Game rule errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid level {input:?} (expected 1..={max})")]
    InvalidLevel { input: String, max: u32 },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("configuration could not be parsed: {0}")]
    ConfigParse(String),
    #[error("a round is already in progress")]
    RoundInProgress,
    #[error("the round is over, reload to play again")]
    RoundOver,
    #[error("no round is being played")]
    RoundNotActive,
    #[error("no ball with id {0}")]
    UnknownBall(u32),
}
