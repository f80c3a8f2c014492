use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Unknown resource '{name}'")]
    UnknownResource { name: String },

    #[error("Unknown building '{name}'")]
    UnknownBuilding { name: String },

    #[error("Invalid amount: {amount} (must be > 0)")]
    InvalidAmount { amount: u32 },

    #[error("Game already started")]
    AlreadyStarted,

    #[error("Cannot advance {millis}ms at once (max {max}ms)")]
    AdvanceTooLong { millis: u64, max: u64 },
}

pub type GameResult<T> = Result<T, GameError>;
