use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Segment walks outside the grid bounds")]
    OutOfBounds,
    #[error("Segment length must be at least 1")]
    EmptySegment,
    #[error("Program has no segments")]
    EmptyProgram,
    #[error("Malformed level data")]
    MalformedLevelData,
    #[error("Playback already started")]
    AlreadyStarted,
    #[error("No highlight hold is pending")]
    NoPendingHold,
    #[error("No click is awaited")]
    NoPendingClick,
}

pub type Result<T> = core::result::Result<T, GameError>;
