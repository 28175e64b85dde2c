use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board size must be at least 2")]
    BoardTooSmall,
    #[error("At least 2 colors are required")]
    TooFewColors,
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Color index is out of range")]
    InvalidColor,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("No saved game to restore")]
    NoSavedState,
    #[error("Saved game could not be decoded")]
    CorruptState,
    #[error("Saved game does not match the current settings")]
    StateMismatch,
}

impl GameError {
    /// Whether this error means "start a fresh game instead" when resuming.
    pub const fn is_restore_failure(self) -> bool {
        matches!(
            self,
            Self::NoSavedState | Self::CorruptState | Self::StateMismatch
        )
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
