use thiserror::Error;

use crate::models::{ActionType, TeamSide};

/// Rejections from the engine and the history. A rejected call changes nothing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("Player number is empty")]
    EmptyNumber,

    #[error("#{number} is already on the {side} court")]
    DuplicateNumber { number: String, side: TeamSide },

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,

    #[error("{0} cannot be recorded as a rally")]
    UnsupportedAction(ActionType),

    #[error("Invalid lineup: {0}")]
    InvalidLineup(String),
}

pub type Result<T> = std::result::Result<T, MatchError>;
