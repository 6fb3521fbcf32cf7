//! Errors surfaced by the chess layer and the match controller.

use crate::board::BoardError;
use crate::chess::Color;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    #[error("Error instantiating ChessPosition. Valid values are from a1 to h8")]
    OutOfBoardCoordinate,
    #[error("There is no piece on source position")]
    NoPieceAtSource,
    #[error("The chosen piece is not yours")]
    NotYourPiece,
    #[error("There is no possible moves for the chosen piece")]
    NoMovesForPiece,
    #[error("The chosen piece can't move to target position")]
    IllegalDestination,
    #[error("You can't put yourself in check")]
    WouldSelfCheck,
    /// A colour lost its king. Never caused by play, only by a broken invariant.
    #[error("There is no {0} king on the board")]
    MissingKing(Color),
    #[error("Invalid setup: {0}")]
    InvalidSetup(String),
    #[error(transparent)]
    Board(#[from] BoardError),
}

impl ChessError {
    /// True for the outcomes of invalid play that a caller reports and re-prompts on.
    pub fn is_user_error(&self) -> bool {
        !matches!(
            self,
            ChessError::MissingKing(_) | ChessError::InvalidSetup(_) | ChessError::Board(_)
        )
    }
}

pub type ChessResult<T> = Result<T, ChessError>;
