pub mod board;
pub mod chess;
pub mod chess_match;
pub mod error;
pub mod movegen;
pub mod setup;

pub use chess::{ChessPiece, ChessPosition, Color, PieceKind};
pub use chess_match::ChessMatch;
pub use error::{ChessError, ChessResult};
pub use setup::Setup;
