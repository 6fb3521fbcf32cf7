use crate::board::{Board, MoveMatrix, Piece, Position};
use crate::error::{ChessError, ChessResult};
use crate::movegen;
use std::fmt;
use std::str::FromStr;

pub const BOARD_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(&self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Color::White => write!(f, "WHITE"),
            Color::Black => write!(f, "BLACK"),
        }
    }
}

/// Algebraic square: file `'a'..='h'`, rank `1..=8`.
///
/// Rank 1 is raw row 7 and rank 8 is raw row 0; file `a` is raw column 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessPosition {
    column: char,
    row: u8,
}

impl ChessPosition {
    pub fn new(column: char, row: u8) -> ChessResult<Self> {
        if !('a'..='h').contains(&column) || !(1..=8).contains(&row) {
            return Err(ChessError::OutOfBoardCoordinate);
        }
        Ok(Self { column, row })
    }

    pub fn column(&self) -> char {
        self.column
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn to_position(&self) -> Position {
        Position::new(
            BOARD_SIZE as i32 - self.row as i32,
            self.column as i32 - 'a' as i32,
        )
    }

    pub fn from_position(position: Position) -> ChessResult<Self> {
        let size = BOARD_SIZE as i32;
        if !(0..size).contains(&position.row) || !(0..size).contains(&position.column) {
            return Err(ChessError::OutOfBoardCoordinate);
        }
        let column = (b'a' + position.column as u8) as char;
        Self::new(column, (size - position.row) as u8)
    }
}

impl fmt::Display for ChessPosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row)
    }
}

impl FromStr for ChessPosition {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let (Some(column), Some(row), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ChessError::OutOfBoardCoordinate);
        };
        let row = row.to_digit(10).ok_or(ChessError::OutOfBoardCoordinate)?;
        Self::new(column, row as u8)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    King,
    Rook,
}

impl PieceKind {
    pub fn symbol(&self) -> char {
        match self {
            PieceKind::King => 'K',
            PieceKind::Rook => 'R',
        }
    }
}

/// Stable identity of a piece for the lifetime of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChessPiece {
    id: PieceId,
    kind: PieceKind,
    color: Color,
    position: Option<Position>,
}

impl ChessPiece {
    /// A piece that is not yet on any board.
    pub fn new(id: PieceId, kind: PieceKind, color: Color) -> Self {
        Self {
            id,
            kind,
            color,
            position: None,
        }
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// `None` while the piece is off the board.
    pub fn chess_position(&self) -> Option<ChessPosition> {
        self.position
            .and_then(|position| ChessPosition::from_position(position).ok())
    }
}

impl Piece for ChessPiece {
    fn position(&self) -> Option<Position> {
        self.position
    }

    fn set_position(&mut self, position: Option<Position>) {
        self.position = position;
    }

    fn possible_moves(&self, board: &Board<Self>) -> MoveMatrix {
        match self.kind {
            PieceKind::King => movegen::king_moves(self, board),
            PieceKind::Rook => movegen::rook_moves(self, board),
        }
    }
}

impl fmt::Display for ChessPiece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.kind.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algebraic_round_trip() {
        for column in 'a'..='h' {
            for row in 1..=8 {
                let p = ChessPosition::new(column, row).unwrap();
                assert_eq!(ChessPosition::from_position(p.to_position()).unwrap(), p);
            }
        }
    }

    #[test]
    fn test_coordinate_convention() {
        let a1 = ChessPosition::new('a', 1).unwrap();
        let h8 = ChessPosition::new('h', 8).unwrap();
        let d1 = ChessPosition::new('d', 1).unwrap();

        assert_eq!(a1.to_position(), Position::new(7, 0));
        assert_eq!(h8.to_position(), Position::new(0, 7));
        assert_eq!(d1.to_position(), Position::new(7, 3));
    }

    #[test]
    fn test_rejects_out_of_board_coordinates() {
        assert_eq!(ChessPosition::new('i', 1), Err(ChessError::OutOfBoardCoordinate));
        assert_eq!(ChessPosition::new('a', 0), Err(ChessError::OutOfBoardCoordinate));
        assert_eq!(ChessPosition::new('a', 9), Err(ChessError::OutOfBoardCoordinate));
        assert_eq!(ChessPosition::new('A', 1), Err(ChessError::OutOfBoardCoordinate));
        assert_eq!(
            ChessPosition::from_position(Position::new(8, 0)),
            Err(ChessError::OutOfBoardCoordinate)
        );
        assert_eq!(
            ChessPosition::from_position(Position::new(0, -1)),
            Err(ChessError::OutOfBoardCoordinate)
        );
    }

    #[test]
    fn test_parse_and_display() {
        let e2: ChessPosition = "e2".parse().unwrap();
        assert_eq!(e2, ChessPosition::new('e', 2).unwrap());
        assert_eq!(e2.to_string(), "e2");
        assert_eq!(" c7 ".parse::<ChessPosition>().unwrap().to_string(), "c7");

        for bad in ["", "e", "e22", "z1", "a0", "a9", "1a"] {
            assert_eq!(bad.parse::<ChessPosition>(), Err(ChessError::OutOfBoardCoordinate));
        }
    }

    #[test]
    fn test_piece_reports_chess_position() {
        let mut board = Board::new(BOARD_SIZE, BOARD_SIZE).unwrap();
        let rook = ChessPiece::new(PieceId(0), PieceKind::Rook, Color::White);
        assert_eq!(rook.chess_position(), None);

        let c1 = ChessPosition::new('c', 1).unwrap();
        board.place_piece(rook, c1.to_position()).unwrap();
        let placed = board.get(c1.to_position()).unwrap();
        assert_eq!(placed.chess_position(), Some(c1));
        assert_eq!(placed.to_string(), "R");
    }

    #[test]
    fn test_color_display() {
        assert_eq!(Color::White.to_string(), "WHITE");
        assert_eq!(Color::Black.opposite(), Color::White);
    }
}
