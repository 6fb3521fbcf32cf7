use std::fmt;
use thiserror::Error;

/// Zero-based `(row, column)` coordinate on a board grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: i32,
    pub column: i32,
}

impl Position {
    pub const fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// The position shifted by `(dr, dc)`. May fall outside any board.
    pub const fn offset(self, dr: i32, dc: i32) -> Self {
        Self::new(self.row + dr, self.column + dc)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}, {}", self.row, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("Error creating board: there must be at least 1 row and 1 column")]
    InvalidDimensions,
    #[error("Position not on the board: {0}")]
    PositionOutOfBounds(Position),
    #[error("There is already a piece on position {0}")]
    SquareOccupied(Position),
    #[error("There is no piece on position {0}")]
    EmptySquare(Position),
}

/// Dense grid of reachable squares returned by [`Piece::possible_moves`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveMatrix {
    rows: usize,
    columns: usize,
    cells: Vec<bool>,
}

impl MoveMatrix {
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![false; rows * columns],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    fn index(&self, position: Position) -> Option<usize> {
        let (row, column) = (position.row, position.column);
        if row < 0 || column < 0 || row as usize >= self.rows || column as usize >= self.columns {
            return None;
        }
        Some(row as usize * self.columns + column as usize)
    }

    /// Off-grid positions are never reachable.
    pub fn get(&self, position: Position) -> bool {
        self.index(position).map_or(false, |i| self.cells[i])
    }

    /// Marks `position` reachable. Off-grid positions are ignored.
    pub fn mark(&mut self, position: Position) {
        if let Some(i) = self.index(position) {
            self.cells[i] = true;
        }
    }

    pub fn any(&self) -> bool {
        self.cells.iter().any(|&cell| cell)
    }

    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Reachable positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell)
            .map(move |(i, _)| Position::new((i / columns) as i32, (i % columns) as i32))
    }

    pub fn row(&self, row: usize) -> &[bool] {
        &self.cells[row * self.columns..(row + 1) * self.columns]
    }
}

/// Something that can stand on a [`Board`].
///
/// A piece does not hold a reference to its board. Movement queries take the
/// board as an argument instead, so the board is the only owner of placed pieces.
pub trait Piece: Sized {
    fn position(&self) -> Option<Position>;

    fn set_position(&mut self, position: Option<Position>);

    /// Squares this piece could move to under its own movement rule, given the
    /// current occupancy of `board`. Must not have side effects.
    fn possible_moves(&self, board: &Board<Self>) -> MoveMatrix;

    fn possible_move(&self, board: &Board<Self>, target: Position) -> bool {
        self.possible_moves(board).get(target)
    }

    fn is_there_any_possible_move(&self, board: &Board<Self>) -> bool {
        self.possible_moves(board).any()
    }
}

/// Rectangular grid where each slot holds at most one piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board<P> {
    rows: usize,
    columns: usize,
    slots: Vec<Option<P>>,
}

impl<P: Piece> Board<P> {
    pub fn new(rows: usize, columns: usize) -> Result<Self, BoardError> {
        if rows < 1 || columns < 1 {
            return Err(BoardError::InvalidDimensions);
        }
        let mut slots = Vec::with_capacity(rows * columns);
        slots.resize_with(rows * columns, || None);
        Ok(Self {
            rows,
            columns,
            slots,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn position_exists(&self, row: i32, column: i32) -> bool {
        row >= 0 && column >= 0 && (row as usize) < self.rows && (column as usize) < self.columns
    }

    pub fn contains(&self, position: Position) -> bool {
        self.position_exists(position.row, position.column)
    }

    fn index(&self, position: Position) -> Result<usize, BoardError> {
        if !self.contains(position) {
            return Err(BoardError::PositionOutOfBounds(position));
        }
        Ok(position.row as usize * self.columns + position.column as usize)
    }

    pub fn piece(&self, row: i32, column: i32) -> Result<Option<&P>, BoardError> {
        self.piece_at(Position::new(row, column))
    }

    pub fn piece_at(&self, position: Position) -> Result<Option<&P>, BoardError> {
        let i = self.index(position)?;
        Ok(self.slots[i].as_ref())
    }

    /// Non-failing lookup: off-board positions read as empty.
    pub fn get(&self, position: Position) -> Option<&P> {
        self.index(position).ok().and_then(|i| self.slots[i].as_ref())
    }

    pub fn place_piece(&mut self, mut piece: P, position: Position) -> Result<(), BoardError> {
        let i = self.index(position)?;
        if self.slots[i].is_some() {
            return Err(BoardError::SquareOccupied(position));
        }
        piece.set_position(Some(position));
        self.slots[i] = Some(piece);
        Ok(())
    }

    pub fn remove_piece(&mut self, position: Position) -> Result<Option<P>, BoardError> {
        let i = self.index(position)?;
        Ok(self.slots[i].take().map(|mut piece| {
            piece.set_position(None);
            piece
        }))
    }

    pub fn there_is_a_piece(&self, position: Position) -> Result<bool, BoardError> {
        Ok(self.piece_at(position)?.is_some())
    }

    /// Occupied slots in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = &P> + '_ {
        self.slots.iter().flatten()
    }
}

impl<P: Piece + fmt::Display> fmt::Display for Board<P> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.slots.chunks(self.columns) {
            let line: Vec<String> = row
                .iter()
                .map(|slot| match slot {
                    Some(piece) => piece.to_string(),
                    None => "-".to_string(),
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
