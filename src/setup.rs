//! Starting positions for a match.

use crate::chess::{ChessPosition, Color, PieceKind};
use crate::error::{ChessError, ChessResult};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub column: char,
    pub row: u8,
    pub color: Color,
    pub kind: PieceKind,
}

/// An ordered list of pieces to put on an empty board.
///
/// Placement order fixes the [`PieceId`](crate::chess::PieceId) each piece gets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Setup {
    placements: Vec<Placement>,
}

impl Setup {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Rooks and kings only: the position every [`ChessMatch::new`](crate::ChessMatch::new) starts from.
    pub fn demo() -> Self {
        Self::empty()
            .place('c', 1, Color::White, PieceKind::Rook)
            .place('c', 2, Color::White, PieceKind::Rook)
            .place('d', 2, Color::White, PieceKind::Rook)
            .place('e', 2, Color::White, PieceKind::Rook)
            .place('e', 1, Color::White, PieceKind::Rook)
            .place('d', 1, Color::White, PieceKind::King)
            .place('c', 7, Color::Black, PieceKind::Rook)
            .place('c', 8, Color::Black, PieceKind::Rook)
            .place('d', 7, Color::Black, PieceKind::Rook)
            .place('e', 7, Color::Black, PieceKind::Rook)
            .place('e', 8, Color::Black, PieceKind::Rook)
            .place('d', 8, Color::Black, PieceKind::King)
    }

    pub fn place(mut self, column: char, row: u8, color: Color, kind: PieceKind) -> Self {
        self.placements.push(Placement {
            column,
            row,
            color,
            kind,
        });
        self
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Checks what can be checked without a board: coordinates, free squares,
    /// and exactly one king per colour.
    pub fn validate(&self) -> ChessResult<()> {
        let mut occupied = HashSet::new();
        for placement in &self.placements {
            let at = ChessPosition::new(placement.column, placement.row)?;
            if !occupied.insert(at) {
                return Err(ChessError::InvalidSetup(format!("two pieces on {}", at)));
            }
        }

        for color in [Color::White, Color::Black] {
            let kings = self
                .placements
                .iter()
                .filter(|p| p.color == color && p.kind == PieceKind::King)
                .count();
            if kings != 1 {
                return Err(ChessError::InvalidSetup(format!(
                    "{} has {} kings, expected 1",
                    color, kings
                )));
            }
        }
        Ok(())
    }
}
