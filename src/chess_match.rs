use crate::board::{Board, BoardError, MoveMatrix, Piece, Position};
use crate::chess::{ChessPiece, ChessPosition, Color, PieceId, PieceKind, BOARD_SIZE};
use crate::error::{ChessError, ChessResult};
use crate::setup::Setup;
use std::collections::BTreeSet;
use tracing::{debug, trace, warn};

/// Rules controller for one match: turn order, move legality and check.
///
/// Every failing call leaves the match exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChessMatch {
    turn: u32,
    current_player: Color,
    check: bool,
    board: Board<ChessPiece>,
    pieces_on_the_board: BTreeSet<PieceId>,
    captured_pieces: Vec<ChessPiece>,
}

impl ChessMatch {
    pub fn new() -> ChessResult<Self> {
        Self::with_setup(Setup::demo())
    }

    pub fn with_setup(setup: Setup) -> ChessResult<Self> {
        setup.validate()?;

        let mut chess_match = Self {
            turn: 1,
            current_player: Color::White,
            check: false,
            board: Board::new(BOARD_SIZE, BOARD_SIZE)?,
            pieces_on_the_board: BTreeSet::new(),
            captured_pieces: Vec::new(),
        };
        for (i, placement) in setup.placements().iter().enumerate() {
            let piece = ChessPiece::new(PieceId(i as u32), placement.kind, placement.color);
            chess_match.place_new_piece(placement.column, placement.row, piece)?;
        }

        // The side that does not move first must not be attackable on turn 1.
        if chess_match.test_check(Color::Black)? {
            return Err(ChessError::InvalidSetup(
                "BLACK king is attacked with WHITE to move".to_string(),
            ));
        }
        chess_match.check = chess_match.test_check(Color::White)?;
        Ok(chess_match)
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    pub fn check(&self) -> bool {
        self.check
    }

    pub fn board(&self) -> &Board<ChessPiece> {
        &self.board
    }

    /// Board snapshot, rank 8 first.
    pub fn pieces(&self) -> [[Option<ChessPiece>; BOARD_SIZE]; BOARD_SIZE] {
        let mut mat = [[None; BOARD_SIZE]; BOARD_SIZE];
        for piece in self.board.pieces() {
            if let Some(p) = piece.position() {
                mat[p.row as usize][p.column as usize] = Some(*piece);
            }
        }
        mat
    }

    /// Live roster, in board order.
    pub fn pieces_on_the_board(&self) -> impl Iterator<Item = &ChessPiece> + '_ {
        let roster = &self.pieces_on_the_board;
        self.board
            .pieces()
            .filter(move |p| roster.contains(&p.id()))
    }

    /// Captured roster, in capture order.
    pub fn captured_pieces(&self) -> &[ChessPiece] {
        &self.captured_pieces
    }

    pub fn captured_by_color(&self, color: Color) -> impl Iterator<Item = &ChessPiece> + '_ {
        self.captured_pieces.iter().filter(move |p| p.color() == color)
    }

    pub fn possible_moves(&self, source_position: ChessPosition) -> ChessResult<MoveMatrix> {
        let position = source_position.to_position();
        let piece = self.validate_source_position(position)?;
        Ok(piece.possible_moves(&self.board))
    }

    /// Moves the piece on `source_position` to `target_position` for the side
    /// to move. Returns the captured piece, if any.
    pub fn perform_chess_move(
        &mut self,
        source_position: ChessPosition,
        target_position: ChessPosition,
    ) -> ChessResult<Option<ChessPiece>> {
        let (turn, player) = (self.turn, self.current_player);
        match self.try_chess_move(source_position, target_position) {
            Ok(captured) => {
                debug!(
                    turn,
                    player = %player,
                    source = %source_position,
                    target = %target_position,
                    captured = captured.is_some(),
                    check = self.check,
                    "move accepted"
                );
                Ok(captured)
            }
            Err(e) => {
                debug!(
                    turn,
                    player = %player,
                    source = %source_position,
                    target = %target_position,
                    error = %e,
                    "move rejected"
                );
                Err(e)
            }
        }
    }

    fn try_chess_move(
        &mut self,
        source_position: ChessPosition,
        target_position: ChessPosition,
    ) -> ChessResult<Option<ChessPiece>> {
        let source = source_position.to_position();
        let target = target_position.to_position();
        self.validate_source_position(source)?;
        self.validate_target_position(source, target)?;

        let captured = self.make_move(source, target)?;

        if self.test_check(self.current_player)? {
            self.undo_move(source, target, captured)?;
            warn!(
                player = %self.current_player,
                source = %source_position,
                target = %target_position,
                "move would expose own king, rolled back"
            );
            return Err(ChessError::WouldSelfCheck);
        }

        self.check = self.test_check(self.current_player.opposite())?;
        self.next_turn();
        Ok(captured)
    }

    fn make_move(&mut self, source: Position, target: Position) -> ChessResult<Option<ChessPiece>> {
        let piece = self
            .board
            .remove_piece(source)?
            .ok_or(BoardError::EmptySquare(source))?;
        let captured = self.board.remove_piece(target)?;
        self.board.place_piece(piece, target)?;

        if let Some(captured) = captured {
            self.pieces_on_the_board.remove(&captured.id());
            self.captured_pieces.push(captured);
        }
        trace!(%source, %target, captured = ?captured.map(|p| p.id()), "made move");
        Ok(captured)
    }

    fn undo_move(
        &mut self,
        source: Position,
        target: Position,
        captured: Option<ChessPiece>,
    ) -> ChessResult<()> {
        let piece = self
            .board
            .remove_piece(target)?
            .ok_or(BoardError::EmptySquare(target))?;
        self.board.place_piece(piece, source)?;

        if let Some(captured) = captured {
            if let Some(i) = self
                .captured_pieces
                .iter()
                .rposition(|p| p.id() == captured.id())
            {
                let restored = self.captured_pieces.remove(i);
                self.board.place_piece(restored, target)?;
                self.pieces_on_the_board.insert(restored.id());
            }
        }
        trace!(%source, %target, "undid move");
        Ok(())
    }

    fn validate_source_position(&self, position: Position) -> ChessResult<&ChessPiece> {
        let piece = self
            .board
            .piece_at(position)?
            .ok_or(ChessError::NoPieceAtSource)?;
        if piece.color() != self.current_player {
            return Err(ChessError::NotYourPiece);
        }
        if !piece.is_there_any_possible_move(&self.board) {
            return Err(ChessError::NoMovesForPiece);
        }
        Ok(piece)
    }

    fn validate_target_position(&self, source: Position, target: Position) -> ChessResult<()> {
        let piece = self
            .board
            .piece_at(source)?
            .ok_or(ChessError::NoPieceAtSource)?;
        if !piece.possible_move(&self.board, target) {
            return Err(ChessError::IllegalDestination);
        }
        Ok(())
    }

    fn next_turn(&mut self) {
        self.turn += 1;
        self.current_player = self.current_player.opposite();
    }

    fn king(&self, color: Color) -> ChessResult<&ChessPiece> {
        self.pieces_on_the_board()
            .find(|p| p.color() == color && p.kind() == PieceKind::King)
            .ok_or(ChessError::MissingKing(color))
    }

    /// True iff some live piece of the other colour can reach `color`'s king.
    fn test_check(&self, color: Color) -> ChessResult<bool> {
        let king_position = self
            .king(color)?
            .position()
            .ok_or(ChessError::MissingKing(color))?;
        Ok(self
            .pieces_on_the_board()
            .filter(|p| p.color() == color.opposite())
            .any(|p| p.possible_moves(&self.board).get(king_position)))
    }

    fn place_new_piece(&mut self, column: char, row: u8, piece: ChessPiece) -> ChessResult<()> {
        let position = ChessPosition::new(column, row)?.to_position();
        self.board.place_piece(piece, position)?;
        self.pieces_on_the_board.insert(piece.id());
        Ok(())
    }
}
