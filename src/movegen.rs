use crate::board::{Board, MoveMatrix, Piece, Position};
use crate::chess::ChessPiece;

const ROOK_DIRECTIONS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

#[rustfmt::skip]
const KING_STEPS: [(i32, i32); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

fn empty_matrix(board: &Board<ChessPiece>) -> MoveMatrix {
    MoveMatrix::new(board.rows(), board.columns())
}

/// True iff `position` holds a piece of the other colour than `piece`.
pub fn is_opponent_piece(piece: &ChessPiece, board: &Board<ChessPiece>, position: Position) -> bool {
    board
        .get(position)
        .map_or(false, |other| other.color() != piece.color())
}

/// On the board and either empty or held by an opponent.
fn can_move(piece: &ChessPiece, board: &Board<ChessPiece>, position: Position) -> bool {
    board.contains(position)
        && (board.get(position).is_none() || is_opponent_piece(piece, board, position))
}

pub fn rook_moves(piece: &ChessPiece, board: &Board<ChessPiece>) -> MoveMatrix {
    let mut mat = empty_matrix(board);
    let Some(from) = piece.position() else {
        return mat;
    };

    // Walk each ray until the board edge or the first occupied square
    for &(dr, dc) in &ROOK_DIRECTIONS {
        let mut p = from.offset(dr, dc);
        while board.contains(p) && board.get(p).is_none() {
            mat.mark(p);
            p = p.offset(dr, dc);
        }
        if is_opponent_piece(piece, board, p) {
            mat.mark(p);
        }
    }
    mat
}

pub fn king_moves(piece: &ChessPiece, board: &Board<ChessPiece>) -> MoveMatrix {
    let mut mat = empty_matrix(board);
    let Some(from) = piece.position() else {
        return mat;
    };

    for &(dr, dc) in &KING_STEPS {
        let p = from.offset(dr, dc);
        if can_move(piece, board, p) {
            mat.mark(p);
        }
    }
    mat
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::{ChessPosition, Color, PieceId, PieceKind, BOARD_SIZE};

    fn sq(name: &str) -> Position {
        name.parse::<ChessPosition>().unwrap().to_position()
    }

    fn board_with(pieces: &[(&str, PieceKind, Color)]) -> Board<ChessPiece> {
        let mut board = Board::new(BOARD_SIZE, BOARD_SIZE).unwrap();
        for (i, &(at, kind, color)) in pieces.iter().enumerate() {
            let piece = ChessPiece::new(PieceId(i as u32), kind, color);
            board.place_piece(piece, sq(at)).unwrap();
        }
        board
    }

    fn reachable(mat: &MoveMatrix) -> Vec<String> {
        let mut names: Vec<String> = mat
            .positions()
            .map(|p| ChessPosition::from_position(p).unwrap().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_rook_on_empty_board() {
        let board = board_with(&[("d4", PieceKind::Rook, Color::White)]);
        let rook = board.get(sq("d4")).unwrap();
        let mat = rook.possible_moves(&board);

        assert_eq!(mat.count(), 14);
        assert!(!mat.get(sq("d4")));
        assert!(mat.get(sq("d8")));
        assert!(mat.get(sq("a4")));
        assert!(!mat.get(sq("e5")));
    }

    #[test]
    fn test_rook_stops_at_blockers() {
        let board = board_with(&[
            ("d4", PieceKind::Rook, Color::White),
            ("d6", PieceKind::Rook, Color::White),
            ("f4", PieceKind::Rook, Color::Black),
            ("d2", PieceKind::King, Color::Black),
        ]);
        let rook = board.get(sq("d4")).unwrap();
        let mat = rook.possible_moves(&board);

        assert_eq!(
            reachable(&mat),
            vec!["a4", "b4", "c4", "d2", "d3", "d5", "e4", "f4"]
        );
    }

    #[test]
    fn test_king_neighbours() {
        let board = board_with(&[
            ("a1", PieceKind::King, Color::White),
            ("a2", PieceKind::Rook, Color::White),
            ("b2", PieceKind::Rook, Color::Black),
        ]);
        let king = board.get(sq("a1")).unwrap();
        let mat = king.possible_moves(&board);

        assert_eq!(reachable(&mat), vec!["b1", "b2"]);
    }

    #[test]
    fn test_king_in_the_middle() {
        let board = board_with(&[("e5", PieceKind::King, Color::Black)]);
        let king = board.get(sq("e5")).unwrap();
        assert_eq!(king.possible_moves(&board).count(), 8);
    }

    #[test]
    fn test_off_board_piece_has_no_moves() {
        let board = board_with(&[]);
        let rook = ChessPiece::new(PieceId(9), PieceKind::Rook, Color::White);
        let king = ChessPiece::new(PieceId(10), PieceKind::King, Color::White);
        assert!(!rook.is_there_any_possible_move(&board));
        assert!(!king.is_there_any_possible_move(&board));
    }

    #[test]
    fn test_opponent_detection() {
        let board = board_with(&[
            ("c1", PieceKind::Rook, Color::White),
            ("c2", PieceKind::Rook, Color::White),
            ("c7", PieceKind::Rook, Color::Black),
        ]);
        let rook = board.get(sq("c1")).unwrap();
        assert!(is_opponent_piece(rook, &board, sq("c7")));
        assert!(!is_opponent_piece(rook, &board, sq("c2")));
        assert!(!is_opponent_piece(rook, &board, sq("c5")));
        assert!(!is_opponent_piece(rook, &board, Position::new(-1, 2)));
    }

    #[test]
    fn test_never_marks_own_square_or_friends() {
        let board = board_with(&[
            ("c1", PieceKind::Rook, Color::White),
            ("c2", PieceKind::Rook, Color::White),
            ("d2", PieceKind::Rook, Color::White),
            ("e2", PieceKind::Rook, Color::White),
            ("e1", PieceKind::Rook, Color::White),
            ("d1", PieceKind::King, Color::White),
            ("c7", PieceKind::Rook, Color::Black),
            ("c8", PieceKind::Rook, Color::Black),
            ("d7", PieceKind::Rook, Color::Black),
            ("e7", PieceKind::Rook, Color::Black),
            ("e8", PieceKind::Rook, Color::Black),
            ("d8", PieceKind::King, Color::Black),
        ]);
        for piece in board.pieces() {
            let mat = piece.possible_moves(&board);
            for friend in board.pieces().filter(|p| p.color() == piece.color()) {
                let at = friend.position().unwrap();
                assert!(!mat.get(at), "{} at {} reaches {}", piece, piece.position().unwrap(), at);
            }
        }
    }
}
