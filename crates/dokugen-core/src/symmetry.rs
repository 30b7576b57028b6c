//! Symmetry detection over clue positions.

use crate::board::Board;
use serde::{Deserialize, Serialize};

/// Which symmetries the clue layout exhibits, with a weighted score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SymmetryInfo {
    pub rotational: bool,
    pub horizontal: bool,
    pub vertical: bool,
    pub diagonal: bool,
    pub score: f64,
}

/// Predicates over clue positions (values are ignored).
///
/// A symmetry is reported only when every clue's image is also a clue and at
/// least one clue maps to a cell other than itself; a layout whose only
/// witnesses are fixed points of the mapping does not count.
pub struct SymmetryDetector;

impl SymmetryDetector {
    /// 180° rotation: (r, c) ↦ (S-1-r, S-1-c).
    pub fn is_rotational(board: &Board) -> bool {
        let side = board.side();
        holds(board, |row, col| (side - 1 - row, side - 1 - col))
    }

    /// Horizontal mirror: (r, c) ↦ (S-1-r, c).
    pub fn is_horizontal(board: &Board) -> bool {
        let side = board.side();
        holds(board, |row, col| (side - 1 - row, col))
    }

    /// Vertical mirror: (r, c) ↦ (r, S-1-c).
    pub fn is_vertical(board: &Board) -> bool {
        let side = board.side();
        holds(board, |row, col| (row, side - 1 - col))
    }

    /// Main-diagonal reflection: (r, c) ↦ (c, r).
    pub fn is_diagonal(board: &Board) -> bool {
        holds(board, |row, col| (col, row))
    }

    /// Weighted symmetry score: rotation 0.30, horizontal 0.25, vertical
    /// 0.25, diagonal 0.20.
    pub fn score(board: &Board) -> f64 {
        let mut score = 0.0;
        if Self::is_rotational(board) {
            score += 0.30;
        }
        if Self::is_horizontal(board) {
            score += 0.25;
        }
        if Self::is_vertical(board) {
            score += 0.25;
        }
        if Self::is_diagonal(board) {
            score += 0.20;
        }
        score
    }

    /// All four predicates plus the score.
    pub fn detect(board: &Board) -> SymmetryInfo {
        let rotational = Self::is_rotational(board);
        let horizontal = Self::is_horizontal(board);
        let vertical = Self::is_vertical(board);
        let diagonal = Self::is_diagonal(board);
        let mut score = 0.0;
        if rotational {
            score += 0.30;
        }
        if horizontal {
            score += 0.25;
        }
        if vertical {
            score += 0.25;
        }
        if diagonal {
            score += 0.20;
        }
        SymmetryInfo {
            rotational,
            horizontal,
            vertical,
            diagonal,
            score,
        }
    }
}

fn holds(board: &Board, map: impl Fn(usize, usize) -> (usize, usize)) -> bool {
    let mut proper_pair = false;
    for pos in board.clue_positions() {
        let (image_row, image_col) = map(pos.row, pos.col);
        if board.get(image_row, image_col) == 0 {
            return false;
        }
        if (image_row, image_col) != (pos.row, pos.col) {
            proper_pair = true;
        }
    }
    proper_pair
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_corner_clues() {
        // Clues at (0,0) and (8,8): rotation pairs them, the mirrors miss,
        // and the diagonal only fixes them in place.
        let mut board = Board::classic();
        board.set(0, 0, 1);
        board.set(8, 8, 2);
        let info = SymmetryDetector::detect(&board);
        assert!(info.rotational);
        assert!(!info.horizontal);
        assert!(!info.vertical);
        assert!(!info.diagonal);
        assert!((info.score - 0.30).abs() < 1e-9);
    }

    #[test]
    fn test_empty_board_has_no_symmetry() {
        let board = Board::classic();
        let info = SymmetryDetector::detect(&board);
        assert!(!info.rotational && !info.horizontal && !info.vertical && !info.diagonal);
        assert_eq!(info.score, 0.0);
    }

    #[test]
    fn test_horizontal_mirror() {
        let mut board = Board::classic();
        board.set(0, 3, 4);
        board.set(8, 3, 7);
        let info = SymmetryDetector::detect(&board);
        assert!(info.horizontal);
        assert!(!info.vertical);
        // (0,3) ↦ (8,5) under rotation, which is empty.
        assert!(!info.rotational);
    }

    #[test]
    fn test_diagonal_reflection() {
        let mut board = Board::classic();
        board.set(1, 5, 3);
        board.set(5, 1, 9);
        let info = SymmetryDetector::detect(&board);
        assert!(info.diagonal);
        assert!(!info.rotational);
        assert!((info.score - 0.20).abs() < 1e-9);
    }

    #[test]
    fn test_full_symmetry_scores_one() {
        // A fully clued board is symmetric every way.
        let board = Board::from_string(
            "534678912672195348198342567859761423426853791713924856961537284287419635345286179",
        );
        let info = SymmetryDetector::detect(&board);
        assert!((info.score - 1.0).abs() < 1e-9);
    }
}
