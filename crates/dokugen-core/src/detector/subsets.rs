//! Naked and hidden pairs.

use super::{all_units, Technique, TechniqueInstance};
use crate::board::{Board, Position};
use crate::digits::DigitSet;
use crate::solver::CandidateGrid;

/// Two cells of a unit sharing the same two-candidate mask. Useful only when
/// some other cell of the unit still carries one of the two digits.
pub(super) fn naked_pairs(board: &Board, cands: &CandidateGrid) -> Vec<TechniqueInstance> {
    let mut out = Vec::new();
    for (unit, cells) in all_units(board) {
        let empties: Vec<(Position, DigitSet)> = cells
            .iter()
            .filter(|pos| board.get(pos.row, pos.col) == 0)
            .map(|pos| (*pos, cands.at(pos.row, pos.col)))
            .collect();
        for i in 0..empties.len() {
            let (p1, m1) = empties[i];
            if m1.count() != 2 {
                continue;
            }
            for &(p2, m2) in &empties[i + 1..] {
                if m2 != m1 {
                    continue;
                }
                let useful = empties.iter().any(|&(other, mask)| {
                    other != p1 && other != p2 && !(mask & m1).is_empty()
                });
                if useful {
                    out.push(TechniqueInstance::new(
                        Technique::NakedPair,
                        p1.row,
                        p1.col,
                        format!(
                            "Cells ({}, {}) and ({}, {}) form a naked pair with {} in {}.",
                            p1.row + 1,
                            p1.col + 1,
                            p2.row + 1,
                            p2.col + 1,
                            m1,
                            unit
                        ),
                    ));
                }
            }
        }
    }
    out
}

/// Two digits confined to the same two cells of a unit, where at least one of
/// the cells still carries an extra candidate to eliminate.
pub(super) fn hidden_pairs(board: &Board, cands: &CandidateGrid) -> Vec<TechniqueInstance> {
    let side = board.side() as u8;
    let mut out = Vec::new();
    for (unit, cells) in all_units(board) {
        let empties: Vec<(Position, DigitSet)> = cells
            .iter()
            .filter(|pos| board.get(pos.row, pos.col) == 0)
            .map(|pos| (*pos, cands.at(pos.row, pos.col)))
            .collect();
        for d1 in 1..side {
            for d2 in (d1 + 1)..=side {
                let holders: Vec<(Position, DigitSet)> = empties
                    .iter()
                    .filter(|(_, mask)| mask.contains(d1) || mask.contains(d2))
                    .copied()
                    .collect();
                if holders.len() != 2 {
                    continue;
                }
                let (p1, m1) = holders[0];
                let (p2, m2) = holders[1];
                if !(m1.contains(d1) && m1.contains(d2) && m2.contains(d1) && m2.contains(d2)) {
                    continue;
                }
                if m1.count() > 2 || m2.count() > 2 {
                    out.push(TechniqueInstance::new(
                        Technique::HiddenPair,
                        p1.row,
                        p1.col,
                        format!(
                            "Hidden pair {} in {} at ({}, {}) and ({}, {}).",
                            DigitSet::of(&[d1, d2]),
                            unit,
                            p1.row + 1,
                            p1.col + 1,
                            p2.row + 1,
                            p2.col + 1
                        ),
                    ));
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::detector::TechniqueDetector;
    use crate::solver::CandidateGrid;

    const SOLUTION: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    fn blank(board: &mut Board, cells: &[(usize, usize)]) {
        for &(row, col) in cells {
            board.set(row, col, 0);
        }
    }

    #[test]
    fn test_naked_pair_in_column() {
        // Blanking a value rectangle plus two extra cells leaves (2,4) and
        // (5,4) with candidates {2,4} in column 4, and (7,4) with {1,4} as
        // the elimination target.
        let mut board = Board::from_string(SOLUTION);
        blank(&mut board, &[(2, 4), (2, 5), (5, 4), (5, 5), (7, 3), (7, 4)]);
        let cands = CandidateGrid::from_board(&board);
        let detector = TechniqueDetector::new(&board, &cands);
        let pairs = detector.naked_pairs();
        assert_eq!(pairs.len(), 1);
        assert_eq!((pairs[0].row, pairs[0].col), (2, 4));
        assert!(pairs[0].description.contains("column 5"));
    }

    #[test]
    fn test_naked_pair_requires_elimination_target() {
        // Only the rectangle: every unit containing a pair has no third cell
        // carrying either digit, so nothing is reported.
        let mut board = Board::from_string(SOLUTION);
        blank(&mut board, &[(2, 4), (2, 5), (5, 4), (5, 5)]);
        let cands = CandidateGrid::from_board(&board);
        let detector = TechniqueDetector::new(&board, &cands);
        assert!(detector.naked_pairs().is_empty());
    }

    #[test]
    fn test_hidden_pairs_on_classic_puzzle() {
        let board = Board::from_string(
            "530070000600195000098000060800060003400803001700020006060000280000419005000080079",
        );
        let cands = CandidateGrid::from_board(&board);
        let detector = TechniqueDetector::new(&board, &cands);
        let pairs = detector.hidden_pairs();
        assert_eq!(pairs.len(), 3);
        // 1 and 9 are confined to (6,0) and (6,2) in row 6, and (6,0) has
        // further candidates to strip.
        assert_eq!((pairs[0].row, pairs[0].col), (6, 0));
        assert!(pairs[0].description.contains("{1, 9}"));
        assert!(pairs[0].description.contains("row 7"));
    }

    #[test]
    fn test_hidden_pairs_absent_when_all_cells_bivalue() {
        let mut board = Board::from_string(SOLUTION);
        blank(&mut board, &[(2, 4), (2, 5), (5, 4), (5, 5)]);
        let cands = CandidateGrid::from_board(&board);
        let detector = TechniqueDetector::new(&board, &cands);
        assert!(detector.hidden_pairs().is_empty());
    }
}
