//! Naked and hidden singles.

use super::{all_units, Technique, TechniqueInstance};
use crate::board::Board;
use crate::solver::CandidateGrid;
use std::collections::HashSet;

/// Empty cells with exactly one candidate. Always useful.
pub(super) fn naked_singles(board: &Board, cands: &CandidateGrid) -> Vec<TechniqueInstance> {
    let mut out = Vec::new();
    for pos in board.empty_positions() {
        if let Some(digit) = cands.at(pos.row, pos.col).single() {
            out.push(TechniqueInstance::new(
                Technique::NakedSingle,
                pos.row,
                pos.col,
                format!(
                    "Cell ({}, {}) can only be {} - it's the only candidate left.",
                    pos.row + 1,
                    pos.col + 1,
                    digit
                ),
            ));
        }
    }
    out
}

pub(super) fn has_naked_single(board: &Board, cands: &CandidateGrid) -> bool {
    board
        .empty_positions()
        .into_iter()
        .any(|pos| cands.at(pos.row, pos.col).single().is_some())
}

/// Digits that appear as a candidate in exactly one cell of a unit. Always
/// useful. A cell reported via its row is not re-reported via the overlapping
/// column or box; the dedup key is the cell alone, not the digit.
pub(super) fn hidden_singles(board: &Board, cands: &CandidateGrid) -> Vec<TechniqueInstance> {
    let mut out = Vec::new();
    let mut seen: HashSet<(usize, usize)> = HashSet::new();
    for (unit, cells) in all_units(board) {
        for digit in 1..=board.side() as u8 {
            let mut holders = cells.iter().filter(|pos| {
                board.get(pos.row, pos.col) == 0 && cands.at(pos.row, pos.col).contains(digit)
            });
            let first = match holders.next() {
                Some(pos) => *pos,
                None => continue,
            };
            if holders.next().is_some() {
                continue;
            }
            if seen.insert((first.row, first.col)) {
                out.push(TechniqueInstance::new(
                    Technique::HiddenSingle,
                    first.row,
                    first.col,
                    format!(
                        "{} can only go in cell ({}, {}) in {}.",
                        digit,
                        first.row + 1,
                        first.col + 1,
                        unit
                    ),
                ));
            }
        }
    }
    out
}

pub(super) fn has_hidden_single(board: &Board, cands: &CandidateGrid) -> bool {
    for (_, cells) in all_units(board) {
        for digit in 1..=board.side() as u8 {
            let count = cells
                .iter()
                .filter(|pos| {
                    board.get(pos.row, pos.col) == 0 && cands.at(pos.row, pos.col).contains(digit)
                })
                .count();
            if count == 1 {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use crate::board::Board;
    use crate::detector::{Technique, TechniqueDetector};
    use crate::solver::CandidateGrid;

    const PUZZLE: &str =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";

    #[test]
    fn test_naked_singles_on_classic_puzzle() {
        let board = Board::from_string(PUZZLE);
        let cands = CandidateGrid::from_board(&board);
        let detector = TechniqueDetector::new(&board, &cands);
        let singles = detector.naked_singles();
        assert_eq!(singles.len(), 4);
        assert!(detector.has_naked_single());
        // Every reported cell really has a single candidate, and it matches
        // the known solution.
        let solution =
            "534678912672195348198342567859761423426853791713924856961537284287419635345286179";
        let solved = Board::from_string(solution);
        for instance in &singles {
            assert_eq!(instance.technique, Technique::NakedSingle);
            let mask = cands.at(instance.row, instance.col);
            assert_eq!(mask.count(), 1);
            assert_eq!(mask.single().unwrap(), solved.get(instance.row, instance.col));
        }
    }

    #[test]
    fn test_hidden_singles_on_hidden_single_puzzle() {
        // Solvable by hidden singles alone.
        let board = Board::from_string(
            "000000010400000000020000000000050407008000300001090000300400200050100000000806000",
        );
        let cands = CandidateGrid::from_board(&board);
        let detector = TechniqueDetector::new(&board, &cands);
        assert!(detector.has_hidden_single());
        let singles = detector.hidden_singles();
        assert!(!singles.is_empty());
        for instance in &singles {
            assert_eq!(instance.technique, Technique::HiddenSingle);
        }
    }

    #[test]
    fn test_hidden_singles_deduplicate_by_cell() {
        let board = Board::from_string(PUZZLE);
        let cands = CandidateGrid::from_board(&board);
        let detector = TechniqueDetector::new(&board, &cands);
        let singles = detector.hidden_singles();
        let mut cells: Vec<(usize, usize)> =
            singles.iter().map(|i| (i.row, i.col)).collect();
        let before = cells.len();
        cells.sort_unstable();
        cells.dedup();
        assert_eq!(before, cells.len());
    }

    #[test]
    fn test_no_singles_on_complete_board() {
        let board = Board::from_string(
            "534678912672195348198342567859761423426853791713924856961537284287419635345286179",
        );
        let cands = CandidateGrid::from_board(&board);
        let detector = TechniqueDetector::new(&board, &cands);
        assert!(detector.naked_singles().is_empty());
        assert!(detector.hidden_singles().is_empty());
        assert!(!detector.has_naked_single());
        assert!(!detector.has_hidden_single());
    }
}
