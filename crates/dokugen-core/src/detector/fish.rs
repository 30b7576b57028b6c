//! Fish patterns: X-Wing and Swordfish, row- and column-based.

use super::{Technique, TechniqueInstance};
use crate::board::Board;
use crate::solver::CandidateGrid;

/// Columns (for row-based fish) or rows (for column-based fish) in which a
/// digit is still a candidate along the given line.
fn line_positions(
    board: &Board,
    cands: &CandidateGrid,
    digit: u8,
    line: usize,
    row_based: bool,
) -> Vec<usize> {
    (0..board.side())
        .filter(|&i| {
            let (row, col) = if row_based { (line, i) } else { (i, line) };
            board.get(row, col) == 0 && cands.at(row, col).contains(digit)
        })
        .collect()
}

/// Does the digit survive as a candidate at (row, col)?
fn has_candidate(board: &Board, cands: &CandidateGrid, digit: u8, row: usize, col: usize) -> bool {
    board.get(row, col) == 0 && cands.at(row, col).contains(digit)
}

/// Two lines holding a digit in exactly the same two cross-lines. Useful only
/// when a third line still carries the digit in one of those cross-lines.
pub(super) fn x_wings(board: &Board, cands: &CandidateGrid) -> Vec<TechniqueInstance> {
    let side = board.side();
    let mut out = Vec::new();
    for digit in 1..=side as u8 {
        for row_based in [true, false] {
            let lines: Vec<(usize, Vec<usize>)> = (0..side)
                .map(|line| (line, line_positions(board, cands, digit, line, row_based)))
                .filter(|(_, positions)| positions.len() == 2)
                .collect();
            for i in 0..lines.len() {
                for j in (i + 1)..lines.len() {
                    if lines[i].1 != lines[j].1 {
                        continue;
                    }
                    let pair = [lines[i].0, lines[j].0];
                    let cross = &lines[i].1;
                    let useful = (0..side).any(|line| {
                        !pair.contains(&line)
                            && cross.iter().any(|&c| {
                                let (row, col) = if row_based { (line, c) } else { (c, line) };
                                has_candidate(board, cands, digit, row, col)
                            })
                    });
                    if !useful {
                        continue;
                    }
                    let (row, col) = if row_based {
                        (pair[0], cross[0])
                    } else {
                        (cross[0], pair[0])
                    };
                    let (kind, cross_kind) = if row_based {
                        ("rows", "columns")
                    } else {
                        ("columns", "rows")
                    };
                    out.push(TechniqueInstance::new(
                        Technique::XWing,
                        row,
                        col,
                        format!(
                            "X-Wing on {} in {} {} and {}, {} {} and {}.",
                            digit,
                            kind,
                            pair[0] + 1,
                            pair[1] + 1,
                            cross_kind,
                            cross[0] + 1,
                            cross[1] + 1
                        ),
                    ));
                }
            }
        }
    }
    out
}

/// Three lines, each with two or three cells for a digit, whose cross-lines
/// union to exactly three. Useful only when a fourth line still carries the
/// digit in one of those cross-lines.
pub(super) fn swordfish(board: &Board, cands: &CandidateGrid) -> Vec<TechniqueInstance> {
    let side = board.side();
    let mut out = Vec::new();
    for digit in 1..=side as u8 {
        for row_based in [true, false] {
            let lines: Vec<(usize, Vec<usize>)> = (0..side)
                .map(|line| (line, line_positions(board, cands, digit, line, row_based)))
                .filter(|(_, positions)| positions.len() == 2 || positions.len() == 3)
                .collect();
            for i in 0..lines.len() {
                for j in (i + 1)..lines.len() {
                    for k in (j + 1)..lines.len() {
                        let mut union: Vec<usize> = Vec::new();
                        union.extend(&lines[i].1);
                        union.extend(&lines[j].1);
                        union.extend(&lines[k].1);
                        union.sort_unstable();
                        union.dedup();
                        if union.len() != 3 {
                            continue;
                        }
                        let triple = [lines[i].0, lines[j].0, lines[k].0];
                        let useful = (0..side).any(|line| {
                            !triple.contains(&line)
                                && union.iter().any(|&c| {
                                    let (row, col) = if row_based { (line, c) } else { (c, line) };
                                    has_candidate(board, cands, digit, row, col)
                                })
                        });
                        if !useful {
                            continue;
                        }
                        let anchor_cross = lines[i].1[0];
                        let (row, col) = if row_based {
                            (triple[0], anchor_cross)
                        } else {
                            (anchor_cross, triple[0])
                        };
                        let kind = if row_based { "rows" } else { "columns" };
                        out.push(TechniqueInstance::new(
                            Technique::Swordfish,
                            row,
                            col,
                            format!(
                                "Swordfish on {} in {} {}, {} and {}.",
                                digit,
                                kind,
                                triple[0] + 1,
                                triple[1] + 1,
                                triple[2] + 1
                            ),
                        ));
                    }
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
    fn test_x_wing_detected() {
        // Rows 2 and 5 hold 4 only in columns 4 and 5; row 7 still carries a
        // 4 in column 4, so the pattern eliminates something.
        let mut board = Board::from_string(SOLUTION);
        blank(&mut board, &[(2, 4), (2, 5), (5, 4), (5, 5), (7, 3), (7, 4)]);
        let cands = CandidateGrid::from_board(&board);
        let detector = TechniqueDetector::new(&board, &cands);
        let instances = detector.x_wings();
        assert_eq!(instances.len(), 1);
        assert_eq!((instances[0].row, instances[0].col), (2, 4));
        assert!(instances[0].description.contains("X-Wing on 4"));
    }

    #[test]
    fn test_x_wing_requires_elimination_target() {
        // The bare rectangle forms the pattern for 2 and 4 but no other line
        // carries either digit.
        let mut board = Board::from_string(SOLUTION);
        blank(&mut board, &[(2, 4), (2, 5), (5, 4), (5, 5)]);
        let cands = CandidateGrid::from_board(&board);
        let detector = TechniqueDetector::new(&board, &cands);
        assert!(detector.x_wings().is_empty());
    }

    #[test]
    fn test_swordfish_detected() {
        // Rows 2, 5 and 7 confine 4 to columns 3, 4 and 5; row 1 still
        // carries a 4 in column 3.
        let mut board = Board::from_string(SOLUTION);
        blank(
            &mut board,
            &[
                (1, 3),
                (1, 7),
                (2, 4),
                (2, 5),
                (5, 4),
                (5, 5),
                (7, 3),
                (7, 4),
            ],
        );
        let cands = CandidateGrid::from_board(&board);
        let detector = TechniqueDetector::new(&board, &cands);
        let instances = detector.swordfish();
        assert_eq!(instances.len(), 1);
        assert_eq!((instances[0].row, instances[0].col), (2, 4));
        assert!(instances[0].description.contains("Swordfish on 4"));
    }

    #[test]
    fn test_column_x_wings_on_classic_puzzle() {
        let board = Board::from_string(
            "530070000600195000098000060800060003400803001700020006060000280000419005000080079",
        );
        let cands = CandidateGrid::from_board(&board);
        let detector = TechniqueDetector::new(&board, &cands);
        let instances = detector.x_wings();
        // Column-based X-Wings on 6 and 7, both spanning columns 4 and 6.
        assert_eq!(instances.len(), 2);
        assert_eq!((instances[0].row, instances[0].col), (0, 3));
        assert!(instances[0].description.contains("X-Wing on 6 in columns 4 and 6"));
        assert!(instances[1].description.contains("X-Wing on 7 in columns 4 and 6"));
        assert!(detector.swordfish().is_empty());
    }
}
