//! Clue distribution and per-clue importance analysis.

use crate::board::{Board, Position, UnitKind, UnitRef};
use crate::solver::Solver;
use serde::{Deserialize, Serialize};

/// Per-unit clue counts with outlier units flagged.
///
/// A unit is over- or under-constrained when its clue count deviates from the
/// all-unit average by more than one standard deviation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClueDistribution {
    pub row_counts: Vec<usize>,
    pub col_counts: Vec<usize>,
    pub box_counts: Vec<usize>,
    pub average: f64,
    pub variance: f64,
    pub over_constrained: Vec<UnitRef>,
    pub under_constrained: Vec<UnitRef>,
}

/// Analyzes clue placement: distribution over units, importance of single
/// clues, and orderings used by the refiner to pick its next move.
pub struct ClueAnalyzer {
    solver: Solver,
}

impl Default for ClueAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ClueAnalyzer {
    pub fn new() -> Self {
        ClueAnalyzer {
            solver: Solver::new(),
        }
    }

    /// Count clues per unit and flag outliers.
    pub fn distribution(&self, board: &Board) -> ClueDistribution {
        let side = board.side();
        let count_units = |kind: UnitKind| -> Vec<usize> {
            (0..side)
                .map(|index| {
                    board
                        .unit_cells(UnitRef::new(kind, index))
                        .iter()
                        .filter(|pos| board.get(pos.row, pos.col) != 0)
                        .count()
                })
                .collect()
        };
        let row_counts = count_units(UnitKind::Row);
        let col_counts = count_units(UnitKind::Column);
        let box_counts = count_units(UnitKind::Box);

        let total: usize = row_counts.iter().sum::<usize>()
            + col_counts.iter().sum::<usize>()
            + box_counts.iter().sum::<usize>();
        let unit_count = 3 * side;
        let average = total as f64 / unit_count as f64;
        let variance = [&row_counts, &col_counts, &box_counts]
            .iter()
            .flat_map(|counts| counts.iter())
            .map(|&count| {
                let diff = count as f64 - average;
                diff * diff
            })
            .sum::<f64>()
            / unit_count as f64;
        let stddev = variance.sqrt();

        let mut over_constrained = Vec::new();
        let mut under_constrained = Vec::new();
        for (kind, counts) in [
            (UnitKind::Row, &row_counts),
            (UnitKind::Column, &col_counts),
            (UnitKind::Box, &box_counts),
        ] {
            for (index, &count) in counts.iter().enumerate() {
                let deviation = count as f64 - average;
                if deviation > stddev {
                    over_constrained.push(UnitRef::new(kind, index));
                } else if -deviation > stddev {
                    under_constrained.push(UnitRef::new(kind, index));
                }
            }
        }

        ClueDistribution {
            row_counts,
            col_counts,
            box_counts,
            average,
            variance,
            over_constrained,
            under_constrained,
        }
    }

    /// Importance of the clue at (row, col) in `[0, 1]`.
    ///
    /// 1.0 when removing the clue destroys uniqueness. Otherwise the
    /// normalized increase in solver difficulty caused by the removal, capped
    /// at 0.8, plus a 0.2 bonus when the cell sits in an under-constrained
    /// unit.
    pub fn importance(&self, board: &Board, row: usize, col: usize) -> f64 {
        debug_assert!(board.get(row, col) != 0);
        let mut probe = board.clone();
        probe.set(row, col, 0);
        if !self.solver.has_unique_solution(&probe) {
            return 1.0;
        }

        let before = self.solver.solve_with_metrics(board);
        let after = self.solver.solve_with_metrics(&probe);
        let delta = (after.difficulty_score - before.difficulty_score).max(0.0);
        let normalized = (delta / after.difficulty_score.max(1.0)).min(0.8);

        let distribution = self.distribution(board);
        let in_under = distribution.under_constrained.iter().any(|unit| {
            board
                .unit_cells(*unit)
                .contains(&Position::new(row, col))
        });
        let bonus = if in_under { 0.2 } else { 0.0 };
        (normalized + bonus).min(1.0)
    }

    /// All clue positions, least important first.
    pub fn clues_by_importance(&self, board: &Board) -> Vec<Position> {
        let mut scored: Vec<(f64, Position)> = board
            .clue_positions()
            .into_iter()
            .map(|pos| (self.importance(board, pos.row, pos.col), pos))
            .collect();
        scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.into_iter().map(|(_, pos)| pos).collect()
    }

    /// Empty positions ordered by how much filling in their solution value
    /// would reduce solver difficulty, largest reduction first.
    pub fn candidate_clue_additions(&self, board: &Board, solution: &Board) -> Vec<Position> {
        let base = self.solver.solve_with_metrics(board).difficulty_score;
        let mut scored: Vec<(f64, Position)> = board
            .empty_positions()
            .into_iter()
            .map(|pos| {
                let mut probe = board.clone();
                probe.set(pos.row, pos.col, solution.get(pos.row, pos.col));
                let score = self.solver.solve_with_metrics(&probe).difficulty_score;
                (base - score, pos)
            })
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.into_iter().map(|(_, pos)| pos).collect()
    }

    /// The 180°-rotation twin of a cell.
    pub fn rotational_twin(&self, board: &Board, pos: Position) -> Position {
        let side = board.side();
        Position::new(side - 1 - pos.row, side - 1 - pos.col)
    }

    /// All proper rotational pairs of the grid, each emitted once. The center
    /// cell of an odd-sided board is its own twin and is skipped.
    pub fn rotational_symmetry_pairs(&self, board: &Board) -> Vec<(Position, Position)> {
        let side = board.side();
        let mut pairs = Vec::new();
        for row in 0..side {
            for col in 0..side {
                let pos = Position::new(row, col);
                let twin = self.rotational_twin(board, pos);
                if pos < twin {
                    pairs.push((pos, twin));
                }
            }
        }
        pairs
    }
}
