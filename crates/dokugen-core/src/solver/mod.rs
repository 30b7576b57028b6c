//! Backtracking solver with unit propagation and effort metrics.
//!
//! One recursive routine drives everything: each entry runs a singles fixpoint
//! over stack-local unit masks, then branches on the most constrained empty
//! cell. Assignments are made in place and retracted on unwind, so the only
//! allocation per level is the undo list.

mod masks;
mod metrics;

pub use masks::{CandidateGrid, ConstraintMasks, MAX_SIDE};
pub use metrics::{SolverMetrics, SolverResult};

use crate::board::Board;
use crate::digits::DigitSet;

/// Name of the solving algorithm, stamped into generated puzzles.
pub const ALGORITHM_NAME: &str = "dpll-bitmask";

/// Unit struct solver — stateless, all state is per-call.
pub struct Solver;

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver {
    pub fn new() -> Self {
        Self
    }

    /// Solve the puzzle, returning the first solution found.
    pub fn solve(&self, board: &Board) -> Option<Board> {
        self.solve_with_metrics(board).solution
    }

    /// Solve the puzzle, keeping the effort metrics.
    pub fn solve_with_metrics(&self, board: &Board) -> SolverResult {
        self.run(board, 1)
    }

    /// Count solutions up to a limit.
    pub fn count_solutions(&self, board: &Board, limit: usize) -> usize {
        self.count_solutions_with_metrics(board, limit).solution_count
    }

    /// Count solutions up to a limit, keeping the effort metrics and the
    /// first solution found.
    pub fn count_solutions_with_metrics(&self, board: &Board, limit: usize) -> SolverResult {
        self.run(board, limit.max(1))
    }

    /// Check if the puzzle has exactly one solution.
    pub fn has_unique_solution(&self, board: &Board) -> bool {
        self.count_solutions(board, 2) == 1
    }

    fn run(&self, board: &Board, limit: usize) -> SolverResult {
        // A board that already violates a unit is unsatisfiable; the search
        // below assumes consistent input.
        if !board.validate().is_clean() {
            return SolverResult::no_solution(SolverMetrics::default());
        }
        let mut working = board.clone();
        let mut state = SearchState {
            limit,
            solution: None,
            solution_count: 0,
            metrics: SolverMetrics::default(),
        };
        search(&mut working, &mut state);
        SolverResult {
            solution: state.solution,
            solution_count: state.solution_count,
            difficulty_score: state.metrics.difficulty_score(),
            metrics: state.metrics,
        }
    }
}

struct SearchState {
    limit: usize,
    solution: Option<Board>,
    solution_count: usize,
    metrics: SolverMetrics,
}

/// Recursive search. Returns true once the solution limit is reached; the
/// board is always restored to its entry state before returning.
fn search(board: &mut Board, state: &mut SearchState) -> bool {
    state.metrics.iteration_count += 1;
    state.metrics.current_depth += 1;
    if state.metrics.current_depth > state.metrics.max_backtrack_depth {
        state.metrics.max_backtrack_depth = state.metrics.current_depth;
    }

    let mut masks = ConstraintMasks::from_board(board);
    let mut placed: Vec<(usize, usize)> = Vec::new();
    state.metrics.propagation_cycles += 1;
    if !propagate(board, &mut masks, &mut placed) {
        retract(board, &placed, state);
        return false;
    }

    if board.is_complete() {
        state.solution_count += 1;
        if state.solution.is_none() {
            state.solution = Some(board.clone());
        }
        let done = state.solution_count >= state.limit;
        retract(board, &placed, state);
        return done;
    }

    // Branch on the most constrained empty cell; ties break in scan order.
    // Propagation has consumed every single, so the count here is >= 2.
    let side = board.side();
    let mut best: Option<(usize, usize, DigitSet)> = None;
    for row in 0..side {
        for col in 0..side {
            if board.get(row, col) != 0 {
                continue;
            }
            let cands = masks.candidates(row, col, board.box_index(row, col));
            let better = match &best {
                None => true,
                Some((_, _, current)) => cands.count() < current.count(),
            };
            if better {
                best = Some((row, col, cands));
            }
        }
    }
    let (row, col, cands) = best.expect("incomplete board has an empty cell");
    state.metrics.guess_count += 1;

    for digit in cands.iter() {
        board.set(row, col, digit);
        let done = search(board, state);
        board.set(row, col, 0);
        if done {
            retract(board, &placed, state);
            return true;
        }
    }

    retract(board, &placed, state);
    false
}

/// Undo the propagation placements of one recursive level.
fn retract(board: &mut Board, placed: &[(usize, usize)], state: &mut SearchState) {
    for &(row, col) in placed.iter().rev() {
        board.set(row, col, 0);
    }
    state.metrics.current_depth -= 1;
}

/// Singles fixpoint: place every digit whose cell has exactly one candidate,
/// repeating until a pass assigns nothing. Returns false on a dead end (an
/// empty cell with no candidates).
fn propagate(
    board: &mut Board,
    masks: &mut ConstraintMasks,
    placed: &mut Vec<(usize, usize)>,
) -> bool {
    let side = board.side();
    loop {
        let mut assigned = false;
        for row in 0..side {
            for col in 0..side {
                if board.get(row, col) != 0 {
                    continue;
                }
                let box_index = board.box_index(row, col);
                let cands = masks.candidates(row, col, box_index);
                if cands.is_empty() {
                    return false;
                }
                if let Some(digit) = cands.single() {
                    board.set(row, col, digit);
                    masks.place(row, col, box_index, digit);
                    placed.push((row, col));
                    assigned = true;
                }
            }
        }
        if !assigned {
            return true;
        }
    }
}
