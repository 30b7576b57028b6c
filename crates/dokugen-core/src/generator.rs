//! Puzzle generation: seed a completed grid, carve clues away under a
//! uniqueness guarantee, then rate and package the result.

use crate::analyzer::ClueAnalyzer;
use crate::board::{Board, Position};
use crate::error::Error;
use crate::rater::{DifficultyRater, DifficultyRating};
use crate::refiner::Refiner;
use crate::solver::{Solver, ALGORITHM_NAME};
use crate::symmetry::{SymmetryDetector, SymmetryInfo};
use crate::targets::{Difficulty, DifficultyTargets};
use log::{debug, trace, warn};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Puzzle variant tag.
///
/// The diagonal and color-constrained variants only affect rendering; the
/// solver and rater treat every board as classical, so puzzles emitted under
/// those tags are not guaranteed unique with the extra constraints applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Variant {
    Classic,
    Diagonal,
    ColorConstrained,
}

impl Default for Variant {
    fn default() -> Self {
        Variant::Classic
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Variant::Classic => write!(f, "classic"),
            Variant::Diagonal => write!(f, "diagonal"),
            Variant::ColorConstrained => write!(f, "color-constrained"),
        }
    }
}

/// What to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub difficulty: Difficulty,
    pub variant: Variant,
    pub side: usize,
    pub box_rows: usize,
    pub box_cols: usize,
    pub use_refinement: bool,
    pub symmetric: bool,
}

impl GenerationRequest {
    /// Classic 9×9 request with refinement and symmetry off.
    pub fn classic(difficulty: Difficulty) -> Self {
        GenerationRequest {
            difficulty,
            variant: Variant::Classic,
            side: 9,
            box_rows: 3,
            box_cols: 3,
            use_refinement: false,
            symmetric: false,
        }
    }
}

/// A generated puzzle with its solution and analysis, immutable once
/// returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPuzzle {
    pub puzzle: Board,
    pub solution: Board,
    pub difficulty: Difficulty,
    pub variant: Variant,
    pub seed: Option<u64>,
    /// Unix seconds at packaging time.
    pub generated_at: u64,
    pub solver_name: String,
    pub puzzle_number: u32,
    pub rating: DifficultyRating,
    pub symmetry: SymmetryInfo,
}

const MAX_GENERATION_ATTEMPTS: usize = 100;
const MAX_SEED_ATTEMPTS: usize = 50;

/// Per-difficulty share of cells kept as clues.
fn clue_fraction(difficulty: Difficulty) -> f64 {
    match difficulty {
        Difficulty::Easy => 0.49,
        Difficulty::Medium => 0.39,
        Difficulty::Hard => 0.32,
        Difficulty::Expert => 0.25,
        Difficulty::Evil => 0.21,
    }
}

/// Target clue count for a difficulty on a side² grid, clamped to the known
/// 17-clue minimum for classic 9×9 boards.
fn clue_target(difficulty: Difficulty, side: usize) -> usize {
    let cells = (side * side) as f64;
    let target = (clue_fraction(difficulty) * cells).floor() as usize;
    if side == 9 {
        target.max(17)
    } else {
        target
    }
}

/// Sudoku puzzle generator. One generator owns one RNG stream; the same seed
/// with the same request produces the same puzzle.
pub struct Generator {
    solver: Solver,
    rater: DifficultyRater,
    targets: DifficultyTargets,
    rng: SmallRng,
    seed: Option<u64>,
    counter: u32,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Generator seeded from entropy. The drawn seed is recorded so emitted
    /// puzzles stay reproducible.
    pub fn new() -> Self {
        let seed = rand::thread_rng().gen::<u64>();
        Self::with_seed(seed)
    }

    /// Fully deterministic generator.
    pub fn with_seed(seed: u64) -> Self {
        Generator {
            solver: Solver::new(),
            rater: DifficultyRater::new(),
            targets: DifficultyTargets::default(),
            rng: SmallRng::seed_from_u64(seed),
            seed: Some(seed),
            counter: 0,
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Generate one puzzle for the request.
    pub fn generate(&mut self, request: &GenerationRequest) -> Result<GeneratedPuzzle, Error> {
        // Surface a bad shape before burning attempts on it.
        Board::new(request.side, request.box_rows, request.box_cols)?;

        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let solution = match self.seed_solution(request) {
                Some(solution) => solution,
                None => {
                    warn!("seeding a completed grid failed, retrying (attempt {attempt})");
                    continue;
                }
            };

            let target = clue_target(request.difficulty, request.side);
            let mut puzzle = solution.clone();
            self.carve(&mut puzzle, target, request.symmetric);
            trace!(
                "attempt {attempt}: carved to {} clues (target {target})",
                puzzle.clue_count()
            );

            if !puzzle.validate().is_clean() {
                warn!("carved puzzle violates a unit, retrying (attempt {attempt})");
                continue;
            }

            if request.use_refinement {
                let refiner =
                    Refiner::new(&self.solver, &self.targets).symmetric(request.symmetric);
                let outcome = refiner.refine_to_difficulty(
                    &puzzle,
                    &solution,
                    request.difficulty,
                    &mut self.rng,
                );
                debug!(
                    "refinement finished after {} iterations (in range: {})",
                    outcome.iterations, outcome.rating.in_target_range
                );
                return Ok(self.package(request, outcome.puzzle, solution, outcome.rating));
            }

            let rating = self
                .rater
                .rate_with_target(&puzzle, Some(request.difficulty));
            if self.class_acceptable(&rating, request.difficulty) {
                return Ok(self.package(request, puzzle, solution, rating));
            }
            debug!(
                "attempt {attempt}: rated {} (score {:.2}), wanted {}",
                rating.estimated, rating.composite_score, request.difficulty
            );
        }

        Err(Error::GenerationFailed {
            attempts: MAX_GENERATION_ATTEMPTS,
        })
    }

    /// Does the rating's classification band cover the requested class?
    fn class_acceptable(&self, rating: &DifficultyRating, difficulty: Difficulty) -> bool {
        if rating.estimated == difficulty {
            return true;
        }
        match rating.range {
            Some((min, max)) => min <= difficulty && difficulty <= max,
            None => false,
        }
    }

    /// Build a completed grid: fill the diagonal boxes with random
    /// permutations (they share no unit), then let the solver finish.
    fn seed_solution(&mut self, request: &GenerationRequest) -> Option<Board> {
        for _ in 0..MAX_SEED_ATTEMPTS {
            let mut board = Board::new(request.side, request.box_rows, request.box_cols).ok()?;
            let boxes_per_row = request.side / request.box_cols;
            let box_bands = request.side / request.box_rows;
            for band in 0..box_bands.min(boxes_per_row) {
                let box_index = band * boxes_per_row + band;
                let mut digits: Vec<u8> = (1..=request.side as u8).collect();
                digits.shuffle(&mut self.rng);
                for (cell, digit) in board.box_cells(box_index).into_iter().zip(digits) {
                    board.set(cell.row, cell.col, digit);
                }
            }
            if let Some(solution) = self.solver.solve(&board) {
                return Some(solution);
            }
        }
        None
    }

    /// Blank cells in shuffled order, keeping a removal only when the puzzle
    /// stays uniquely solvable. In symmetric mode the rotational twin comes
    /// out with its partner or not at all.
    fn carve(&mut self, puzzle: &mut Board, target: usize, symmetric: bool) {
        let side = puzzle.side();
        let mut positions: Vec<Position> = puzzle.clue_positions();
        positions.shuffle(&mut self.rng);

        for pos in positions {
            if puzzle.clue_count() <= target {
                break;
            }
            let value = puzzle.get(pos.row, pos.col);
            if value == 0 {
                continue;
            }
            let twin = Position::new(side - 1 - pos.row, side - 1 - pos.col);
            let twin_value = puzzle.get(twin.row, twin.col);

            puzzle.set(pos.row, pos.col, 0);
            if symmetric && twin != pos {
                puzzle.set(twin.row, twin.col, 0);
            }

            if !self.solver.has_unique_solution(puzzle) {
                puzzle.set(pos.row, pos.col, value);
                if symmetric && twin != pos {
                    puzzle.set(twin.row, twin.col, twin_value);
                }
            }
        }
    }

    fn package(
        &mut self,
        request: &GenerationRequest,
        puzzle: Board,
        solution: Board,
        rating: DifficultyRating,
    ) -> GeneratedPuzzle {
        self.counter += 1;
        let generated_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let symmetry = SymmetryDetector::detect(&puzzle);
        GeneratedPuzzle {
            puzzle,
            solution,
            difficulty: request.difficulty,
            variant: request.variant,
            seed: self.seed,
            generated_at,
            solver_name: ALGORITHM_NAME.to_string(),
            puzzle_number: self.counter,
            rating,
            symmetry,
        }
    }
}

/// Convenience analyzer access for callers holding a generated puzzle.
impl GeneratedPuzzle {
    /// Clue distribution of the emitted puzzle.
    pub fn clue_distribution(&self) -> crate::analyzer::ClueDistribution {
        ClueAnalyzer::new().distribution(&self.puzzle)
    }
}
