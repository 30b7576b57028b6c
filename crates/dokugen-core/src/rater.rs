//! Composite difficulty rating.

use crate::board::Board;
use crate::detector::{technique_score, TechniqueDetector, TechniqueInstance};
use crate::solver::{CandidateGrid, Solver};
use crate::targets::{Difficulty, DifficultyTargets, TargetComparison};
use serde::{Deserialize, Serialize};

/// Full difficulty assessment of one puzzle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyRating {
    pub clue_count: usize,
    pub empty_cells: usize,
    pub iteration_count: u64,
    pub max_backtrack_depth: u32,
    pub guess_count: u64,
    pub propagation_cycles: u64,
    pub technique_score: f64,
    pub techniques: Vec<TechniqueInstance>,
    pub composite_score: f64,
    pub estimated: Difficulty,
    /// Classification band: widened by one class on the side the score is
    /// within 20% of the range boundary.
    pub range: Option<(Difficulty, Difficulty)>,
    pub target: Option<Difficulty>,
    pub in_target_range: bool,
}

/// Rates puzzles by combining solver effort metrics with detected technique
/// weight and clue sparsity.
pub struct DifficultyRater {
    solver: Solver,
    targets: DifficultyTargets,
}

impl Default for DifficultyRater {
    fn default() -> Self {
        Self::new()
    }
}

impl DifficultyRater {
    pub fn new() -> Self {
        DifficultyRater {
            solver: Solver::new(),
            targets: DifficultyTargets::default(),
        }
    }

    pub fn with_targets(targets: DifficultyTargets) -> Self {
        DifficultyRater {
            solver: Solver::new(),
            targets,
        }
    }

    pub fn targets(&self) -> &DifficultyTargets {
        &self.targets
    }

    /// Rate a puzzle without a difficulty target.
    pub fn rate(&self, puzzle: &Board) -> DifficultyRating {
        self.rate_with_target(puzzle, None)
    }

    /// Rate a puzzle, additionally checking it against a target class.
    pub fn rate_with_target(
        &self,
        puzzle: &Board,
        target: Option<Difficulty>,
    ) -> DifficultyRating {
        let clue_count = puzzle.clue_count();
        let empty_cells = puzzle.empty_count();

        let solved = self.solver.solve_with_metrics(puzzle);
        let metrics = solved.metrics;

        let candidates = CandidateGrid::from_board(puzzle);
        let detector = TechniqueDetector::new(puzzle, &candidates);
        let techniques = detector.detect_all();
        let tech_score = technique_score(&techniques);

        let clue_ratio = clue_count as f64 / (clue_count + empty_cells) as f64;
        let composite_score = 0.40 * metrics.iteration_count as f64
            + 0.20 * (2.0 * tech_score)
            + 0.15 * (2.0 * metrics.max_backtrack_depth as f64)
            + 0.15 * (3.0 * metrics.guess_count as f64)
            + 0.10 * (20.0 * (1.0 - clue_ratio));

        let estimated = self.targets.classify_by_score(composite_score);
        let range = Some(self.classification_band(estimated, composite_score));
        let in_target_range = match target {
            Some(t) => {
                self.targets.compare_score(composite_score, t) == TargetComparison::InRange
            }
            None => false,
        };

        DifficultyRating {
            clue_count,
            empty_cells,
            iteration_count: metrics.iteration_count,
            max_backtrack_depth: metrics.max_backtrack_depth,
            guess_count: metrics.guess_count,
            propagation_cycles: metrics.propagation_cycles,
            technique_score: tech_score,
            techniques,
            composite_score,
            estimated,
            range,
            target,
            in_target_range,
        }
    }

    /// Quick classification from an iteration count alone.
    pub fn classify_by_iterations(&self, iterations: u64) -> Difficulty {
        self.targets.classify_by_iterations(iterations)
    }

    /// Quick classification from a composite score alone.
    pub fn classify_by_score(&self, score: f64) -> Difficulty {
        self.targets.classify_by_score(score)
    }

    /// Compare a composite score against a target class.
    pub fn compare_to_target(&self, score: f64, target: Difficulty) -> TargetComparison {
        self.targets.compare_score(score, target)
    }

    /// A score in the lower 20% of its class range drops the band's minimum
    /// one class; the upper 20% raises the maximum one class. The open-ended
    /// top class takes its range start as the nominal width.
    fn classification_band(&self, class: Difficulty, score: f64) -> (Difficulty, Difficulty) {
        let (lo, hi) = self.targets.score_range(class);
        let width = match hi {
            Some(hi) => hi - lo,
            None => lo,
        };
        let mut min = class;
        let mut max = class;
        if score < lo + 0.2 * width {
            if let Some(easier) = class.easier() {
                min = easier;
            }
        }
        if let Some(hi) = hi {
            if score > hi - 0.2 * width {
                if let Some(harder) = class.harder() {
                    max = harder;
                }
            }
        }
        (min, max)
    }
}
