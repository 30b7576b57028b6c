//! Sudoku puzzle engine.
//!
//! The pipeline: a backtracking [`Solver`] with unit propagation records
//! effort metrics; a [`DifficultyRater`] combines those metrics with the
//! human techniques found by the [`TechniqueDetector`]; a [`Generator`]
//! carves puzzles out of completed grids while the solver confirms
//! uniqueness; and a [`Refiner`] nudges a puzzle's score into a requested
//! difficulty band. Everything is single-threaded and reentrant — callers
//! parallelize across independently seeded generators, sharing at most a
//! [`Statistics`] aggregator.

pub mod analyzer;
pub mod board;
pub mod detector;
pub mod digits;
pub mod error;
pub mod generator;
pub mod options;
pub mod rater;
pub mod refiner;
pub mod solver;
pub mod stats;
pub mod symmetry;
pub mod targets;

pub use analyzer::{ClueAnalyzer, ClueDistribution};
pub use board::{
    Board, DuplicateDigit, ParseOffense, ParseReport, Position, UnitKind, UnitRef,
    ValidationReport,
};
pub use detector::{technique_score, Technique, TechniqueDetector, TechniqueInstance};
pub use digits::DigitSet;
pub use error::Error;
pub use generator::{GeneratedPuzzle, GenerationRequest, Generator, Variant};
pub use options::{distribute, parse_difficulties, GenerationOptions};
pub use rater::{DifficultyRater, DifficultyRating};
pub use refiner::{RefinementOutcome, Refiner};
pub use solver::{
    CandidateGrid, ConstraintMasks, Solver, SolverMetrics, SolverResult, ALGORITHM_NAME,
};
pub use stats::{BatchRecord, ClassSummary, Statistics};
pub use symmetry::{SymmetryDetector, SymmetryInfo};
pub use targets::{ClassTargets, Difficulty, DifficultyTargets, TargetComparison};
