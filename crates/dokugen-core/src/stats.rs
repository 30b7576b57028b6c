//! Batch statistics over generated puzzles.

use crate::generator::GeneratedPuzzle;
use crate::targets::Difficulty;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// One per-puzzle record in a generation batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatchRecord {
    pub target: Difficulty,
    pub actual: Difficulty,
    pub iteration_count: u64,
    pub composite_score: f64,
    pub clue_count: usize,
    pub matched: bool,
    pub refinement_iterations: u32,
    pub guess_count: u64,
    pub max_backtrack_depth: u32,
}

impl BatchRecord {
    /// Record for a generated puzzle against the class it was asked for.
    pub fn from_puzzle(puzzle: &GeneratedPuzzle, refinement_iterations: u32) -> Self {
        BatchRecord {
            target: puzzle.difficulty,
            actual: puzzle.rating.estimated,
            iteration_count: puzzle.rating.iteration_count,
            composite_score: puzzle.rating.composite_score,
            clue_count: puzzle.rating.clue_count,
            matched: puzzle.rating.estimated == puzzle.difficulty,
            refinement_iterations,
            guess_count: puzzle.rating.guess_count,
            max_backtrack_depth: puzzle.rating.max_backtrack_depth,
        }
    }
}

/// Aggregate metrics for one difficulty class, computed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassSummary {
    pub count: usize,
    pub mean_iterations: f64,
    /// Sample standard deviation; zero for a single record.
    pub stddev_iterations: f64,
    pub success_rate: f64,
    pub mean_score: f64,
    pub mean_clues: f64,
}

/// Append-only batch aggregator. Appends from multiple producer threads are
/// serialized by a mutex; no ordering across producers is guaranteed.
#[derive(Debug, Default)]
pub struct Statistics {
    records: Mutex<Vec<BatchRecord>>,
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    pub fn record(&self, record: BatchRecord) {
        self.records
            .lock()
            .expect("statistics lock poisoned")
            .push(record);
    }

    pub fn len(&self) -> usize {
        self.records.lock().expect("statistics lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Summary over the records targeting the given class; `None` when the
    /// class has no records yet.
    pub fn class_summary(&self, class: Difficulty) -> Option<ClassSummary> {
        let records = self.records.lock().expect("statistics lock poisoned");
        let class_records: Vec<&BatchRecord> =
            records.iter().filter(|r| r.target == class).collect();
        if class_records.is_empty() {
            return None;
        }

        let count = class_records.len();
        let mean_iterations = class_records
            .iter()
            .map(|r| r.iteration_count as f64)
            .sum::<f64>()
            / count as f64;
        let stddev_iterations = if count > 1 {
            let sum_sq = class_records
                .iter()
                .map(|r| {
                    let diff = r.iteration_count as f64 - mean_iterations;
                    diff * diff
                })
                .sum::<f64>();
            (sum_sq / (count - 1) as f64).sqrt()
        } else {
            0.0
        };
        let success_rate =
            class_records.iter().filter(|r| r.matched).count() as f64 / count as f64;
        let mean_score =
            class_records.iter().map(|r| r.composite_score).sum::<f64>() / count as f64;
        let mean_clues =
            class_records.iter().map(|r| r.clue_count as f64).sum::<f64>() / count as f64;

        Some(ClassSummary {
            count,
            mean_iterations,
            stddev_iterations,
            success_rate,
            mean_score,
            mean_clues,
        })
    }

    /// Summaries for every class with at least one record.
    pub fn summaries(&self) -> Vec<(Difficulty, ClassSummary)> {
        Difficulty::all()
            .iter()
            .filter_map(|&class| self.class_summary(class).map(|s| (class, s)))
            .collect()
    }
}
