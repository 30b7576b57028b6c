use crate::board::Board;
use serde::{Deserialize, Serialize};

/// Effort counters accumulated over one solve call.
///
/// `iteration_count` counts every recursive entry, `propagation_cycles` every
/// propagation pass (the whole fixpoint loop of one recursive call counts as
/// one cycle), and `guess_count` every branch on a cell with more than one
/// candidate. `current_depth` rises on entry and falls on return;
/// `max_backtrack_depth` keeps the high-water mark.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverMetrics {
    pub iteration_count: u64,
    pub current_depth: u32,
    pub max_backtrack_depth: u32,
    pub propagation_cycles: u64,
    pub guess_count: u64,
}

impl SolverMetrics {
    pub fn reset(&mut self) {
        *self = SolverMetrics::default();
    }

    /// Composite difficulty score over the raw effort counters.
    pub fn difficulty_score(&self) -> f64 {
        0.50 * self.iteration_count as f64
            + 0.20 * (2.0 * self.max_backtrack_depth as f64)
            + 0.20 * (3.0 * self.guess_count as f64)
            + 0.10 * (self.propagation_cycles as f64 / 10.0)
    }
}

/// Immutable snapshot of a finished solve.
///
/// `solution_count` is 0 for an unsatisfiable puzzle and saturates at the
/// caller's counting limit; `solution` holds the first solution found, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverResult {
    pub solution: Option<Board>,
    pub solution_count: usize,
    pub metrics: SolverMetrics,
    pub difficulty_score: f64,
}

impl SolverResult {
    pub fn no_solution(metrics: SolverMetrics) -> Self {
        SolverResult {
            solution: None,
            solution_count: 0,
            difficulty_score: metrics.difficulty_score(),
            metrics,
        }
    }

    pub fn is_unique(&self) -> bool {
        self.solution_count == 1
    }
}
