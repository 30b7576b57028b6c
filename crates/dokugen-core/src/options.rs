//! Configuration surface consumed from the command line or a config object,
//! plus the batch distribution policy.

use crate::generator::{GenerationRequest, Variant};
use crate::targets::Difficulty;
use serde::{Deserialize, Serialize};

/// Options recognized by the engine. Front-ends map flags or configuration
/// files onto this; anything they pass beyond it is simply not consumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub size: usize,
    pub box_rows: usize,
    pub box_cols: usize,
    pub difficulties: Vec<Difficulty>,
    pub variant: Variant,
    pub count: usize,
    pub seed: Option<u64>,
    pub use_refinement: bool,
    pub include_solution: bool,
    pub include_solving_sheet: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        GenerationOptions {
            size: 9,
            box_rows: 3,
            box_cols: 3,
            difficulties: vec![Difficulty::Medium],
            variant: Variant::Classic,
            count: 1,
            seed: None,
            use_refinement: false,
            include_solution: true,
            include_solving_sheet: false,
        }
    }
}

impl GenerationOptions {
    /// The per-puzzle difficulty schedule for this batch.
    pub fn schedule(&self) -> Vec<Difficulty> {
        distribute(&self.difficulties, self.count)
    }

    /// One generation request per scheduled puzzle.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.schedule()
            .into_iter()
            .map(|difficulty| GenerationRequest {
                difficulty,
                variant: self.variant,
                side: self.size,
                box_rows: self.box_rows,
                box_cols: self.box_cols,
                use_refinement: self.use_refinement,
                symmetric: false,
            })
            .collect()
    }
}

/// Assign a difficulty to each of `count` puzzles.
///
/// A single difficulty repeats; several difficulties cycle in groups of two,
/// so a trailing partial group biases toward the earlier class.
pub fn distribute(difficulties: &[Difficulty], count: usize) -> Vec<Difficulty> {
    if difficulties.is_empty() {
        return vec![Difficulty::Medium; count];
    }
    if difficulties.len() == 1 {
        return vec![difficulties[0]; count];
    }
    let mut out = Vec::with_capacity(count);
    let mut group = 0;
    while out.len() < count {
        let difficulty = difficulties[group % difficulties.len()];
        for _ in 0..2 {
            if out.len() < count {
                out.push(difficulty);
            }
        }
        group += 1;
    }
    out
}

/// Parse a comma-separated difficulty list: tokens are trimmed and matched
/// case-insensitively, unrecognized tokens are dropped, and an empty result
/// defaults to Medium.
pub fn parse_difficulties(input: &str) -> Vec<Difficulty> {
    let parsed: Vec<Difficulty> = input
        .split(',')
        .filter_map(|token| token.parse().ok())
        .collect();
    if parsed.is_empty() {
        vec![Difficulty::Medium]
    } else {
        parsed
    }
}
