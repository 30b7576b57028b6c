use thiserror::Error;

/// Terminal failures of the engine.
///
/// Everything else in the failure taxonomy is data, not an error: an
/// unsolvable puzzle is a [`SolverResult`](crate::SolverResult) with
/// `solution_count == 0`, bad characters in a puzzle string are collected in a
/// [`ParseReport`](crate::ParseReport), and a refinement run that missed its
/// band reports `in_target_range == false` on the returned rating.
#[derive(Debug, Error)]
pub enum Error {
    #[error("box shape {box_rows}x{box_cols} does not tile a {side}x{side} board")]
    InvalidShape {
        side: usize,
        box_rows: usize,
        box_cols: usize,
    },

    #[error("puzzle generation failed after {attempts} attempts")]
    GenerationFailed { attempts: usize },
}
