//! Detection of named human solving techniques.
//!
//! Every detector works over an immutable board plus a candidate grid
//! computed once at entry, and only reports a pattern when it would actually
//! eliminate a candidate or place a digit somewhere. Nothing here mutates the
//! board, so the rater can probe speculatively without cloning.

mod fish;
mod singles;
mod subsets;
mod wings;

use crate::board::{Board, Position, UnitKind, UnitRef};
use crate::solver::CandidateGrid;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A named solving technique, ordered by weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Technique {
    NakedSingle,
    HiddenSingle,
    NakedPair,
    HiddenPair,
    XWing,
    XYWing,
    Swordfish,
    XYZWing,
}

impl Technique {
    /// Difficulty weight of the technique.
    pub fn weight(self) -> u32 {
        match self {
            Technique::NakedSingle => 1,
            Technique::HiddenSingle => 2,
            Technique::NakedPair => 4,
            Technique::HiddenPair => 5,
            Technique::XWing => 8,
            Technique::XYWing => 10,
            Technique::Swordfish => 12,
            Technique::XYZWing => 14,
        }
    }

    pub fn all() -> &'static [Technique; 8] {
        &[
            Technique::NakedSingle,
            Technique::HiddenSingle,
            Technique::NakedPair,
            Technique::HiddenPair,
            Technique::XWing,
            Technique::XYWing,
            Technique::Swordfish,
            Technique::XYZWing,
        ]
    }
}

impl fmt::Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Technique::NakedSingle => write!(f, "Naked Single"),
            Technique::HiddenSingle => write!(f, "Hidden Single"),
            Technique::NakedPair => write!(f, "Naked Pair"),
            Technique::HiddenPair => write!(f, "Hidden Pair"),
            Technique::XWing => write!(f, "X-Wing"),
            Technique::XYWing => write!(f, "XY-Wing"),
            Technique::Swordfish => write!(f, "Swordfish"),
            Technique::XYZWing => write!(f, "XYZ-Wing"),
        }
    }
}

/// One detected occurrence of a technique, anchored at a cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechniqueInstance {
    pub technique: Technique,
    pub row: usize,
    pub col: usize,
    pub description: String,
}

impl TechniqueInstance {
    pub fn new(technique: Technique, row: usize, col: usize, description: String) -> Self {
        TechniqueInstance {
            technique,
            row,
            col,
            description,
        }
    }
}

/// Aggregate score of a detection list: the heaviest technique plus half a
/// point per additional distinct technique. Zero for an empty list.
pub fn technique_score(instances: &[TechniqueInstance]) -> f64 {
    let max_weight = match instances.iter().map(|i| i.technique.weight()).max() {
        Some(weight) => weight,
        None => return 0.0,
    };
    let distinct: HashSet<Technique> = instances.iter().map(|i| i.technique).collect();
    max_weight as f64 + 0.5 * (distinct.len() as f64 - 1.0)
}

/// Technique detector over a board and its candidate grid.
pub struct TechniqueDetector<'a> {
    board: &'a Board,
    candidates: &'a CandidateGrid,
}

impl<'a> TechniqueDetector<'a> {
    pub fn new(board: &'a Board, candidates: &'a CandidateGrid) -> Self {
        TechniqueDetector { board, candidates }
    }

    /// All useful technique instances, lightest technique first.
    pub fn detect_all(&self) -> Vec<TechniqueInstance> {
        let mut out = self.naked_singles();
        out.extend(self.hidden_singles());
        out.extend(self.naked_pairs());
        out.extend(self.hidden_pairs());
        out.extend(self.x_wings());
        out.extend(self.xy_wings());
        out.extend(self.swordfish());
        out.extend(self.xyz_wings());
        out
    }

    /// The lightest useful instance, if any technique applies.
    pub fn first_applicable(&self) -> Option<TechniqueInstance> {
        self.naked_singles()
            .into_iter()
            .next()
            .or_else(|| self.hidden_singles().into_iter().next())
            .or_else(|| self.naked_pairs().into_iter().next())
            .or_else(|| self.hidden_pairs().into_iter().next())
            .or_else(|| self.x_wings().into_iter().next())
            .or_else(|| self.xy_wings().into_iter().next())
            .or_else(|| self.swordfish().into_iter().next())
            .or_else(|| self.xyz_wings().into_iter().next())
    }

    pub fn naked_singles(&self) -> Vec<TechniqueInstance> {
        singles::naked_singles(self.board, self.candidates)
    }

    pub fn has_naked_single(&self) -> bool {
        singles::has_naked_single(self.board, self.candidates)
    }

    pub fn hidden_singles(&self) -> Vec<TechniqueInstance> {
        singles::hidden_singles(self.board, self.candidates)
    }

    pub fn has_hidden_single(&self) -> bool {
        singles::has_hidden_single(self.board, self.candidates)
    }

    pub fn naked_pairs(&self) -> Vec<TechniqueInstance> {
        subsets::naked_pairs(self.board, self.candidates)
    }

    pub fn hidden_pairs(&self) -> Vec<TechniqueInstance> {
        subsets::hidden_pairs(self.board, self.candidates)
    }

    pub fn x_wings(&self) -> Vec<TechniqueInstance> {
        fish::x_wings(self.board, self.candidates)
    }

    pub fn swordfish(&self) -> Vec<TechniqueInstance> {
        fish::swordfish(self.board, self.candidates)
    }

    pub fn xy_wings(&self) -> Vec<TechniqueInstance> {
        wings::xy_wings(self.board, self.candidates)
    }

    pub fn xyz_wings(&self) -> Vec<TechniqueInstance> {
        wings::xyz_wings(self.board, self.candidates)
    }
}

/// All units of the board: rows, then columns, then boxes. The order matters
/// for hidden-single deduplication, where the first discovery wins.
pub(crate) fn all_units(board: &Board) -> Vec<(UnitRef, Vec<Position>)> {
    let mut units = Vec::with_capacity(3 * board.side());
    for kind in [UnitKind::Row, UnitKind::Column, UnitKind::Box] {
        for index in 0..board.side() {
            let unit = UnitRef::new(kind, index);
            units.push((unit, board.unit_cells(unit)));
        }
    }
    units
}

/// Pairwise visibility: same row, same column, or same box.
pub(crate) fn sees(board: &Board, a: Position, b: Position) -> bool {
    a != b
        && (a.row == b.row
            || a.col == b.col
            || board.box_index(a.row, a.col) == board.box_index(b.row, b.col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_table() {
        let weights: Vec<u32> = Technique::all().iter().map(|t| t.weight()).collect();
        assert_eq!(weights, vec![1, 2, 4, 5, 8, 10, 12, 14]);
    }

    #[test]
    fn test_score_empty_list() {
        assert_eq!(technique_score(&[]), 0.0);
    }

    #[test]
    fn test_score_aggregation() {
        let instances = vec![
            TechniqueInstance::new(Technique::NakedSingle, 0, 0, String::new()),
            TechniqueInstance::new(Technique::HiddenSingle, 1, 1, String::new()),
            TechniqueInstance::new(Technique::NakedPair, 2, 2, String::new()),
        ];
        // Max weight 4, three distinct techniques.
        assert!((technique_score(&instances) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_score_ignores_duplicate_techniques() {
        let instances = vec![
            TechniqueInstance::new(Technique::XWing, 0, 0, String::new()),
            TechniqueInstance::new(Technique::XWing, 4, 4, String::new()),
        ];
        assert!((technique_score(&instances) - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_first_applicable_prefers_lightest() {
        use crate::solver::CandidateGrid;
        let board = Board::from_string(
            "530070000600195000098000060800060003400803001700020006060000280000419005000080079",
        );
        let cands = CandidateGrid::from_board(&board);
        let detector = TechniqueDetector::new(&board, &cands);
        let first = detector.first_applicable().unwrap();
        assert_eq!(first.technique, Technique::NakedSingle);
        assert_eq!((first.row, first.col), (4, 4));
    }

    #[test]
    fn test_sees() {
        let board = Board::classic();
        let a = Position::new(0, 0);
        assert!(sees(&board, a, Position::new(0, 8)));
        assert!(sees(&board, a, Position::new(8, 0)));
        assert!(sees(&board, a, Position::new(2, 2)));
        assert!(!sees(&board, a, Position::new(3, 3)));
        assert!(!sees(&board, a, a));
    }
}
