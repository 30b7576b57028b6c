//! XY-Wing and XYZ-Wing.

use super::{sees, Technique, TechniqueInstance};
use crate::board::{Board, Position};
use crate::digits::DigitSet;
use crate::solver::CandidateGrid;
use std::collections::HashSet;

fn empty_cells(board: &Board, cands: &CandidateGrid) -> Vec<(Position, DigitSet)> {
    board
        .empty_positions()
        .into_iter()
        .map(|pos| (pos, cands.at(pos.row, pos.col)))
        .collect()
}

/// Bivalue pivot {A, B} with bivalue wings {A, C} and {B, C}, each wing
/// seeing the pivot. Useful when some cell seeing both wings still carries C.
pub(super) fn xy_wings(board: &Board, cands: &CandidateGrid) -> Vec<TechniqueInstance> {
    let empties = empty_cells(board, cands);
    let bivalues: Vec<(Position, DigitSet)> = empties
        .iter()
        .filter(|(_, mask)| mask.count() == 2)
        .copied()
        .collect();

    let mut seen: HashSet<(Position, Position, Position)> = HashSet::new();
    let mut out = Vec::new();
    for &(pivot, pivot_mask) in &bivalues {
        for &(wing1, wing1_mask) in &bivalues {
            if wing1 == pivot || !sees(board, pivot, wing1) {
                continue;
            }
            let shared = pivot_mask & wing1_mask;
            if shared.count() != 1 {
                continue;
            }
            let z = match wing1_mask.difference(shared).single() {
                Some(digit) => digit,
                None => continue,
            };
            if pivot_mask.contains(z) {
                continue;
            }
            let mut wanted = pivot_mask.difference(shared);
            wanted.insert(z);
            for &(wing2, wing2_mask) in &bivalues {
                if wing2 == pivot || wing2 == wing1 || !sees(board, pivot, wing2) {
                    continue;
                }
                if wing2_mask != wanted {
                    continue;
                }
                let useful = empties.iter().any(|&(target, mask)| {
                    target != pivot
                        && target != wing1
                        && target != wing2
                        && sees(board, target, wing1)
                        && sees(board, target, wing2)
                        && mask.contains(z)
                });
                if !useful {
                    continue;
                }
                let key = if wing1 < wing2 {
                    (pivot, wing1, wing2)
                } else {
                    (pivot, wing2, wing1)
                };
                if seen.insert(key) {
                    out.push(TechniqueInstance::new(
                        Technique::XYWing,
                        pivot.row,
                        pivot.col,
                        format!(
                            "XY-Wing: pivot ({}, {}) with {}, wings at ({}, {}) and ({}, {}) eliminate {}.",
                            pivot.row + 1,
                            pivot.col + 1,
                            pivot_mask,
                            wing1.row + 1,
                            wing1.col + 1,
                            wing2.row + 1,
                            wing2.col + 1,
                            z
                        ),
                    ));
                }
            }
        }
    }
    out
}

/// Trivalue pivot {A, B, C} with bivalue wings {A, C} and {B, C} inside the
/// pivot's candidates, both seeing the pivot. Useful when some cell seeing
/// the pivot and both wings still carries C.
pub(super) fn xyz_wings(board: &Board, cands: &CandidateGrid) -> Vec<TechniqueInstance> {
    let empties = empty_cells(board, cands);
    let mut out = Vec::new();
    for &(pivot, pivot_mask) in &empties {
        if pivot_mask.count() != 3 {
            continue;
        }
        let wings: Vec<(Position, DigitSet)> = empties
            .iter()
            .filter(|&&(pos, mask)| {
                pos != pivot
                    && sees(board, pivot, pos)
                    && mask.count() == 2
                    && mask.is_subset_of(pivot_mask)
            })
            .copied()
            .collect();
        for i in 0..wings.len() {
            for j in (i + 1)..wings.len() {
                let (wing1, mask1) = wings[i];
                let (wing2, mask2) = wings[j];
                if (mask1 | mask2).count() != 3 {
                    continue;
                }
                let common = mask1 & mask2;
                let z = match common.single() {
                    Some(digit) => digit,
                    None => continue,
                };
                let useful = empties.iter().any(|&(target, mask)| {
                    target != pivot
                        && target != wing1
                        && target != wing2
                        && sees(board, target, pivot)
                        && sees(board, target, wing1)
                        && sees(board, target, wing2)
                        && mask.contains(z)
                });
                if useful {
                    out.push(TechniqueInstance::new(
                        Technique::XYZWing,
                        pivot.row,
                        pivot.col,
                        format!(
                            "XYZ-Wing: pivot ({}, {}) with {}, wings at ({}, {}) and ({}, {}) eliminate {}.",
                            pivot.row + 1,
                            pivot.col + 1,
                            pivot_mask,
                            wing1.row + 1,
                            wing1.col + 1,
                            wing2.row + 1,
                            wing2.col + 1,
                            z
                        ),
                    ));
                }
            }
        }
    }
    out
}
