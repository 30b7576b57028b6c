//! Difficulty classes and the per-class target tables.
//!
//! The tables are the policy surface of the engine: everything that decides
//! what counts as Easy or Evil lives in [`DifficultyTargets`], which is a
//! plain value so tests (and adventurous callers) can substitute their own.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Difficulty class of a puzzle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
    Evil,
}

impl Difficulty {
    pub fn all() -> &'static [Difficulty; 5] {
        &[
            Difficulty::Easy,
            Difficulty::Medium,
            Difficulty::Hard,
            Difficulty::Expert,
            Difficulty::Evil,
        ]
    }

    fn index(self) -> usize {
        self as usize
    }

    /// The class one step easier, if any.
    pub fn easier(self) -> Option<Difficulty> {
        match self {
            Difficulty::Easy => None,
            Difficulty::Medium => Some(Difficulty::Easy),
            Difficulty::Hard => Some(Difficulty::Medium),
            Difficulty::Expert => Some(Difficulty::Hard),
            Difficulty::Evil => Some(Difficulty::Expert),
        }
    }

    /// The class one step harder, if any.
    pub fn harder(self) -> Option<Difficulty> {
        match self {
            Difficulty::Easy => Some(Difficulty::Medium),
            Difficulty::Medium => Some(Difficulty::Hard),
            Difficulty::Hard => Some(Difficulty::Expert),
            Difficulty::Expert => Some(Difficulty::Evil),
            Difficulty::Evil => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
            Difficulty::Expert => write!(f, "Expert"),
            Difficulty::Evil => write!(f, "Evil"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = ();

    /// Case-insensitive, whitespace-trimmed.
    fn from_str(s: &str) -> Result<Self, ()> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "expert" => Ok(Difficulty::Expert),
            "evil" => Ok(Difficulty::Evil),
            _ => Err(()),
        }
    }
}

/// Where a score sits relative to a target class's score range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetComparison {
    TooEasy,
    InRange,
    TooHard,
}

/// Per-class targets: a closed iteration range, a left-closed right-open
/// score range, and the iteration count a generator aims for. `None` upper
/// bounds mean unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassTargets {
    pub iterations: (u64, Option<u64>),
    pub score: (f64, Option<f64>),
    pub iteration_goal: u64,
}

/// The class-to-target mapping. Score ranges tile the non-negative reals
/// contiguously: each class's upper endpoint is the next class's lower one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyTargets {
    classes: [ClassTargets; 5],
}

impl Default for DifficultyTargets {
    fn default() -> Self {
        DifficultyTargets {
            classes: [
                ClassTargets {
                    iterations: (1, Some(10)),
                    score: (0.0, Some(8.0)),
                    iteration_goal: 5,
                },
                ClassTargets {
                    iterations: (11, Some(25)),
                    score: (8.0, Some(20.0)),
                    iteration_goal: 15,
                },
                ClassTargets {
                    iterations: (26, Some(80)),
                    score: (20.0, Some(60.0)),
                    iteration_goal: 40,
                },
                ClassTargets {
                    iterations: (81, Some(350)),
                    score: (60.0, Some(250.0)),
                    iteration_goal: 150,
                },
                ClassTargets {
                    iterations: (351, None),
                    score: (250.0, None),
                    iteration_goal: 400,
                },
            ],
        }
    }
}

impl DifficultyTargets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class(&self, difficulty: Difficulty) -> &ClassTargets {
        &self.classes[difficulty.index()]
    }

    /// Replace one class's targets; the policy surface for tests.
    pub fn set_class(&mut self, difficulty: Difficulty, targets: ClassTargets) {
        self.classes[difficulty.index()] = targets;
    }

    pub fn iteration_range(&self, difficulty: Difficulty) -> (u64, Option<u64>) {
        self.class(difficulty).iterations
    }

    pub fn score_range(&self, difficulty: Difficulty) -> (f64, Option<f64>) {
        self.class(difficulty).score
    }

    pub fn iteration_goal(&self, difficulty: Difficulty) -> u64 {
        self.class(difficulty).iteration_goal
    }

    /// Midpoint of a class's score range; for the open-ended top class the
    /// range start doubles as the nominal width.
    pub fn score_center(&self, difficulty: Difficulty) -> f64 {
        let (lo, hi) = self.score_range(difficulty);
        match hi {
            Some(hi) => (lo + hi) / 2.0,
            None => lo * 1.5,
        }
    }

    pub fn classify_by_iterations(&self, iterations: u64) -> Difficulty {
        for &difficulty in Difficulty::all() {
            if let (_, Some(hi)) = self.iteration_range(difficulty) {
                if iterations <= hi {
                    return difficulty;
                }
            }
        }
        Difficulty::Evil
    }

    pub fn classify_by_score(&self, score: f64) -> Difficulty {
        for &difficulty in Difficulty::all() {
            if let (_, Some(hi)) = self.score_range(difficulty) {
                if score < hi {
                    return difficulty;
                }
            }
        }
        Difficulty::Evil
    }

    /// Is the iteration count close to the class's goal, within a relative
    /// tolerance of the goal or an absolute tolerance, whichever is looser?
    pub fn is_close_to_target(
        &self,
        iterations: u64,
        difficulty: Difficulty,
        relative_tolerance: f64,
        absolute_tolerance: u64,
    ) -> bool {
        let goal = self.iteration_goal(difficulty);
        let distance = iterations.abs_diff(goal);
        distance <= absolute_tolerance
            || (distance as f64) <= relative_tolerance * goal as f64
    }

    /// Compare a composite score against a target class's score range.
    pub fn compare_score(&self, score: f64, target: Difficulty) -> TargetComparison {
        let (lo, hi) = self.score_range(target);
        if score < lo {
            TargetComparison::TooEasy
        } else {
            match hi {
                Some(hi) if score >= hi => TargetComparison::TooHard,
                _ => TargetComparison::InRange,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_by_iterations() {
        let targets = DifficultyTargets::default();
        assert_eq!(targets.classify_by_iterations(5), Difficulty::Easy);
        assert_eq!(targets.classify_by_iterations(20), Difficulty::Medium);
        assert_eq!(targets.classify_by_iterations(50), Difficulty::Hard);
        assert_eq!(targets.classify_by_iterations(200), Difficulty::Expert);
        assert_eq!(targets.classify_by_iterations(500), Difficulty::Evil);
    }

    #[test]
    fn test_score_ranges_tile() {
        let targets = DifficultyTargets::default();
        for &difficulty in Difficulty::all() {
            if let Some(harder) = difficulty.harder() {
                let (_, hi) = targets.score_range(difficulty);
                let (lo, _) = targets.score_range(harder);
                assert_eq!(hi, Some(lo));
            }
        }
    }

    #[test]
    fn test_classify_by_score_boundaries() {
        let targets = DifficultyTargets::default();
        // Left-closed, right-open.
        assert_eq!(targets.classify_by_score(0.0), Difficulty::Easy);
        assert_eq!(targets.classify_by_score(8.0), Difficulty::Medium);
        assert_eq!(targets.classify_by_score(19.99), Difficulty::Medium);
        assert_eq!(targets.classify_by_score(20.0), Difficulty::Hard);
        assert_eq!(targets.classify_by_score(250.0), Difficulty::Evil);
        assert_eq!(targets.classify_by_score(10_000.0), Difficulty::Evil);
    }

    #[test]
    fn test_compare_score() {
        let targets = DifficultyTargets::default();
        assert_eq!(
            targets.compare_score(5.0, Difficulty::Medium),
            TargetComparison::TooEasy
        );
        assert_eq!(
            targets.compare_score(12.0, Difficulty::Medium),
            TargetComparison::InRange
        );
        assert_eq!(
            targets.compare_score(20.0, Difficulty::Medium),
            TargetComparison::TooHard
        );
        assert_eq!(
            targets.compare_score(10_000.0, Difficulty::Evil),
            TargetComparison::InRange
        );
    }

    #[test]
    fn test_close_to_target() {
        let targets = DifficultyTargets::default();
        // Hard goal is 40.
        assert!(targets.is_close_to_target(40, Difficulty::Hard, 0.0, 0));
        assert!(targets.is_close_to_target(44, Difficulty::Hard, 0.1, 0));
        assert!(!targets.is_close_to_target(45, Difficulty::Hard, 0.1, 0));
        assert!(targets.is_close_to_target(45, Difficulty::Hard, 0.1, 5));
    }

    #[test]
    fn test_custom_table() {
        let mut targets = DifficultyTargets::default();
        targets.set_class(
            Difficulty::Easy,
            ClassTargets {
                iterations: (1, Some(3)),
                score: (0.0, Some(2.0)),
                iteration_goal: 2,
            },
        );
        assert_eq!(targets.classify_by_iterations(5), Difficulty::Medium);
        assert_eq!(targets.classify_by_score(2.5), Difficulty::Medium);
    }

    #[test]
    fn test_parse_difficulty() {
        assert_eq!(" HARD ".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!("evil".parse::<Difficulty>(), Ok(Difficulty::Evil));
        assert!("impossible".parse::<Difficulty>().is_err());
    }
}
