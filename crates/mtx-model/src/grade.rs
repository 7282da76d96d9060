//! Ordinal toxicity grade domain.
//!
//! Grades follow the CTCAE 0..=4 scale. A cell that is blank, non-numeric or
//! outside the scale is "unevaluated" and is represented as the absence of a
//! grade (`None`), never as grade 0: conflating the two would corrupt the
//! percentage and mean computations downstream.

use serde::{Deserialize, Serialize};

/// Highest valid toxicity grade.
pub const GRADE_MAX: u8 = 4;

/// Number of grade levels (0 through [`GRADE_MAX`]).
pub const GRADE_LEVELS: usize = GRADE_MAX as usize + 1;

/// A validated ordinal toxicity grade in `0..=GRADE_MAX`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Grade(u8);

impl Grade {
    /// Build a grade, rejecting values outside the ordinal scale.
    pub fn new(value: u8) -> Option<Self> {
        (value <= GRADE_MAX).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Display label for report headers.
    pub fn label(self) -> String {
        format!("Grade {}", self.0)
    }

    /// All grades in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..=GRADE_MAX).map(Self)
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
