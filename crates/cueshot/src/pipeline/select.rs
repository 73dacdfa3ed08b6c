//! Choosing which two detected circles form the shot.
//!
//! The detector only ranks candidates; which one is the cue ball and which
//! one the target is caller policy, expressed as a [`PairSelector`].

use crate::geometry::Circle;

/// Picks `(cue, target)` from the ordered candidate list.
///
/// Candidates arrive strongest first. Returning `None` means no acceptable
/// pair exists and the pipeline reports insufficient detections.
pub trait PairSelector {
    fn select(&self, candidates: &[Circle]) -> Option<(Circle, Circle)>;
}

/// The two strongest candidates: first is cue, second is target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrongestPair;

impl PairSelector for StrongestPair {
    fn select(&self, candidates: &[Circle]) -> Option<(Circle, Circle)> {
        match candidates {
            [cue, target, ..] => Some((*cue, *target)),
            _ => None,
        }
    }
}

/// Candidates at fixed ordinal positions in detector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrdinalPair {
    pub cue: usize,
    pub target: usize,
}

impl Default for OrdinalPair {
    fn default() -> Self {
        Self { cue: 0, target: 1 }
    }
}

impl PairSelector for OrdinalPair {
    fn select(&self, candidates: &[Circle]) -> Option<(Circle, Circle)> {
        if self.cue == self.target {
            return None;
        }
        Some((*candidates.get(self.cue)?, *candidates.get(self.target)?))
    }
}

impl<F> PairSelector for F
where
    F: Fn(&[Circle]) -> Option<(Circle, Circle)>,
{
    fn select(&self, candidates: &[Circle]) -> Option<(Circle, Circle)> {
        self(candidates)
    }
}
