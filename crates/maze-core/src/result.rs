//! The [`SolveResult`] record every solver returns.

use std::time::Duration;

use crate::geom::Point;

/// Outcome of a solve call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolveStatus {
    Success,
    Failed,
}

/// The complete, immutable output of one solve call.
///
/// On failure the path is empty and the cost is `-1`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveResult {
    pub status: SolveStatus,
    pub path: Vec<Point>,
    pub cost: i64,
    pub elapsed: Duration,
    pub nodes_expanded: usize,
}

impl SolveResult {
    /// A successful route.
    pub fn success(path: Vec<Point>, cost: i64, elapsed: Duration, nodes_expanded: usize) -> Self {
        Self {
            status: SolveStatus::Success,
            path,
            cost,
            elapsed,
            nodes_expanded,
        }
    }

    /// No route was found.
    pub fn failed(elapsed: Duration, nodes_expanded: usize) -> Self {
        Self {
            status: SolveStatus::Failed,
            path: Vec::new(),
            cost: -1,
            elapsed,
            nodes_expanded,
        }
    }

    /// The degenerate `start == goal` answer.
    pub fn trivial(start: Point, elapsed: Duration) -> Self {
        Self::success(vec![start], 0, elapsed, 0)
    }

    /// Whether the status is [`SolveStatus::Success`].
    #[inline]
    pub fn is_success(&self) -> bool {
        self.status == SolveStatus::Success
    }
}
