//! Lane partitioning and execution modes.
//!
//! A lane is a contiguous sub-range of `[0, count)` processed as one isolated
//! scan or fold step. Lanes are visited strictly in order by the calling
//! thread; they model the seams a concurrent implementation could split on.

// External dependencies
use core::fmt::{Display, Formatter, Result as FmtResult};
use core::ops::Range;
use core::str::FromStr;

// Internal dependencies
use crate::primitives::errors::LanefoldError;

// ============================================================================
// Execution Mode
// ============================================================================

/// Execution mode orthogonal to the algorithm or operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    /// Let the dispatcher decide.
    #[default]
    Auto,

    /// Prefer lane-partitioned algorithms.
    Lane,

    /// Read-only pass; the buffer is never mutated.
    DryRun,

    /// Same resolution as `Auto`; every execution is already sequential.
    Deterministic,
}

impl ExecutionMode {
    /// Canonical mode token.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Lane => "lane",
            Self::DryRun => "dry-run",
            Self::Deterministic => "deterministic",
        }
    }
}

impl FromStr for ExecutionMode {
    type Err = LanefoldError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "auto" => Ok(Self::Auto),
            "lane" => Ok(Self::Lane),
            "dry-run" => Ok(Self::DryRun),
            "deterministic" => Ok(Self::Deterministic),
            _ => Err(LanefoldError::UnsupportedMode(token.into())),
        }
    }
}

impl Display for ExecutionMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

// ============================================================================
// Lane Plan
// ============================================================================

/// Segmentation of `[0, count)` into contiguous lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanePlan {
    // Number of elements covered.
    count: usize,

    // Effective lane count after normalization.
    lanes: usize,

    // Elements per lane; the last lane may be shorter.
    lane_size: usize,
}

impl LanePlan {
    /// Plan `requested` lanes over `count` elements.
    ///
    /// `0` lanes is treated as `1`, and the lane count is clamped to `count`
    /// so that no lane is empty. An empty range has no lanes.
    pub fn new(count: usize, requested: usize) -> Self {
        if count == 0 {
            return Self {
                count,
                lanes: 0,
                lane_size: 0,
            };
        }

        let lanes = requested.max(1).min(count);
        let lane_size = count.div_ceil(lanes);
        Self {
            count,
            lanes,
            lane_size,
        }
    }

    /// Single lane covering everything.
    pub fn single(count: usize) -> Self {
        Self::new(count, 1)
    }

    /// Effective number of lanes.
    #[inline]
    pub fn lanes(&self) -> usize {
        self.lanes
    }

    /// Nominal lane length (`ceil(count / lanes)`).
    #[inline]
    pub fn lane_size(&self) -> usize {
        self.lane_size
    }

    /// Number of elements covered.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Index range of `lane`, or `None` past the end.
    pub fn segment(&self, lane: usize) -> Option<Range<usize>> {
        let start = lane.checked_mul(self.lane_size)?;
        if lane >= self.lanes || start >= self.count {
            return None;
        }
        let end = (start + self.lane_size).min(self.count);
        Some(start..end)
    }

    /// Lane ranges in visiting order.
    pub fn segments(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        (0..self.lanes).map_while(|lane| self.segment(lane))
    }
}
