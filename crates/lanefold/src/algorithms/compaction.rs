//! Filter (compaction) algorithms.
//!
//! ## Purpose
//!
//! This module implements the concrete filter algorithms. Every algorithm is
//! O(n) in predicate calls; they differ in how they mutate the buffer and in
//! the ordering guarantee of the kept prefix.
//!
//! ## Design notes
//!
//! * **Single implementation**: Algorithms are generic over [`Elements`], so the
//!   same code serves typed slices and type-erased byte buffers.
//! * **Lane order**: Lane variants visit segments left to right and share one
//!   write cursor, so their result equals the unsegmented variant.
//! * **Scan before write**: Staged variants evaluate the predicate on unmodified
//!   data and write back only at the end.
//!
//! ## Key concepts
//!
//! | Algorithm      | Order kept | Mutates | Extra memory |
//! |----------------|------------|---------|--------------|
//! | `inplace`      | yes        | yes     | O(1)         |
//! | `stable`       | yes        | yes     | O(n)         |
//! | `count-only`   | n/a        | no      | O(1)         |
//! | `first`/`last` | n/a        | no      | O(1)         |
//! | `partition`    | no         | yes     | O(1)         |
//! | `lane-compact` | yes        | yes     | O(1)         |
//! | `lane-stable`  | yes        | yes     | O(n)         |
//!
//! ## Invariants
//!
//! * After a compaction returning `k`, elements `[0, k)` all satisfy the predicate.
//! * `first`/`last` return an existence flag (0 or 1), not an index.
//!
//! ## Non-goals
//!
//! * This module does not resolve `auto` or validate inputs (see the engine).

// External dependencies
use core::fmt::{Display, Formatter, Result as FmtResult};
use core::str::FromStr;
use tracing::trace;

// Internal dependencies
use crate::primitives::buffer::Elements;
use crate::primitives::errors::LanefoldError;
use crate::primitives::lanes::LanePlan;

// ============================================================================
// Algorithm Selector
// ============================================================================

/// Filter algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterAlgorithm {
    /// Resolved by the dispatcher from the mode and lane count.
    #[default]
    Auto,

    /// Order-preserving compaction with a write cursor.
    InPlace,

    /// Order-preserving compaction through a staging buffer.
    Stable,

    /// `InPlace` over lane segments sharing one write cursor.
    LaneCompact,

    /// `Stable` over lane segments.
    LaneStable,

    /// Read-only match count.
    CountOnly,

    /// Existence flag, scanning forward.
    First,

    /// Existence flag, scanning backward.
    Last,

    /// Two-pointer partition; prefix order not preserved.
    Partition,
}

impl FilterAlgorithm {
    /// Canonical algorithm token.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::InPlace => "inplace",
            Self::Stable => "stable",
            Self::LaneCompact => "lane-compact",
            Self::LaneStable => "lane-stable",
            Self::CountOnly => "count-only",
            Self::First => "first",
            Self::Last => "last",
            Self::Partition => "partition",
        }
    }

    /// Whether the algorithm may write to the buffer.
    pub const fn mutates(self) -> bool {
        !matches!(self, Self::CountOnly | Self::First | Self::Last)
    }

    /// Whether the algorithm follows a lane plan.
    pub const fn is_lane_aware(self) -> bool {
        matches!(self, Self::LaneCompact | Self::LaneStable)
    }
}

impl FromStr for FilterAlgorithm {
    type Err = LanefoldError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "auto" => Ok(Self::Auto),
            "inplace" | "compact" => Ok(Self::InPlace),
            "stable" => Ok(Self::Stable),
            "lane-compact" => Ok(Self::LaneCompact),
            "lane-stable" => Ok(Self::LaneStable),
            "count-only" => Ok(Self::CountOnly),
            "first" => Ok(Self::First),
            "last" => Ok(Self::Last),
            "partition" => Ok(Self::Partition),
            _ => Err(LanefoldError::UnsupportedAlgorithm(token.into())),
        }
    }
}

impl Display for FilterAlgorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

// ============================================================================
// Order-Preserving Compaction
// ============================================================================

/// Move kept elements of `[start, end)` to the write cursor; returns the new cursor.
#[inline]
fn compact_range<E, P>(
    elems: &mut E,
    start: usize,
    end: usize,
    mut write: usize,
    predicate: &mut P,
) -> usize
where
    E: Elements + ?Sized,
    P: FnMut(&E::Item) -> bool,
{
    for read in start..end {
        if predicate(elems.item(read)) {
            if write != read {
                elems.relocate(read, write);
            }
            write += 1;
        }
    }
    write
}

/// Single forward pass moving kept elements to the front.
pub fn compact_inplace<E, P>(elems: &mut E, predicate: &mut P) -> usize
where
    E: Elements + ?Sized,
    P: FnMut(&E::Item) -> bool,
{
    let count = elems.len();
    compact_range(elems, 0, count, 0, predicate)
}

/// Stage kept elements, then copy them back as a prefix.
pub fn compact_stable<E, P>(elems: &mut E, predicate: &mut P) -> Result<usize, LanefoldError>
where
    E: Elements + ?Sized,
    P: FnMut(&E::Item) -> bool,
{
    let mut staging = elems.staging()?;
    for i in 0..elems.len() {
        if predicate(elems.item(i)) {
            elems.stage(i, &mut staging);
        }
    }
    Ok(elems.restore(staging))
}

/// Lane-segmented `compact_inplace` with one shared write cursor.
pub fn compact_lanes<E, P>(elems: &mut E, plan: &LanePlan, predicate: &mut P) -> usize
where
    E: Elements + ?Sized,
    P: FnMut(&E::Item) -> bool,
{
    let mut write = 0;
    for (lane, segment) in plan.segments().enumerate() {
        let before = write;
        write = compact_range(elems, segment.start, segment.end, write, predicate);
        trace!(
            lane,
            start = segment.start,
            end = segment.end,
            kept = write - before,
            "compacted lane"
        );
    }
    write
}

/// Lane-segmented `compact_stable`.
pub fn compact_lanes_stable<E, P>(
    elems: &mut E,
    plan: &LanePlan,
    predicate: &mut P,
) -> Result<usize, LanefoldError>
where
    E: Elements + ?Sized,
    P: FnMut(&E::Item) -> bool,
{
    let mut staging = elems.staging()?;
    for (lane, segment) in plan.segments().enumerate() {
        trace!(lane, start = segment.start, end = segment.end, "staging lane");
        for i in segment {
            if predicate(elems.item(i)) {
                elems.stage(i, &mut staging);
            }
        }
    }
    Ok(elems.restore(staging))
}

// ============================================================================
// Read-Only Scans
// ============================================================================

/// Number of matching elements; the buffer is not touched.
pub fn count_matches<E, P>(elems: &E, predicate: &mut P) -> usize
where
    E: Elements + ?Sized,
    P: FnMut(&E::Item) -> bool,
{
    (0..elems.len()).filter(|&i| predicate(elems.item(i))).count()
}

/// 1 if any element matches scanning from the front, else 0.
pub fn find_first<E, P>(elems: &E, predicate: &mut P) -> usize
where
    E: Elements + ?Sized,
    P: FnMut(&E::Item) -> bool,
{
    usize::from((0..elems.len()).any(|i| predicate(elems.item(i))))
}

/// 1 if any element matches scanning from the back, else 0.
pub fn find_last<E, P>(elems: &E, predicate: &mut P) -> usize
where
    E: Elements + ?Sized,
    P: FnMut(&E::Item) -> bool,
{
    usize::from((0..elems.len()).rev().any(|i| predicate(elems.item(i))))
}

// ============================================================================
// Partition
// ============================================================================

/// Hoare-style two-pointer partition.
///
/// Matches accumulate from the left; a failing element is swapped with the
/// element at the shrinking right cursor and re-examined. The buffer stays a
/// permutation of its input and rejected elements end up in the suffix.
pub fn partition<E, P>(elems: &mut E, predicate: &mut P) -> usize
where
    E: Elements + ?Sized,
    P: FnMut(&E::Item) -> bool,
{
    let mut left = 0;
    let mut right = elems.len();

    while left < right {
        if predicate(elems.item(left)) {
            left += 1;
        } else {
            right -= 1;
            elems.exchange(left, right);
        }
    }
    left
}
