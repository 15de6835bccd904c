//! Output types for filter and reduce calls.
//!
//! ## Purpose
//!
//! This module defines the outcome structures returned by the executors. The
//! primary value (kept count, accumulator) is accompanied by the metadata
//! of how the call was actually executed.
//!
//! ## Design notes
//!
//! * **Resolved, not requested**: Outcomes report the algorithm that ran and the
//!   effective lane count after normalization.
//! * **Ergonomics**: Implements `Display` for a short human-readable summary.
//!
//! ## Invariants
//!
//! * `kept <= requested` for every filter outcome.
//! * `mutated` is false whenever the resolved algorithm is read-only.
//!
//! ## Non-goals
//!
//! * This module does not perform calculations; it only stores results.

// External dependencies
use core::fmt::{Debug, Display, Formatter, Result};

// Internal dependencies
use crate::algorithms::compaction::FilterAlgorithm;
use crate::algorithms::folding::ReduceOp;

// ============================================================================
// Filter Outcome
// ============================================================================

/// Result of a filter call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Kept count (or match count, or existence flag for `first`/`last`).
    pub kept: usize,

    /// Number of input elements.
    pub requested: usize,

    /// Algorithm that actually ran.
    pub algorithm: FilterAlgorithm,

    /// Effective lane count.
    pub lanes: usize,

    /// Whether the buffer may have been rewritten.
    pub mutated: bool,
}

impl FilterOutcome {
    /// Number of elements that did not match (for compactions).
    pub fn rejected(&self) -> usize {
        self.requested - self.kept
    }
}

impl Display for FilterOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Algorithm: {}", self.algorithm)?;
        writeln!(f, "  Lanes:     {}", self.lanes)?;
        writeln!(f, "  Elements:  {}", self.requested)?;
        writeln!(f, "  Kept:      {}", self.kept)?;
        write!(f, "  Mutated:   {}", if self.mutated { "yes" } else { "no" })
    }
}

// ============================================================================
// Reduce Outcome
// ============================================================================

/// Result of a reduce call.
#[derive(Debug, Clone, PartialEq)]
pub struct ReduceOutcome<A> {
    /// Final accumulator value (`()` when written to caller bytes).
    pub value: A,

    /// Operation that ran.
    pub operation: ReduceOp,

    /// Number of elements folded.
    pub folded: usize,

    /// Effective lane count.
    pub lanes: usize,
}

impl<A> ReduceOutcome<A> {
    /// Consume the outcome, keeping only the accumulator value.
    pub fn into_value(self) -> A {
        self.value
    }
}

impl<A: Debug> Display for ReduceOutcome<A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Operation: {}", self.operation)?;
        writeln!(f, "  Lanes:     {}", self.lanes)?;
        writeln!(f, "  Folded:    {}", self.folded)?;
        write!(f, "  Value:     {:?}", self.value)
    }
}
