//! Slice adapter for typed filter and reduce calls.
//!
//! ## Purpose
//!
//! This module provides the strongly typed execution adapter. Callers hand it
//! `&mut [T]` (filter) or `&[T]` (reduce) and closures over `T`; the element
//! stride is the Rust type's size, so no registry lookup is needed.
//!
//! ## Design notes
//!
//! * **Delegation**: Execution is delegated to the engine executors.
//! * **Typed results**: Reduce methods return the accumulator as `T`, `usize`
//!   or `bool` instead of writing into caller bytes.
//! * **Builder Pattern**: Configuration is validated once at `build()`.
//!
//! ## Key concepts
//!
//! * **Filter**: `run` rewrites the slice in place and reports the kept prefix length.
//! * **Reduce**: One method per built-in operation plus `fold_with` for custom reducers.
//!
//! ## Non-goals
//!
//! * This adapter does not handle runtime-typed byte buffers (use the erased adapter).

// Internal dependencies
use crate::algorithms::compaction::FilterAlgorithm;
use crate::algorithms::folding::{Numeric, ReduceOp};
use crate::engine::executor::{FilterExecutor, ReduceExecutor};
use crate::engine::output::{FilterOutcome, ReduceOutcome};
use crate::engine::validator::Validator;
use crate::primitives::errors::LanefoldError;
use crate::primitives::lanes::ExecutionMode;

// ============================================================================
// Slice Filter
// ============================================================================

/// Builder for a typed filter.
#[derive(Debug, Clone)]
pub struct SliceFilterBuilder {
    /// Filter algorithm
    pub algorithm: FilterAlgorithm,

    /// Execution mode
    pub mode: ExecutionMode,

    /// Requested lane count
    pub lanes: usize,

    /// Tracks if any parameter was set multiple times (for validation)
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl Default for SliceFilterBuilder {
    fn default() -> Self {
        Self {
            algorithm: FilterAlgorithm::default(),
            mode: ExecutionMode::default(),
            lanes: 1,
            duplicate_param: None,
        }
    }
}

impl SliceFilterBuilder {
    /// Build the typed filter.
    pub fn build(self) -> Result<SliceFilter, LanefoldError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;

        Ok(SliceFilter {
            executor: FilterExecutor::new(self.algorithm, self.mode, self.lanes),
        })
    }
}

/// Typed filter ready to run.
#[derive(Debug, Clone, Copy)]
pub struct SliceFilter {
    executor: FilterExecutor,
}

impl SliceFilter {
    /// Algorithm this filter will run.
    pub fn resolved_algorithm(&self) -> FilterAlgorithm {
        self.executor.resolve()
    }

    /// Filter `data` in place.
    ///
    /// For compacting algorithms the first `kept` elements are the matches;
    /// elements past `kept` are unspecified (a permutation for `partition`).
    pub fn run<T, P>(&self, data: &mut [T], predicate: P) -> Result<FilterOutcome, LanefoldError>
    where
        T: Copy,
        P: FnMut(&T) -> bool,
    {
        self.executor.run(data, predicate)
    }

    /// Filter `data` and return the kept prefix.
    ///
    /// Read-only algorithms return an empty prefix since they do not compact.
    pub fn retain<'a, T, P>(
        &self,
        data: &'a mut [T],
        predicate: P,
    ) -> Result<&'a mut [T], LanefoldError>
    where
        T: Copy,
        P: FnMut(&T) -> bool,
    {
        let outcome = self.run(data, predicate)?;
        let kept = if outcome.mutated { outcome.kept } else { 0 };
        Ok(&mut data[..kept])
    }
}

// ============================================================================
// Slice Reduce
// ============================================================================

/// Builder for a typed reduction.
#[derive(Debug, Clone)]
pub struct SliceReduceBuilder {
    /// Execution mode
    pub mode: ExecutionMode,

    /// Requested lane count
    pub lanes: usize,

    /// Tracks if any parameter was set multiple times (for validation)
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl Default for SliceReduceBuilder {
    fn default() -> Self {
        Self {
            mode: ExecutionMode::default(),
            lanes: 1,
            duplicate_param: None,
        }
    }
}

impl SliceReduceBuilder {
    /// Build the typed reduction.
    pub fn build(self) -> Result<SliceReduce, LanefoldError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;

        Ok(SliceReduce {
            executor: ReduceExecutor::new(self.mode, self.lanes),
        })
    }
}

/// Typed reduction ready to run.
#[derive(Debug, Clone, Copy)]
pub struct SliceReduce {
    executor: ReduceExecutor,
}

impl SliceReduce {
    /// Wrapping sum for integers, IEEE sum for floats.
    pub fn sum<T: Numeric>(&self, data: &[T]) -> Result<ReduceOutcome<T>, LanefoldError> {
        self.executor.numeric(ReduceOp::Sum, data)
    }

    /// Smallest element; `T::max_value()` for an empty slice.
    pub fn min<T: Numeric>(&self, data: &[T]) -> Result<ReduceOutcome<T>, LanefoldError> {
        self.executor.numeric(ReduceOp::Min, data)
    }

    /// Largest element; `T::min_value()` for an empty slice.
    pub fn max<T: Numeric>(&self, data: &[T]) -> Result<ReduceOutcome<T>, LanefoldError> {
        self.executor.numeric(ReduceOp::Max, data)
    }

    /// Number of elements.
    pub fn count<T>(&self, data: &[T]) -> ReduceOutcome<usize> {
        self.executor.count(data)
    }

    /// Whether any flag is set; `false` for an empty slice.
    pub fn any(&self, data: &[bool]) -> Result<ReduceOutcome<bool>, LanefoldError> {
        self.executor.logical(ReduceOp::Any, data)
    }

    /// Whether every flag is set; `true` for an empty slice.
    pub fn all(&self, data: &[bool]) -> Result<ReduceOutcome<bool>, LanefoldError> {
        self.executor.logical(ReduceOp::All, data)
    }

    /// Fold with a caller reducer starting from `init`.
    pub fn fold_with<T, A, R>(&self, data: &[T], init: A, reducer: R) -> ReduceOutcome<A>
    where
        R: FnMut(&mut A, &T),
    {
        self.executor.custom(data, init, reducer)
    }
}
