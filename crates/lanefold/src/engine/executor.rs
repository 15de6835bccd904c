//! Execution engine for filter and reduce calls.
//!
//! ## Purpose
//!
//! This module is the dispatcher between the adapters and the algorithms. It
//! resolves `auto` selections, builds the lane plan, routes to the concrete
//! algorithm and packages the outcome.
//!
//! ## Design notes
//!
//! * **Policy in one place**: The `auto` and `dry-run` resolution rules live only
//!   in [`FilterExecutor::resolve`].
//! * **Generic core**: Executors are generic over [`Elements`] and closures, so
//!   the typed and erased adapters share every code path.
//! * **Sequential**: Lanes are visited in order on the calling thread.
//!
//! ## Key concepts
//!
//! ### Filter resolution
//!
//! 1. `dry-run` mode forces `count-only`.
//! 2. Otherwise `auto` becomes `lane-compact` when the mode is `lane` or more
//!    than one lane is requested, and `inplace` otherwise.
//! 3. Explicit algorithms run as requested.
//!
//! ### Reduce modes
//!
//! Reduction never mutates its input, so every mode folds the same way; the
//! mode is only recorded in diagnostics.
//!
//! ## Invariants
//!
//! * Staging memory is reserved before the first predicate call.
//! * Built-in reduce results do not depend on the lane count.
//!
//! ## Non-goals
//!
//! * This module does not parse tokens or resolve type identifiers.
//! * This module does not run lanes concurrently.

// External dependencies
use tracing::debug;

// Internal dependencies
use crate::algorithms::compaction::{self, FilterAlgorithm};
use crate::algorithms::folding::{
    ErasedSource, Numeric, ReduceOp, fold_erased, fold_erased_custom, fold_indices,
    logical_identity, logical_step, numeric_identity, numeric_step,
};
use crate::engine::output::{FilterOutcome, ReduceOutcome};
use crate::engine::validator::Validator;
use crate::primitives::buffer::Elements;
use crate::primitives::errors::LanefoldError;
use crate::primitives::lanes::{ExecutionMode, LanePlan};

/// Caller-supplied reducer over erased bytes: `(accumulator, element)`.
pub type ErasedReducer<'r> = &'r mut dyn FnMut(&mut [u8], &[u8]);

// ============================================================================
// Filter Executor
// ============================================================================

/// Resolved filter configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterExecutor {
    /// Requested algorithm.
    pub algorithm: FilterAlgorithm,

    /// Execution mode.
    pub mode: ExecutionMode,

    /// Requested lane count (normalized per call).
    pub lanes: usize,
}

impl FilterExecutor {
    /// Create an executor from its three selectors.
    pub fn new(algorithm: FilterAlgorithm, mode: ExecutionMode, lanes: usize) -> Self {
        Self {
            algorithm,
            mode,
            lanes,
        }
    }

    /// Algorithm that will actually run.
    pub fn resolve(&self) -> FilterAlgorithm {
        if self.mode == ExecutionMode::DryRun {
            return FilterAlgorithm::CountOnly;
        }

        match self.algorithm {
            FilterAlgorithm::Auto if self.mode == ExecutionMode::Lane || self.lanes > 1 => {
                FilterAlgorithm::LaneCompact
            }
            FilterAlgorithm::Auto => FilterAlgorithm::InPlace,
            explicit => explicit,
        }
    }

    /// Run the resolved algorithm over `elems`.
    pub fn run<E, P>(&self, elems: &mut E, mut predicate: P) -> Result<FilterOutcome, LanefoldError>
    where
        E: Elements + ?Sized,
        P: FnMut(&E::Item) -> bool,
    {
        let resolved = self.resolve();
        let count = elems.len();
        let plan = if resolved.is_lane_aware() {
            LanePlan::new(count, self.lanes)
        } else {
            LanePlan::single(count)
        };

        debug!(
            requested = %self.algorithm,
            resolved = %resolved,
            mode = %self.mode,
            lanes = plan.lanes(),
            count,
            "dispatching filter"
        );

        let p = &mut predicate;
        let kept = match resolved {
            FilterAlgorithm::Auto | FilterAlgorithm::InPlace => {
                compaction::compact_inplace(elems, p)
            }
            FilterAlgorithm::Stable => compaction::compact_stable(elems, p)?,
            FilterAlgorithm::LaneCompact => compaction::compact_lanes(elems, &plan, p),
            FilterAlgorithm::LaneStable => compaction::compact_lanes_stable(elems, &plan, p)?,
            FilterAlgorithm::CountOnly => compaction::count_matches(elems, p),
            FilterAlgorithm::First => compaction::find_first(elems, p),
            FilterAlgorithm::Last => compaction::find_last(elems, p),
            FilterAlgorithm::Partition => compaction::partition(elems, p),
        };

        Ok(FilterOutcome {
            kept,
            requested: count,
            algorithm: resolved,
            lanes: plan.lanes(),
            mutated: resolved.mutates(),
        })
    }
}

// ============================================================================
// Reduce Executor
// ============================================================================

/// Resolved reduce configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReduceExecutor {
    /// Execution mode (diagnostic only).
    pub mode: ExecutionMode,

    /// Requested lane count (normalized per call).
    pub lanes: usize,
}

impl ReduceExecutor {
    /// Create an executor.
    pub fn new(mode: ExecutionMode, lanes: usize) -> Self {
        Self { mode, lanes }
    }

    fn plan(&self, op: ReduceOp, count: usize) -> LanePlan {
        let plan = LanePlan::new(count, self.lanes);
        debug!(
            operation = %op,
            mode = %self.mode,
            lanes = plan.lanes(),
            count,
            "dispatching reduce"
        );
        plan
    }

    /// `sum`, `min` or `max` over a typed slice.
    pub fn numeric<T: Numeric>(
        &self,
        op: ReduceOp,
        data: &[T],
    ) -> Result<ReduceOutcome<T>, LanefoldError> {
        let mut value = numeric_identity::<T>(op).ok_or(LanefoldError::InapplicableOperation {
            operation: op.name(),
            element: T::KIND.id(),
        })?;
        let plan = self.plan(op, data.len());
        let folded = fold_indices(&plan, |i| value = numeric_step(op, value, data[i]));

        Ok(ReduceOutcome {
            value,
            operation: op,
            folded,
            lanes: plan.lanes(),
        })
    }

    /// `any` or `all` over a typed slice.
    pub fn logical(
        &self,
        op: ReduceOp,
        data: &[bool],
    ) -> Result<ReduceOutcome<bool>, LanefoldError> {
        let mut value = logical_identity(op).ok_or(LanefoldError::InapplicableOperation {
            operation: op.name(),
            element: "bool",
        })?;
        let plan = self.plan(op, data.len());
        let folded = fold_indices(&plan, |i| value = logical_step(op, value, data[i]));

        Ok(ReduceOutcome {
            value,
            operation: op,
            folded,
            lanes: plan.lanes(),
        })
    }

    /// Number of elements in a typed slice.
    pub fn count<T>(&self, data: &[T]) -> ReduceOutcome<usize> {
        let plan = self.plan(ReduceOp::Count, data.len());
        let folded = fold_indices(&plan, |_| {});

        ReduceOutcome {
            value: folded,
            operation: ReduceOp::Count,
            folded,
            lanes: plan.lanes(),
        }
    }

    /// Caller reducer over a typed slice, starting from `init`.
    pub fn custom<T, A, R>(&self, data: &[T], init: A, mut reducer: R) -> ReduceOutcome<A>
    where
        R: FnMut(&mut A, &T),
    {
        let mut value = init;
        let plan = self.plan(ReduceOp::Custom, data.len());
        let folded = fold_indices(&plan, |i| reducer(&mut value, &data[i]));

        ReduceOutcome {
            value,
            operation: ReduceOp::Custom,
            folded,
            lanes: plan.lanes(),
        }
    }

    /// Any operation over erased bytes, writing into `accumulator`.
    ///
    /// Checks run in status order: reducer presence, applicability,
    /// accumulator width, buffer length.
    pub fn erased(
        &self,
        op: ReduceOp,
        source: ErasedSource<'_>,
        count: usize,
        accumulator: &mut [u8],
        reducer: Option<ErasedReducer<'_>>,
    ) -> Result<ReduceOutcome<()>, LanefoldError> {
        Validator::validate_reducer(op, reducer.is_some())?;
        Validator::validate_operation(op, source.kind)?;
        Validator::validate_accumulator(op, source.stride, accumulator.len())?;
        Validator::validate_buffer(source.bytes.len(), count, source.stride)?;

        let plan = self.plan(op, count);
        let folded = match reducer {
            Some(reducer) if op == ReduceOp::Custom => {
                fold_erased_custom(source, &plan, accumulator, reducer)
            }
            _ => fold_erased(op, source, &plan, accumulator)?,
        };

        Ok(ReduceOutcome {
            value: (),
            operation: op,
            folded,
            lanes: plan.lanes(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::registry::ElementType;

    #[test]
    fn auto_resolution_policy() {
        let exec = |mode, lanes| FilterExecutor::new(FilterAlgorithm::Auto, mode, lanes).resolve();
        assert_eq!(exec(ExecutionMode::Auto, 1), FilterAlgorithm::InPlace);
        assert_eq!(exec(ExecutionMode::Auto, 0), FilterAlgorithm::InPlace);
        assert_eq!(exec(ExecutionMode::Auto, 4), FilterAlgorithm::LaneCompact);
        assert_eq!(exec(ExecutionMode::Lane, 1), FilterAlgorithm::LaneCompact);
        assert_eq!(exec(ExecutionMode::Deterministic, 1), FilterAlgorithm::InPlace);
    }

    #[test]
    fn dry_run_overrides_explicit_algorithm() {
        let exec =
            FilterExecutor::new(FilterAlgorithm::Partition, ExecutionMode::DryRun, 1);
        assert_eq!(exec.resolve(), FilterAlgorithm::CountOnly);

        let mut data = [3, 1, 2];
        let outcome = exec.run(&mut data[..], |v: &i32| *v > 1).unwrap();
        assert_eq!(outcome.kept, 2);
        assert!(!outcome.mutated);
        assert_eq!(data, [3, 1, 2]);
    }

    #[test]
    fn custom_on_bytes_keeps_caller_init() {
        let raw: Vec<u8> = [1i32, 2, 3, 4].iter().flat_map(|v| v.to_ne_bytes()).collect();
        let source = ErasedSource {
            bytes: &raw,
            stride: 4,
            kind: ElementType::I32,
        };
        let mut acc = 1i32.to_ne_bytes();
        let mut product = |acc: &mut [u8], elem: &[u8]| {
            let a = i32::from_ne_bytes([acc[0], acc[1], acc[2], acc[3]]);
            let e = i32::from_ne_bytes([elem[0], elem[1], elem[2], elem[3]]);
            acc.copy_from_slice(&(a * e).to_ne_bytes());
        };
        let outcome = ReduceExecutor::new(ExecutionMode::Auto, 2)
            .erased(ReduceOp::Custom, source, 4, &mut acc, Some(&mut product))
            .unwrap();
        assert_eq!(outcome.folded, 4);
        assert_eq!(i32::from_ne_bytes(acc), 24);
    }

    #[test]
    fn numeric_rejects_non_numeric_ops() {
        let err = ReduceExecutor::default()
            .numeric(ReduceOp::Any, &[1u8, 2])
            .unwrap_err();
        assert!(matches!(err, LanefoldError::InapplicableOperation { .. }));
    }
}
