#![cfg(feature = "dev")]
//! Tests for the filter and reduce executors.
//!
//! These tests verify the dispatch layer for:
//! - `auto` and `dry-run` resolution
//! - Outcome metadata (resolved algorithm, effective lanes, mutation flag)
//! - Reduce results across lane counts
//! - Erased reduce validation order
//!
//! ## Test Organization
//!
//! 1. **Filter Resolution** - policy table
//! 2. **Filter Outcomes** - metadata for each algorithm
//! 3. **Reduce Execution** - typed and erased

use approx::assert_relative_eq;

use lanefold::internals::algorithms::compaction::FilterAlgorithm;
use lanefold::internals::algorithms::folding::{ErasedSource, ReduceOp};
use lanefold::internals::engine::executor::{FilterExecutor, ReduceExecutor};
use lanefold::internals::primitives::errors::LanefoldError;
use lanefold::internals::primitives::lanes::ExecutionMode;
use lanefold::internals::primitives::registry::ElementType;

// ============================================================================
// Filter Resolution Tests
// ============================================================================

/// Test the auto policy for every mode.
#[test]
fn test_auto_resolution_table() {
    let cases = [
        (ExecutionMode::Auto, 1, FilterAlgorithm::InPlace),
        (ExecutionMode::Auto, 2, FilterAlgorithm::LaneCompact),
        (ExecutionMode::Lane, 0, FilterAlgorithm::LaneCompact),
        (ExecutionMode::Deterministic, 1, FilterAlgorithm::InPlace),
        (ExecutionMode::Deterministic, 8, FilterAlgorithm::LaneCompact),
        (ExecutionMode::DryRun, 8, FilterAlgorithm::CountOnly),
    ];

    for (mode, lanes, expected) in cases {
        let exec = FilterExecutor::new(FilterAlgorithm::Auto, mode, lanes);
        assert_eq!(exec.resolve(), expected, "mode={mode} lanes={lanes}");
    }
}

/// Test explicit algorithms run as requested unless dry-run.
#[test]
fn test_explicit_algorithm_kept() {
    let exec = FilterExecutor::new(FilterAlgorithm::Stable, ExecutionMode::Lane, 4);
    assert_eq!(exec.resolve(), FilterAlgorithm::Stable);

    let exec = FilterExecutor::new(FilterAlgorithm::Stable, ExecutionMode::DryRun, 4);
    assert_eq!(exec.resolve(), FilterAlgorithm::CountOnly);
}

// ============================================================================
// Filter Outcome Tests
// ============================================================================

/// Test outcome metadata for a lane compaction.
#[test]
fn test_lane_outcome_metadata() {
    let mut data = [1u8, 2, 3, 4, 5, 6, 7];
    let exec = FilterExecutor::new(FilterAlgorithm::Auto, ExecutionMode::Auto, 3);
    let outcome = exec.run(&mut data[..], |v: &u8| *v > 2).unwrap();

    assert_eq!(outcome.kept, 5);
    assert_eq!(outcome.requested, 7);
    assert_eq!(outcome.rejected(), 2);
    assert_eq!(outcome.algorithm, FilterAlgorithm::LaneCompact);
    assert_eq!(outcome.lanes, 3);
    assert!(outcome.mutated);
    assert_eq!(&data[..5], &[3, 4, 5, 6, 7]);
}

/// Test lanes are clamped to the element count.
#[test]
fn test_lanes_clamped_in_outcome() {
    let mut data = [1, 2];
    let exec = FilterExecutor::new(FilterAlgorithm::LaneStable, ExecutionMode::Auto, 16);
    let outcome = exec.run(&mut data[..], |_: &i32| true).unwrap();

    assert_eq!(outcome.lanes, 2);
}

/// Test read-only algorithms report no mutation.
#[test]
fn test_read_only_outcomes() {
    for algorithm in [FilterAlgorithm::CountOnly, FilterAlgorithm::First, FilterAlgorithm::Last] {
        let mut data = [9, 8, 7];
        let exec = FilterExecutor::new(algorithm, ExecutionMode::Auto, 1);
        let outcome = exec.run(&mut data[..], |v: &i32| *v == 8).unwrap();

        assert_eq!(outcome.kept, 1);
        assert!(!outcome.mutated);
        assert_eq!(data, [9, 8, 7]);
    }
}

/// Test outcome display names the resolved algorithm.
#[test]
fn test_outcome_display() {
    let mut data = [1, 2, 3];
    let outcome = FilterExecutor::default()
        .run(&mut data[..], |v: &i32| *v > 1)
        .unwrap();
    let text = outcome.to_string();

    assert!(text.contains("inplace"));
    assert!(text.contains("Kept:      2"));
}

// ============================================================================
// Reduce Execution Tests
// ============================================================================

/// Test integer sum is independent of the lane count.
#[test]
fn test_sum_lane_invariant() {
    for lanes in [0, 1, 2, 5, 9] {
        let outcome = ReduceExecutor::new(ExecutionMode::Auto, lanes)
            .numeric(ReduceOp::Sum, &[1i32, 2, 3, 4, 5])
            .unwrap();

        assert_eq!(outcome.value, 15, "lanes={lanes}");
        assert_eq!(outcome.folded, 5);
    }
}

/// Test float min and unsigned max.
#[test]
fn test_min_max_values() {
    let exec = ReduceExecutor::default();
    let min = exec.numeric(ReduceOp::Min, &[2.5f64, 1.1, 3.3, 0.9]).unwrap();
    let max = exec.numeric(ReduceOp::Max, &[4u8, 2, 5, 1, 3]).unwrap();

    assert_relative_eq!(min.value, 0.9);
    assert_eq!(max.value, 5);
}

/// Test empty inputs return identities.
#[test]
fn test_empty_reduce_identities() {
    let exec = ReduceExecutor::new(ExecutionMode::Lane, 4);

    assert_eq!(exec.numeric::<i8>(ReduceOp::Min, &[]).unwrap().value, i8::MAX);
    assert_eq!(exec.numeric::<f64>(ReduceOp::Max, &[]).unwrap().value, f64::MIN);
    assert!(!exec.logical(ReduceOp::Any, &[]).unwrap().value);
    assert!(exec.logical(ReduceOp::All, &[]).unwrap().value);
    assert_eq!(exec.count::<u8>(&[]).value, 0);
    assert_eq!(exec.count::<u8>(&[]).lanes, 0);
}

/// Test dry-run has no effect on reductions.
#[test]
fn test_dry_run_reduce_matches_auto() {
    let data = [3i64, -7, 11];
    let auto = ReduceExecutor::new(ExecutionMode::Auto, 1).numeric(ReduceOp::Sum, &data);
    let dry = ReduceExecutor::new(ExecutionMode::DryRun, 1).numeric(ReduceOp::Sum, &data);

    assert_eq!(auto.unwrap().value, dry.unwrap().value);
}

/// Test erased reduce checks the reducer before applicability.
#[test]
fn test_erased_validation_order() {
    let bytes = [1u8, 0, 1];
    let src = ErasedSource {
        bytes: &bytes,
        stride: 1,
        kind: ElementType::Bool,
    };
    let exec = ReduceExecutor::default();

    let mut acc = [0u8; 1];
    let err = exec.erased(ReduceOp::Custom, src, 3, &mut acc, None).unwrap_err();
    assert_eq!(err, LanefoldError::MissingReducer);

    let err = exec.erased(ReduceOp::Sum, src, 3, &mut acc, None).unwrap_err();
    assert!(matches!(err, LanefoldError::InapplicableOperation { .. }));

    let err = exec.erased(ReduceOp::Count, src, 3, &mut acc, None).unwrap_err();
    assert!(matches!(err, LanefoldError::AccumulatorTooSmall { got: 1, .. }));

    let err = exec.erased(ReduceOp::Any, src, 4, &mut acc, None).unwrap_err();
    assert!(matches!(err, LanefoldError::InvalidInput(_)));
    assert_eq!(acc, [0]);
}
