//! String-keyed entry points returning status codes.
//!
//! ## Purpose
//!
//! This module exposes the filter and reduce engines through flat functions
//! keyed by type, algorithm, operation and mode tokens. Every argument a
//! foreign caller could pass as null is an `Option`, and every outcome is an
//! integer status code. The C ABI in `bindings/c` is a thin pointer-to-slice
//! layer over these functions.
//!
//! ## Design notes
//!
//! * **Ordered checks**: Missing arguments are reported before type problems,
//!   and type problems before selector problems (see the tables below).
//! * **Typed core**: Tokens are parsed here and handed to the erased adapter;
//!   nothing below this module sees a string.
//! * **Silent by default**: Rejections emit a `tracing` debug event and nothing else.
//!
//! ## Key concepts
//!
//! ### Filter checks
//!
//! | Order | Condition                            | Status |
//! |-------|--------------------------------------|--------|
//! | 1     | missing buffer or predicate          | -1     |
//! | 2     | missing, unknown or `null` type      | -2     |
//! | 3     | unknown mode token                   | -3     |
//! | 4     | unknown algorithm token              | -3     |
//! | 5     | buffer shorter than `count * stride` | -1     |
//! | 6     | staging allocation failed            | -4     |
//!
//! A missing algorithm or mode token means `auto`. The algorithm token is
//! checked after resolution, so under `dry-run` it is never parsed and the
//! call counts matches with status 0 whatever the token says.
//!
//! ### Reduce checks
//!
//! | Order | Condition                                       | Status |
//! |-------|-------------------------------------------------|--------|
//! | 1     | missing buffer, accumulator, type or operation  | -1     |
//! | 2     | unknown or `null` type                          | -2     |
//! | 3     | unknown operation or mode token                 | -3     |
//! | 4     | `custom` without a reducer                      | -1     |
//! | 5     | operation not defined for the type              | -3     |
//! | 6     | accumulator or buffer too small                 | -1     |
//!
//! Reduction never mutates, so a known mode token has no effect on the
//! result. An unknown one is still rejected with -3 rather than ignored,
//! keeping token validation the same for both engines.
//!
//! ## Invariants
//!
//! * `out_count` is written only on success.
//! * A non-zero status implies the buffer was not modified.

// External dependencies
use tracing::debug;

// Internal dependencies
use crate::api::{Erased, FilterBuilder, ReduceBuilder};
use crate::algorithms::compaction::FilterAlgorithm;
use crate::algorithms::folding::ReduceOp;
use crate::engine::executor::ErasedReducer;
use crate::engine::validator::Validator;
use crate::primitives::errors::{LanefoldError, STATUS_OK};
use crate::primitives::lanes::ExecutionMode;
use crate::primitives::registry::{FILTER_TYPES, REDUCE_TYPES};

/// Predicate over one erased element.
pub type ErasedPredicate<'p> = &'p mut dyn FnMut(&[u8]) -> bool;

// ============================================================================
// Filter
// ============================================================================

/// Filter `count` elements of `type_id` stored in `bytes`.
///
/// On success writes the kept count (or match count, or existence flag) to
/// `out_count` when given and returns `0`.
#[allow(clippy::too_many_arguments)]
pub fn filter_exec(
    bytes: Option<&mut [u8]>,
    count: usize,
    type_id: Option<&str>,
    algorithm_id: Option<&str>,
    mode_id: Option<&str>,
    lanes: usize,
    predicate: Option<ErasedPredicate<'_>>,
    out_count: Option<&mut usize>,
) -> i32 {
    let result = try_filter(
        bytes,
        count,
        type_id,
        algorithm_id,
        mode_id,
        lanes,
        predicate,
    );

    match result {
        Ok(kept) => {
            if let Some(out) = out_count {
                *out = kept;
            }
            STATUS_OK
        }
        Err(err) => reject("filter", &err),
    }
}

fn try_filter(
    bytes: Option<&mut [u8]>,
    count: usize,
    type_id: Option<&str>,
    algorithm_id: Option<&str>,
    mode_id: Option<&str>,
    lanes: usize,
    predicate: Option<ErasedPredicate<'_>>,
) -> Result<usize, LanefoldError> {
    let (Some(bytes), Some(predicate)) = (bytes, predicate) else {
        return Err(LanefoldError::InvalidInput(
            "buffer and predicate are required".into(),
        ));
    };

    let (kind, _) = Validator::validate_type_id(&FILTER_TYPES, type_id)?;
    let mode = mode_id.map_or(Ok(ExecutionMode::Auto), str::parse::<ExecutionMode>)?;
    let algorithm = match mode {
        ExecutionMode::DryRun => FilterAlgorithm::CountOnly,
        _ => algorithm_id.map_or(Ok(FilterAlgorithm::Auto), str::parse::<FilterAlgorithm>)?,
    };

    let filter = FilterBuilder::new()
        .algorithm(algorithm)
        .mode(mode)
        .lanes(lanes)
        .adapter(Erased)
        .element_type(kind)
        .build()?;

    Ok(filter.run(bytes, count, predicate)?.kept)
}

// ============================================================================
// Reduce
// ============================================================================

/// Fold `count` elements of `type_id` stored in `bytes` into `accumulator`.
///
/// `reducer` is required for `custom` and ignored otherwise.
#[allow(clippy::too_many_arguments)]
pub fn reduce_exec(
    bytes: Option<&[u8]>,
    count: usize,
    type_id: Option<&str>,
    op_id: Option<&str>,
    mode_id: Option<&str>,
    lanes: usize,
    accumulator: Option<&mut [u8]>,
    reducer: Option<ErasedReducer<'_>>,
) -> i32 {
    let result = try_reduce(
        bytes,
        count,
        type_id,
        op_id,
        mode_id,
        lanes,
        accumulator,
        reducer,
    );

    match result {
        Ok(()) => STATUS_OK,
        Err(err) => reject("reduce", &err),
    }
}

#[allow(clippy::too_many_arguments)]
fn try_reduce(
    bytes: Option<&[u8]>,
    count: usize,
    type_id: Option<&str>,
    op_id: Option<&str>,
    mode_id: Option<&str>,
    lanes: usize,
    accumulator: Option<&mut [u8]>,
    reducer: Option<ErasedReducer<'_>>,
) -> Result<(), LanefoldError> {
    let (Some(bytes), Some(accumulator), Some(type_id), Some(op_id)) =
        (bytes, accumulator, type_id, op_id)
    else {
        return Err(LanefoldError::InvalidInput(
            "buffer, accumulator, type and operation are required".into(),
        ));
    };

    let (kind, _) = Validator::validate_type_id(&REDUCE_TYPES, Some(type_id))?;
    let op = op_id.parse::<ReduceOp>()?;
    let mode = mode_id.map_or(Ok(ExecutionMode::Auto), str::parse::<ExecutionMode>)?;

    let reduce = ReduceBuilder::new()
        .mode(mode)
        .lanes(lanes)
        .adapter(Erased)
        .element_type(kind)
        .operation(op)
        .build()?;

    reduce.fold(bytes, count, accumulator, reducer)?;
    Ok(())
}

fn reject(engine: &'static str, err: &LanefoldError) -> i32 {
    let status = err.status();
    debug!(engine, status, error = %err, "call rejected");
    status
}

// ============================================================================
// Type Registry Queries
// ============================================================================

/// Stride of `type_id` in the filter registry, or 0.
pub fn filter_type_sizeof(type_id: Option<&str>) -> usize {
    FILTER_TYPES.size_of(type_id)
}

/// Whether `type_id` is executable by the filter engine.
pub fn filter_type_supported(type_id: Option<&str>) -> bool {
    FILTER_TYPES.is_supported(type_id)
}

/// Stride of `type_id` in the reduce registry, or 0.
pub fn reduce_type_sizeof(type_id: Option<&str>) -> usize {
    REDUCE_TYPES.size_of(type_id)
}

/// Whether `type_id` is executable by the reduce engine.
pub fn reduce_type_supported(type_id: Option<&str>) -> bool {
    REDUCE_TYPES.is_supported(type_id)
}
