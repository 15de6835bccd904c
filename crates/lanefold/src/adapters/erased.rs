//! Erased adapter for runtime-typed byte buffers.
//!
//! ## Purpose
//!
//! This module provides the type-erased execution adapter. Callers hand it a
//! byte buffer, an element count and an element type chosen at runtime; the
//! stride comes from the filter or reduce type registry. Predicates and
//! reducers see each element as a `&[u8]` of one stride.
//!
//! ## Design notes
//!
//! * **Registry-checked**: The element type is validated against the engine's
//!   own registry at `build()`, so `char` builds a filter but not a reduction.
//! * **Deferred errors**: An unknown type identifier is stored and reported at
//!   `build()`, like duplicate parameters.
//! * **Caller-owned accumulator**: Erased reductions write their result into the
//!   caller's accumulator bytes in native byte order.
//!
//! ## Key concepts
//!
//! * **Stride**: Fixed per built adapter; never re-derived during a call.
//! * **Accumulator width**: One stride, or `size_of::<usize>()` for `count`.
//!
//! ## Invariants
//!
//! * Bytes past `count * stride` are never read or written.
//!
//! ## Non-goals
//!
//! * This adapter does not check that the bytes are valid values of the type.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::ToString;

// Internal dependencies
use crate::algorithms::compaction::FilterAlgorithm;
use crate::algorithms::folding::{ErasedSource, ReduceOp};
use crate::engine::executor::{ErasedReducer, FilterExecutor, ReduceExecutor};
use crate::engine::output::{FilterOutcome, ReduceOutcome};
use crate::engine::validator::Validator;
use crate::primitives::buffer::StridedBytes;
use crate::primitives::errors::LanefoldError;
use crate::primitives::lanes::ExecutionMode;
use crate::primitives::registry::{ElementType, FILTER_TYPES, REDUCE_TYPES};

// ============================================================================
// Element Type Selection
// ============================================================================

/// Parse a type identifier, turning an unknown one into a deferred error.
fn parse_type_id(id: &str) -> Result<ElementType, LanefoldError> {
    ElementType::from_id(id).ok_or_else(|| LanefoldError::UnsupportedType(id.to_string()))
}

fn require_element_type(kind: Option<ElementType>) -> Result<ElementType, LanefoldError> {
    kind.ok_or_else(|| LanefoldError::InvalidInput("element type is required".to_string()))
}

// ============================================================================
// Erased Filter
// ============================================================================

/// Builder for a type-erased filter.
#[derive(Debug, Clone)]
pub struct ErasedFilterBuilder {
    /// Filter algorithm
    pub algorithm: FilterAlgorithm,

    /// Execution mode
    pub mode: ExecutionMode,

    /// Requested lane count
    pub lanes: usize,

    /// Element type (required)
    pub element_type: Option<ElementType>,

    /// Error encountered while configuring, reported at `build()`
    pub(crate) deferred_error: Option<LanefoldError>,

    /// Tracks if any parameter was set multiple times (for validation)
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl Default for ErasedFilterBuilder {
    fn default() -> Self {
        Self {
            algorithm: FilterAlgorithm::default(),
            mode: ExecutionMode::default(),
            lanes: 1,
            element_type: None,
            deferred_error: None,
            duplicate_param: None,
        }
    }
}

impl ErasedFilterBuilder {
    /// Set the element type.
    pub fn element_type(mut self, kind: ElementType) -> Self {
        if self.element_type.is_some() {
            self.duplicate_param = Some("element_type");
        }
        self.element_type = Some(kind);
        self
    }

    /// Set the element type from its identifier (e.g. `"i32"`).
    pub fn type_id(self, id: &str) -> Self {
        match parse_type_id(id) {
            Ok(kind) => self.element_type(kind),
            Err(err) => Self {
                deferred_error: Some(err),
                ..self
            },
        }
    }

    /// Build the erased filter.
    pub fn build(self) -> Result<ErasedFilter, LanefoldError> {
        if let Some(err) = self.deferred_error {
            return Err(err);
        }

        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let kind = require_element_type(self.element_type)?;
        let stride = Validator::validate_element_type(&FILTER_TYPES, kind)?;

        Ok(ErasedFilter {
            executor: FilterExecutor::new(self.algorithm, self.mode, self.lanes),
            kind,
            stride,
        })
    }
}

/// Type-erased filter ready to run.
#[derive(Debug, Clone, Copy)]
pub struct ErasedFilter {
    executor: FilterExecutor,
    kind: ElementType,
    stride: usize,
}

impl ErasedFilter {
    /// Element type this filter was built for.
    pub fn element_type(&self) -> ElementType {
        self.kind
    }

    /// Element stride in bytes.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Filter `count` elements stored in `bytes`.
    pub fn run<P>(
        &self,
        bytes: &mut [u8],
        count: usize,
        predicate: P,
    ) -> Result<FilterOutcome, LanefoldError>
    where
        P: FnMut(&[u8]) -> bool,
    {
        let mut view = StridedBytes::new(bytes, count, self.stride)?;
        self.executor.run(&mut view, predicate)
    }
}

// ============================================================================
// Erased Reduce
// ============================================================================

/// Builder for a type-erased reduction.
#[derive(Debug, Clone)]
pub struct ErasedReduceBuilder {
    /// Reduce operation (defaults to `sum`)
    pub operation: Option<ReduceOp>,

    /// Execution mode
    pub mode: ExecutionMode,

    /// Requested lane count
    pub lanes: usize,

    /// Element type (required)
    pub element_type: Option<ElementType>,

    /// Error encountered while configuring, reported at `build()`
    pub(crate) deferred_error: Option<LanefoldError>,

    /// Tracks if any parameter was set multiple times (for validation)
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl Default for ErasedReduceBuilder {
    fn default() -> Self {
        Self {
            operation: None,
            mode: ExecutionMode::default(),
            lanes: 1,
            element_type: None,
            deferred_error: None,
            duplicate_param: None,
        }
    }
}

impl ErasedReduceBuilder {
    /// Set the element type.
    pub fn element_type(mut self, kind: ElementType) -> Self {
        if self.element_type.is_some() {
            self.duplicate_param = Some("element_type");
        }
        self.element_type = Some(kind);
        self
    }

    /// Set the element type from its identifier (e.g. `"f64"`).
    pub fn type_id(self, id: &str) -> Self {
        match parse_type_id(id) {
            Ok(kind) => self.element_type(kind),
            Err(err) => Self {
                deferred_error: Some(err),
                ..self
            },
        }
    }

    /// Set the reduce operation.
    pub fn operation(mut self, op: ReduceOp) -> Self {
        if self.operation.is_some() {
            self.duplicate_param = Some("operation");
        }
        self.operation = Some(op);
        self
    }

    /// Build the erased reduction.
    pub fn build(self) -> Result<ErasedReduce, LanefoldError> {
        if let Some(err) = self.deferred_error {
            return Err(err);
        }

        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let kind = require_element_type(self.element_type)?;
        let stride = Validator::validate_element_type(&REDUCE_TYPES, kind)?;

        Ok(ErasedReduce {
            executor: ReduceExecutor::new(self.mode, self.lanes),
            operation: self.operation.unwrap_or_default(),
            kind,
            stride,
        })
    }
}

/// Type-erased reduction ready to run.
#[derive(Debug, Clone, Copy)]
pub struct ErasedReduce {
    executor: ReduceExecutor,
    operation: ReduceOp,
    kind: ElementType,
    stride: usize,
}

impl ErasedReduce {
    /// Operation this reduction runs.
    pub fn operation(&self) -> ReduceOp {
        self.operation
    }

    /// Element stride in bytes.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Bytes the accumulator must provide.
    pub fn accumulator_size(&self) -> usize {
        self.operation.accumulator_size(self.stride)
    }

    /// Fold `count` elements stored in `bytes` into `accumulator`.
    ///
    /// Built-in operations initialize the accumulator; `custom` starts from
    /// whatever the caller stored there.
    pub fn fold(
        &self,
        bytes: &[u8],
        count: usize,
        accumulator: &mut [u8],
        reducer: Option<ErasedReducer<'_>>,
    ) -> Result<ReduceOutcome<()>, LanefoldError> {
        let source = ErasedSource {
            bytes,
            stride: self.stride,
            kind: self.kind,
        };
        self.executor
            .erased(self.operation, source, count, accumulator, reducer)
    }
}
