//! High-level API for filter and reduce calls.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry points. It implements a
//! fluent builder pattern for the selectors shared by every adapter
//! (algorithm, mode, lanes) and the transition to a Slice or Erased adapter.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builders with sensible defaults for all parameters.
//! * **Polymorphic**: Marker types select the specialized adapter builder.
//! * **Validated**: Parameters are validated when `.build()` is called on the adapter.
//!
//! ## Key concepts
//!
//! ### Configuration Flow
//!
//! 1. Create a [`FilterBuilder`] via `Filter::new()` (or [`ReduceBuilder`] via `Reduce::new()`).
//! 2. Chain configuration methods (`.algorithm()`, `.mode()`, `.lanes()`).
//! 3. Select an adapter via `.adapter(Adapter::Slice)` to get an execution builder.
//! 4. Call `.build()?` and run the result.

// Internal dependencies
use crate::adapters::erased::{ErasedFilterBuilder, ErasedReduceBuilder};
use crate::adapters::slice::{SliceFilterBuilder, SliceReduceBuilder};

// Publicly re-exported types
pub use crate::adapters::erased::{ErasedFilter, ErasedReduce};
pub use crate::adapters::slice::{SliceFilter, SliceReduce};
pub use crate::algorithms::compaction::FilterAlgorithm;
pub use crate::algorithms::folding::{Numeric, ReduceOp};
pub use crate::engine::executor::ErasedReducer;
pub use crate::engine::output::{FilterOutcome, ReduceOutcome};
pub use crate::primitives::errors::LanefoldError;
pub use crate::primitives::lanes::ExecutionMode;
pub use crate::primitives::registry::ElementType;

/// Marker types for selecting execution adapters.
#[allow(non_snake_case)]
pub mod Adapter {
    pub use super::{Erased, Slice};
}

// ============================================================================
// Filter Builder
// ============================================================================

/// Fluent builder for configuring a filter.
#[derive(Debug, Clone, Default)]
pub struct FilterBuilder {
    /// Filter algorithm (default: `auto`).
    pub algorithm: Option<FilterAlgorithm>,

    /// Execution mode (default: `auto`).
    pub mode: Option<ExecutionMode>,

    /// Requested lane count (default: 1).
    pub lanes: Option<usize>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl FilterBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select an execution adapter to transition to an execution builder.
    pub fn adapter<A>(self, _adapter: A) -> A::Output
    where
        A: FilterAdapter,
    {
        A::convert(self)
    }

    /// Set the filter algorithm.
    pub fn algorithm(mut self, algorithm: FilterAlgorithm) -> Self {
        if self.algorithm.is_some() {
            self.duplicate_param = Some("algorithm");
        }
        self.algorithm = Some(algorithm);
        self
    }

    /// Set the execution mode.
    pub fn mode(mut self, mode: ExecutionMode) -> Self {
        if self.mode.is_some() {
            self.duplicate_param = Some("mode");
        }
        self.mode = Some(mode);
        self
    }

    /// Set the requested lane count (0 is treated as 1).
    pub fn lanes(mut self, lanes: usize) -> Self {
        if self.lanes.is_some() {
            self.duplicate_param = Some("lanes");
        }
        self.lanes = Some(lanes);
        self
    }
}

/// Trait for transitioning from a [`FilterBuilder`] to an execution builder.
pub trait FilterAdapter {
    /// The output execution builder.
    type Output;

    /// Convert a generic [`FilterBuilder`] into a specialized execution builder.
    fn convert(builder: FilterBuilder) -> Self::Output;
}

// ============================================================================
// Reduce Builder
// ============================================================================

/// Fluent builder for configuring a reduction.
#[derive(Debug, Clone, Default)]
pub struct ReduceBuilder {
    /// Execution mode (default: `auto`).
    pub mode: Option<ExecutionMode>,

    /// Requested lane count (default: 1).
    pub lanes: Option<usize>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl ReduceBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select an execution adapter to transition to an execution builder.
    pub fn adapter<A>(self, _adapter: A) -> A::Output
    where
        A: ReduceAdapter,
    {
        A::convert(self)
    }

    /// Set the execution mode.
    pub fn mode(mut self, mode: ExecutionMode) -> Self {
        if self.mode.is_some() {
            self.duplicate_param = Some("mode");
        }
        self.mode = Some(mode);
        self
    }

    /// Set the requested lane count (0 is treated as 1).
    pub fn lanes(mut self, lanes: usize) -> Self {
        if self.lanes.is_some() {
            self.duplicate_param = Some("lanes");
        }
        self.lanes = Some(lanes);
        self
    }
}

/// Trait for transitioning from a [`ReduceBuilder`] to an execution builder.
pub trait ReduceAdapter {
    /// The output execution builder.
    type Output;

    /// Convert a generic [`ReduceBuilder`] into a specialized execution builder.
    fn convert(builder: ReduceBuilder) -> Self::Output;
}

// ============================================================================
// Adapter Markers
// ============================================================================

/// Marker for typed slice execution.
#[derive(Debug, Clone, Copy)]
pub struct Slice;

impl FilterAdapter for Slice {
    type Output = SliceFilterBuilder;

    fn convert(builder: FilterBuilder) -> Self::Output {
        let mut result = SliceFilterBuilder::default();

        if let Some(algorithm) = builder.algorithm {
            result.algorithm = algorithm;
        }
        if let Some(mode) = builder.mode {
            result.mode = mode;
        }
        if let Some(lanes) = builder.lanes {
            result.lanes = lanes;
        }
        result.duplicate_param = builder.duplicate_param;

        result
    }
}

impl ReduceAdapter for Slice {
    type Output = SliceReduceBuilder;

    fn convert(builder: ReduceBuilder) -> Self::Output {
        let mut result = SliceReduceBuilder::default();

        if let Some(mode) = builder.mode {
            result.mode = mode;
        }
        if let Some(lanes) = builder.lanes {
            result.lanes = lanes;
        }
        result.duplicate_param = builder.duplicate_param;

        result
    }
}

/// Marker for type-erased byte buffer execution.
#[derive(Debug, Clone, Copy)]
pub struct Erased;

impl FilterAdapter for Erased {
    type Output = ErasedFilterBuilder;

    fn convert(builder: FilterBuilder) -> Self::Output {
        let mut result = ErasedFilterBuilder::default();

        if let Some(algorithm) = builder.algorithm {
            result.algorithm = algorithm;
        }
        if let Some(mode) = builder.mode {
            result.mode = mode;
        }
        if let Some(lanes) = builder.lanes {
            result.lanes = lanes;
        }
        result.duplicate_param = builder.duplicate_param;

        result
    }
}

impl ReduceAdapter for Erased {
    type Output = ErasedReduceBuilder;

    fn convert(builder: ReduceBuilder) -> Self::Output {
        let mut result = ErasedReduceBuilder::default();

        if let Some(mode) = builder.mode {
            result.mode = mode;
        }
        if let Some(lanes) = builder.lanes {
            result.lanes = lanes;
        }
        result.duplicate_param = builder.duplicate_param;

        result
    }
}
