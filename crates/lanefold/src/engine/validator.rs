//! Input validation for filter and reduce calls.
//!
//! ## Purpose
//!
//! This module provides the validation functions shared by the builders, the
//! executors and the status-code boundary. It checks type identifiers against
//! the right registry, operation/type compatibility, and buffer and
//! accumulator sizes.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Ordered**: Callers invoke the checks in the documented status order, so
//!   the first failing check decides the reported code.
//! * **Pure**: No check touches the caller's buffers.
//!
//! ## Key concepts
//!
//! * **Registry check**: Identifiers resolve to a kind and a non-zero stride.
//! * **Applicability**: `sum`/`min`/`max` need numeric kinds, `any`/`all` need `bool`.
//! * **Sizing**: Accumulators must hold one result; buffers must hold `count` elements.
//!
//! ## Invariants
//!
//! * A successful check implies the corresponding algorithm cannot index out of bounds.
//!
//! ## Non-goals
//!
//! * This module does not verify that buffer bytes are valid values of the type.
//! * This module does not parse selector tokens (see `FromStr` on each selector).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;

// Internal dependencies
use crate::algorithms::folding::ReduceOp;
use crate::primitives::buffer::required_bytes;
use crate::primitives::errors::LanefoldError;
use crate::primitives::registry::{ElementType, TypeRegistry};

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for filter and reduce calls.
///
/// Provides static methods that return `Result<_, LanefoldError>` and fail
/// fast upon identifying the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Types
    // ========================================================================

    /// Resolve a type identifier against `registry`.
    pub fn validate_type_id(
        registry: &TypeRegistry,
        type_id: Option<&str>,
    ) -> Result<(ElementType, usize), LanefoldError> {
        registry.resolve(type_id)
    }

    /// Check that `kind` is executable under `registry`; returns its stride.
    pub fn validate_element_type(
        registry: &TypeRegistry,
        kind: ElementType,
    ) -> Result<usize, LanefoldError> {
        if !registry.contains(kind) {
            return Err(LanefoldError::UnsupportedType(kind.id().into()));
        }
        Ok(kind.size())
    }

    // ========================================================================
    // Reduce Checks
    // ========================================================================

    /// `custom` requires a reducer.
    pub fn validate_reducer(op: ReduceOp, has_reducer: bool) -> Result<(), LanefoldError> {
        if op == ReduceOp::Custom && !has_reducer {
            return Err(LanefoldError::MissingReducer);
        }
        Ok(())
    }

    /// Check that a built-in operation is defined for `kind`.
    pub fn validate_operation(op: ReduceOp, kind: ElementType) -> Result<(), LanefoldError> {
        if !op.applies_to(kind) {
            return Err(LanefoldError::InapplicableOperation {
                operation: op.name(),
                element: kind.id(),
            });
        }
        Ok(())
    }

    /// Check the accumulator width for `op` over elements of `stride` bytes.
    pub fn validate_accumulator(
        op: ReduceOp,
        stride: usize,
        accumulator_len: usize,
    ) -> Result<(), LanefoldError> {
        let expected = op.accumulator_size(stride);
        if accumulator_len < expected {
            return Err(LanefoldError::AccumulatorTooSmall {
                got: accumulator_len,
                expected,
            });
        }
        Ok(())
    }

    // ========================================================================
    // Buffers
    // ========================================================================

    /// Check that `len` bytes cover `count` elements of `stride` bytes.
    pub fn validate_buffer(len: usize, count: usize, stride: usize) -> Result<(), LanefoldError> {
        let needed = required_bytes(count, stride)?;
        if len < needed {
            return Err(LanefoldError::InvalidInput(format!(
                "buffer holds {len} bytes, {count} elements of stride {stride} need {needed}"
            )));
        }
        Ok(())
    }

    // ========================================================================
    // Builders
    // ========================================================================

    /// Validate that no parameter was set multiple times.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), LanefoldError> {
        if let Some(param) = duplicate_param {
            return Err(LanefoldError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::registry::{FILTER_TYPES, REDUCE_TYPES};

    #[test]
    fn reduce_registry_rejects_text_kinds() {
        assert!(Validator::validate_element_type(&FILTER_TYPES, ElementType::Char).is_ok());
        assert_eq!(
            Validator::validate_element_type(&REDUCE_TYPES, ElementType::Char),
            Err(LanefoldError::UnsupportedType("char".into()))
        );
    }

    #[test]
    fn count_needs_a_usize_accumulator() {
        assert!(Validator::validate_accumulator(ReduceOp::Sum, 1, 1).is_ok());
        assert_eq!(
            Validator::validate_accumulator(ReduceOp::Count, 1, 1),
            Err(LanefoldError::AccumulatorTooSmall {
                got: 1,
                expected: core::mem::size_of::<usize>()
            })
        );
    }

    #[test]
    fn custom_without_reducer_is_rejected() {
        assert_eq!(
            Validator::validate_reducer(ReduceOp::Custom, false),
            Err(LanefoldError::MissingReducer)
        );
        assert!(Validator::validate_reducer(ReduceOp::Sum, false).is_ok());
    }
}
