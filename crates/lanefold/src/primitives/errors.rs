//! Error types for filter and reduce operations.
//!
//! ## Purpose
//!
//! This module defines the error conditions that can occur while validating
//! and executing a filter or reduce call, and the integer status codes those
//! errors collapse to at the string-keyed and C boundaries.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors carry the offending token or the sizes involved.
//! * **Deferred**: Builder misuse (duplicate parameters) is stored and reported at `build()`.
//! * **No-std**: Supports `no_std` environments by using `alloc` for dynamic messages.
//! * **Trait Implementation**: Implements `Display` and `std::error::Error` (when `std` is enabled).
//!
//! ## Key concepts
//!
//! 1. **Invalid input**: Missing buffers, predicates, accumulators or reducers (`-1`).
//! 2. **Unsupported type**: Unknown type identifier or the `null` sentinel (`-2`).
//! 3. **Unsupported selector**: Unknown algorithm, operation or mode token, or an
//!    operation that does not apply to the element type (`-3`).
//! 4. **Resource exhaustion**: The staging buffer of a stable compaction could not
//!    be allocated (`-4`).
//!
//! ## Invariants
//!
//! * Every variant maps to exactly one status code.
//! * All errors are raised before the input buffer is mutated.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not provide retry or recovery strategies.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::error::Error;
#[cfg(feature = "std")]
use std::string::String;

// External dependencies
use core::fmt::{Display, Formatter, Result};

// ============================================================================
// Status Codes
// ============================================================================

/// Call completed successfully.
pub const STATUS_OK: i32 = 0;

/// A required argument was missing or malformed.
pub const STATUS_INVALID_INPUT: i32 = -1;

/// The type identifier is unknown or maps to a zero stride.
pub const STATUS_UNSUPPORTED_TYPE: i32 = -2;

/// The algorithm, operation or mode is unknown or not applicable.
pub const STATUS_UNSUPPORTED_ALGORITHM: i32 = -3;

/// Working memory for the call could not be allocated.
pub const STATUS_RESOURCE_EXHAUSTED: i32 = -4;

// ============================================================================
// Error Type
// ============================================================================

/// Error type for filter and reduce operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanefoldError {
    /// A required argument is missing or inconsistent.
    InvalidInput(String),

    /// The `custom` operation was requested without a reducer.
    MissingReducer,

    /// The type identifier is not in the registry (or is the `null` sentinel).
    UnsupportedType(String),

    /// The filter algorithm token is unknown.
    UnsupportedAlgorithm(String),

    /// The reduce operation token is unknown.
    UnsupportedOperation(String),

    /// The execution mode token is unknown.
    UnsupportedMode(String),

    /// A built-in operation is not defined for the element type.
    InapplicableOperation {
        /// Canonical operation token (e.g. "sum").
        operation: &'static str,
        /// Canonical type identifier (e.g. "bool").
        element: &'static str,
    },

    /// The caller's accumulator is narrower than the operation requires.
    AccumulatorTooSmall {
        /// Bytes provided.
        got: usize,
        /// Bytes required.
        expected: usize,
    },

    /// The staging buffer for a stable compaction could not be allocated.
    AllocationFailed {
        /// Number of bytes requested.
        bytes: usize,
    },

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },
}

impl LanefoldError {
    /// Status code reported for this error at the string-keyed and C boundaries.
    pub fn status(&self) -> i32 {
        match self {
            Self::InvalidInput(_)
            | Self::MissingReducer
            | Self::AccumulatorTooSmall { .. }
            | Self::DuplicateParameter { .. } => STATUS_INVALID_INPUT,
            Self::UnsupportedType(_) => STATUS_UNSUPPORTED_TYPE,
            Self::UnsupportedAlgorithm(_)
            | Self::UnsupportedOperation(_)
            | Self::UnsupportedMode(_)
            | Self::InapplicableOperation { .. } => STATUS_UNSUPPORTED_ALGORITHM,
            Self::AllocationFailed { .. } => STATUS_RESOURCE_EXHAUSTED,
        }
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for LanefoldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            Self::MissingReducer => {
                write!(f, "Operation 'custom' requires a reducer function")
            }
            Self::UnsupportedType(id) => write!(f, "Unsupported type identifier: '{id}'"),
            Self::UnsupportedAlgorithm(id) => write!(f, "Unsupported filter algorithm: '{id}'"),
            Self::UnsupportedOperation(id) => write!(f, "Unsupported reduce operation: '{id}'"),
            Self::UnsupportedMode(id) => write!(f, "Unsupported execution mode: '{id}'"),
            Self::InapplicableOperation { operation, element } => {
                write!(
                    f,
                    "Operation '{operation}' is not defined for elements of type '{element}'"
                )
            }
            Self::AccumulatorTooSmall { got, expected } => {
                write!(
                    f,
                    "Accumulator too small: got {got} bytes, need at least {expected}"
                )
            }
            Self::AllocationFailed { bytes } => {
                write!(f, "Failed to allocate {bytes} bytes of staging memory")
            }
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

#[cfg(feature = "std")]
impl Error for LanefoldError {}
