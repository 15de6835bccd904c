//! Reduction (folding) algorithms.
//!
//! ## Purpose
//!
//! This module implements the built-in reduce operations and the lane-ordered
//! fold loop shared by the typed and type-erased paths.
//!
//! ## Design notes
//!
//! * **Lane order**: Every fold visits lane segments left to right and folds into
//!   one shared accumulator. Built-in operations are associative and
//!   commutative, so the lane count never changes their result.
//! * **Wrapping sums**: Integer sums wrap on overflow; float sums use IEEE addition.
//! * **Finite bounds**: `min` starts from the largest finite value of the type and
//!   `max` from the smallest (e.g. `f64::MAX` / `f64::MIN`), never from infinity.
//! * **Erased access**: Byte elements are decoded with `bytemuck`, tolerating
//!   unaligned buffers.
//!
//! ## Key concepts
//!
//! | Operation | Applies to        | Identity          |
//! |-----------|-------------------|-------------------|
//! | `sum`     | integers, floats  | zero              |
//! | `min`     | integers, floats  | max finite value  |
//! | `max`     | integers, floats  | min finite value  |
//! | `count`   | any type          | `0usize`          |
//! | `any`     | `bool`            | `false`           |
//! | `all`     | `bool`            | `true`            |
//! | `custom`  | any type          | caller's value    |
//!
//! ## Non-goals
//!
//! * This module does not validate operation/type combinations (see the engine).
//! * This module does not run lanes concurrently.

// External dependencies
use bytemuck::{Pod, bytes_of, pod_read_unaligned};
use core::fmt::{Debug, Display, Formatter, Result as FmtResult};
use core::mem::size_of;
use core::str::FromStr;
use num_traits::{Bounded, WrappingAdd, Zero};
use tracing::trace;

// Internal dependencies
use crate::primitives::errors::LanefoldError;
use crate::primitives::lanes::LanePlan;
use crate::primitives::registry::ElementType;

// ============================================================================
// Operation Selector
// ============================================================================

/// Reduce operation selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReduceOp {
    /// Sum of all elements.
    #[default]
    Sum,

    /// Smallest element.
    Min,

    /// Largest element.
    Max,

    /// Number of elements.
    Count,

    /// Logical OR of boolean elements.
    Any,

    /// Logical AND of boolean elements.
    All,

    /// Caller-supplied reducer.
    Custom,
}

impl ReduceOp {
    /// Canonical operation token.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sum => "sum",
            Self::Min => "min",
            Self::Max => "max",
            Self::Count => "count",
            Self::Any => "any",
            Self::All => "all",
            Self::Custom => "custom",
        }
    }

    /// Whether the operation is defined for elements of `kind`.
    pub const fn applies_to(self, kind: ElementType) -> bool {
        match self {
            Self::Sum | Self::Min | Self::Max => kind.is_numeric(),
            Self::Any | Self::All => kind.is_bool(),
            Self::Count | Self::Custom => true,
        }
    }

    /// Accumulator width in bytes for elements of `stride` bytes.
    pub const fn accumulator_size(self, stride: usize) -> usize {
        match self {
            Self::Count => size_of::<usize>(),
            _ => stride,
        }
    }
}

impl FromStr for ReduceOp {
    type Err = LanefoldError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "sum" => Ok(Self::Sum),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            "count" => Ok(Self::Count),
            "any" => Ok(Self::Any),
            "all" => Ok(Self::All),
            "custom" => Ok(Self::Custom),
            _ => Err(LanefoldError::UnsupportedOperation(token.into())),
        }
    }
}

impl Display for ReduceOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

// ============================================================================
// Numeric Elements
// ============================================================================

/// Element types accepted by `sum`, `min` and `max`.
pub trait Numeric: Pod + PartialOrd + Bounded + Zero + Debug {
    /// Registry kind of this type.
    const KIND: ElementType;

    /// Sum step (wrapping for integers).
    fn accumulate(self, other: Self) -> Self;
}

macro_rules! impl_numeric_int {
    ($($t:ty => $kind:ident),* $(,)?) => {
        $(
            impl Numeric for $t {
                const KIND: ElementType = ElementType::$kind;

                #[inline]
                fn accumulate(self, other: Self) -> Self {
                    WrappingAdd::wrapping_add(&self, &other)
                }
            }
        )*
    };
}

macro_rules! impl_numeric_float {
    ($($t:ty => $kind:ident),* $(,)?) => {
        $(
            impl Numeric for $t {
                const KIND: ElementType = ElementType::$kind;

                #[inline]
                fn accumulate(self, other: Self) -> Self {
                    self + other
                }
            }
        )*
    };
}

impl_numeric_int!(
    i8 => I8, i16 => I16, i32 => I32, i64 => I64,
    u8 => U8, u16 => U16, u32 => U32, u64 => U64,
);
impl_numeric_float!(f32 => F32, f64 => F64);

/// Starting accumulator value of a numeric operation.
pub fn numeric_identity<T: Numeric>(op: ReduceOp) -> Option<T> {
    match op {
        ReduceOp::Sum => Some(T::zero()),
        ReduceOp::Min => Some(T::max_value()),
        ReduceOp::Max => Some(T::min_value()),
        _ => None,
    }
}

/// Fold `value` into `acc` with a numeric operation.
#[inline]
pub fn numeric_step<T: Numeric>(op: ReduceOp, acc: T, value: T) -> T {
    match op {
        ReduceOp::Sum => acc.accumulate(value),
        ReduceOp::Min if value < acc => value,
        ReduceOp::Max if value > acc => value,
        _ => acc,
    }
}

/// Starting accumulator value of a logical operation.
pub fn logical_identity(op: ReduceOp) -> Option<bool> {
    match op {
        ReduceOp::Any => Some(false),
        ReduceOp::All => Some(true),
        _ => None,
    }
}

/// Fold `value` into `acc` with a logical operation.
#[inline]
pub fn logical_step(op: ReduceOp, acc: bool, value: bool) -> bool {
    match op {
        ReduceOp::Any => acc || value,
        ReduceOp::All => acc && value,
        _ => acc,
    }
}

// ============================================================================
// Lane Fold Loop
// ============================================================================

/// Visit every index of `plan` in lane order; returns the number visited.
pub fn fold_indices<F>(plan: &LanePlan, mut visit: F) -> usize
where
    F: FnMut(usize),
{
    let mut folded = 0;
    for (lane, segment) in plan.segments().enumerate() {
        trace!(lane, start = segment.start, end = segment.end, "folding lane");
        folded += segment.len();
        segment.for_each(&mut visit);
    }
    folded
}

// ============================================================================
// Type-Erased Folds
// ============================================================================

/// Read-only strided byte source for erased folds.
#[derive(Debug, Clone, Copy)]
pub struct ErasedSource<'a> {
    /// Element bytes, at least `count * stride` long.
    pub bytes: &'a [u8],

    /// Element stride in bytes.
    pub stride: usize,

    /// Element kind.
    pub kind: ElementType,
}

impl ErasedSource<'_> {
    #[inline]
    fn element(&self, index: usize) -> &[u8] {
        let start = index * self.stride;
        &self.bytes[start..start + self.stride]
    }
}

/// Run a built-in operation over erased bytes, writing the result into `acc`.
///
/// `acc` must already be at least `op.accumulator_size(stride)` bytes wide.
/// `Custom` is not handled here.
pub fn fold_erased(
    op: ReduceOp,
    source: ErasedSource<'_>,
    plan: &LanePlan,
    acc: &mut [u8],
) -> Result<usize, LanefoldError> {
    match op {
        ReduceOp::Sum | ReduceOp::Min | ReduceOp::Max => match source.kind {
            ElementType::I8 => Ok(fold_numeric_bytes::<i8>(op, source, plan, acc)),
            ElementType::I16 => Ok(fold_numeric_bytes::<i16>(op, source, plan, acc)),
            ElementType::I32 => Ok(fold_numeric_bytes::<i32>(op, source, plan, acc)),
            ElementType::I64 => Ok(fold_numeric_bytes::<i64>(op, source, plan, acc)),
            ElementType::U8 => Ok(fold_numeric_bytes::<u8>(op, source, plan, acc)),
            ElementType::U16 => Ok(fold_numeric_bytes::<u16>(op, source, plan, acc)),
            ElementType::U32 => Ok(fold_numeric_bytes::<u32>(op, source, plan, acc)),
            ElementType::U64 => Ok(fold_numeric_bytes::<u64>(op, source, plan, acc)),
            ElementType::F32 => Ok(fold_numeric_bytes::<f32>(op, source, plan, acc)),
            ElementType::F64 => Ok(fold_numeric_bytes::<f64>(op, source, plan, acc)),
            other => Err(LanefoldError::InapplicableOperation {
                operation: op.name(),
                element: other.id(),
            }),
        },
        ReduceOp::Count => {
            let folded = fold_indices(plan, |_| {});
            acc[..size_of::<usize>()].copy_from_slice(&folded.to_ne_bytes());
            Ok(folded)
        }
        ReduceOp::Any | ReduceOp::All if source.kind.is_bool() => {
            let mut flag = logical_identity(op).unwrap_or_default();
            let folded = fold_indices(plan, |i| {
                flag = logical_step(op, flag, source.element(i)[0] != 0);
            });
            acc[0] = u8::from(flag);
            Ok(folded)
        }
        ReduceOp::Any | ReduceOp::All | ReduceOp::Custom => {
            Err(LanefoldError::InapplicableOperation {
                operation: op.name(),
                element: source.kind.id(),
            })
        }
    }
}

/// Run a caller reducer over erased bytes; `acc` keeps the caller's initial value.
pub fn fold_erased_custom<R>(
    source: ErasedSource<'_>,
    plan: &LanePlan,
    acc: &mut [u8],
    reducer: &mut R,
) -> usize
where
    R: FnMut(&mut [u8], &[u8]) + ?Sized,
{
    fold_indices(plan, |i| reducer(&mut *acc, source.element(i)))
}

fn fold_numeric_bytes<T: Numeric>(
    op: ReduceOp,
    source: ErasedSource<'_>,
    plan: &LanePlan,
    acc: &mut [u8],
) -> usize {
    let width = size_of::<T>();
    let mut value = numeric_identity::<T>(op).unwrap_or_else(T::zero);
    let folded = fold_indices(plan, |i| {
        let element: T = pod_read_unaligned(&source.element(i)[..width]);
        value = numeric_step(op, value, element);
    });
    acc[..width].copy_from_slice(bytes_of(&value));
    folded
}
