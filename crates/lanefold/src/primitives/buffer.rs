//! Buffer views and staging memory for filter and reduce operations.
//!
//! ## Purpose
//!
//! This module abstracts over the two ways a caller can hand a buffer to the
//! engines: a typed slice `[T]` or a type-erased byte region with a runtime
//! stride. Algorithms are written once against the [`Elements`] trait and run
//! unchanged on both.
//!
//! ## Design notes
//!
//! * **Borrowed**: Views never own the caller's memory; they live for one call.
//! * **Stride once**: A [`StridedBytes`] view fixes its stride at construction.
//! * **Fallible staging**: Staging buffers are reserved up front with
//!   `try_reserve_exact`, so an allocation failure surfaces as an error before
//!   any element is touched.
//!
//! ## Key concepts
//!
//! * **Item**: What a predicate or reducer sees (`T`, or `[u8]` of one stride).
//! * **Relocate**: Overlap-safe copy of one element to a lower index.
//! * **Staging**: Temporary ordered copy of kept elements, restored as a prefix.
//!
//! ## Invariants
//!
//! * `relocate(from, to)` is only called with `to <= from`.
//! * A staging buffer never holds more than `len()` elements.
//!
//! ## Non-goals
//!
//! * This module does not interpret element bytes.
//! * Views do not manage element lifetimes; elements are moved as plain bytes.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{format, vec::Vec};
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::mem::size_of;

// Internal dependencies
use crate::primitives::errors::LanefoldError;

// ============================================================================
// Elements Trait
// ============================================================================

/// Indexed, homogeneous storage the engines can scan, compact and stage.
pub trait Elements {
    /// View of a single element handed to predicates and reducers.
    type Item: ?Sized;

    /// Ordered copy of kept elements.
    type Staging;

    /// Number of elements.
    fn len(&self) -> usize;

    /// Whether the storage holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow element `index`.
    fn item(&self, index: usize) -> &Self::Item;

    /// Copy element `from` over element `to`.
    fn relocate(&mut self, from: usize, to: usize);

    /// Exchange elements `a` and `b`.
    fn exchange(&mut self, a: usize, b: usize);

    /// Reserve a staging buffer able to hold every element.
    fn staging(&self) -> Result<Self::Staging, LanefoldError>;

    /// Append element `index` to `staging`.
    fn stage(&self, index: usize, staging: &mut Self::Staging);

    /// Write the staged elements back as a prefix; returns how many.
    fn restore(&mut self, staging: Self::Staging) -> usize;
}

/// Reserve `capacity` slots or report the byte size that failed.
pub fn reserve_staging<T>(capacity: usize) -> Result<Vec<T>, LanefoldError> {
    let bytes = capacity.saturating_mul(size_of::<T>());
    let mut staging = Vec::new();
    staging
        .try_reserve_exact(capacity)
        .map_err(|_| LanefoldError::AllocationFailed { bytes })?;
    Ok(staging)
}

// ============================================================================
// Typed Slices
// ============================================================================

impl<T: Copy> Elements for [T] {
    type Item = T;
    type Staging = Vec<T>;

    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn item(&self, index: usize) -> &T {
        &self[index]
    }

    #[inline]
    fn relocate(&mut self, from: usize, to: usize) {
        self[to] = self[from];
    }

    #[inline]
    fn exchange(&mut self, a: usize, b: usize) {
        self.swap(a, b);
    }

    fn staging(&self) -> Result<Vec<T>, LanefoldError> {
        reserve_staging(<[T]>::len(self))
    }

    #[inline]
    fn stage(&self, index: usize, staging: &mut Vec<T>) {
        staging.push(self[index]);
    }

    fn restore(&mut self, staging: Vec<T>) -> usize {
        let kept = staging.len();
        self[..kept].copy_from_slice(&staging);
        kept
    }
}

// ============================================================================
// Type-Erased Byte Buffers
// ============================================================================

/// Mutable byte region viewed as `count` elements of `stride` bytes.
#[derive(Debug)]
pub struct StridedBytes<'a> {
    bytes: &'a mut [u8],
    count: usize,
    stride: usize,
}

impl<'a> StridedBytes<'a> {
    /// Create a view, checking that `bytes` covers `count * stride`.
    ///
    /// Trailing bytes beyond `count * stride` are left untouched by every
    /// algorithm.
    pub fn new(bytes: &'a mut [u8], count: usize, stride: usize) -> Result<Self, LanefoldError> {
        if stride == 0 {
            return Err(LanefoldError::InvalidInput(format!(
                "stride must be non-zero (count={count})"
            )));
        }
        let needed = required_bytes(count, stride)?;
        if bytes.len() < needed {
            return Err(LanefoldError::InvalidInput(format!(
                "buffer holds {} bytes, {count} elements of stride {stride} need {needed}",
                bytes.len()
            )));
        }
        Ok(Self {
            bytes: &mut bytes[..needed],
            count,
            stride,
        })
    }

    /// Element stride in bytes.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Underlying bytes covered by the view.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes
    }

    #[inline]
    fn span(&self, index: usize) -> core::ops::Range<usize> {
        let start = index * self.stride;
        start..start + self.stride
    }
}

/// `count * stride`, or an error when the product overflows.
pub fn required_bytes(count: usize, stride: usize) -> Result<usize, LanefoldError> {
    count.checked_mul(stride).ok_or_else(|| {
        LanefoldError::InvalidInput(format!(
            "{count} elements of stride {stride} overflow the address space"
        ))
    })
}

impl Elements for StridedBytes<'_> {
    type Item = [u8];
    type Staging = Vec<u8>;

    #[inline]
    fn len(&self) -> usize {
        self.count
    }

    #[inline]
    fn item(&self, index: usize) -> &[u8] {
        &self.bytes[self.span(index)]
    }

    #[inline]
    fn relocate(&mut self, from: usize, to: usize) {
        if from != to {
            let src = self.span(from);
            self.bytes.copy_within(src, to * self.stride);
        }
    }

    fn exchange(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        let (lo, hi) = (a.min(b), a.max(b));
        let (head, tail) = self.bytes.split_at_mut(hi * self.stride);
        head[lo * self.stride..(lo + 1) * self.stride].swap_with_slice(&mut tail[..self.stride]);
    }

    fn staging(&self) -> Result<Vec<u8>, LanefoldError> {
        reserve_staging(self.bytes.len())
    }

    #[inline]
    fn stage(&self, index: usize, staging: &mut Vec<u8>) {
        staging.extend_from_slice(self.item(index));
    }

    fn restore(&mut self, staging: Vec<u8>) -> usize {
        self.bytes[..staging.len()].copy_from_slice(&staging);
        staging.len() / self.stride
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strided_view_rejects_short_buffers() {
        let mut bytes = [0u8; 7];
        let err = StridedBytes::new(&mut bytes, 2, 4).unwrap_err();
        assert!(matches!(err, LanefoldError::InvalidInput(_)));
    }

    #[test]
    fn strided_exchange_swaps_whole_elements() {
        let mut bytes = [1u8, 1, 2, 2, 3, 3];
        let mut view = StridedBytes::new(&mut bytes, 3, 2).unwrap();
        view.exchange(2, 0);
        assert_eq!(view.as_bytes(), &[3, 3, 2, 2, 1, 1]);
    }

    #[test]
    fn staging_round_trip_restores_prefix() {
        let mut data = [5u16, 6, 7, 8];
        let mut staging = data.staging().unwrap();
        data.stage(1, &mut staging);
        data.stage(3, &mut staging);
        assert_eq!(data.restore(staging), 2);
        assert_eq!(data, [6, 8, 7, 8]);
    }

    #[test]
    fn impossible_staging_reports_allocation_failure() {
        let err = reserve_staging::<u64>(usize::MAX / 4).unwrap_err();
        assert!(matches!(err, LanefoldError::AllocationFailed { .. }));
    }
}
