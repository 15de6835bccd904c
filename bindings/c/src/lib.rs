//! C bindings for lanefold.
//!
//! Provides the filter and reduce engines to C callers. Buffers are raw
//! pointers sized by the element type's stride; callbacks are function
//! pointers paired with an opaque user pointer. Every function returns the
//! status codes of `lanefold::exec`.

#![allow(unsafe_op_in_unsafe_fn)]

use std::ffi::{CStr, c_void};
use std::os::raw::{c_char, c_int};
use std::slice;

use lanefold::exec::{
    filter_exec, filter_type_sizeof, filter_type_supported, reduce_exec, reduce_type_sizeof,
    reduce_type_supported,
};
use lanefold::prelude::ReduceOp;

/// Status returned when `count * stride` overflows.
const STATUS_INVALID_INPUT: c_int = -1;

/// Predicate callback: returns true to keep `elem`.
pub type LanefoldPredicate =
    Option<unsafe extern "C" fn(elem: *const c_void, user: *mut c_void) -> bool>;

/// Reducer callback: folds `elem` into `acc`.
pub type LanefoldReducer =
    Option<unsafe extern "C" fn(acc: *mut c_void, elem: *const c_void, user: *mut c_void)>;

/// Borrow a C string; null stays `None`, invalid UTF-8 becomes an unknown token.
unsafe fn parse_c_str<'a>(s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        None
    } else {
        Some(CStr::from_ptr(s).to_str().unwrap_or(""))
    }
}

/// Byte length of `count` elements, or `None` on overflow.
fn span(count: usize, stride: usize) -> Option<usize> {
    count.checked_mul(stride)
}

/// Filter `count` elements at `base` in place.
///
/// # Safety
/// `base` must point to `count` elements of `type_id`. String arguments must be
/// null or NUL-terminated. `out_count` must be null or writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn lanefold_filter_exec(
    base: *mut c_void,
    count: usize,
    type_id: *const c_char,
    algorithm_id: *const c_char,
    mode_id: *const c_char,
    lanes: usize,
    predicate: LanefoldPredicate,
    user: *mut c_void,
    out_count: *mut usize,
) -> c_int {
    let type_id = parse_c_str(type_id);
    let stride = filter_type_sizeof(type_id);

    // Unknown types keep an empty view so the type error is reported in order.
    let bytes = if base.is_null() {
        None
    } else if stride == 0 {
        Some(<&mut [u8]>::default())
    } else {
        let Some(len) = span(count, stride) else {
            return STATUS_INVALID_INPUT;
        };
        Some(slice::from_raw_parts_mut(base.cast::<u8>(), len))
    };

    let mut call =
        predicate.map(|f| move |elem: &[u8]| unsafe { f(elem.as_ptr().cast(), user) });

    filter_exec(
        bytes,
        count,
        type_id,
        parse_c_str(algorithm_id),
        parse_c_str(mode_id),
        lanes,
        call.as_mut().map(|c| c as &mut dyn FnMut(&[u8]) -> bool),
        out_count.as_mut(),
    )
}

/// Fold `count` elements at `base` into `acc`.
///
/// `acc` must hold one element of `type_id`, or a `size_t` for `count`.
///
/// # Safety
/// `base` must point to `count` elements of `type_id` and `acc` to a writable
/// accumulator of the size above. String arguments must be null or
/// NUL-terminated.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn lanefold_reduce_exec(
    base: *const c_void,
    count: usize,
    type_id: *const c_char,
    op_id: *const c_char,
    mode_id: *const c_char,
    lanes: usize,
    acc: *mut c_void,
    reducer: LanefoldReducer,
    user: *mut c_void,
) -> c_int {
    let type_id = parse_c_str(type_id);
    let op_id = parse_c_str(op_id);
    let stride = reduce_type_sizeof(type_id);

    let bytes = if base.is_null() {
        None
    } else if stride == 0 {
        Some(<&[u8]>::default())
    } else {
        let Some(len) = span(count, stride) else {
            return STATUS_INVALID_INPUT;
        };
        Some(slice::from_raw_parts(base.cast::<u8>(), len))
    };

    let acc_len = op_id
        .and_then(|token| token.parse::<ReduceOp>().ok())
        .map_or(stride, |op| op.accumulator_size(stride));
    let accumulator = if acc.is_null() {
        None
    } else {
        Some(slice::from_raw_parts_mut(acc.cast::<u8>(), acc_len))
    };

    let mut call = reducer.map(|f| {
        move |acc: &mut [u8], elem: &[u8]| unsafe {
            f(acc.as_mut_ptr().cast(), elem.as_ptr().cast(), user)
        }
    });

    reduce_exec(
        bytes,
        count,
        type_id,
        op_id,
        parse_c_str(mode_id),
        lanes,
        accumulator,
        call.as_mut().map(|c| c as &mut dyn FnMut(&mut [u8], &[u8])),
    )
}

/// Stride of `type_id` in the filter registry, or 0.
///
/// # Safety
/// `type_id` must be null or NUL-terminated.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn lanefold_filter_type_sizeof(type_id: *const c_char) -> usize {
    filter_type_sizeof(parse_c_str(type_id))
}

/// Whether the filter engine can execute `type_id`.
///
/// # Safety
/// `type_id` must be null or NUL-terminated.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn lanefold_filter_type_supported(type_id: *const c_char) -> bool {
    filter_type_supported(parse_c_str(type_id))
}

/// Stride of `type_id` in the reduce registry, or 0.
///
/// # Safety
/// `type_id` must be null or NUL-terminated.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn lanefold_reduce_type_sizeof(type_id: *const c_char) -> usize {
    reduce_type_sizeof(parse_c_str(type_id))
}

/// Whether the reduce engine can execute `type_id`.
///
/// # Safety
/// `type_id` must be null or NUL-terminated.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn lanefold_reduce_type_supported(type_id: *const c_char) -> bool {
    reduce_type_supported(parse_c_str(type_id))
}
