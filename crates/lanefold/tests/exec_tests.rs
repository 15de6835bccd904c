#![cfg(feature = "dev")]
//! Tests for the status-code entry points.
//!
//! These tests verify `filter_exec` and `reduce_exec` for:
//! - Reference results for every built-in reduction
//! - Status codes and the order in which they are checked
//! - Untouched outputs on failure
//! - Type registry queries
//!
//! ## Test Organization
//!
//! 1. **Reduce Results** - sum, min, max, any, all, count, custom
//! 2. **Filter Results** - algorithms, aliases, dry-run
//! 3. **Status Codes** - failures and their precedence
//! 4. **Type Queries** - sizes and support per registry

use approx::assert_relative_eq;

use lanefold::exec::{
    filter_exec, filter_type_sizeof, filter_type_supported, reduce_exec, reduce_type_sizeof,
    reduce_type_supported,
};

// ============================================================================
// Helper Functions
// ============================================================================

fn i32_bytes(values: &[i32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_ne_bytes()).collect()
}

fn i32_at(bytes: &[u8], index: usize) -> i32 {
    let at = index * 4;
    i32::from_ne_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

fn is_positive(elem: &[u8]) -> bool {
    i32_at(elem, 0) > 0
}

/// Run a built-in i32 reduction and return (status, accumulator).
fn reduce_i32(values: &[i32], op: &str) -> (i32, i32) {
    let bytes = i32_bytes(values);
    let mut acc = [0u8; 4];
    let status = reduce_exec(
        Some(&bytes[..]),
        values.len(),
        Some("i32"),
        Some(op),
        None,
        1,
        Some(&mut acc[..]),
        None,
    );
    (status, i32::from_ne_bytes(acc))
}

// ============================================================================
// Reduce Result Tests
// ============================================================================

/// Test i32 sum.
#[test]
fn test_reduce_sum_i32() {
    assert_eq!(reduce_i32(&[1, 2, 3, 4, 5], "sum"), (0, 15));
}

/// Test f64 min.
#[test]
fn test_reduce_min_f64() {
    let values = [2.5f64, 1.1, 3.3, 0.9];
    let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_ne_bytes()).collect();
    let mut acc = [0u8; 8];

    let status = reduce_exec(
        Some(&bytes[..]),
        4,
        Some("f64"),
        Some("min"),
        Some("lane"),
        2,
        Some(&mut acc[..]),
        None,
    );

    assert_eq!(status, 0);
    assert_relative_eq!(f64::from_ne_bytes(acc), 0.9);
}

/// Test u8 max.
#[test]
fn test_reduce_max_u8() {
    let bytes = [4u8, 2, 5, 1, 3];
    let mut acc = [0u8; 1];
    let status = reduce_exec(
        Some(&bytes[..]),
        5,
        Some("u8"),
        Some("max"),
        None,
        1,
        Some(&mut acc[..]),
        None,
    );

    assert_eq!(status, 0);
    assert_eq!(acc[0], 5);
}

/// Test bool any and all.
#[test]
fn test_reduce_bool_any_all() {
    let mut acc = [0u8; 1];

    let status = reduce_exec(
        Some(&[0u8, 0, 1, 0][..]),
        4,
        Some("bool"),
        Some("any"),
        None,
        1,
        Some(&mut acc[..]),
        None,
    );
    assert_eq!((status, acc[0]), (0, 1));

    let status = reduce_exec(
        Some(&[1u8, 1, 1][..]),
        3,
        Some("bool"),
        Some("all"),
        None,
        1,
        Some(&mut acc[..]),
        None,
    );
    assert_eq!((status, acc[0]), (0, 1));
}

/// Test count writes a usize.
#[test]
fn test_reduce_count() {
    let bytes = i32_bytes(&[1, 2, 3, 4, 5, 6]);
    let mut acc = [0u8; size_of::<usize>()];
    let status = reduce_exec(
        Some(&bytes[..]),
        6,
        Some("i32"),
        Some("count"),
        None,
        4,
        Some(&mut acc[..]),
        None,
    );

    assert_eq!(status, 0);
    assert_eq!(usize::from_ne_bytes(acc), 6);
}

/// Test a custom product reducer.
#[test]
fn test_reduce_custom_product() {
    let bytes = i32_bytes(&[1, 2, 3, 4]);
    let mut acc = 1i32.to_ne_bytes();
    let mut product = |acc: &mut [u8], elem: &[u8]| {
        let value = i32_at(acc, 0) * i32_at(elem, 0);
        acc.copy_from_slice(&value.to_ne_bytes());
    };

    let status = reduce_exec(
        Some(&bytes[..]),
        4,
        Some("i32"),
        Some("custom"),
        None,
        1,
        Some(&mut acc[..]),
        Some(&mut product),
    );

    assert_eq!(status, 0);
    assert_eq!(i32::from_ne_bytes(acc), 24);
}

// ============================================================================
// Filter Result Tests
// ============================================================================

/// Test default filter compacts and reports the kept count.
#[test]
fn test_filter_default_compacts() {
    let mut bytes = i32_bytes(&[-1, 4, -2, 6, 8]);
    let mut kept = usize::MAX;
    let mut pred = is_positive;

    let status = filter_exec(
        Some(&mut bytes[..]),
        5,
        Some("i32"),
        None,
        None,
        1,
        Some(&mut pred),
        Some(&mut kept),
    );

    assert_eq!(status, 0);
    assert_eq!(kept, 3);
    assert_eq!([i32_at(&bytes, 0), i32_at(&bytes, 1), i32_at(&bytes, 2)], [4, 6, 8]);
}

/// Test the `compact` alias and the lane algorithms.
#[test]
fn test_filter_algorithm_tokens() {
    for algorithm in ["compact", "inplace", "stable", "lane-compact", "lane-stable", "auto"] {
        let mut bytes = i32_bytes(&[3, -3, 5, -5, 7, -7, 9]);
        let mut kept = 0;
        let mut pred = is_positive;

        let status = filter_exec(
            Some(&mut bytes[..]),
            7,
            Some("i32"),
            Some(algorithm),
            Some("lane"),
            3,
            Some(&mut pred),
            Some(&mut kept),
        );

        assert_eq!(status, 0, "{algorithm}");
        let prefix: Vec<i32> = (0..kept).map(|i| i32_at(&bytes, i)).collect();
        assert_eq!(prefix, vec![3, 5, 7, 9], "{algorithm}");
    }
}

/// Test count, first and last leave the buffer untouched.
#[test]
fn test_filter_read_only_algorithms() {
    let original = i32_bytes(&[-1, 2, -3, 4]);
    for (algorithm, expected) in [("count-only", 2), ("first", 1), ("last", 1)] {
        let mut bytes = original.clone();
        let mut kept = 0;
        let mut pred = is_positive;

        let status = filter_exec(
            Some(&mut bytes[..]),
            4,
            Some("i32"),
            Some(algorithm),
            None,
            1,
            Some(&mut pred),
            Some(&mut kept),
        );

        assert_eq!((status, kept), (0, expected), "{algorithm}");
        assert_eq!(bytes, original);
    }
}

/// Test dry-run counts without mutating.
#[test]
fn test_filter_dry_run() {
    let original = i32_bytes(&[-1, 2, -3, 4, 5]);
    let mut bytes = original.clone();
    let mut kept = 0;
    let mut pred = is_positive;

    let status = filter_exec(
        Some(&mut bytes[..]),
        5,
        Some("i32"),
        Some("stable"),
        Some("dry-run"),
        1,
        Some(&mut pred),
        Some(&mut kept),
    );

    assert_eq!((status, kept), (0, 3));
    assert_eq!(bytes, original);
}

/// Test dry-run wins over an unknown algorithm token.
#[test]
fn test_filter_dry_run_ignores_unknown_algorithm() {
    let original = i32_bytes(&[1, -2, 3]);
    let mut bytes = original.clone();
    let mut kept = 99;
    let mut pred = is_positive;

    let status = filter_exec(
        Some(&mut bytes[..]),
        3,
        Some("i32"),
        Some("fast"),
        Some("dry-run"),
        1,
        Some(&mut pred),
        Some(&mut kept),
    );

    assert_eq!((status, kept), (0, 2));
    assert_eq!(bytes, original);
}

/// Test an absent out_count is allowed.
#[test]
fn test_filter_without_out_count() {
    let mut bytes = [1u8, 0, 1];
    let mut pred = |elem: &[u8]| elem[0] != 0;
    let status = filter_exec(
        Some(&mut bytes[..]),
        3,
        Some("bool"),
        None,
        None,
        1,
        Some(&mut pred),
        None,
    );

    assert_eq!(status, 0);
    assert_eq!(&bytes[..2], &[1, 1]);
}

// ============================================================================
// Status Code Tests
// ============================================================================

/// Test reduce failure codes.
#[test]
fn test_reduce_status_codes() {
    let bytes = i32_bytes(&[1, 2, 3]);
    let mut acc = [0u8; 4];

    let status = reduce_exec(
        Some(&bytes[..]),
        3,
        Some("notatype"),
        Some("sum"),
        None,
        1,
        Some(&mut acc[..]),
        None,
    );
    assert_eq!(status, -2);

    let status = reduce_exec(
        Some(&bytes[..]),
        3,
        Some("i32"),
        Some("notanop"),
        None,
        1,
        Some(&mut acc[..]),
        None,
    );
    assert_eq!(status, -3);

    let status = reduce_exec(None, 3, Some("i32"), Some("sum"), None, 1, Some(&mut acc[..]), None);
    assert_eq!(status, -1);

    let status = reduce_exec(
        Some(&bytes[..]),
        3,
        Some("i32"),
        Some("custom"),
        None,
        1,
        Some(&mut acc[..]),
        None,
    );
    assert_eq!(status, -1);

    let status = reduce_exec(
        Some(&bytes[..]),
        3,
        None,
        Some("sum"),
        None,
        1,
        Some(&mut acc[..]),
        None,
    );
    assert_eq!(status, -1);

    let status = reduce_exec(
        Some(&bytes[..]),
        3,
        Some("i32"),
        Some("sum"),
        Some("turbo"),
        1,
        Some(&mut acc[..]),
        None,
    );
    assert_eq!(status, -3);

    let status = reduce_exec(
        Some(&[1u8, 0][..]),
        2,
        Some("bool"),
        Some("sum"),
        None,
        1,
        Some(&mut acc[..1]),
        None,
    );
    assert_eq!(status, -3);

    assert_eq!(acc, [0; 4]);
}

/// Test reduce rejects registry types outside its table.
#[test]
fn test_reduce_char_unsupported() {
    let mut acc = [0u8; 1];
    let status = reduce_exec(
        Some(&b"ab"[..]),
        2,
        Some("char"),
        Some("count"),
        None,
        1,
        Some(&mut acc[..]),
        None,
    );
    assert_eq!(status, -2);
}

/// Test short accumulators and buffers.
#[test]
fn test_reduce_short_buffers() {
    let bytes = i32_bytes(&[1, 2, 3]);

    let mut acc = [0u8; 2];
    let status = reduce_exec(
        Some(&bytes[..]),
        3,
        Some("i32"),
        Some("sum"),
        None,
        1,
        Some(&mut acc[..]),
        None,
    );
    assert_eq!(status, -1);

    let mut acc = [0u8; 4];
    let status = reduce_exec(
        Some(&bytes[..]),
        4,
        Some("i32"),
        Some("sum"),
        None,
        1,
        Some(&mut acc[..]),
        None,
    );
    assert_eq!(status, -1);
}

/// Test filter failure codes in precedence order.
#[test]
fn test_filter_status_precedence() {
    let original = i32_bytes(&[1, -2, 3]);
    let mut bytes = original.clone();
    let mut pred = is_positive;

    // Missing buffer outranks an unknown type
    let status = filter_exec(None, 3, Some("notatype"), None, None, 1, Some(&mut pred), None);
    assert_eq!(status, -1);

    // Missing predicate
    let status = filter_exec(Some(&mut bytes[..]), 3, Some("i32"), None, None, 1, None, None);
    assert_eq!(status, -1);

    // Unknown type outranks an unknown algorithm
    let status = filter_exec(
        Some(&mut bytes[..]),
        3,
        Some("notatype"),
        Some("fast"),
        None,
        1,
        Some(&mut pred),
        None,
    );
    assert_eq!(status, -2);

    // The null sentinel and a missing type are both unsupported
    let status = filter_exec(
        Some(&mut bytes[..]),
        3,
        Some("null"),
        None,
        None,
        1,
        Some(&mut pred),
        None,
    );
    assert_eq!(status, -2);
    let status = filter_exec(Some(&mut bytes[..]), 3, None, None, None, 1, Some(&mut pred), None);
    assert_eq!(status, -2);

    // Unknown algorithm or mode outranks a short buffer
    let status = filter_exec(
        Some(&mut bytes[..]),
        9,
        Some("i32"),
        Some("fast"),
        None,
        1,
        Some(&mut pred),
        None,
    );
    assert_eq!(status, -3);
    let status = filter_exec(
        Some(&mut bytes[..]),
        9,
        Some("i32"),
        None,
        Some("turbo"),
        1,
        Some(&mut pred),
        None,
    );
    assert_eq!(status, -3);

    // Short buffer
    let status = filter_exec(
        Some(&mut bytes[..]),
        9,
        Some("i32"),
        None,
        None,
        1,
        Some(&mut pred),
        None,
    );
    assert_eq!(status, -1);

    assert_eq!(bytes, original);
}

/// Test out_count is untouched when the call fails.
#[test]
fn test_filter_out_count_untouched_on_error() {
    let mut bytes = i32_bytes(&[1, 2]);
    let mut kept = 77;
    let mut pred = is_positive;

    let status = filter_exec(
        Some(&mut bytes[..]),
        2,
        Some("i32"),
        Some("notalgo"),
        None,
        1,
        Some(&mut pred),
        Some(&mut kept),
    );

    assert_eq!(status, -3);
    assert_eq!(kept, 77);
}

// ============================================================================
// Type Query Tests
// ============================================================================

/// Test registry queries for both engines.
#[test]
fn test_type_queries() {
    assert_eq!(filter_type_sizeof(Some("i32")), 4);
    assert_eq!(reduce_type_sizeof(Some("f64")), 8);
    assert_eq!(filter_type_sizeof(Some("char")), 1);
    assert_eq!(reduce_type_sizeof(Some("char")), 0);
    assert_eq!(filter_type_sizeof(Some("notatype")), 0);
    assert_eq!(filter_type_sizeof(None), 0);

    assert!(filter_type_supported(Some("cstr")));
    assert!(!reduce_type_supported(Some("cstr")));
    assert!(reduce_type_supported(Some("datetime")));
    assert!(!filter_type_supported(Some("null")));
    assert!(!reduce_type_supported(None));
}
