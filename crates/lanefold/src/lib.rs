//! # lanefold: type-erased filter and reduce engines for Rust
//!
//! Two array-level operations over contiguous, homogeneous buffers:
//!
//! * **filter**: select or compact the elements matching a predicate;
//! * **reduce**: fold every element into a single accumulator.
//!
//! Both engines share one design: a static type-size registry, algorithm and
//! mode selection with an `auto` resolution policy, and a *lane* scheme that
//! splits the index space into contiguous segments processed in order.
//!
//! ## Quick Start
//!
//! ### Typed slices
//!
//! ```rust
//! use lanefold::prelude::*;
//!
//! let mut data = [1, 2, 3, 4, 5, 6];
//!
//! // Build the filter
//! let filter = Filter::new()
//!     .algorithm(FilterAlgorithm::Stable) // Order-preserving, staged
//!     .adapter(Slice)
//!     .build()?;
//!
//! // Compact the matches to the front
//! let outcome = filter.run(&mut data, |v| v % 2 == 0)?;
//! assert_eq!(&data[..outcome.kept], &[2, 4, 6]);
//!
//! // Reductions never depend on the lane count
//! let reduce = Reduce::new().lanes(4).adapter(Slice).build()?;
//! assert_eq!(reduce.sum(&[1i32, 2, 3, 4, 5])?.value, 15);
//! assert_eq!(reduce.max(&[3u8, 5, 1])?.value, 5);
//! # Result::<(), LanefoldError>::Ok(())
//! ```
//!
//! ### Runtime-typed byte buffers
//!
//! ```rust
//! use lanefold::prelude::*;
//!
//! let values = [0.9f64, 2.5, 1.25];
//! let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_ne_bytes()).collect();
//!
//! let reduce = Reduce::new()
//!     .adapter(Erased)
//!     .type_id("f64")
//!     .operation(ReduceOp::Min)
//!     .build()?;
//!
//! let mut acc = [0u8; 8];
//! reduce.fold(&bytes, values.len(), &mut acc, None)?;
//! assert_eq!(f64::from_ne_bytes(acc), 0.9);
//! # Result::<(), LanefoldError>::Ok(())
//! ```
//!
//! ### Status codes
//!
//! The [`exec`] module takes string tokens and returns `0` on success, `-1`
//! for invalid input, `-2` for an unsupported type, `-3` for an unsupported
//! algorithm, operation or mode, and `-4` when staging memory could not be
//! allocated.
//!
//! ```rust
//! use lanefold::exec::filter_exec;
//!
//! let mut bytes = [1u8, 0, 1, 1, 0];
//! let mut kept = 0;
//! let mut is_set = |elem: &[u8]| elem[0] != 0;
//! let status = filter_exec(
//!     Some(&mut bytes[..]),
//!     5,
//!     Some("bool"),
//!     Some("inplace"),
//!     None,
//!     1,
//!     Some(&mut is_set),
//!     Some(&mut kept),
//! );
//! assert_eq!((status, kept), (0, 3));
//! ```
//!
//! ## Filter algorithms
//!
//! | Token          | Behavior                                          |
//! |----------------|---------------------------------------------------|
//! | `auto`         | `lane-compact` for `lane` mode or >1 lane, else `inplace` |
//! | `inplace`      | order-preserving compaction (alias `compact`)     |
//! | `stable`       | order-preserving compaction through staging       |
//! | `lane-compact` | `inplace` over lane segments                      |
//! | `lane-stable`  | `stable` over lane segments                       |
//! | `count-only`   | match count; read-only (forced by `dry-run`)      |
//! | `first`/`last` | existence flag (0 or 1); read-only                |
//! | `partition`    | unordered prefix of matches; buffer stays a permutation |
//!
//! ## Reduce operations
//!
//! `sum`, `min`, `max` (numeric types), `count` (any type), `any`, `all`
//! (`bool`) and `custom` (caller reducer, caller-initialized accumulator).
//!
//! ## Features
//!
//! * `std` (default): `std::error::Error` for [`prelude::LanefoldError`].
//! * `dev`: exposes the internal layers for testing.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// Layer 1: Primitives - errors, registry, lanes and buffer views.
mod primitives;

// Layer 2: Algorithms - filter and reduce algorithms.
mod algorithms;

// Layer 3: Engine - validation, dispatch and outcomes.
mod engine;

// Layer 4: Adapters - typed and type-erased execution.
mod adapters;

// High-level fluent API.
mod api;

/// String-keyed entry points returning status codes.
pub mod exec;

// Standard lanefold prelude.
pub mod prelude {
    pub use crate::api::{
        Adapter::{Erased, Slice},
        ElementType, ErasedFilter, ErasedReduce, ErasedReducer, ExecutionMode, FilterAlgorithm,
        FilterBuilder as Filter, FilterOutcome, LanefoldError, Numeric, ReduceBuilder as Reduce,
        ReduceOp, ReduceOutcome, SliceFilter, SliceReduce,
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod adapters {
        pub use crate::adapters::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
