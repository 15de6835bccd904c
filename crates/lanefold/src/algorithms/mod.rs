//! Layer 2: Algorithms
//!
//! # Purpose
//!
//! This layer provides the concrete filter and reduce algorithms. Each
//! algorithm is a plain function over the primitives; selection and
//! validation live in the engine.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Adapters
//!   ↓
//! Layer 3: Engine
//!   ↓
//! Layer 2: Algorithms ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Filter algorithms (compaction, scans, partition).
pub mod compaction;

/// Reduce operations and lane folds.
pub mod folding;
