//! Layer 4: Adapters
//!
//! # Purpose
//!
//! This layer provides user-facing execution adapters over the engine:
//!
//! - **Slice**: Strongly typed execution over `&mut [T]` / `&[T]`
//! - **Erased**: Execution over byte buffers with a runtime element type
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Adapters ← You are here
//!   ↓
//! Layer 3: Engine
//!   ↓
//! Layer 2: Algorithms
//!   ↓
//! Layer 1: Primitives
//! ```

/// Typed slice adapter.
pub mod slice;

/// Type-erased byte buffer adapter.
pub mod erased;
