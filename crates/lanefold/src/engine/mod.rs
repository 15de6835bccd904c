//! Layer 3: Engine
//!
//! # Purpose
//!
//! This layer orchestrates filter and reduce calls: it validates inputs,
//! resolves `auto` selections into concrete algorithms, plans lanes and
//! routes each call to the algorithms layer.
//!
//! # Architecture
//!
//! ```text
//! Layer 5: API
//!   ↓
//! Layer 4: Adapters
//!   ↓
//! Layer 3: Engine ← You are here
//!   ↓
//! Layer 2: Algorithms
//!   ↓
//! Layer 1: Primitives
//! ```

/// Dispatchers for filter and reduce calls.
pub mod executor;

/// Validation utilities.
pub mod validator;

/// Output types for filter and reduce calls.
pub mod output;
