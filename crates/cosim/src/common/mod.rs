//! Common utilities and types used throughout the harness.
//!
//! This module provides the building blocks shared by every other component:
//! 1. **Bit Casts:** Explicit conversion between binary32 values and their bit patterns.
//! 2. **Order Keys:** The order-preserving bijection used for exhaustive enumeration.
//! 3. **Error Handling:** The harness error taxonomy.

/// Binary32 bit casts and order-key bijection.
pub mod bits;

/// Error types for harness operations.
pub mod error;

pub use bits::{bits_from_order_key, bits_of, float_of, order_key};
pub use error::{HandshakeSignal, HarnessError};
