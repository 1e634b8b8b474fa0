//! # fibdrv-core
//!
//! Arithmetic core of the Fibonacci device: a two-word 128-bit unsigned
//! integer and a Fast Doubling Fibonacci routine built on it.
//!
//! Everything here is a pure function over `Copy` values. It is safe to
//! call from any number of threads and never blocks.

pub mod constants;
pub mod fastdoubling;
pub mod fixed128;

// Re-exports
pub use constants::{exit_codes, DEVICE_NAME, MAX_EXACT_INDEX, MAX_INDEX};
pub use fastdoubling::{fib, DoublingState};
pub use fixed128::{add, multiply128, multiply64x64_to_128, subtract, Fixed128};
