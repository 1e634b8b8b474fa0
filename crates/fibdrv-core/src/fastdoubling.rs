//! Fast Doubling Fibonacci on `Fixed128`.
//!
//! Uses the doubling identities:
//!   F(2m)   = F(m) * (2*F(m+1) - F(m))
//!   F(2m+1) = F(m+1)^2 + F(m)^2
//!
//! Iterates over the bits of k from MSB to LSB, so F(k) costs
//! `bit_length(k)` doubling steps instead of k additions.
//!
//! All arithmetic is modulo 2^128. F(k) is exact up to
//! [`MAX_EXACT_INDEX`](crate::constants::MAX_EXACT_INDEX); past that the
//! returned value is F(k) mod 2^128. Nothing here detects the wrap.

use crate::fixed128::{add, multiply128, subtract, Fixed128};

const TWO: Fixed128 = Fixed128::new(0, 2);

/// Registers for one Fast Doubling run.
///
/// `a` and `b` hold F(m) and F(m+1) for the prefix m of k processed so far.
/// The three scratch registers keep each step from reading a value it has
/// already overwritten.
#[derive(Debug, Clone, Copy)]
pub struct DoublingState {
    /// F(m).
    pub a: Fixed128,
    /// F(m+1).
    pub b: Fixed128,
    /// Scratch: F(2m).
    pub t1: Fixed128,
    /// Scratch: F(2m+1).
    pub t2: Fixed128,
    /// Scratch: F(m)^2.
    pub t2a: Fixed128,
}

impl DoublingState {
    /// State for m = 0: (F(0), F(1)) = (0, 1).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            a: Fixed128::ZERO,
            b: Fixed128::ONE,
            t1: Fixed128::ZERO,
            t2: Fixed128::ZERO,
            t2a: Fixed128::ZERO,
        }
    }

    /// m -> 2m.
    #[inline]
    pub fn double(&mut self) {
        // t1 = a * (2b - a)
        self.t1 = multiply128(self.b, TWO);
        self.t1 = subtract(self.t1, self.a);
        self.t1 = multiply128(self.t1, self.a);

        // t2 = b^2 + a^2
        self.t2 = multiply128(self.b, self.b);
        self.t2a = multiply128(self.a, self.a);
        self.t2 = add(self.t2, self.t2a);

        self.a = self.t1;
        self.b = self.t2;
    }

    /// m -> m + 1.
    #[inline]
    pub fn advance(&mut self) {
        self.t1 = add(self.a, self.b);
        self.a = self.b;
        self.b = self.t1;
    }
}

impl Default for DoublingState {
    fn default() -> Self {
        Self::new()
    }
}

/// Number of significant bits in k (0 for k = 0).
#[inline]
#[must_use]
pub const fn num_bits(k: u64) -> u32 {
    u64::BITS - k.leading_zeros()
}

/// Compute F(k) with F(0) = 0, F(1) = 1.
///
/// # Example
/// ```
/// use fibdrv_core::fastdoubling::fib;
///
/// assert_eq!(fib(10).lower, 55);
/// assert_eq!(u128::from(fib(100)), 354_224_848_179_261_915_075);
/// ```
#[must_use]
pub fn fib(k: u64) -> Fixed128 {
    let mut state = DoublingState::new();
    for i in (0..num_bits(k)).rev() {
        state.double();
        if (k >> i) & 1 == 1 {
            state.advance();
        }
    }
    state.a
}
