//! Fixed-width 128-bit unsigned arithmetic.
//!
//! `Fixed128` stores a value as two 64-bit words, `upper·2^64 + lower`.
//! Every operation is unsigned modulo 2^128: overflow past the top word
//! wraps silently. The Fibonacci core only needs values up to a bounded
//! index, so no operation here checks or reports overflow.

use std::fmt;
use std::ops::{Add, Mul, Sub};

const LOW32: u64 = 0xFFFF_FFFF;

/// A 128-bit unsigned integer as an (upper, lower) word pair.
///
/// # Example
/// ```
/// use fibdrv_core::fixed128::Fixed128;
///
/// let x = Fixed128::new(0, u64::MAX);
/// let y = Fixed128::from(1u64);
/// assert_eq!(x + y, Fixed128::new(1, 0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Fixed128 {
    /// Bits 64..128.
    pub upper: u64,
    /// Bits 0..64.
    pub lower: u64,
}

impl Fixed128 {
    /// Zero.
    pub const ZERO: Self = Self::new(0, 0);
    /// One.
    pub const ONE: Self = Self::new(0, 1);
    /// 2^128 - 1.
    pub const MAX: Self = Self::new(u64::MAX, u64::MAX);

    /// Build a value from its two words.
    #[must_use]
    pub const fn new(upper: u64, lower: u64) -> Self {
        Self { upper, lower }
    }

    /// Whether both words are zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.upper == 0 && self.lower == 0
    }

    /// Low 64 bits, the only part exposed across the session boundary.
    #[must_use]
    pub const fn truncate(self) -> u64 {
        self.lower
    }
}

/// Carry-correct addition, wrapping past 2^128.
#[inline]
#[must_use]
pub fn add(x: Fixed128, y: Fixed128) -> Fixed128 {
    let mut upper = x.upper.wrapping_add(y.upper);
    // The low words overflow exactly when y.lower exceeds the headroom left in x.lower.
    if y.lower > !x.lower {
        upper = upper.wrapping_add(1);
    }
    Fixed128 {
        upper,
        lower: x.lower.wrapping_add(y.lower),
    }
}

/// Borrow-correct subtraction.
///
/// # Precondition
///
/// The caller guarantees `x >= y` as 128-bit values. The doubling step only
/// subtracts `a` from `2·b`, which holds for every Fibonacci pair. When the
/// precondition is violated the result is the wrapped value `x - y mod 2^128`;
/// no error is reported.
#[inline]
#[must_use]
pub fn subtract(x: Fixed128, y: Fixed128) -> Fixed128 {
    let mut upper = x.upper.wrapping_sub(y.upper);
    if y.lower > x.lower {
        upper = upper.wrapping_sub(1);
    }
    Fixed128 {
        upper,
        lower: x.lower.wrapping_sub(y.lower),
    }
}

/// Exact 128-bit product of two 64-bit operands.
///
/// Splits each operand into 32-bit halves (`x = c·2^32 + a`, `y = d·2^32 + b`)
/// and recombines the four partial products with explicit carries.
#[inline]
#[must_use]
pub fn multiply64x64_to_128(x: u64, y: u64) -> Fixed128 {
    let a = x & LOW32;
    let c = x >> 32;
    let b = y & LOW32;
    let d = y >> 32;

    let ab = a * b;
    let bc = b * c;
    let ad = a * d;
    let cd = c * d;

    let low = ab.wrapping_add(bc << 32);
    let mut high = cd + (bc >> 32) + (ad >> 32) + u64::from(low < ab);
    let low = low.wrapping_add(ad << 32);
    high += u64::from(low < (ad << 32));

    Fixed128 { upper: high, lower: low }
}

/// Narrowing 128-bit product: `x · y mod 2^128`.
///
/// Only the low-by-low product is computed exactly; the two cross terms are
/// 64-bit wrapping multiplies folded into the upper word, and the
/// upper-by-upper term is dropped entirely. The result is therefore exact
/// whenever the true product fits in 128 bits, and silently wrong (but
/// congruent mod 2^128) otherwise.
#[inline]
#[must_use]
pub fn multiply128(x: Fixed128, y: Fixed128) -> Fixed128 {
    let cross = x
        .lower
        .wrapping_mul(y.upper)
        .wrapping_add(x.upper.wrapping_mul(y.lower));
    let mut z = multiply64x64_to_128(x.lower, y.lower);
    z.upper = z.upper.wrapping_add(cross);
    z
}

impl Add for Fixed128 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        add(self, rhs)
    }
}

impl Sub for Fixed128 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        subtract(self, rhs)
    }
}

impl Mul for Fixed128 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        multiply128(self, rhs)
    }
}

impl From<u64> for Fixed128 {
    fn from(value: u64) -> Self {
        Self::new(0, value)
    }
}

impl From<u128> for Fixed128 {
    #[allow(clippy::cast_possible_truncation)]
    fn from(value: u128) -> Self {
        Self::new((value >> 64) as u64, value as u64)
    }
}

impl From<Fixed128> for u128 {
    fn from(value: Fixed128) -> Self {
        (u128::from(value.upper) << 64) | u128::from(value.lower)
    }
}

impl PartialOrd for Fixed128 {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fixed128 {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.upper
            .cmp(&other.upper)
            .then(self.lower.cmp(&other.lower))
    }
}

impl fmt::Display for Fixed128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&u128::from(*self), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_carries_into_upper() {
        let x = Fixed128::new(0, u64::MAX);
        let z = add(x, Fixed128::ONE);
        assert_eq!(z, Fixed128::new(1, 0));
    }

    #[test]
    fn add_without_carry() {
        let z = add(Fixed128::new(3, 40), Fixed128::new(4, 2));
        assert_eq!(z, Fixed128::new(7, 42));
    }

    #[test]
    fn add_wraps_past_128_bits() {
        assert_eq!(add(Fixed128::MAX, Fixed128::ONE), Fixed128::ZERO);
    }

    #[test]
    fn subtract_borrows_from_upper() {
        let z = subtract(Fixed128::new(1, 0), Fixed128::ONE);
        assert_eq!(z, Fixed128::new(0, u64::MAX));

        let z = subtract(Fixed128::new(5, 3), Fixed128::new(2, 10));
        assert_eq!(u128::from(z), (5u128 << 64) + 3 - ((2u128 << 64) + 10));
    }

    #[test]
    fn subtract_equal_is_zero() {
        let x = Fixed128::new(0xdead, 0xbeef);
        assert!(subtract(x, x).is_zero());
    }

    #[test]
    fn subtract_precondition_violation_wraps() {
        // Not an error: the result is x - y mod 2^128.
        assert_eq!(subtract(Fixed128::ZERO, Fixed128::ONE), Fixed128::MAX);
    }

    #[test]
    fn subtract_undoes_add_across_carry() {
        let x = Fixed128::new(0, 5);
        let y = Fixed128::new(0, u64::MAX);
        assert_eq!(subtract(add(x, y), y), x);
    }

    #[test]
    fn mul64_zero() {
        assert_eq!(multiply64x64_to_128(0, 0), Fixed128::ZERO);
        assert_eq!(multiply64x64_to_128(u64::MAX, 0), Fixed128::ZERO);
    }

    #[test]
    fn mul64_max_squared() {
        // (2^64 - 1)^2 = (2^64 - 2)·2^64 + 1
        let z = multiply64x64_to_128(u64::MAX, u64::MAX);
        assert_eq!(z, Fixed128::new(u64::MAX - 1, 1));
    }

    #[test]
    fn mul64_known_products() {
        let cases: [(u64, u64); 5] = [
            (1, 1),
            (0xFFFF_FFFF, 0xFFFF_FFFF),
            (1 << 32, 1 << 32),
            (0x1234_5678_9abc_def0, 0x0fed_cba9_8765_4321),
            (12_200_160_415_121_876_738, 7_540_113_804_746_346_429),
        ];
        for (x, y) in cases {
            let expected = u128::from(x) * u128::from(y);
            assert_eq!(
                u128::from(multiply64x64_to_128(x, y)),
                expected,
                "{x} * {y}"
            );
        }
    }

    #[test]
    fn mul128_exact_when_product_fits() {
        let x = Fixed128::from(0x1_0000_0000_0000_0003u128);
        let y = Fixed128::from(0x7fff_ffffu128);
        assert_eq!(
            u128::from(multiply128(x, y)),
            0x1_0000_0000_0000_0003u128 * 0x7fff_ffff
        );
    }

    #[test]
    fn mul128_drops_bits_past_128() {
        // 2^64 · 2^64 = 2^128, which wraps to zero.
        let x = Fixed128::new(1, 0);
        assert_eq!(multiply128(x, x), Fixed128::ZERO);

        let x = Fixed128::new(0xabcd, 0x1234_5678_9abc_def0);
        let y = Fixed128::new(0x9876, 0xfedc_ba98_7654_3210);
        assert_eq!(
            u128::from(multiply128(x, y)),
            u128::from(x).wrapping_mul(u128::from(y))
        );
    }

    #[test]
    fn operators_delegate() {
        let x = Fixed128::from(40u64);
        let y = Fixed128::from(2u64);
        assert_eq!(x + y, Fixed128::from(42u64));
        assert_eq!(x - y, Fixed128::from(38u64));
        assert_eq!(x * y, Fixed128::from(80u64));
    }

    #[test]
    fn ordering_compares_upper_first() {
        assert!(Fixed128::new(1, 0) > Fixed128::new(0, u64::MAX));
        assert!(Fixed128::new(2, 1) < Fixed128::new(2, 3));
    }

    #[test]
    fn display_prints_full_value() {
        assert_eq!(Fixed128::new(1, 0).to_string(), "18446744073709551616");
        assert_eq!(Fixed128::from(55u64).to_string(), "55");
    }

    #[test]
    fn u128_conversion_splits_words() {
        let v = (7u128 << 64) | 9;
        assert_eq!(Fixed128::from(v), Fixed128::new(7, 9));
        assert_eq!(u128::from(Fixed128::from(v)), v);
    }

    #[test]
    fn truncate_keeps_low_word() {
        assert_eq!(Fixed128::new(99, 42).truncate(), 42);
    }
}
