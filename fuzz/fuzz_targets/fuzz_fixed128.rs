#![no_main]

use libfuzzer_sys::fuzz_target;

use fibdrv_core::fixed128::{add, multiply128, multiply64x64_to_128, subtract, Fixed128};

fn word(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(bytes);
    u64::from_le_bytes(buf)
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 32 {
        return;
    }
    let x = Fixed128::new(word(&data[0..8]), word(&data[8..16]));
    let y = Fixed128::new(word(&data[16..24]), word(&data[24..32]));
    let (xn, yn) = (u128::from(x), u128::from(y));

    // Native u128 is the reference: every operation is mod 2^128.
    assert_eq!(u128::from(add(x, y)), xn.wrapping_add(yn));
    assert_eq!(u128::from(subtract(x, y)), xn.wrapping_sub(yn));
    assert_eq!(u128::from(multiply128(x, y)), xn.wrapping_mul(yn));
    assert_eq!(
        u128::from(multiply64x64_to_128(x.lower, y.lower)),
        u128::from(x.lower) * u128::from(y.lower)
    );
    assert_eq!(subtract(add(x, y), y), x);
});
