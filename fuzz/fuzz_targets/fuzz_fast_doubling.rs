#![no_main]

use libfuzzer_sys::fuzz_target;

use fibdrv_core::fastdoubling::fib;
use fibdrv_device::{SeekOrigin, SequenceSession};

fuzz_target!(|data: &[u8]| {
    if data.len() < 10 {
        return;
    }
    // First 2 bytes pick k, capped at 2000 for speed.
    let k = u64::from(u16::from_le_bytes([data[0], data[1]])) % 2_000;

    let (mut a, mut b) = (0u128, 1u128);
    for _ in 0..k {
        let next = a.wrapping_add(b);
        a = b;
        b = next;
    }
    assert_eq!(u128::from(fib(k)), a, "F({k}) mod 2^128");

    // Remaining bytes drive a seek; the cursor must stay in range.
    let whence = i32::from(data[2] % 3);
    let mut offset = [0u8; 8];
    offset.copy_from_slice(&data[2..10]);
    let offset = i64::from_le_bytes(offset);

    let mut session = SequenceSession::new();
    let origin = SeekOrigin::from_raw(whence).expect("whence in 0..3");
    let cursor = session.seek(origin, offset);
    assert!(cursor <= session.max_index());
    assert_eq!(session.read(), fib(cursor).lower);
});
