//! Device limits and process exit codes.

/// Highest index the device serves. Seeks past it are clamped.
pub const MAX_INDEX: u64 = 500;

/// Largest index whose Fibonacci number fits in 128 bits.
///
/// F(186) = 332825110087067562321196029789634457848 < 2^128 <= F(187).
/// `fib` keeps returning F(k) mod 2^128 past this point, so the low
/// 64 bits stay correct over the whole `0..=MAX_INDEX` range.
pub const MAX_EXACT_INDEX: u64 = 186;

/// Default device name, as it appears under `/dev`.
pub const DEVICE_NAME: &str = "fibonacci";

/// Exit codes for the client binary.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// Invalid configuration.
    pub const ERROR_CONFIG: i32 = 4;
    /// Device already attached to another session (`EBUSY`).
    pub const ERROR_BUSY: i32 = 16;
}
