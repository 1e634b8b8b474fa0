//! Per-client sequence session.
//!
//! A `SequenceSession` owns the cursor, the last computed value, and the
//! time spent computing it. It is not internally synchronized: every
//! mutating method takes `&mut self`, and the device layer guarantees at
//! most one live session.

use std::time::{Duration, Instant};

use fibdrv_core::constants::MAX_INDEX;
use fibdrv_core::fastdoubling::fib;
use tracing::debug;

use crate::errors::DeviceError;

/// Reference point for [`SequenceSession::seek`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeekOrigin {
    /// New cursor = offset.
    FromStart,
    /// New cursor = cursor + offset.
    FromCurrent,
    /// New cursor = max index - offset.
    FromEnd,
}

impl SeekOrigin {
    /// Decode the numeric whence values `0`, `1`, `2`.
    pub fn from_raw(whence: i32) -> Result<Self, DeviceError> {
        match whence {
            0 => Ok(Self::FromStart),
            1 => Ok(Self::FromCurrent),
            2 => Ok(Self::FromEnd),
            other => Err(DeviceError::InvalidOrigin(other)),
        }
    }
}

/// Cursor, last value, and last elapsed time for one attached client.
#[derive(Debug, Clone)]
pub struct SequenceSession {
    cursor: u64,
    max_index: u64,
    last_value: u64,
    last_duration: Duration,
}

impl SequenceSession {
    /// New session bounded by [`MAX_INDEX`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_index(MAX_INDEX)
    }

    /// New session bounded by `max_index`.
    #[must_use]
    pub fn with_max_index(max_index: u64) -> Self {
        Self {
            cursor: 0,
            max_index,
            last_value: 0,
            last_duration: Duration::ZERO,
        }
    }

    /// Compute F(k), record the elapsed time, and return the low 64 bits.
    ///
    /// The upper word of the 128-bit result is discarded here. `k` is not
    /// clamped; callers going through [`read`](Self::read) get the cursor,
    /// which always is.
    pub fn compute(&mut self, k: u64) -> (u64, Duration) {
        let start = Instant::now();
        let result = fib(k);
        let elapsed = start.elapsed();

        self.last_value = result.truncate();
        self.last_duration = elapsed;
        debug!(index = k, value = self.last_value, elapsed_ns = ?elapsed.as_nanos(), "computed");
        (self.last_value, elapsed)
    }

    /// Compute at the current cursor.
    pub fn read(&mut self) -> u64 {
        self.compute(self.cursor).0
    }

    /// Duration of the most recent compute, zero if none has run.
    #[must_use]
    pub fn last_elapsed(&self) -> Duration {
        self.last_duration
    }

    /// Low 64 bits of the most recent result.
    #[must_use]
    pub fn last_value(&self) -> u64 {
        self.last_value
    }

    /// Current cursor.
    #[must_use]
    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    /// Upper bound of the cursor.
    #[must_use]
    pub fn max_index(&self) -> u64 {
        self.max_index
    }

    /// Move the cursor and return its new value.
    ///
    /// The target is clamped into `[0, max_index]`; nothing is rejected.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn seek(&mut self, origin: SeekOrigin, offset: i64) -> u64 {
        let max = i128::from(self.max_index);
        let offset = i128::from(offset);
        let target = match origin {
            SeekOrigin::FromStart => offset,
            SeekOrigin::FromCurrent => i128::from(self.cursor) + offset,
            SeekOrigin::FromEnd => max - offset,
        };
        // In [0, max_index] after clamping, so the cast is lossless.
        self.cursor = target.clamp(0, max) as u64;
        debug!(?origin, offset = %offset, cursor = self.cursor, "seek");
        self.cursor
    }
}

impl Default for SequenceSession {
    fn default() -> Self {
        Self::new()
    }
}
