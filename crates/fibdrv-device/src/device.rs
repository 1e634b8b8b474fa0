//! The Fibonacci device and its exclusive file handle.
//!
//! `FibDevice` owns a guarded slot that holds at most one live
//! `SequenceSession`. `open` tries to take the slot without waiting and
//! fails with [`DeviceError::Busy`] when another handle holds it. The
//! returned `FibFile` keeps the slot locked until it is dropped, so
//! detaching, returning early, and unwinding all release it.
//!
//! The handle exposes the character-device file operations:
//!
//! | Operation | Meaning |
//! |-----------|---------|
//! | `read`    | F(cursor), low 64 bits |
//! | `write`   | nanoseconds spent in the last `read`; payload ignored |
//! | `llseek`  | move the cursor, clamped to `[0, max_index]` |

use std::sync::Arc;
use std::time::Duration;

use parking_lot::{ArcMutexGuard, Mutex, RawMutex};
use tracing::{debug, info, warn};

use fibdrv_core::constants::{DEVICE_NAME, MAX_INDEX};

use crate::errors::DeviceError;
use crate::session::{SeekOrigin, SequenceSession};

type Slot = Mutex<Option<SequenceSession>>;

/// A registered Fibonacci device serving one client at a time.
pub struct FibDevice {
    name: String,
    max_index: u64,
    slot: Arc<Slot>,
}

impl FibDevice {
    /// Register the default `fibonacci` device bounded by [`MAX_INDEX`].
    #[must_use]
    pub fn new() -> Self {
        Self::register(DEVICE_NAME, MAX_INDEX)
    }

    /// Register a device under `name` serving indices `0..=max_index`.
    #[must_use]
    pub fn register(name: impl Into<String>, max_index: u64) -> Self {
        let name = name.into();
        info!(device = %name, max_index, "registered fibonacci device");
        Self {
            name,
            max_index,
            slot: Arc::new(Mutex::new(None)),
        }
    }

    /// Device name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Device node path.
    #[must_use]
    pub fn path(&self) -> String {
        format!("/dev/{}", self.name)
    }

    /// Highest index served.
    #[must_use]
    pub fn max_index(&self) -> u64 {
        self.max_index
    }

    /// Whether a session is currently attached.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.slot.is_locked()
    }

    /// Attach a new session, or fail immediately if one is live.
    pub fn open(&self) -> Result<FibFile, DeviceError> {
        let Some(mut guard) = self.slot.try_lock_arc() else {
            warn!(device = %self.name, "fibdrv is in use");
            return Err(DeviceError::Busy {
                name: self.name.clone(),
            });
        };

        *guard = Some(SequenceSession::with_max_index(self.max_index));
        info!(device = %self.name, "session attached");
        Ok(FibFile {
            guard,
            name: self.name.clone(),
            max_index: self.max_index,
        })
    }
}

impl Default for FibDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for FibDevice {
    fn drop(&mut self) {
        info!(device = %self.name, "unregistered fibonacci device");
    }
}

/// An open handle on a [`FibDevice`]. Holds the device exclusively.
pub struct FibFile {
    guard: ArcMutexGuard<RawMutex, Option<SequenceSession>>,
    name: String,
    max_index: u64,
}

impl FibFile {
    fn session(&mut self) -> &mut SequenceSession {
        let max_index = self.max_index;
        self.guard
            .get_or_insert_with(|| SequenceSession::with_max_index(max_index))
    }

    /// F(cursor), truncated to its low 64 bits.
    pub fn read(&mut self) -> u64 {
        self.session().read()
    }

    /// Ignore `payload` and return the nanoseconds spent in the last read.
    pub fn write(&mut self, payload: &[u8]) -> u64 {
        let elapsed = self.last_elapsed();
        debug!(device = %self.name, ignored = payload.len(), "elapsed query");
        u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX)
    }

    /// Reposition the cursor; see [`SequenceSession::seek`].
    pub fn llseek(&mut self, offset: i64, origin: SeekOrigin) -> u64 {
        self.session().seek(origin, offset)
    }

    /// Duration of the last read, zero before the first one.
    #[must_use]
    pub fn last_elapsed(&self) -> Duration {
        (*self.guard)
            .as_ref()
            .map_or(Duration::ZERO, SequenceSession::last_elapsed)
    }

    /// Current cursor.
    #[must_use]
    pub fn position(&self) -> u64 {
        (*self.guard).as_ref().map_or(0, SequenceSession::cursor)
    }

    /// Name of the device this handle is attached to.
    #[must_use]
    pub fn device_name(&self) -> &str {
        &self.name
    }
}

impl Drop for FibFile {
    fn drop(&mut self) {
        *self.guard = None;
        info!(device = %self.name, "session detached");
    }
}
